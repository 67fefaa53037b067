use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    sync::Arc,
};

pub use cli::CLIParser;
pub use error::Error;
use filter::{Kernel, ParallelConvolutionFilter};
use image::{
    reader::ppm::PPMRasterReader, writer::ppm::PPMRasterWriter, RasterReader, RasterWriter,
};
use threadpool::ThreadPool;

mod cli;
pub mod color;
pub mod error;
pub mod filter;
pub mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    kernel_weights: Vec<f64>,
    number_of_threads: usize,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Reads a PPM or PGM file, blurs it horizontally and writes the result.
pub fn blur_ppm_file(arguments: &Arguments) -> Result<()> {
    let kernel = Kernel::new(arguments.kernel_weights.clone())?;
    let input_file = open_input_file(&arguments.input_file)?;
    let source = PPMRasterReader::new(BufReader::new(&input_file)).read_raster()?;
    log::info!(
        "Read {}x{} raster from '{}'",
        source.width(),
        source.height(),
        arguments.input_file.display()
    );
    let threadpool = ThreadPool::new(arguments.number_of_threads.max(1));
    let filter = ParallelConvolutionFilter::new(kernel, &threadpool);
    let output = filter.apply_shared(Arc::new(source))?;
    let output_file = open_output_file(&arguments.output_file)?;
    PPMRasterWriter::new(BufWriter::new(&output_file)).write_raster(&output)?;
    Ok(())
}
