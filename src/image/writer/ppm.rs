use std::io::Write;

use crate::error::Error;
use crate::image::{PixelLayout, Raster, RasterWriter};
use crate::Result;

const MAX_VALUE: u8 = u8::MAX;

/// Writes rasters as ASCII netpbm. Indexed8 rasters become `P2` graymaps,
/// all other layouts `P3` pixmaps with the alpha channel dropped.
pub struct PPMRasterWriter<T: Write> {
    writer: T,
}

impl<T: Write> PPMRasterWriter<T> {
    pub fn new(writer: T) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, raster: &Raster) -> std::io::Result<()> {
        let magic_number = match raster.layout() {
            PixelLayout::Indexed8 => "P2",
            PixelLayout::Rgb24 | PixelLayout::Argb32 => "P3",
        };
        writeln!(self.writer, "{}", magic_number)?;
        writeln!(self.writer, "{} {}", raster.width(), raster.height())?;
        writeln!(self.writer, "{}", MAX_VALUE)
    }

    fn write_rows(&mut self, raster: &Raster) -> std::io::Result<()> {
        for y in 0..raster.height() as isize {
            let row = (0..raster.width() as isize)
                .map(|x| Self::format_dot(raster, x, y))
                .collect::<Vec<String>>()
                .join("  ");
            writeln!(self.writer, "{}", row)?;
        }
        Ok(())
    }

    fn format_dot(raster: &Raster, x: isize, y: isize) -> String {
        let color = raster.get(x, y).to_clamped_color();
        match raster.layout() {
            PixelLayout::Indexed8 => color.gray().to_string(),
            PixelLayout::Rgb24 | PixelLayout::Argb32 => {
                format!("{} {} {}", color.red, color.green, color.blue)
            }
        }
    }
}

impl<T: Write> RasterWriter for PPMRasterWriter<T> {
    fn write_raster(&mut self, raster: &Raster) -> Result<()> {
        self.write_header(raster)
            .and_then(|_| self.write_rows(raster))
            .and_then(|_| self.writer.flush())
            .map_err(Error::FailedToWriteImageData)
    }
}
