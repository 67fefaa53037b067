use std::{
    ops::Range,
    sync::{mpsc, Arc},
};

use threadpool::ThreadPool;

use super::{check_destination_shape, convolution::convolve_rows, Kernel, RasterFilter};
use crate::{error::Error, image::Raster, Result};

type BandResult = (usize, Result<Raster>);
type BandFilter = fn(&Raster, &Kernel, Range<usize>) -> Result<Raster>;

/// Horizontal convolution that splits the raster into bands of rows and
/// filters every band as its own job on a thread pool.
///
/// Each job reads the shared source and writes a private band buffer, the
/// bands are then copied into the destination in row order. The result is
/// byte identical to [`super::ConvolutionFilter`].
pub struct ParallelConvolutionFilter<'a> {
    kernel: Arc<Kernel>,
    threadpool: &'a ThreadPool,
    rows_per_band: Option<usize>,
    band_filter: BandFilter,
}

impl<'a> ParallelConvolutionFilter<'a> {
    pub fn new(kernel: Kernel, threadpool: &'a ThreadPool) -> Self {
        ParallelConvolutionFilter {
            kernel: Arc::new(kernel),
            threadpool,
            rows_per_band: None,
            band_filter: filter_band,
        }
    }

    #[cfg(test)]
    fn with_band_filter(mut self, band_filter: BandFilter) -> Self {
        self.band_filter = band_filter;
        self
    }

    /// Fixes the band height instead of dividing rows evenly across workers.
    pub fn with_rows_per_band(mut self, rows_per_band: usize) -> Self {
        self.rows_per_band = Some(rows_per_band.max(1));
        self
    }

    fn band_height(&self, height: usize) -> usize {
        self.rows_per_band
            .unwrap_or_else(|| height.div_ceil(self.threadpool.max_count().max(1)))
            .max(1)
    }

    fn band_ranges(&self, height: usize) -> Vec<Range<usize>> {
        let band_height = self.band_height(height);
        (0..height)
            .step_by(band_height)
            .map(|first_row| first_row..(first_row + band_height).min(height))
            .collect()
    }

    /// Filters a source that is already shared, avoiding the copy made by
    /// [`RasterFilter::apply`].
    pub fn apply_shared(&self, source: Arc<Raster>) -> Result<Raster> {
        let mut destination = Raster::blank_like(&source)?;
        self.filter_bands(source, &mut destination)?;
        Ok(destination)
    }

    fn filter_bands(&self, source: Arc<Raster>, destination: &mut Raster) -> Result<()> {
        check_destination_shape(&source, destination)?;
        let bands = self.band_ranges(source.height());
        log::info!(
            "Convolving {}x{} {} raster with {} taps in {} bands",
            source.width(),
            source.height(),
            source.layout(),
            self.kernel.len(),
            bands.len()
        );

        let (sender, receiver) = mpsc::channel::<BandResult>();
        for (band_index, rows) in bands.iter().cloned().enumerate() {
            let sender = sender.clone();
            let source = Arc::clone(&source);
            let kernel = Arc::clone(&self.kernel);
            let band_filter = self.band_filter;
            self.threadpool.execute(move || {
                let band = band_filter(&source, &kernel, rows);
                let _ = sender.send((band_index, band));
            });
        }
        drop(sender);

        // destination is only touched once every band has arrived
        let mut finished: Vec<Option<Raster>> = vec![None; bands.len()];
        let mut received = 0;
        for (band_index, band) in receiver.iter() {
            finished[band_index] = Some(band?);
            log::debug!("Band {} of {} done", band_index + 1, bands.len());
            received += 1;
        }
        if received != bands.len() {
            log::error!("Only {} of {} bands were filtered", received, bands.len());
            return Err(Error::FilterWorkerFailed(received, bands.len()));
        }
        for (rows, band) in bands.iter().zip(finished.iter().flatten()) {
            destination.write_band(rows.start, band);
        }
        Ok(())
    }
}

fn filter_band(source: &Raster, kernel: &Kernel, rows: Range<usize>) -> Result<Raster> {
    let mut band = Raster::blank(
        source.width(),
        rows.len(),
        source.stride(),
        source.layout(),
    )?;
    convolve_rows(source, kernel, rows.start, &mut band);
    Ok(band)
}

impl RasterFilter for ParallelConvolutionFilter<'_> {
    fn apply_into(&self, source: &Raster, destination: &mut Raster) -> Result<()> {
        check_destination_shape(source, destination)?;
        self.filter_bands(Arc::new(source.clone()), destination)
    }
}
