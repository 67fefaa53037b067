pub mod convolution;
pub mod kernel;
pub mod parallel;

pub use convolution::ConvolutionFilter;
pub use kernel::Kernel;
pub use parallel::ParallelConvolutionFilter;

use crate::{error::Error, image::Raster, Result};

pub trait RasterFilter {
    /// Filters `source` into `destination`, which must share its shape.
    fn apply_into(&self, source: &Raster, destination: &mut Raster) -> Result<()>;

    fn apply(&self, source: &Raster) -> Result<Raster> {
        let mut destination = Raster::blank_like(source)?;
        self.apply_into(source, &mut destination)?;
        Ok(destination)
    }
}

fn check_destination_shape(source: &Raster, destination: &Raster) -> Result<()> {
    if source.layout() != destination.layout() {
        return Err(Error::LayoutMismatch(source.layout(), destination.layout()));
    }
    if !source.has_same_shape(destination) {
        return Err(Error::DimensionMismatch);
    }
    Ok(())
}
