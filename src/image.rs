mod layout;
mod raster;
pub mod reader;
pub mod writer;

pub use layout::PixelLayout;
pub use raster::Raster;

use crate::Result;

pub trait RasterReader {
    fn read_raster(&mut self) -> Result<Raster>;
}

pub trait RasterWriter {
    fn write_raster(&mut self, raster: &Raster) -> Result<()>;
}
