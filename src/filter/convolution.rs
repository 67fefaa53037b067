use super::{check_destination_shape, Kernel, RasterFilter};
use crate::{color::PrecisionColor, image::Raster, Result};

/// Single threaded horizontal convolution.
pub struct ConvolutionFilter {
    kernel: Kernel,
}

impl ConvolutionFilter {
    pub fn new(kernel: Kernel) -> Self {
        ConvolutionFilter { kernel }
    }
}

impl RasterFilter for ConvolutionFilter {
    fn apply_into(&self, source: &Raster, destination: &mut Raster) -> Result<()> {
        check_destination_shape(source, destination)?;
        log::info!(
            "Convolving {}x{} {} raster with {} taps",
            source.width(),
            source.height(),
            source.layout(),
            self.kernel.len()
        );
        convolve_rows(source, &self.kernel, 0, destination);
        Ok(())
    }
}

/// Convolves the source rows starting at `first_row` into every row of `band`.
///
/// `band` shares width, stride and layout with `source`; its height selects
/// how many rows are computed.
pub(crate) fn convolve_rows(source: &Raster, kernel: &Kernel, first_row: usize, band: &mut Raster) {
    for row in 0..band.height() {
        let y = (first_row + row) as isize;
        for x in 0..band.width() as isize {
            let mut color = PrecisionColor::zero();
            for (offset, weight) in kernel.taps() {
                color += weight * source.get(x + offset, y);
            }
            band.set(x, row as isize, &color);
        }
    }
}
