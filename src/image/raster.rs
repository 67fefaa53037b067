use super::PixelLayout;
use crate::{
    color::{Color32, PrecisionColor},
    error::Error,
    Result,
};

/// A packed pixel buffer with a fixed row stride.
///
/// Pixels are addressed with signed coordinates. Reads outside the raster
/// yield [`PrecisionColor::zero`] and writes outside the raster are ignored,
/// which gives convolutions a zero padded border without special casing.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    stride: usize,
    layout: PixelLayout,
    bytes: Vec<u8>,
}

impl Raster {
    pub fn new(
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let expected_length = Self::check_shape(width, height, stride, layout)?;
        if bytes.len() != expected_length {
            return Err(Error::BufferLengthMismatch(expected_length, bytes.len()));
        }
        Ok(Raster {
            width,
            height,
            stride,
            layout,
            bytes,
        })
    }

    /// Allocates a zero filled raster, reporting allocation failure as an error.
    pub fn blank(width: usize, height: usize, stride: usize, layout: PixelLayout) -> Result<Self> {
        let length = Self::check_shape(width, height, stride, layout)?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(length)
            .map_err(|_| Error::OutputAllocationFailed(length))?;
        bytes.resize(length, 0);
        Ok(Raster {
            width,
            height,
            stride,
            layout,
            bytes,
        })
    }

    pub fn blank_like(other: &Raster) -> Result<Self> {
        Self::blank(other.width, other.height, other.stride, other.layout)
    }

    pub fn minimum_stride(width: usize, layout: PixelLayout) -> Result<usize> {
        width
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(Error::RasterTooLarge(width, 1))
    }

    /// Smallest stride holding a row that is a multiple of `alignment` bytes.
    pub fn aligned_stride(width: usize, layout: PixelLayout, alignment: usize) -> Result<usize> {
        let minimum = Self::minimum_stride(width, layout)?;
        if alignment <= 1 {
            return Ok(minimum);
        }
        minimum
            .div_ceil(alignment)
            .checked_mul(alignment)
            .ok_or(Error::RasterTooLarge(width, 1))
    }

    fn check_shape(
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(width, height));
        }
        let minimum_stride =
            Self::minimum_stride(width, layout).map_err(|_| Error::RasterTooLarge(width, height))?;
        if stride < minimum_stride {
            return Err(Error::StrideTooSmall(stride, minimum_stride));
        }
        stride
            .checked_mul(height)
            .ok_or(Error::RasterTooLarge(width, height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn has_same_shape(&self, other: &Raster) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.stride == other.stride
            && self.layout == other.layout
    }

    fn offset(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.stride * y + self.layout.bytes_per_pixel() * x)
    }

    pub fn get(&self, x: isize, y: isize) -> PrecisionColor {
        match self.offset(x, y) {
            Some(offset) => PrecisionColor::from(self.read_pixel(offset)),
            None => PrecisionColor::zero(),
        }
    }

    pub fn set(&mut self, x: isize, y: isize, color: &PrecisionColor) {
        if let Some(offset) = self.offset(x, y) {
            self.write_pixel(offset, color.to_clamped_color());
        }
    }

    fn read_pixel(&self, offset: usize) -> Color32 {
        let pixel = &self.bytes[offset..offset + self.layout.bytes_per_pixel()];
        match self.layout {
            PixelLayout::Indexed8 => Color32::opaque(pixel[0], pixel[0], pixel[0]),
            PixelLayout::Rgb24 => Color32::opaque(pixel[2], pixel[1], pixel[0]),
            PixelLayout::Argb32 => Color32::new(pixel[3], pixel[2], pixel[1], pixel[0]),
        }
    }

    fn write_pixel(&mut self, offset: usize, color: Color32) {
        let bytes_per_pixel = self.layout.bytes_per_pixel();
        let pixel = &mut self.bytes[offset..offset + bytes_per_pixel];
        match self.layout {
            PixelLayout::Indexed8 => pixel[0] = color.gray(),
            PixelLayout::Rgb24 => pixel.copy_from_slice(&[color.blue, color.green, color.red]),
            PixelLayout::Argb32 => {
                pixel.copy_from_slice(&[color.blue, color.green, color.red, color.alpha])
            }
        }
    }

    /// Copies all rows of `band` into this raster, starting at `first_row`.
    pub(crate) fn write_band(&mut self, first_row: usize, band: &Raster) {
        let start = first_row * self.stride;
        let end = start + band.bytes.len();
        self.bytes[start..end].copy_from_slice(&band.bytes);
    }
}
