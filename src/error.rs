use std::fmt::Display;

use crate::image::PixelLayout;

#[derive(Debug)]
pub enum Error {
    UnsupportedPixelLayout(u16),
    InvalidDimensions(usize, usize),
    RasterTooLarge(usize, usize),
    StrideTooSmall(usize, usize),
    BufferLengthMismatch(usize, usize),
    EmptyKernel,
    EvenKernelLength(usize),
    NonFiniteKernelWeight(usize),
    LayoutMismatch(PixelLayout, PixelLayout),
    DimensionMismatch,
    OutputAllocationFailed(usize),
    FilterWorkerFailed(usize, usize),
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ColorValueExceedsMaxValue(u16, u16),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteImageData(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPixelLayout(bits_per_pixel) => {
                write!(
                    f,
                    "Unsupported pixel layout with {} bits per pixel. Expected 8, 24 or 32.",
                    bits_per_pixel
                )
            }
            Self::InvalidDimensions(width, height) => {
                write!(
                    f,
                    "Raster dimensions must be greater than zero, but were {}x{}",
                    width, height
                )
            }
            Self::RasterTooLarge(width, height) => {
                write!(
                    f,
                    "Raster of {}x{} pixels exceeds the addressable buffer size",
                    width, height
                )
            }
            Self::StrideTooSmall(stride, minimum) => {
                write!(
                    f,
                    "Stride of {} bytes is smaller than the required {} bytes per row",
                    stride, minimum
                )
            }
            Self::BufferLengthMismatch(expected, actual) => {
                write!(
                    f,
                    "Raster buffer must hold {} bytes (stride * height), but holds {}",
                    expected, actual
                )
            }
            Self::EmptyKernel => write!(f, "Kernel must contain at least one weight"),
            Self::EvenKernelLength(length) => {
                write!(
                    f,
                    "Kernel must have an odd number of taps to be centered, but has {}",
                    length
                )
            }
            Self::NonFiniteKernelWeight(index) => {
                write!(f, "Kernel weight at tap {} is not a finite number", index)
            }
            Self::LayoutMismatch(source, destination) => {
                write!(
                    f,
                    "Source layout {} does not match destination layout {}",
                    source, destination
                )
            }
            Self::DimensionMismatch => {
                write!(
                    f,
                    "Source and destination raster differ in width, height or stride"
                )
            }
            Self::OutputAllocationFailed(bytes) => {
                write!(f, "Unable to allocate {} bytes for the output raster", bytes)
            }
            Self::FilterWorkerFailed(received, expected) => {
                write!(
                    f,
                    "Filter workers delivered {} of {} row bands",
                    received, expected
                )
            }
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Only {} components of the last pixel were present.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::ColorValueExceedsMaxValue(value, max_value) => {
                write!(
                    f,
                    "Color value {} exceeds the max value of {} declared in header",
                    value, max_value
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteImageData(error) => {
                write!(f, "Failed to write image data: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {}
