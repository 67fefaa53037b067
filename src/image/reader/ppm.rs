use std::io::Read;

use crate::color::{Color32, PrecisionColor};
use crate::error::Error;
use crate::image::{PixelLayout, Raster, RasterReader};
use crate::Result;

/// Rows produced by the reader are padded to this many bytes.
pub const ROW_ALIGNMENT: usize = 4;

/// Reads ASCII netpbm images. `P3` becomes an RGB24 raster and `P2` an
/// Indexed8 raster, with samples rescaled from the declared max value to 0..=255.
pub struct PPMRasterReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMRasterReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> RasterReader for PPMRasterReader<T> {
    fn read_raster(&mut self) -> Result<Raster> {
        let mut tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        // invalid UTF-8 fails later when the token is parsed
        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "P2 or P3 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Format {
    Graymap,
    Pixmap,
}

impl Format {
    fn layout(&self) -> PixelLayout {
        match self {
            Format::Graymap => PixelLayout::Indexed8,
            Format::Pixmap => PixelLayout::Rgb24,
        }
    }

    fn components(&self) -> usize {
        match self {
            Format::Graymap => 1,
            Format::Pixmap => 3,
        }
    }
}

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u16; 3],
    index: usize,
    components: usize,
}

impl Dot {
    fn new(components: usize) -> Self {
        Self {
            buffer: [u16::default(); 3],
            index: 0,
            components,
        }
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == self.components
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    fn to_color(self, max_value: u16) -> Color32 {
        let max_value = max_value as u32;
        let scale = |value: u16| ((value as u32 * 255 + max_value / 2) / max_value) as u8;
        match self.components {
            1 => {
                let gray = scale(self.buffer[0]);
                Color32::opaque(gray, gray, gray)
            }
            _ => Color32::opaque(
                scale(self.buffer[0]),
                scale(self.buffer[1]),
                scale(self.buffer[2]),
            ),
        }
    }
}

struct PPMParser<'a, T> {
    tokenizer: &'a mut T,
}

impl<'a, T> PPMParser<'a, T>
where
    T: Iterator<Item = String>,
{
    fn new(tokenizer: &'a mut T) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> Result<Raster> {
        let format = self.parse_header()?;
        let width = self.parse_width()?;
        let height = self.parse_height()?;
        let max_value = self.parse_max_value()?;
        let dots = self.parse_all_dots(format, max_value)?;
        Self::check_parsed_dots_length_match_header_information(&dots, width, height)?;

        let layout = format.layout();
        let stride = Raster::aligned_stride(width, layout, ROW_ALIGNMENT)?;
        let mut raster = Raster::blank(width, height, stride, layout)?;
        for (index, dot) in dots.into_iter().enumerate() {
            let x = (index % width) as isize;
            let y = (index / width) as isize;
            raster.set(x, y, &PrecisionColor::from(dot.to_color(max_value)));
        }
        Ok(raster)
    }

    fn check_parsed_dots_length_match_header_information(
        dots: &[Dot],
        width: usize,
        height: usize,
    ) -> Result<()> {
        match width.checked_mul(height) {
            Some(expected_number_of_dots) if dots.len() == expected_number_of_dots => Ok(()),
            _ => Err(Error::MismatchOfSizeBetweenHeaderAndValues),
        }
    }

    fn parse_header(&mut self) -> Result<Format> {
        let header = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            ))?;
        match header.as_str() {
            "P2" => Ok(Format::Graymap),
            "P3" => Ok(Format::Pixmap),
            _ => Err(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            )),
        }
    }

    fn parse_width(&mut self) -> Result<usize> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                WIDTH_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(WIDTH_HEADER_TOKEN_NAME))
    }

    fn parse_height(&mut self) -> Result<usize> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                HEIGHT_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(HEIGHT_HEADER_TOKEN_NAME))
    }

    fn parse_max_value(&mut self) -> Result<u16> {
        let max_value: u16 = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAX_VALUE_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))?;
        if max_value == 0 {
            return Err(Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME));
        }
        Ok(max_value)
    }

    fn parse_all_dots(&mut self, format: Format, max_value: u16) -> Result<Vec<Dot>> {
        let mut current_dot = Dot::new(format.components());
        let mut dots = Vec::new();
        for token in self.tokenizer.by_ref() {
            let component = Self::parse_color_value(&token, max_value)?;
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Self::check_pixel_was_complete(&current_dot)?;
        Ok(dots)
    }

    fn check_pixel_was_complete(dot: &Dot) -> Result<()> {
        if !dot.is_empty() {
            return Err(Error::IncompletePixelParsed(dot.index));
        }
        Ok(())
    }

    fn parse_color_value(token: &str, max_value: u16) -> Result<u16> {
        let value: u16 = token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))?;
        if value > max_value {
            return Err(Error::ColorValueExceedsMaxValue(value, max_value));
        }
        Ok(value)
    }
}
