use std::fmt::Display;

use crate::error::Error;

/// Byte encoding of a single pixel.
///
/// Channels are always stored in the order blue, green, red and alpha, with
/// the trailing channels omitted by the narrower layouts. [`PixelLayout::Indexed8`]
/// stores one byte which is read back as a gray value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Indexed8,
    Rgb24,
    Argb32,
}

impl PixelLayout {
    pub fn from_bits_per_pixel(bits_per_pixel: u16) -> crate::Result<Self> {
        match bits_per_pixel {
            8 => Ok(PixelLayout::Indexed8),
            24 => Ok(PixelLayout::Rgb24),
            32 => Ok(PixelLayout::Argb32),
            other => Err(Error::UnsupportedPixelLayout(other)),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Indexed8 => 1,
            PixelLayout::Rgb24 => 3,
            PixelLayout::Argb32 => 4,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.channels()
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelLayout::Argb32)
    }
}

impl Display for PixelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelLayout::Indexed8 => write!(f, "Indexed8"),
            PixelLayout::Rgb24 => write!(f, "RGB24"),
            PixelLayout::Argb32 => write!(f, "ARGB32"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::PixelLayout;
    use crate::error::Error;

    #[test]
    fn channels_per_layout() {
        assert_eq!(PixelLayout::Indexed8.channels(), 1);
        assert_eq!(PixelLayout::Rgb24.channels(), 3);
        assert_eq!(PixelLayout::Argb32.channels(), 4);
    }

    #[test]
    fn only_argb_has_alpha() {
        assert!(!PixelLayout::Indexed8.has_alpha());
        assert!(!PixelLayout::Rgb24.has_alpha());
        assert!(PixelLayout::Argb32.has_alpha());
    }

    #[test]
    fn layout_from_supported_depths() {
        assert_eq!(
            PixelLayout::from_bits_per_pixel(8).unwrap(),
            PixelLayout::Indexed8
        );
        assert_eq!(
            PixelLayout::from_bits_per_pixel(24).unwrap(),
            PixelLayout::Rgb24
        );
        assert_eq!(
            PixelLayout::from_bits_per_pixel(32).unwrap(),
            PixelLayout::Argb32
        );
    }

    #[test]
    fn unsupported_depth_fails() {
        for bits in [0, 1, 4, 16, 48, 64] {
            match PixelLayout::from_bits_per_pixel(bits) {
                Err(Error::UnsupportedPixelLayout(reported)) => assert_eq!(reported, bits),
                _ => panic!("Depth of {} bits must be rejected", bits),
            }
        }
    }
}
