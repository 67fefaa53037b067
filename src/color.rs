use std::ops::{Add, AddAssign, Mul, Sub};

const CHANNEL_MIN: f64 = 0.0;
const CHANNEL_MAX: f64 = 255.0;

/// An 8-bit per channel color as stored in a raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color32 {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color32 {
    pub fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Color32 {
            alpha,
            red,
            green,
            blue,
        }
    }

    pub fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Color32::new(u8::MAX, red, green, blue)
    }

    /// Rounded mean of red, green and blue, used for single channel layouts.
    pub fn gray(&self) -> u8 {
        let sum = self.red as u16 + self.green as u16 + self.blue as u16;
        ((sum + 1) / 3) as u8
    }
}

/// Color accumulator with unbounded, fractional channels.
///
/// Values may leave the 0 to 255 range while a weighted sum is built up.
/// They are only resolved by [`PrecisionColor::to_clamped_color`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrecisionColor {
    pub alpha: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl PrecisionColor {
    pub fn new(alpha: f64, red: f64, green: f64, blue: f64) -> Self {
        PrecisionColor {
            alpha,
            red,
            green,
            blue,
        }
    }

    pub fn zero() -> Self {
        PrecisionColor::default()
    }

    pub fn to_clamped_color(&self) -> Color32 {
        Color32 {
            alpha: clamp_channel(self.alpha),
            red: clamp_channel(self.red),
            green: clamp_channel(self.green),
            blue: clamp_channel(self.blue),
        }
    }
}

fn clamp_channel(value: f64) -> u8 {
    // NaN clamps to NaN and then casts to 0
    value.clamp(CHANNEL_MIN, CHANNEL_MAX).round_ties_even() as u8
}

impl From<Color32> for PrecisionColor {
    fn from(value: Color32) -> Self {
        PrecisionColor {
            alpha: value.alpha as f64,
            red: value.red as f64,
            green: value.green as f64,
            blue: value.blue as f64,
        }
    }
}

impl Add for PrecisionColor {
    type Output = PrecisionColor;

    fn add(self, rhs: PrecisionColor) -> Self::Output {
        PrecisionColor {
            alpha: self.alpha + rhs.alpha,
            red: self.red + rhs.red,
            green: self.green + rhs.green,
            blue: self.blue + rhs.blue,
        }
    }
}

impl AddAssign for PrecisionColor {
    fn add_assign(&mut self, rhs: PrecisionColor) {
        *self = *self + rhs;
    }
}

impl Sub for PrecisionColor {
    type Output = PrecisionColor;

    fn sub(self, rhs: PrecisionColor) -> Self::Output {
        PrecisionColor {
            alpha: self.alpha - rhs.alpha,
            red: self.red - rhs.red,
            green: self.green - rhs.green,
            blue: self.blue - rhs.blue,
        }
    }
}

impl Mul<PrecisionColor> for f64 {
    type Output = PrecisionColor;

    fn mul(self, rhs: PrecisionColor) -> Self::Output {
        PrecisionColor {
            alpha: self * rhs.alpha,
            red: self * rhs.red,
            green: self * rhs.green,
            blue: self * rhs.blue,
        }
    }
}
