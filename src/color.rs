use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;

/// An 8 bit per channel RGB color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Pixel { red, green, blue }
    }

    /// Builds a pixel from unbounded channel values, clamping each into `[0, 255]`.
    pub fn clamped(red: i32, green: i32, blue: i32) -> Self {
        Pixel {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
        }
    }

    /// Euclidean distance between two colors in RGB space.
    ///
    /// The result is never rounded, callers compare it against an integer
    /// threshold converted to `f64`.
    pub fn color_distance(&self, other: &Pixel) -> f64 {
        let red = f64::from(self.red) - f64::from(other.red);
        let green = f64::from(self.green) - f64::from(other.green);
        let blue = f64::from(self.blue) - f64::from(other.blue);
        (red * red + green * green + blue * blue).sqrt()
    }

    pub fn channel_sum(&self) -> u16 {
        u16::from(self.red) + u16::from(self.green) + u16::from(self.blue)
    }

    pub(crate) fn map_channels<F>(&self, f: F) -> Self
    where
        F: Fn(u8) -> u8,
    {
        Pixel {
            red: f(self.red),
            green: f(self.green),
            blue: f(self.blue),
        }
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Pixel::WHITE
    }
}

impl Display for Pixel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl FromStr for Pixel {
    type Err = String;

    /// Parses `"r,g,b"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .split(',')
            .map(|component| component.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| format!("invalid color component in '{}': {}", s, e))?;
        match components.as_slice() {
            &[red, green, blue] => Ok(Pixel::new(red, green, blue)),
            _ => Err(format!(
                "expected three comma separated components, but got {}",
                components.len()
            )),
        }
    }
}

fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// A color triple whose components range from zero up to an explicit maximum.
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

impl RangeColorFormat<u16> {
    pub fn new(max: u16, red: u16, green: u16, blue: u16) -> crate::Result<Self> {
        for component in [red, green, blue] {
            if component > max {
                return Err(Error::ColorComponentOutOfRange(component, max));
            }
        }
        if max == 0 {
            return Err(Error::ColorComponentOutOfRange(0, max));
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }

    fn scale(&self, value: u16) -> u8 {
        (u32::from(value) * 255 / u32::from(self.max)) as u8
    }
}

impl From<&RangeColorFormat<u16>> for Pixel {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        Pixel {
            red: value.scale(value.red),
            green: value.scale(value.green),
            blue: value.scale(value.blue),
        }
    }
}

impl From<RangeColorFormat<u16>> for Pixel {
    fn from(value: RangeColorFormat<u16>) -> Self {
        Pixel::from(&value)
    }
}

#[cfg(test)]
mod test {
    use crate::error::Error;

    use super::{Pixel, RangeColorFormat};

    #[test]
    fn distance_between_black_and_white() {
        let distance = Pixel::BLACK.color_distance(&Pixel::WHITE);
        assert!(
            (distance - 441.672_955_930_063_7).abs() < 1e-9,
            "distance is wrong, was {}",
            distance
        );
    }

    #[test]
    fn distance_is_symmetric_and_unrounded() {
        let a = Pixel::new(10, 20, 30);
        let b = Pixel::new(11, 21, 31);
        assert_eq!(a.color_distance(&b), b.color_distance(&a));
        assert_eq!(a.color_distance(&b), 3_f64.sqrt());
        assert_eq!(a.color_distance(&a), 0.0);
    }

    #[test]
    fn clamped_limits_channels() {
        assert_eq!(Pixel::clamped(-4, 128, 300), Pixel::new(0, 128, 255));
    }

    #[test]
    fn parse_color_string() {
        let pixel: Pixel = "10, 40,75".parse().unwrap();
        assert_eq!(pixel, Pixel::new(10, 40, 75));
        assert!("10,40".parse::<Pixel>().is_err());
        assert!("10,40,256".parse::<Pixel>().is_err());
    }

    #[test]
    fn convert_range_color_white_to_pixel() {
        let range_color = RangeColorFormat::new(u16::MAX, u16::MAX, u16::MAX, u16::MAX).unwrap();
        assert_eq!(Pixel::from(&range_color), Pixel::WHITE);
    }

    #[test]
    fn convert_range_color_4bit_to_pixel() {
        let range_color = RangeColorFormat::new(0b1111, 0b0010, 0b0101, 0b1111).unwrap();
        assert_eq!(Pixel::from(range_color), Pixel::new(34, 85, 255));
    }

    #[test]
    fn create_range_color_out_of_range() {
        let result = RangeColorFormat::new(144, 12, 144, 145);
        assert!(matches!(
            result,
            Err(Error::ColorComponentOutOfRange(145, 144))
        ));
    }

    #[test]
    fn create_range_color_with_zero_max() {
        assert!(RangeColorFormat::new(0, 0, 0, 0).is_err());
    }
}
