//! Base colors and HSV value substitution.
//!
//! Colors are held in HSV. Changing brightness replaces only the value
//! channel, so value 0 is always black and value 1 always puts the
//! brightest RGB channel at full intensity, whatever the saturation.

use std::fmt;
use std::str::FromStr;

use palette::{FromColor, Hsv, Srgb};

/// A palette color, stored as HSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColor {
    hsv: Hsv,
}

impl BaseColor {
    /// Parse a `#rrggbb` / `#rgb` hex code (the `#` is optional) or a CSS
    /// color name.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let rgb = Srgb::<u8>::from_str(trimmed)
            .ok()
            .or_else(|| palette::named::from_str(&trimmed.to_ascii_lowercase()))?;
        Some(Self::from_rgb8(rgb.red, rgb.green, rgb.blue))
    }

    /// Build from 8-bit RGB channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        let rgb: Srgb<f32> = Srgb::new(red, green, blue).into_format();
        Self {
            hsv: Hsv::from_color(rgb),
        }
    }

    /// A copy with the HSV value replaced. `value` is clamped to `[0, 1]`.
    pub fn with_value(self, value: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let value = value.clamp(0.0, 1.0) as f32;
        let mut hsv = self.hsv;
        hsv.value = value;
        Self { hsv }
    }

    /// The HSV value channel.
    pub fn value(self) -> f64 {
        f64::from(self.hsv.value)
    }

    /// The HSV saturation channel.
    pub fn saturation(self) -> f64 {
        f64::from(self.hsv.saturation)
    }

    /// 8-bit RGB channels.
    pub fn rgb8(self) -> (u8, u8, u8) {
        let rgb: Srgb<u8> = Srgb::<f32>::from_color(self.hsv).into_format();
        (rgb.red, rgb.green, rgb.blue)
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (red, green, blue) = self.rgb8();
        write!(f, "#{red:02x}{green:02x}{blue:02x}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(BaseColor::parse("#7e9cd8").unwrap().hex(), "#7e9cd8");
        assert_eq!(BaseColor::parse("7E9CD8").unwrap().hex(), "#7e9cd8");
        assert_eq!(BaseColor::parse("#fff").unwrap().hex(), "#ffffff");
        assert_eq!(BaseColor::parse("CornflowerBlue").unwrap().hex(), "#6495ed");
        assert!(BaseColor::parse("not-a-color").is_none());
        assert!(BaseColor::parse("#12345").is_none());
    }

    #[test]
    fn value_zero_is_black() {
        for text in ["#c34043", "#ffffff", "#808080", "#76946a", "#000000"] {
            let color = BaseColor::parse(text).unwrap().with_value(0.0);
            assert_eq!(color.hex(), "#000000", "{text} at value 0");
        }
    }

    #[test]
    fn value_one_saturates_brightest_channel() {
        for text in ["#c34043", "#400000", "#76946a", "#090618", "#6a9589"] {
            let (r, g, b) = BaseColor::parse(text).unwrap().with_value(1.0).rgb8();
            assert_eq!(r.max(g).max(b), 0xff, "{text} at value 1");
        }
        assert_eq!(BaseColor::parse("#800000").unwrap().with_value(1.0).hex(), "#ff0000");
    }

    #[test]
    fn value_substitution_is_idempotent() {
        let base = BaseColor::parse("#957fb8").unwrap();
        for value in [0.0, 0.15, 0.6, 1.0] {
            let once = base.with_value(value);
            assert_eq!(once.with_value(value), once);
        }
    }

    #[test]
    fn saturation_is_preserved() {
        let base = BaseColor::parse("#c0a36e").unwrap();
        let dimmed = base.with_value(0.3);
        assert!((dimmed.saturation() - base.saturation()).abs() < 1e-6);
        assert!((dimmed.value() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let base = BaseColor::parse("#7e9cd8").unwrap();
        assert_eq!(base.with_value(-1.0).hex(), "#000000");
        assert_eq!(base.with_value(2.0), base.with_value(1.0));
    }
}
