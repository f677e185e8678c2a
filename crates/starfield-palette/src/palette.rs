//! Named palettes and their brightness variants.
//!
//! A palette file is YAML or TOML with a `colors.normal` table holding the
//! eight semantic colors:
//!
//! ```yaml
//! colors:
//!   normal:
//!     black: "#090618"
//!     red: "#c34043"
//!     # ... yellow, green, cyan, blue, magenta, white
//! ```
//!
//! Values may be hex codes or CSS color names. Extra keys are kept.

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, File, FileFormat};
use starfield_types::ColorName;
use tracing::{debug, info};

use crate::color::BaseColor;
use crate::error::PaletteError;

/// Dotted path of the color table inside a palette file.
const COLOR_TABLE_KEY: &str = "colors.normal";

/// Supported palette file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl PaletteFormat {
    /// Pick a format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, PaletteError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(PaletteError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    const fn file_format(self) -> FileFormat {
        match self {
            Self::Yaml => FileFormat::Yaml,
            Self::Toml => FileFormat::Toml,
        }
    }
}

/// A loaded palette: semantic color name to base color.
///
/// Always contains the eight [`ColorName`] keys.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPalette {
    colors: BTreeMap<String, BaseColor>,
}

impl NamedPalette {
    /// Load a palette file.
    ///
    /// The extension is checked before the file is touched, so an
    /// unsupported format is reported even for a missing file.
    pub fn load(path: &Path) -> Result<Self, PaletteError> {
        let format = PaletteFormat::from_path(path)?;
        if !path.is_file() {
            return Err(PaletteError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let config = Config::builder()
            .add_source(File::from(path).format(format.file_format()))
            .build()?;
        let palette = Self::from_config(&config)?;

        info!(
            path = %path.display(),
            ?format,
            colors = palette.colors.len(),
            "palette loaded"
        );
        Ok(palette)
    }

    /// Parse palette text in the given format.
    pub fn parse(contents: &str, format: PaletteFormat) -> Result<Self, PaletteError> {
        let config = Config::builder()
            .add_source(File::from_str(contents, format.file_format()))
            .build()?;
        Self::from_config(&config)
    }

    /// Build from raw name/value pairs. All eight semantic names must be
    /// present.
    pub fn from_entries(entries: &BTreeMap<String, String>) -> Result<Self, PaletteError> {
        for name in ColorName::ALL {
            if !entries.contains_key(name.as_str()) {
                return Err(PaletteError::MissingColorKey {
                    key: format!("{COLOR_TABLE_KEY}.{name}"),
                });
            }
        }

        let colors = entries
            .iter()
            .map(|(key, value)| {
                BaseColor::parse(value)
                    .map(|color| (key.clone(), color))
                    .ok_or_else(|| PaletteError::InvalidColor {
                        key: key.clone(),
                        value: value.clone(),
                    })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Self { colors })
    }

    fn from_config(config: &Config) -> Result<Self, PaletteError> {
        let entries: BTreeMap<String, String> = match config.get(COLOR_TABLE_KEY) {
            Ok(entries) => entries,
            Err(config::ConfigError::NotFound(_)) => {
                return Err(PaletteError::MissingColorKey {
                    key: COLOR_TABLE_KEY.to_owned(),
                });
            }
            Err(other) => return Err(other.into()),
        };
        Self::from_entries(&entries)
    }

    /// The base color for `name`.
    pub fn get(&self, name: ColorName) -> Result<BaseColor, PaletteError> {
        lookup(&self.colors, name.as_str())
    }

    /// All palette keys, including any beyond the eight semantic names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// A copy with every color's HSV value set to `value`.
    pub fn variant(&self, value: f64) -> PaletteVariant {
        let colors = self
            .colors
            .iter()
            .map(|(key, color)| (key.clone(), color.with_value(value)))
            .collect();
        PaletteVariant { value, colors }
    }
}

/// A palette with one brightness applied to every color.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteVariant {
    value: f64,
    colors: BTreeMap<String, BaseColor>,
}

impl PaletteVariant {
    /// The HSV value this variant was derived with.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The adjusted color for `name`.
    pub fn get(&self, name: ColorName) -> Result<BaseColor, PaletteError> {
        lookup(&self.colors, name.as_str())
    }

    /// The adjusted color for an arbitrary palette key, as `#rrggbb`.
    pub fn hex_of(&self, key: &str) -> Result<String, PaletteError> {
        lookup(&self.colors, key).map(BaseColor::hex)
    }
}

/// The three variants used to paint one hour.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteVariants {
    /// Applied to the background.
    pub background: PaletteVariant,
    /// Applied to shape fills.
    pub fill: PaletteVariant,
    /// Applied to outlines.
    pub stroke: PaletteVariant,
}

/// Derive background, fill and stroke variants of `palette`.
pub fn derive_variants(
    palette: &NamedPalette,
    background_lum: f64,
    fill_lum: f64,
    stroke_lum: f64,
) -> PaletteVariants {
    debug!(background_lum, fill_lum, stroke_lum, "deriving palette variants");
    PaletteVariants {
        background: palette.variant(background_lum),
        fill: palette.variant(fill_lum),
        stroke: palette.variant(stroke_lum),
    }
}

fn lookup(colors: &BTreeMap<String, BaseColor>, key: &str) -> Result<BaseColor, PaletteError> {
    colors
        .get(key)
        .copied()
        .ok_or_else(|| PaletteError::UnknownColor {
            name: key.to_owned(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const KANAGAWA: &str = r##"
colors:
  normal:
    black: "#090618"
    red: "#c34043"
    green: "#76946a"
    yellow: "#c0a36e"
    blue: "#7e9cd8"
    magenta: "#957fb8"
    cyan: "#6a9589"
    white: "#c8c093"
"##;

    #[test]
    fn format_from_extension() {
        assert_eq!(PaletteFormat::from_path(Path::new("a.yml")).unwrap(), PaletteFormat::Yaml);
        assert_eq!(PaletteFormat::from_path(Path::new("a.YAML")).unwrap(), PaletteFormat::Yaml);
        assert_eq!(PaletteFormat::from_path(Path::new("a.toml")).unwrap(), PaletteFormat::Toml);
        assert!(matches!(
            PaletteFormat::from_path(Path::new("a.json")),
            Err(PaletteError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            PaletteFormat::from_path(Path::new("palette")),
            Err(PaletteError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn parse_yaml_palette() {
        let palette = NamedPalette::parse(KANAGAWA, PaletteFormat::Yaml).unwrap();
        assert_eq!(palette.get(ColorName::Blue).unwrap().hex(), "#7e9cd8");
        assert_eq!(palette.names().count(), 8);
    }

    #[test]
    fn parse_toml_palette_with_named_colors() {
        let toml = r##"
[colors.normal]
black = "black"
red = "crimson"
green = "#00aa00"
yellow = "gold"
blue = "navy"
magenta = "purple"
cyan = "teal"
white = "ivory"
orange = "#ff8800"
"##;
        let palette = NamedPalette::parse(toml, PaletteFormat::Toml).unwrap();
        assert_eq!(palette.get(ColorName::Red).unwrap().hex(), "#dc143c");
        assert_eq!(palette.names().count(), 9);
    }

    #[test]
    fn missing_table_is_missing_key() {
        let err = NamedPalette::parse("name: empty\n", PaletteFormat::Yaml).unwrap_err();
        assert!(
            matches!(err, PaletteError::MissingColorKey { ref key } if key == "colors.normal"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn missing_color_is_missing_key() {
        let yaml = KANAGAWA.replace("    cyan: \"#6a9589\"\n", "");
        let err = NamedPalette::parse(&yaml, PaletteFormat::Yaml).unwrap_err();
        assert!(
            matches!(err, PaletteError::MissingColorKey { ref key } if key == "colors.normal.cyan"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn invalid_color_is_rejected() {
        let yaml = KANAGAWA.replace("#c34043", "not-red");
        let err = NamedPalette::parse(&yaml, PaletteFormat::Yaml).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColor { ref key, .. } if key == "red"));
    }

    #[test]
    fn variants_force_value() {
        let palette = NamedPalette::parse(KANAGAWA, PaletteFormat::Yaml).unwrap();
        let variants = derive_variants(&palette, 0.0, 1.0, 0.5);

        assert_eq!(variants.background.value(), 0.0);
        assert_eq!(variants.background.get(ColorName::Blue).unwrap().hex(), "#000000");

        let bright = variants.fill.get(ColorName::Blue).unwrap();
        let (r, g, b) = bright.rgb8();
        assert_eq!(r.max(g).max(b), 0xff);

        let half = variants.stroke.get(ColorName::Magenta).unwrap();
        assert!((half.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn variants_do_not_alias_base() {
        let palette = NamedPalette::parse(KANAGAWA, PaletteFormat::Yaml).unwrap();
        let _ = derive_variants(&palette, 0.0, 0.0, 0.0);
        assert_eq!(palette.get(ColorName::White).unwrap().hex(), "#c8c093");
    }

    #[test]
    fn unknown_variant_key_is_an_error() {
        let palette = NamedPalette::parse(KANAGAWA, PaletteFormat::Yaml).unwrap();
        let variant = palette.variant(0.5);
        assert!(matches!(
            variant.hex_of("orange"),
            Err(PaletteError::UnknownColor { ref name }) if name == "orange"
        ));
    }
}
