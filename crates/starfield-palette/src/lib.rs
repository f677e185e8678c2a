//! Palette loading and color substitution for the Starfield renderer.
//!
//! - [`color`] -- [`BaseColor`] with HSV value replacement.
//! - [`palette`] -- [`NamedPalette`] file loading and brightness variants.
//! - [`transform`] -- Per-hour [`SubstitutionTable`] construction and
//!   application to SVG text.
//! - [`error`] -- [`PaletteError`].
//!
//! [`BaseColor`]: color::BaseColor
//! [`NamedPalette`]: palette::NamedPalette
//! [`SubstitutionTable`]: transform::SubstitutionTable
//! [`PaletteError`]: error::PaletteError

pub mod color;
pub mod error;
pub mod palette;
pub mod transform;

pub use color::BaseColor;
pub use error::PaletteError;
pub use crate::palette::{NamedPalette, PaletteFormat, PaletteVariant, PaletteVariants, derive_variants};
pub use transform::SubstitutionTable;
