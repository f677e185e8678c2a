//! Reference-color substitution tables.
//!
//! Source art is drawn in the eight pure reference colors. For each hour a
//! [`SubstitutionTable`] maps those references to palette colors at the
//! hour's brightness levels.

use std::collections::BTreeMap;

use serde::Serialize;
use starfield_types::{ColorName, ScheduleEntry};
use tracing::debug;

use crate::error::PaletteError;
use crate::palette::{NamedPalette, PaletteVariants, derive_variants};

/// Length of a `#rrggbb` token.
const HEX_TOKEN_LEN: usize = 7;

/// Reference hex to display hex, one pair per semantic color.
///
/// Serializes as a flat JSON object, e.g. `{"#000000": "#1f1f28", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubstitutionTable {
    entries: BTreeMap<&'static str, String>,
}

impl SubstitutionTable {
    /// The display hex substituted for `name`'s reference color.
    pub fn get(&self, name: ColorName) -> Option<&str> {
        self.entries.get(name.reference_hex()).map(String::as_str)
    }

    /// Number of pairs. Always 8 for a table built from a palette.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(reference, display)` pairs in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(reference, display)| (*reference, display.as_str()))
    }

    /// Replace every reference `#rrggbb` token in `text`.
    ///
    /// Matching is case-insensitive and stops at exactly six hex digits, so
    /// `#ff0000aa` is left alone. Substituted output is never rescanned.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(pos) = rest.find('#') {
            let (before, from_hash) = rest.split_at(pos);
            out.push_str(before);

            match self.replacement_at(from_hash) {
                Some(display) => {
                    out.push_str(display);
                    rest = from_hash.get(HEX_TOKEN_LEN..).unwrap_or_default();
                }
                None => {
                    out.push('#');
                    rest = from_hash.get(1..).unwrap_or_default();
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn replacement_at(&self, from_hash: &str) -> Option<&str> {
        let token = from_hash.get(..HEX_TOKEN_LEN)?;
        let continues = from_hash
            .get(HEX_TOKEN_LEN..)
            .and_then(|tail| tail.chars().next())
            .is_some_and(|c| c.is_ascii_hexdigit());
        if continues {
            return None;
        }
        self.entries
            .get(token.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }
}

impl PaletteVariants {
    /// Build the substitution table for one hour.
    ///
    /// White maps to the background variant of `background`. Black maps to
    /// the stroke variant of `foreground`. The remaining six map to the
    /// stroke variant of `foreground` when `squash_fill` is set, otherwise
    /// to their own fill variant.
    pub fn create_transform(
        &self,
        background: ColorName,
        foreground: ColorName,
        squash_fill: bool,
    ) -> Result<SubstitutionTable, PaletteError> {
        let mut entries = BTreeMap::new();
        for name in ColorName::ALL {
            let color = match name {
                ColorName::White => self.background.get(background)?,
                ColorName::Black => self.stroke.get(foreground)?,
                _ if squash_fill => self.stroke.get(foreground)?,
                own => self.fill.get(own)?,
            };
            entries.insert(name.reference_hex(), color.hex());
        }
        Ok(SubstitutionTable { entries })
    }
}

impl NamedPalette {
    /// Build the table for `entry` with explicit background and foreground
    /// colors. Levels come from the entry.
    pub fn create_transform(
        &self,
        background: ColorName,
        foreground: ColorName,
        entry: &ScheduleEntry,
        squash_fill: bool,
    ) -> Result<SubstitutionTable, PaletteError> {
        let variants = derive_variants(
            self,
            entry.luminance,
            entry.fill_luminance,
            entry.stroke_luminance,
        );
        let table = variants.create_transform(background, foreground, squash_fill)?;
        debug!(
            hour = entry.hour,
            phase = %entry.phase,
            %background,
            %foreground,
            squash_fill,
            "substitution table built"
        );
        Ok(table)
    }

    /// Build the table for `entry` using its own color names.
    pub fn transform_for(
        &self,
        entry: &ScheduleEntry,
        squash_fill: bool,
    ) -> Result<SubstitutionTable, PaletteError> {
        self.create_transform(
            entry.background_color_name,
            entry.foreground_color_name,
            entry,
            squash_fill,
        )
    }
}
