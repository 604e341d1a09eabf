//! Font resolution against the installed-font catalog
//!
//! The renderer never reads font files itself. Style requests name a
//! family plus bold/italic flags; resolution queries the fontdb catalog
//! and either matches a face or reports not-found, in which case drawing
//! falls back to the platform sans-serif.

use cosmic_text::{Attrs, Family, Style, Weight};

/// Resolved font attributes used for shaping and as part of the text
/// cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Matched family name; `None` selects the platform sans-serif.
    pub family: Option<String>,
    /// Raw numeric weight (400 regular, 700 bold).
    pub weight: u16,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: None,
            weight: Weight::NORMAL.0,
            italic: false,
        }
    }
}

impl FontSpec {
    /// Shaping attributes for cosmic-text.
    pub fn attrs(&self) -> Attrs<'_> {
        let family = match &self.family {
            Some(name) => Family::Name(name),
            None => Family::SansSerif,
        };
        Attrs::new().family(family).weight(Weight(self.weight)).style(
            if self.italic {
                Style::Italic
            } else {
                Style::Normal
            },
        )
    }
}

/// Outcome of a font lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResolution {
    pub spec: FontSpec,
    /// False when the requested family had no matching face and the spec
    /// fell back to the default family.
    pub matched: bool,
}

/// Look up `(family, bold, italic)` in the catalog.
///
/// An empty family name means "use the default" and always matches.
pub fn resolve(db: &fontdb::Database, family: &str, bold: bool, italic: bool) -> FontResolution {
    let weight = if bold {
        fontdb::Weight::BOLD
    } else {
        fontdb::Weight::NORMAL
    };
    let style = if italic {
        fontdb::Style::Italic
    } else {
        fontdb::Style::Normal
    };

    if family.is_empty() {
        return FontResolution {
            spec: FontSpec {
                family: None,
                weight: weight.0,
                italic,
            },
            matched: true,
        };
    }

    let query = fontdb::Query {
        families: &[fontdb::Family::Name(family)],
        weight,
        stretch: fontdb::Stretch::Normal,
        style,
    };

    match db.query(&query) {
        Some(_) => FontResolution {
            spec: FontSpec {
                family: Some(family.to_string()),
                weight: weight.0,
                italic,
            },
            matched: true,
        },
        None => FontResolution {
            spec: FontSpec {
                family: None,
                weight: weight.0,
                italic,
            },
            matched: false,
        },
    }
}

/// Sorted, deduplicated list of installed family names, for a frontend's
/// font picker.
pub fn list_families(db: &fontdb::Database) -> Vec<String> {
    let mut families: Vec<String> = db
        .faces()
        .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .collect();
    families.sort();
    families.dedup();
    families
}

/// Families whose faces report fixed-pitch metrics.
pub fn monospaced_families(db: &fontdb::Database) -> Vec<String> {
    let mut families: Vec<String> = db
        .faces()
        .filter(|face| face.monospaced)
        .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .collect();
    families.sort();
    families.dedup();
    families
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_family_matches_default() {
        let db = fontdb::Database::new();
        let resolution = resolve(&db, "", true, false);
        assert!(resolution.matched);
        assert_eq!(resolution.spec.family, None);
        assert_eq!(resolution.spec.weight, Weight::BOLD.0);
    }

    #[test]
    fn unknown_family_reports_not_found() {
        let db = fontdb::Database::new();
        let resolution = resolve(&db, "No Such Family 123", false, true);
        assert!(!resolution.matched);
        assert_eq!(resolution.spec.family, None);
        assert!(resolution.spec.italic);
    }

    #[test]
    fn listings_on_an_empty_catalog() {
        let db = fontdb::Database::new();
        assert!(list_families(&db).is_empty());
        assert!(monospaced_families(&db).is_empty());
    }
}
