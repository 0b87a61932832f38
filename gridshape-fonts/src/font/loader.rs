//! Font loading from the system font database.

use fontdb::{Database, Family, Query};

use super::types::FontData;
use super::FontList;
use crate::error::FontLoadError;

/// Convert a point size to pixels per em at `dpi`.
pub fn points_to_pixels(points: f32, dpi: f32) -> f32 {
    (points * dpi / 72.0).max(1.0)
}

/// Loads fonts by family name from a fontdb database.
pub struct FontLoader {
    db: Database,
}

impl FontLoader {
    /// Create a loader over all installed system fonts.
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system fonts", db.len());
        Self { db }
    }

    /// Create a loader over a prepared database (e.g. fonts loaded from a directory).
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Number of faces known to the database.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Load a regular-weight, upright face of `family_name`.
    pub fn load_family(&self, family_name: &str, pixel_size: f32) -> Result<FontData, FontLoadError> {
        self.load_family_with_style(family_name, None, None, pixel_size)
    }

    /// Load a face of `family_name` with a specific weight and style.
    pub fn load_family_with_style(
        &self,
        family_name: &str,
        weight: Option<fontdb::Weight>,
        style: Option<fontdb::Style>,
        pixel_size: f32,
    ) -> Result<FontData, FontLoadError> {
        let query = Query {
            families: &[Family::Name(family_name)],
            weight: weight.unwrap_or(fontdb::Weight::NORMAL),
            style: style.unwrap_or(fontdb::Style::Normal),
            ..Query::default()
        };

        let id = self
            .db
            .query(&query)
            .ok_or_else(|| FontLoadError::FamilyNotFound(family_name.to_string()))?;

        // Pass the face index through for TrueType Collection (.ttc) files where
        // multiple fonts share the same data but have different face indices.
        self.db
            .with_face_data(id, |bytes, face_index| {
                FontData::new_with_index(bytes.to_vec(), face_index)
            })
            .flatten()
            .map(|font| font.with_pixel_size(pixel_size))
            .ok_or_else(|| FontLoadError::InvalidFontData(family_name.to_string()))
    }

    /// Build a primary + fallback font list.
    ///
    /// Fallback families that are not installed are skipped. If the primary
    /// family itself is missing, the first loadable fallback is promoted to
    /// primary so that shaping can still proceed.
    pub fn load_font_list<S: AsRef<str>>(
        &self,
        primary_family: &str,
        fallback_families: &[S],
        pixel_size: f32,
    ) -> Result<FontList<FontData>, FontLoadError> {
        log::info!("Attempting to load primary font: {}", primary_family);
        let primary = match self.load_family(primary_family, pixel_size) {
            Ok(font) => {
                log::info!("Successfully loaded primary font: {}", primary_family);
                Some(font)
            }
            Err(e) => {
                log::warn!("{}, promoting first available fallback", e);
                None
            }
        };

        let mut fallbacks = Vec::new();
        for family_name in fallback_families.iter().map(AsRef::as_ref) {
            if family_name.eq_ignore_ascii_case(primary_family) {
                continue;
            }
            match self.load_family(family_name, pixel_size) {
                Ok(font) => {
                    log::debug!("Added fallback font: {}", family_name);
                    fallbacks.push(font);
                }
                Err(e) => log::debug!("Skipping fallback: {}", e),
            }
        }

        let primary = match primary {
            Some(font) => font,
            None if !fallbacks.is_empty() => fallbacks.remove(0),
            None => {
                return Err(FontLoadError::NoUsableFont {
                    primary: primary_family.to_string(),
                    fallbacks: fallback_families.len(),
                });
            }
        };

        log::info!("Loaded {} fallback fonts", fallbacks.len());
        Ok(FontList::new(primary, fallbacks))
    }
}

impl Default for FontLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_to_pixels() {
        assert_eq!(points_to_pixels(12.0, 96.0), 16.0);
        assert_eq!(points_to_pixels(12.0, 72.0), 12.0);
        assert_eq!(points_to_pixels(0.0, 96.0), 1.0);
    }

    #[test]
    fn test_empty_database_reports_missing_family() {
        let loader = FontLoader::with_database(Database::new());
        assert_eq!(loader.face_count(), 0);
        let err = loader.load_family("Nope Sans", 16.0).unwrap_err();
        assert!(matches!(err, FontLoadError::FamilyNotFound(ref name) if name == "Nope Sans"));
    }

    #[test]
    fn test_empty_database_has_no_usable_font() {
        let loader = FontLoader::with_database(Database::new());
        let err = loader
            .load_font_list("Nope Sans", &["Nope Mono", "Nope Serif"], 16.0)
            .unwrap_err();
        assert!(matches!(
            err,
            FontLoadError::NoUsableFont { fallbacks: 2, .. }
        ));
    }
}
