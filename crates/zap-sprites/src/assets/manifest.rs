use std::collections::HashMap;
use serde::Deserialize;

use crate::error::SheetError;
use crate::sheet::sprite_sheet::IndexPolicy;

/// Describes how to slice textures into sheets and fonts, and which
/// animations to cut from them. Loaded from a JSON file at runtime.
///
/// Textures are referred to by key; decoding them is the host's job.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetManifest {
    /// Named sprite sheets.
    #[serde(default)]
    pub sheets: HashMap<String, SheetDescriptor>,
    /// Named bitmap fonts.
    #[serde(default)]
    pub fonts: HashMap<String, FontDescriptor>,
    /// Named animations cut from a sheet or font.
    #[serde(default)]
    pub animations: HashMap<String, AnimationDescriptor>,
}

/// Grid geometry of a sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetDescriptor {
    /// Texture key supplied by the host.
    pub texture: String,
    pub columns: u32,
    pub rows: u32,
    pub sprite_width: u32,
    pub sprite_height: u32,
    #[serde(default)]
    pub index_policy: IndexPolicy,
}

/// Grid geometry plus alphabet of a bitmap font.
#[derive(Debug, Clone, Deserialize)]
pub struct FontDescriptor {
    pub texture: String,
    /// Characters in the same row-major order as the glyph cells.
    pub alphabet: String,
    #[serde(default)]
    pub case_insensitive: bool,
    pub columns: u32,
    pub rows: u32,
    pub sprite_width: u32,
    pub sprite_height: u32,
    #[serde(default = "default_letter_spacing")]
    pub letter_spacing: f32,
}

/// Which cells of a sheet make up an animation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameSelection {
    /// Explicit flat indices, duplicates allowed.
    Indices(Vec<usize>),
    /// Half-open range `[begin, end)`.
    Between(usize, usize),
    /// Every cell, row-major.
    All,
}

/// A named animation.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationDescriptor {
    /// Name of a sheet or font in the same manifest.
    pub sheet: String,
    pub frames: FrameSelection,
    /// Milliseconds per frame.
    pub speed_ms: u32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_letter_spacing() -> f32 {
    1.0
}

fn default_looping() -> bool {
    true
}

impl SheetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let json = r#"{
            "sheets": {
                "hero": {
                    "texture": "hero.png",
                    "columns": 4, "rows": 2,
                    "sprite_width": 16, "sprite_height": 16,
                    "index_policy": "skip"
                }
            },
            "fonts": {
                "pixel": {
                    "texture": "font.png",
                    "alphabet": "ABCDEFGH",
                    "case_insensitive": true,
                    "columns": 4, "rows": 2,
                    "sprite_width": 8, "sprite_height": 8
                }
            },
            "animations": {
                "walk": { "sheet": "hero", "frames": { "between": [0, 4] }, "speed_ms": 100 },
                "hit": { "sheet": "hero", "frames": { "indices": [5, 6, 5] }, "speed_ms": 60, "looping": false },
                "blink": { "sheet": "pixel", "frames": "all", "speed_ms": 250 }
            }
        }"#;
        let manifest = SheetManifest::from_json(json).unwrap();

        let hero = &manifest.sheets["hero"];
        assert_eq!(hero.columns, 4);
        assert_eq!(hero.index_policy, IndexPolicy::Skip);

        let font = &manifest.fonts["pixel"];
        assert!(font.case_insensitive);
        assert_eq!(font.letter_spacing, 1.0);

        assert_eq!(manifest.animations["walk"].frames, FrameSelection::Between(0, 4));
        assert_eq!(manifest.animations["hit"].frames, FrameSelection::Indices(vec![5, 6, 5]));
        assert!(!manifest.animations["hit"].looping);
        assert_eq!(manifest.animations["blink"].frames, FrameSelection::All);
        assert!(manifest.animations["blink"].looping);
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = SheetManifest::from_json("{}").unwrap();
        assert!(manifest.sheets.is_empty());
        assert!(manifest.fonts.is_empty());
        assert!(manifest.animations.is_empty());
    }

    #[test]
    fn sheet_policy_defaults_to_permissive() {
        let json = r#"{ "sheets": { "s": {
            "texture": "t", "columns": 1, "rows": 1, "sprite_width": 4, "sprite_height": 4
        } } }"#;
        let manifest = SheetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sheets["s"].index_policy, IndexPolicy::Permissive);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SheetManifest::from_json("{ \"sheets\": 3 }").unwrap_err();
        assert!(matches!(err, SheetError::Manifest(_)));
    }
}
