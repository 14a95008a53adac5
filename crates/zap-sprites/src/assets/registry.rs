use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::manifest::{AnimationDescriptor, FrameSelection, SheetManifest};
use crate::assets::texture::Texture;
use crate::components::animation::Animation;
use crate::error::SheetError;
use crate::sheet::font::SpriteFont;
use crate::sheet::sprite_sheet::SpriteSheet;

/// Registry of named sheets, fonts and animation recipes, built from a
/// [`SheetManifest`] and the host's decoded textures.
pub struct SheetRegistry {
    sheets: HashMap<String, SpriteSheet>,
    fonts: HashMap<String, SpriteFont>,
    animations: HashMap<String, AnimationDescriptor>,
}

fn texture_for(
    textures: &HashMap<String, Arc<Texture>>,
    key: &str,
) -> Result<Arc<Texture>, SheetError> {
    textures
        .get(key)
        .cloned()
        .ok_or_else(|| SheetError::MissingTexture(key.to_string()))
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self {
            sheets: HashMap::new(),
            fonts: HashMap::new(),
            animations: HashMap::new(),
        }
    }

    /// Slice every sheet and font in `manifest`.
    ///
    /// Fails on the first missing texture or invalid geometry, when a sheet
    /// and a font share a name, and when an animation names a sheet that
    /// does not exist.
    pub fn from_manifest(
        manifest: &SheetManifest,
        textures: &HashMap<String, Arc<Texture>>,
    ) -> Result<Self, SheetError> {
        if let Some(name) = manifest.fonts.keys().find(|n| manifest.sheets.contains_key(*n)) {
            return Err(SheetError::DuplicateGridName(name.clone()));
        }

        let mut sheets = HashMap::with_capacity(manifest.sheets.len());
        for (name, desc) in &manifest.sheets {
            let sheet = SpriteSheet::new(
                texture_for(textures, &desc.texture)?,
                desc.columns,
                desc.rows,
                desc.sprite_width,
                desc.sprite_height,
            )?
            .with_index_policy(desc.index_policy);
            sheets.insert(name.clone(), sheet);
        }

        let mut fonts = HashMap::with_capacity(manifest.fonts.len());
        for (name, desc) in &manifest.fonts {
            let font = SpriteFont::new(
                texture_for(textures, &desc.texture)?,
                &desc.alphabet,
                desc.case_insensitive,
                desc.columns,
                desc.rows,
                desc.sprite_width,
                desc.sprite_height,
            )?
            .with_letter_spacing(desc.letter_spacing);
            fonts.insert(name.clone(), font);
        }

        let registry = Self {
            sheets,
            fonts,
            animations: manifest.animations.clone(),
        };
        for desc in registry.animations.values() {
            registry.grid(&desc.sheet)?;
        }

        log::info!(
            "sheet registry: {} sheets, {} fonts, {} animations",
            registry.sheets.len(),
            registry.fonts.len(),
            registry.animations.len()
        );
        Ok(registry)
    }

    /// Look up a sheet by name. Returns None if not found.
    pub fn sheet(&self, name: &str) -> Option<&SpriteSheet> {
        self.sheets.get(name)
    }

    /// Look up a font by name. Returns None if not found.
    pub fn font(&self, name: &str) -> Option<&SpriteFont> {
        self.fonts.get(name)
    }

    /// Sheets first, then the grids behind fonts.
    fn grid(&self, name: &str) -> Result<&SpriteSheet, SheetError> {
        self.sheets
            .get(name)
            .or_else(|| self.fonts.get(name).map(SpriteFont::sheet))
            .ok_or_else(|| SheetError::UnknownSheet(name.to_string()))
    }

    /// Build the named animation with fresh frame clones.
    pub fn animation<E>(&self, name: &str, engine: E) -> Result<Animation<E>, SheetError> {
        let desc = self
            .animations
            .get(name)
            .ok_or_else(|| SheetError::UnknownAnimation(name.to_string()))?;
        let sheet = self.grid(&desc.sheet)?;

        let anim: Animation<E> = match &desc.frames {
            FrameSelection::Indices(indices) => {
                sheet.animation_by_indices(engine, indices, desc.speed_ms)?
            }
            FrameSelection::Between(begin, end) => {
                sheet.animation_between(engine, *begin, *end, desc.speed_ms)
            }
            FrameSelection::All => sheet.animation_for_all(engine, desc.speed_ms),
        };
        Ok(anim.with_looping(desc.looping))
    }
}

impl Default for SheetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "sheets": {
            "hero": {
                "texture": "hero.png",
                "columns": 4, "rows": 2,
                "sprite_width": 16, "sprite_height": 16,
                "index_policy": "strict"
            }
        },
        "fonts": {
            "pixel": {
                "texture": "font.png",
                "alphabet": "abcd",
                "columns": 2, "rows": 2,
                "sprite_width": 8, "sprite_height": 8,
                "letter_spacing": 0.75
            }
        },
        "animations": {
            "walk": { "sheet": "hero", "frames": { "between": [0, 4] }, "speed_ms": 100 },
            "bad": { "sheet": "hero", "frames": { "indices": [1, 99] }, "speed_ms": 100 },
            "once": { "sheet": "pixel", "frames": "all", "speed_ms": 40, "looping": false }
        }
    }"#;

    fn textures() -> HashMap<String, Arc<Texture>> {
        let mut map = HashMap::new();
        map.insert("hero.png".to_string(), Arc::new(Texture::blank(64, 32).unwrap()));
        map.insert("font.png".to_string(), Arc::new(Texture::blank(16, 16).unwrap()));
        map
    }

    #[test]
    fn builds_from_manifest() {
        let manifest = SheetManifest::from_json(MANIFEST).unwrap();
        let reg = SheetRegistry::from_manifest(&manifest, &textures()).unwrap();

        let hero = reg.sheet("hero").expect("hero should exist");
        assert_eq!(hero.len(), 8);
        let font = reg.font("pixel").expect("pixel should exist");
        assert_eq!(font.letter_spacing(), 0.75);
        assert!(reg.sheet("pixel").is_none());
    }

    #[test]
    fn builds_named_animations() {
        let manifest = SheetManifest::from_json(MANIFEST).unwrap();
        let reg = SheetRegistry::from_manifest(&manifest, &textures()).unwrap();

        let walk = reg.animation("walk", ()).unwrap();
        assert_eq!(walk.frame_count(), 4);
        assert!(walk.looping);

        let once = reg.animation("once", ()).unwrap();
        assert_eq!(once.frame_count(), 4);
        assert!(!once.looping);
    }

    #[test]
    fn sheet_policy_applies_to_named_animations() {
        let manifest = SheetManifest::from_json(MANIFEST).unwrap();
        let reg = SheetRegistry::from_manifest(&manifest, &textures()).unwrap();
        let err = reg.animation("bad", ()).unwrap_err();
        assert!(matches!(err, SheetError::FrameIndexOutOfRange { index: 99, len: 8 }));
    }

    #[test]
    fn unknown_names() {
        let reg = SheetRegistry::new();
        assert!(reg.sheet("nonexistent").is_none());
        assert!(matches!(
            reg.animation("nope", ()).unwrap_err(),
            SheetError::UnknownAnimation(_)
        ));
    }

    #[test]
    fn missing_texture_fails() {
        let manifest = SheetManifest::from_json(MANIFEST).unwrap();
        let mut tex = textures();
        tex.remove("font.png");
        let err = SheetRegistry::from_manifest(&manifest, &tex).err().unwrap();
        assert!(matches!(err, SheetError::MissingTexture(key) if key == "font.png"));
    }

    #[test]
    fn animation_on_unknown_sheet_fails() {
        let json = r#"{ "animations": {
            "ghost": { "sheet": "nowhere", "frames": "all", "speed_ms": 10 }
        } }"#;
        let manifest = SheetManifest::from_json(json).unwrap();
        let err = SheetRegistry::from_manifest(&manifest, &HashMap::new()).err().unwrap();
        assert!(matches!(err, SheetError::UnknownSheet(name) if name == "nowhere"));
    }

    #[test]
    fn sheet_and_font_names_must_differ() {
        let json = r#"{
            "sheets": { "ui": {
                "texture": "hero.png", "columns": 4, "rows": 2,
                "sprite_width": 16, "sprite_height": 16
            } },
            "fonts": { "ui": {
                "texture": "font.png", "alphabet": "ab",
                "columns": 2, "rows": 2, "sprite_width": 8, "sprite_height": 8
            } }
        }"#;
        let manifest = SheetManifest::from_json(json).unwrap();
        let err = SheetRegistry::from_manifest(&manifest, &textures()).err().unwrap();
        assert!(matches!(err, SheetError::DuplicateGridName(name) if name == "ui"));
    }
}
