//! Bitmap fonts over a sprite sheet.
//!
//! The alphabet is authored in the same row-major order as the glyph grid:
//! `alphabet[k]` is drawn by `sprites[k]`.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;

use crate::assets::texture::{Rgba8, Texture};
use crate::components::animation::FromFrames;
use crate::components::sprite::Sprite;
use crate::error::SheetError;
use crate::sheet::sprite_sheet::SpriteSheet;

/// A glyph positioned by [`SpriteFont::layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Top-left corner of the glyph.
    pub position: Vec2,
    pub sprite: Sprite,
}

/// A sprite sheet whose cells are glyphs addressed by character.
#[derive(Debug, Clone)]
pub struct SpriteFont {
    sheet: SpriteSheet,
    alphabet: Vec<char>,
    case_insensitive: bool,
    letter_spacing: f32,
}

impl SpriteFont {
    /// Slice `texture` like [`SpriteSheet::new`] and bind `alphabet` to the cells.
    ///
    /// The alphabet may not have more characters than the grid has cells.
    pub fn new(
        texture: Arc<Texture>,
        alphabet: &str,
        case_insensitive: bool,
        columns: u32,
        rows: u32,
        sprite_width: u32,
        sprite_height: u32,
    ) -> Result<Self, SheetError> {
        let sheet = SpriteSheet::new(texture, columns, rows, sprite_width, sprite_height)?;
        Self::from_sheet(sheet, alphabet, case_insensitive)
    }

    /// Bind an alphabet to an existing sheet.
    pub fn from_sheet(
        sheet: SpriteSheet,
        alphabet: &str,
        case_insensitive: bool,
    ) -> Result<Self, SheetError> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.len() > sheet.len() {
            return Err(SheetError::AlphabetTooLong {
                alphabet_len: alphabet.len(),
                cells: sheet.len(),
            });
        }

        let font = Self {
            sheet,
            alphabet,
            case_insensitive,
            letter_spacing: 1.0,
        };
        font.warn_on_collisions();
        log::debug!(
            "font with {} glyphs over {} cells (case_insensitive={})",
            font.alphabet.len(),
            font.sheet.len(),
            case_insensitive,
        );
        Ok(font)
    }

    /// Horizontal advance as a fraction of the cell width (1.0 = monospace cell).
    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn get_sprite(&self, index: usize) -> Option<&Sprite> {
        self.sheet.get_sprite(index)
    }

    pub fn animation_by_indices<E, A: FromFrames<E>>(
        &self,
        engine: E,
        indices: &[usize],
        speed_ms: u32,
    ) -> Result<A, SheetError> {
        self.sheet.animation_by_indices(engine, indices, speed_ms)
    }

    pub fn animation_between<E, A: FromFrames<E>>(
        &self,
        engine: E,
        begin: usize,
        end: usize,
        speed_ms: u32,
    ) -> A {
        self.sheet.animation_between(engine, begin, end, speed_ms)
    }

    pub fn animation_for_all<E, A: FromFrames<E>>(&self, engine: E, speed_ms: u32) -> A {
        self.sheet.animation_for_all(engine, speed_ms)
    }

    fn fold(&self, c: char) -> char {
        if self.case_insensitive {
            // Multi-char lowercase forms keep only their first char.
            c.to_lowercase().next().unwrap_or(c)
        } else {
            c
        }
    }

    fn warn_on_collisions(&self) {
        let mut seen: HashMap<char, usize> = HashMap::with_capacity(self.alphabet.len());
        for (k, &c) in self.alphabet.iter().enumerate() {
            let key = self.fold(c);
            if let Some(prev) = seen.insert(key, k) {
                log::warn!(
                    "glyph {:?} at position {} replaces position {} after case folding",
                    c,
                    k,
                    prev
                );
            }
        }
    }

    /// Fresh character-to-glyph mapping; every value is a new clone.
    ///
    /// Keys are lower-cased when the font is case-insensitive. When folding
    /// makes two alphabet entries collide the later position wins.
    pub fn text_sprites(&self) -> HashMap<char, Sprite> {
        log::trace!("building glyph map for {} characters", self.alphabet.len());
        let mut map = HashMap::with_capacity(self.alphabet.len());
        for (&c, sprite) in self.alphabet.iter().zip(self.sheet.sprites()) {
            map.insert(self.fold(c), sprite.clone());
        }
        map
    }

    /// Position of the glyph for `c`, consistent with [`Self::text_sprites`].
    fn glyph_index(&self, c: char) -> Option<usize> {
        let key = self.fold(c);
        self.alphabet.iter().rposition(|&a| self.fold(a) == key)
    }

    /// Clone of the glyph drawing `c`.
    pub fn glyph(&self, c: char) -> Option<Sprite> {
        self.glyph_index(c)
            .and_then(|k| self.sheet.get_sprite(k))
            .cloned()
    }

    /// Clone of the glyph for `c` carrying `tint` in its render state.
    pub fn glyph_tinted(&self, c: char, tint: Rgba8) -> Option<Sprite> {
        self.glyph(c).map(|sprite| sprite.with_tint(tint))
    }

    fn advance(&self) -> f32 {
        self.sheet.sprite_width() as f32 * self.letter_spacing
    }

    /// Place glyphs for `text` starting at `origin` (top-left).
    ///
    /// Characters missing from the alphabet produce no glyph but still
    /// advance the cursor. `'\n'` starts a new line one cell lower.
    pub fn layout(&self, text: &str, origin: Vec2) -> Vec<GlyphPlacement> {
        let line_height = self.sheet.sprite_height() as f32;
        let mut placements = Vec::with_capacity(text.len());
        let mut cursor = origin;

        for ch in text.chars() {
            if ch == '\n' {
                cursor.x = origin.x;
                cursor.y += line_height;
                continue;
            }
            if let Some(sprite) = self.glyph(ch) {
                placements.push(GlyphPlacement {
                    ch,
                    position: cursor,
                    sprite,
                });
            }
            cursor.x += self.advance();
        }

        placements
    }

    /// Width and height covered by `text` when laid out.
    pub fn measure(&self, text: &str) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let widest = text
            .split('\n')
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let lines = text.split('\n').count();
        Vec2::new(
            widest as f32 * self.advance(),
            lines as f32 * self.sheet.sprite_height() as f32,
        )
    }
}
