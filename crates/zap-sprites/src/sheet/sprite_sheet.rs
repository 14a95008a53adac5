//! Grid slicing of a texture into sprites.
//!
//! Sprites are stored in row-major order: index = row * columns + column.
//! Every frame-sequence builder and the font mapping rely on that order.

use std::sync::Arc;

use serde::Deserialize;

use crate::assets::texture::Texture;
use crate::components::animation::FromFrames;
use crate::components::sprite::Sprite;
use crate::error::SheetError;

/// What to do with an index that does not name a sprite when building a
/// frame sequence from an index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Fail the whole sequence with [`SheetError::FrameIndexOutOfRange`].
    Strict,
    /// Leave the index out of the sequence.
    Skip,
    /// Keep an absent slot in the sequence.
    #[default]
    Permissive,
}

/// A texture sliced into a fixed grid of equally sized sprites.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    texture: Arc<Texture>,
    columns: u32,
    rows: u32,
    sprite_width: u32,
    sprite_height: u32,
    sprites: Vec<Sprite>,
    index_policy: IndexPolicy,
}

impl SpriteSheet {
    /// Slice `texture` into `columns * rows` sprites of `sprite_width * sprite_height`.
    ///
    /// Fails if any dimension is zero or if the grid reaches past the texture.
    pub fn new(
        texture: Arc<Texture>,
        columns: u32,
        rows: u32,
        sprite_width: u32,
        sprite_height: u32,
    ) -> Result<Self, SheetError> {
        if columns == 0 || rows == 0 || sprite_width == 0 || sprite_height == 0 {
            return Err(SheetError::InvalidGridDimensions {
                columns,
                rows,
                sprite_width,
                sprite_height,
            });
        }

        let required_width = sprite_width as u64 * columns as u64;
        let required_height = sprite_height as u64 * rows as u64;
        if required_width > texture.width() as u64 || required_height > texture.height() as u64 {
            return Err(SheetError::OutOfBoundsSheet {
                required_width,
                required_height,
                texture_width: texture.width(),
                texture_height: texture.height(),
            });
        }

        let mut sprites = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for col in 0..columns {
                sprites.push(Sprite::new(
                    Arc::clone(&texture),
                    col * sprite_width,
                    row * sprite_height,
                    sprite_width,
                    sprite_height,
                ));
            }
        }

        log::debug!(
            "sliced {}x{} sheet of {}x{}px sprites from {:?}",
            columns,
            rows,
            sprite_width,
            sprite_height,
            texture.name().unwrap_or("<unnamed>"),
        );

        Ok(Self {
            texture,
            columns,
            rows,
            sprite_width,
            sprite_height,
            sprites,
            index_policy: IndexPolicy::default(),
        })
    }

    /// Set the policy used by [`Self::animation_by_indices`].
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    pub fn index_policy(&self) -> IndexPolicy {
        self.index_policy
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn sprite_width(&self) -> u32 {
        self.sprite_width
    }

    pub fn sprite_height(&self) -> u32 {
        self.sprite_height
    }

    /// Number of sprites (`columns * rows`).
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// True when the sheet holds no sprites.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Flat index of grid cell `(column, row)`.
    pub fn index_of(&self, column: u32, row: u32) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }

    /// Sprite at grid cell `(column, row)`.
    pub fn sprite_at(&self, column: u32, row: u32) -> Option<&Sprite> {
        self.index_of(column, row).and_then(|i| self.get_sprite(i))
    }

    /// Sprite at flat row-major `index`, or `None` when out of range.
    pub fn get_sprite(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    /// Cloned frames for `indices` under the sheet's index policy.
    pub fn frames_by_indices(&self, indices: &[usize]) -> Result<Vec<Option<Sprite>>, SheetError> {
        self.frames_by_indices_with(indices, self.index_policy)
    }

    /// Cloned frames for `indices` under an explicit policy.
    pub fn frames_by_indices_with(
        &self,
        indices: &[usize],
        policy: IndexPolicy,
    ) -> Result<Vec<Option<Sprite>>, SheetError> {
        let mut frames = Vec::with_capacity(indices.len());
        for &index in indices {
            match (self.get_sprite(index), policy) {
                (Some(sprite), _) => frames.push(Some(sprite.clone())),
                (None, IndexPolicy::Strict) => {
                    return Err(SheetError::FrameIndexOutOfRange {
                        index,
                        len: self.len(),
                    });
                }
                (None, IndexPolicy::Skip) => {
                    log::debug!("skipping frame index {} (sheet has {})", index, self.len());
                }
                (None, IndexPolicy::Permissive) => {
                    log::warn!(
                        "frame index {} out of range for sheet of {}; leaving an empty frame",
                        index,
                        self.len()
                    );
                    frames.push(None);
                }
            }
        }
        Ok(frames)
    }

    /// Cloned frames for the half-open range `[begin, end)`.
    ///
    /// Both bounds are clamped to the sheet; an inverted range is empty.
    pub fn frames_between(&self, begin: usize, end: usize) -> Vec<Sprite> {
        let end = end.min(self.len());
        let begin = begin.min(end);
        self.sprites[begin..end].to_vec()
    }

    /// Cloned copy of every sprite, row-major.
    pub fn frames_for_all(&self) -> Vec<Sprite> {
        self.sprites.clone()
    }

    /// Build an animation from an index list under the sheet's index policy.
    ///
    /// Duplicate indices are allowed. Every frame is a clone.
    pub fn animation_by_indices<E, A: FromFrames<E>>(
        &self,
        engine: E,
        indices: &[usize],
        speed_ms: u32,
    ) -> Result<A, SheetError> {
        self.animation_by_indices_with(engine, indices, speed_ms, self.index_policy)
    }

    /// Same as [`Self::animation_by_indices`] with a per-call policy.
    pub fn animation_by_indices_with<E, A: FromFrames<E>>(
        &self,
        engine: E,
        indices: &[usize],
        speed_ms: u32,
        policy: IndexPolicy,
    ) -> Result<A, SheetError> {
        let frames = self.frames_by_indices_with(indices, policy)?;
        Ok(A::from_frames(engine, frames, speed_ms))
    }

    /// Build an animation from the contiguous range `[begin, end)`.
    pub fn animation_between<E, A: FromFrames<E>>(
        &self,
        engine: E,
        begin: usize,
        end: usize,
        speed_ms: u32,
    ) -> A {
        let frames = self.frames_between(begin, end).into_iter().map(Some).collect();
        A::from_frames(engine, frames, speed_ms)
    }

    /// Build an animation spanning the whole sheet.
    pub fn animation_for_all<E, A: FromFrames<E>>(&self, engine: E, speed_ms: u32) -> A {
        let frames = self.sprites.iter().cloned().map(Some).collect();
        A::from_frames(engine, frames, speed_ms)
    }
}
