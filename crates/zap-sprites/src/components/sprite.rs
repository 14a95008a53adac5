use std::sync::Arc;

use glam::{UVec2, Vec2};

use crate::assets::texture::{Rgba8, Texture};

/// Per-instance drawing state. Every clone of a sprite owns its own copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Scale factor applied on draw (1.0 = native pixel size).
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Pivot in normalized sprite space (0.5, 0.5 = center).
    pub anchor: Vec2,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Opacity, 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Multiplicative color applied on draw.
    pub tint: Option<Rgba8>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            scale: Vec2::ONE,
            rotation: 0.0,
            anchor: Vec2::splat(0.5),
            flip_horizontal: false,
            flip_vertical: false,
            opacity: 1.0,
            tint: None,
        }
    }
}

/// A rectangular region of a shared texture.
///
/// Geometry is fixed at construction. `Clone` shares the texture and copies the
/// render state, so changing a clone never shows through the original.
#[derive(Debug, Clone)]
pub struct Sprite {
    texture: Arc<Texture>,
    origin: UVec2,
    size: UVec2,
    /// Mutable per-instance drawing state.
    pub render: RenderState,
}

impl Sprite {
    pub fn new(texture: Arc<Texture>, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            texture,
            origin: UVec2::new(x, y),
            size: UVec2::new(width, height),
            render: RenderState::default(),
        }
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    /// Top-left corner of the region, in texture pixels.
    pub fn origin(&self) -> UVec2 {
        self.origin
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// True when both sprites cover the same region of the same texture,
    /// regardless of render state.
    pub fn same_region(&self, other: &Sprite) -> bool {
        Arc::ptr_eq(&self.texture, &other.texture)
            && self.origin == other.origin
            && self.size == other.size
    }

    /// Normalized `[u, v, width, height]` of the region inside its texture.
    pub fn uv_rect(&self) -> [f32; 4] {
        let tex = self.texture.size().as_vec2().max(Vec2::ONE);
        let origin = self.origin.as_vec2() / tex;
        let size = self.size.as_vec2() / tex;
        [origin.x, origin.y, size.x, size.y]
    }

    /// Texel at `(x, y)` relative to the sprite's origin.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        self.texture.pixel(self.origin.x + x, self.origin.y + y)
    }

    /// Builder-style tint, used for color-variant glyphs.
    pub fn with_tint(mut self, tint: Rgba8) -> Self {
        self.render.tint = Some(tint);
        self
    }
}

impl PartialEq for Sprite {
    fn eq(&self, other: &Self) -> bool {
        self.same_region(other) && self.render == other.render
    }
}
