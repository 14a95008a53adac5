use bytemuck::{Pod, Zeroable};
use glam::UVec2;

use crate::error::SheetError;

/// A single RGBA8 texel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Decoded image backing one or more sprites.
///
/// Decoding is done by the host; this type only holds the resulting surface.
/// Sprites share it through an `Arc<Texture>` and never write to it.
#[derive(Debug, Clone)]
pub struct Texture {
    name: Option<String>,
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

/// Byte length of a `width * height` RGBA8 surface, if it fits in `usize`.
fn byte_len(width: u32, height: u32) -> Result<usize, SheetError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|texels| texels.checked_mul(4))
        .ok_or(SheetError::TextureTooLarge { width, height })
}

impl Texture {
    /// Wrap an already decoded surface. `pixels` is row-major, `width * height` long.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self, SheetError> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected / 4 {
            return Err(SheetError::InvalidPixelData {
                expected,
                actual: pixels.len() * 4,
            });
        }
        Ok(Self {
            name: None,
            width,
            height,
            pixels,
        })
    }

    /// Build from a tightly packed RGBA8 byte buffer.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, SheetError> {
        let expected = byte_len(width, height)?;
        if bytes.len() != expected {
            return Err(SheetError::InvalidPixelData {
                expected,
                actual: bytes.len(),
            });
        }
        // Rgba8 has alignment 1, so the cast cannot fail once the length matches.
        let pixels = bytemuck::cast_slice::<u8, Rgba8>(bytes).to_vec();
        Self::new(width, height, pixels)
    }

    /// Fully transparent surface of the given size.
    pub fn blank(width: u32, height: u32) -> Result<Self, SheetError> {
        let texels = byte_len(width, height)? / 4;
        Ok(Self {
            name: None,
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; texels],
        })
    }

    /// Attach a human-readable name (e.g. the source path).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Raw texel access. Returns `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
