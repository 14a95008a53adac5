//! Grid slicing and glyph mapping.

pub mod sprite_sheet;
pub mod font;
