pub mod error;
pub mod assets;
pub mod components;
pub mod sheet;

// Re-export key types at crate root for convenience
pub use error::SheetError;
pub use assets::texture::{Texture, Rgba8};
pub use assets::manifest::{SheetManifest, SheetDescriptor, FontDescriptor, AnimationDescriptor, FrameSelection};
pub use assets::registry::SheetRegistry;
pub use components::sprite::{Sprite, RenderState};
pub use components::animation::{Animation, FromFrames};
pub use sheet::sprite_sheet::{SpriteSheet, IndexPolicy};
pub use sheet::font::{SpriteFont, GlyphPlacement};
