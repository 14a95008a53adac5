pub mod texture;
pub mod manifest;
pub mod registry;
