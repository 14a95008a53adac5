pub mod sprite;
pub mod animation;
