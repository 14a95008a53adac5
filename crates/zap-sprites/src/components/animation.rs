//! Animation frame sequences built from a sprite sheet.
//!
//! Playback and timing belong to the host engine. This module only defines the
//! construction seam ([`FromFrames`]) and a plain [`Animation`] value that
//! carries the cloned frames and the per-frame duration.

use crate::components::sprite::Sprite;

/// Construct an animation from an ordered list of cloned frames.
///
/// `engine` is an opaque handle forwarded untouched. A `None` frame is an
/// index that did not resolve to a sprite (permissive index policy only).
pub trait FromFrames<E>: Sized {
    fn from_frames(engine: E, frames: Vec<Option<Sprite>>, frame_duration_ms: u32) -> Self;
}

/// Ordered, timed sequence of sprites.
#[derive(Debug, Clone)]
pub struct Animation<E> {
    engine: E,
    frames: Vec<Option<Sprite>>,
    /// Milliseconds per frame, uniform for every frame.
    pub frame_duration_ms: u32,
    /// Whether playback restarts after the last frame.
    pub looping: bool,
}

impl<E> FromFrames<E> for Animation<E> {
    fn from_frames(engine: E, frames: Vec<Option<Sprite>>, frame_duration_ms: u32) -> Self {
        Self {
            engine,
            frames,
            frame_duration_ms,
            looping: true,
        }
    }
}

impl<E> Animation<E> {
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn frames(&self) -> &[Option<Sprite>] {
        &self.frames
    }

    /// Frame at `index`. `None` both past the end and for absent slots.
    pub fn frame(&self, index: usize) -> Option<&Sprite> {
        self.frames.get(index).and_then(Option::as_ref)
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.frames.get_mut(index).and_then(Option::as_mut)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.frame_duration_ms as u64 * self.frames.len() as u64
    }

    /// True when every slot holds a sprite.
    pub fn is_complete(&self) -> bool {
        self.frames.iter().all(Option::is_some)
    }

    /// Positions of absent slots.
    pub fn gaps(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_none())
            .map(|(i, _)| i)
    }

    /// Present frames only, in order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.frames.iter().flatten()
    }

    pub fn into_frames(self) -> Vec<Option<Sprite>> {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::texture::Texture;
    use std::sync::Arc;

    fn sprite(x: u32) -> Sprite {
        Sprite::new(Arc::new(Texture::blank(32, 8).unwrap()), x, 0, 8, 8)
    }

    #[test]
    fn durations_and_counts() {
        let anim: Animation<()> =
            Animation::from_frames((), vec![Some(sprite(0)), Some(sprite(8)), Some(sprite(16))], 100);
        assert_eq!(anim.frame_count(), 3);
        assert_eq!(anim.total_duration_ms(), 300);
        assert!(anim.looping);
        assert!(anim.is_complete());
    }

    #[test]
    fn gaps_are_reported() {
        let anim: Animation<&str> =
            Animation::from_frames("engine", vec![Some(sprite(0)), None, Some(sprite(8)), None], 50);
        assert!(!anim.is_complete());
        assert_eq!(anim.gaps().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(anim.sprites().count(), 2);
        assert!(anim.frame(1).is_none());
        assert_eq!(*anim.engine(), "engine");
    }

    #[test]
    fn non_looping_builder() {
        let anim: Animation<()> = Animation::from_frames((), Vec::new(), 80).with_looping(false);
        assert!(anim.is_empty());
        assert!(!anim.looping);
        assert_eq!(anim.total_duration_ms(), 0);
    }
}
