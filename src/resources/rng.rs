//! Injectable randomness.
//!
//! Every random decision in the scene (re-roll policy, idle state choice,
//! spawn placement, collision trigger roll, launch bias) draws from the
//! [`SceneRng`] resource. Production uses [`FastRandom`]; tests install a
//! [`ScriptedRandom`] to force outcomes.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_f32(&mut self) -> f32;
}

/// `fastrand`-backed source.
pub struct FastRandom(fastrand::Rng);

impl FastRandom {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FastRandom {
    fn next_f32(&mut self) -> f32 {
        self.0.f32()
    }
}

/// Replays queued samples, then repeats `fallback` forever.
///
/// A fallback of `0.0` makes every [`SceneRng::chance`] succeed.
pub struct ScriptedRandom {
    queue: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRandom {
    pub fn constant(fallback: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback,
        }
    }

    pub fn with_sequence(mut self, samples: impl IntoIterator<Item = f32>) -> Self {
        self.queue.extend(samples);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

#[derive(Resource)]
pub struct SceneRng(Box<dyn RandomSource>);

impl Default for SceneRng {
    fn default() -> Self {
        Self::new(FastRandom::new())
    }
}

impl SceneRng {
    pub fn new(source: impl RandomSource + 'static) -> Self {
        Self(Box::new(source))
    }

    /// Uniform sample in `[0, 1)`.
    pub fn next(&mut self) -> f32 {
        self.0.next_f32().clamp(0.0, 1.0 - f32::EPSILON)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next() < p
    }

    /// Uniform sample in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next() * (hi - lo)
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Pick one item uniformly, `None` when empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }
}
