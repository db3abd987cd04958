//! Injectable random source for crafting rolls
//!
//! Every `rand::Rng` is a `CraftRng`, so production code passes a seeded
//! `ChaCha8Rng` or `StdRng`. `SequenceRng` replays scripted values for
//! step-by-step scenarios.

use std::collections::VecDeque;

use rand::Rng;

/// Uniform random values needed by the resolution pipeline
pub trait CraftRng {
    /// Uniform integer in `min..=max`
    fn random_int(&mut self, min: i32, max: i32) -> i32;

    /// Uniform float in `[0.0, 1.0)`
    fn random_float(&mut self) -> f32;
}

impl<R: Rng + ?Sized> CraftRng for R {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn random_float(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

/// Scripted random source
///
/// Integers and floats are queued separately and consumed in order. Integers
/// are clamped into the requested range; an exhausted queue yields the
/// range minimum (ints) or `0.0` (floats).
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    ints: VecDeque<i32>,
    floats: VecDeque<f32>,
}

impl SequenceRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ints(mut self, ints: impl IntoIterator<Item = i32>) -> Self {
        self.ints.extend(ints);
        self
    }

    pub fn with_floats(mut self, floats: impl IntoIterator<Item = f32>) -> Self {
        self.floats.extend(floats);
        self
    }

    /// Queue rolls on the 0-100 scale used by property transfer
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f32>) -> Self {
        self.floats.extend(rolls.into_iter().map(|r| r / 100.0));
        self
    }

    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }

    pub fn remaining_floats(&self) -> usize {
        self.floats.len()
    }
}

impl CraftRng for SequenceRng {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        self.ints.pop_front().map(|v| v.clamp(min, max.max(min))).unwrap_or(min)
    }

    fn random_float(&mut self) -> f32 {
        self.floats.pop_front().unwrap_or(0.0)
    }
}
