//! Random source for obstacle gap heights
//!
//! The loop only ever asks for "a height in `[min, max]`", so tests and replays
//! can swap in a fixed sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies obstacle gap heights
pub trait GapSource {
    /// Next gap height, uniform in the inclusive range `[min, max]`
    fn next_gap(&mut self, min: f32, max: f32) -> f32;
}

/// Seeded PCG gap source
#[derive(Debug, Clone)]
pub struct SeededGaps {
    seed: u64,
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GapSource for SeededGaps {
    fn next_gap(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Cycles through a fixed list of heights (clamped into range)
#[derive(Debug, Clone)]
pub struct SequenceGaps {
    heights: Vec<f32>,
    next: usize,
}

impl SequenceGaps {
    pub fn new(heights: impl Into<Vec<f32>>) -> Self {
        Self {
            heights: heights.into(),
            next: 0,
        }
    }

    /// Always the same height
    pub fn constant(height: f32) -> Self {
        Self::new(vec![height])
    }
}

impl GapSource for SequenceGaps {
    fn next_gap(&mut self, min: f32, max: f32) -> f32 {
        if self.heights.is_empty() {
            return min;
        }
        let h = self.heights[self.next % self.heights.len()];
        self.next = (self.next + 1) % self.heights.len();
        h.clamp(min, max.max(min))
    }
}

impl<G: GapSource + ?Sized> GapSource for Box<G> {
    fn next_gap(&mut self, min: f32, max: f32) -> f32 {
        (**self).next_gap(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = SeededGaps::new(42);
        let mut b = SeededGaps::new(42);
        for _ in 0..20 {
            assert_eq!(a.next_gap(100.0, 500.0), b.next_gap(100.0, 500.0));
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_degenerate_range() {
        let mut gaps = SeededGaps::new(7);
        assert_eq!(gaps.next_gap(250.0, 250.0), 250.0);
    }

    #[test]
    fn test_sequence_cycles_and_clamps() {
        let mut gaps = SequenceGaps::new(vec![150.0, 900.0, 20.0]);
        assert_eq!(gaps.next_gap(100.0, 500.0), 150.0);
        assert_eq!(gaps.next_gap(100.0, 500.0), 500.0);
        assert_eq!(gaps.next_gap(100.0, 500.0), 100.0);
        assert_eq!(gaps.next_gap(100.0, 500.0), 150.0);
    }

    #[test]
    fn test_empty_sequence_falls_back_to_min() {
        let mut gaps = SequenceGaps::new(Vec::new());
        assert_eq!(gaps.next_gap(100.0, 500.0), 100.0);
    }

    proptest! {
        #[test]
        fn seeded_gaps_stay_in_range(seed in any::<u64>(), min in 0.0f32..400.0, span in 0.0f32..400.0) {
            let mut gaps = SeededGaps::new(seed);
            let max = min + span;
            for _ in 0..16 {
                let g = gaps.next_gap(min, max);
                prop_assert!(g >= min && g <= max);
            }
        }
    }
}
