//! Step source adapters backed by `rand`.

use malaria_demo_core::engine::{MAX_STEP, MIN_STEP};
use malaria_demo_core::StepSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws steps uniformly from the engine's step range using the thread RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSteps;

impl StepSource for RandomSteps {
    fn next_step(&mut self) -> u8 {
        rand::rng().random_range(MIN_STEP..=MAX_STEP)
    }
}

/// Draws steps from a seeded RNG, giving the same progress sequence per seed.
#[derive(Debug, Clone)]
pub struct SeededSteps {
    rng: StdRng,
}

impl SeededSteps {
    /// Creates a step source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl StepSource for SeededSteps {
    fn next_step(&mut self) -> u8 {
        self.rng.random_range(MIN_STEP..=MAX_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_steps_in_range() {
        let mut steps = RandomSteps;
        for _ in 0..1000 {
            let step = steps.next_step();
            assert!((MIN_STEP..=MAX_STEP).contains(&step), "{step}");
        }
    }

    #[test]
    fn test_random_steps_cover_range() {
        let mut steps = RandomSteps;
        let mut seen = [false; 256];
        for _ in 0..5000 {
            seen[usize::from(steps.next_step())] = true;
        }
        assert!((MIN_STEP..=MAX_STEP).all(|s| seen[usize::from(s)]));
    }

    #[test]
    fn test_seeded_steps_repeat_per_seed() {
        let a: Vec<u8> = {
            let mut s = SeededSteps::new(42);
            (0..32).map(|_| s.next_step()).collect()
        };
        let b: Vec<u8> = {
            let mut s = SeededSteps::new(42);
            (0..32).map(|_| s.next_step()).collect()
        };
        assert_eq!(a, b);
        assert!(a.iter().all(|s| (MIN_STEP..=MAX_STEP).contains(s)));
    }
}
