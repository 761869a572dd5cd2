//! Random source adapters.

use crate::task::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pseudo-random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a reproducible source from a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn below(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }
}

/// Replays fixed scripts of draws, cycling when a script runs out.
///
/// `unit` reads from the unit script and `below` from the integer script,
/// clamping each integer into range. An empty unit script yields values just
/// below one, so probability checks never fire; an empty integer script
/// yields zero.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    units: Vec<f64>,
    integers: Vec<u64>,
    unit_cursor: usize,
    integer_cursor: usize,
}

impl SequenceRandom {
    const UNIT_FALLBACK: f64 = 0.999_999;

    /// Creates a source replaying the given scripts.
    #[must_use]
    pub fn new(units: impl Into<Vec<f64>>, integers: impl Into<Vec<u64>>) -> Self {
        Self {
            units: units.into(),
            integers: integers.into(),
            unit_cursor: 0,
            integer_cursor: 0,
        }
    }

    /// Creates a source that only replays unit draws.
    #[must_use]
    pub fn units(units: impl Into<Vec<f64>>) -> Self {
        Self::new(units, Vec::new())
    }

    /// Creates a source that only replays integer draws.
    #[must_use]
    pub fn integers(integers: impl Into<Vec<u64>>) -> Self {
        Self::new(Vec::new(), integers)
    }
}

fn next_cycled<T: Copy>(script: &[T], cursor: &mut usize) -> Option<T> {
    let value = script.get(*cursor).or_else(|| script.first()).copied()?;
    *cursor = if *cursor + 1 >= script.len() {
        0
    } else {
        *cursor + 1
    };
    Some(value)
}

impl RandomSource for SequenceRandom {
    fn unit(&mut self) -> f64 {
        next_cycled(&self.units, &mut self.unit_cursor).unwrap_or(Self::UNIT_FALLBACK)
    }

    fn below(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        next_cycled(&self.integers, &mut self.integer_cursor)
            .unwrap_or_default()
            .min(upper - 1)
    }
}
