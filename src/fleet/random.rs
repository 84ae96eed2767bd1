use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    fn uniform(&mut self) -> f64;
}

/// Default source backed by `StdRng`.
pub struct Entropy {
    rng: StdRng,
}

impl Entropy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for Entropy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for Entropy {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
