use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::Card;
use crate::engine::RandomSource;

/// Системный RNG (thread_rng). Для живой игры.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut rand::thread_rng());
    }

    fn roll(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn pick(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper.max(1))
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            inner: StdRng::from_seed(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }

    fn roll(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn pick(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper.max(1))
    }
}
