//! Deterministic random streams.
//!
//! One seed plus a run number select a family of independent ChaCha
//! streams. Each randomized concern (positions, blackhole selection, flow
//! selection, motion) draws from its own stream, so changing how much
//! randomness one concern consumes never perturbs the others, and a
//! given `(seed, run)` always reproduces the same campaign.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Factory for the run's independent random streams.
#[derive(Clone, Copy, Debug)]
pub struct RngStreams {
    seed: u64,
    run: u64,
}

impl RngStreams {
    /// Create the stream family for `(seed, run)`.
    #[must_use]
    pub fn new(seed: u64, run: u64) -> Self {
        Self { seed, run }
    }

    /// The raw stream with the given id.
    #[must_use]
    pub fn stream(&self, id: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(id);
        rng
    }

    /// Stream feeding initial X coordinates and waypoint X draws.
    #[must_use]
    pub fn position_x(&self) -> ChaCha8Rng {
        self.stream(self.run * 2)
    }

    /// Stream feeding initial Y coordinates and waypoint Y draws.
    #[must_use]
    pub fn position_y(&self) -> ChaCha8Rng {
        self.stream(self.run * 2 + 1)
    }

    /// Stream selecting the ground-truth malicious set.
    #[must_use]
    pub fn blackholes(&self) -> ChaCha8Rng {
        self.stream(self.run * 10)
    }

    /// Stream selecting flow endpoints.
    #[must_use]
    pub fn flows(&self) -> ChaCha8Rng {
        self.stream(self.run * 20)
    }

    /// Stream feeding waypoint speeds.
    #[must_use]
    pub fn motion(&self) -> ChaCha8Rng {
        self.stream(self.run * 30)
    }
}
