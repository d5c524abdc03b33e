use rand::{rngs::StdRng, Rng, SeedableRng};

/// Draws per-tick price multipliers `1 + δ` with `δ ~ U[-A/2, +A/2]`.
///
/// The walk is multiplicative and unbounded: there is no floor or cap on
/// the resulting price. Any amplitude below 2 keeps every multiplier
/// strictly positive, so a positive price stays positive.
#[derive(Debug, Clone)]
pub struct PriceGenerator {
    rng: StdRng,
    half_amplitude: f64,
}

impl PriceGenerator {
    pub fn new(amplitude: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), amplitude)
    }

    pub fn seeded(seed: u64, amplitude: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), amplitude)
    }

    fn with_rng(rng: StdRng, amplitude: f64) -> Self {
        assert!(
            amplitude.is_finite() && (0.0..2.0).contains(&amplitude),
            "amplitude must be finite and within [0, 2)"
        );

        Self {
            rng,
            half_amplitude: amplitude / 2.0,
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.half_amplitude * 2.0
    }

    pub fn next_multiplier(&mut self) -> f64 {
        let delta = self
            .rng
            .gen_range(-self.half_amplitude..=self.half_amplitude);
        1.0 + delta
    }
}
