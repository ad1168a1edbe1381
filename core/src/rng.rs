//! Deterministic random number generation for synthetic populations.
//!
//! RULE: Population generation never calls a platform RNG.
//! All randomness flows through a `PopulationRng` seeded from the
//! caller's seed, so the same seed always yields the same customers.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct PopulationRng {
    inner: Pcg64Mcg,
}

impl PopulationRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Integer in [low, high).
    pub fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        low + self.next_u64_below(u64::from(high - low)) as u32
    }

    /// Float in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Normal sample via Box–Muller.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}
