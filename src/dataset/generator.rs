//! Randomized dataset generation
//!
//! The generator is generic over its random source. Production runs seed a
//! [`StdRng`] from the wall clock so successive runs see different data;
//! tests pass a fixed seed or a scripted [`RngCore`].

use super::{Dataset, Record};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Characters the text field is drawn from
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Seed derived from the current wall-clock time in nanoseconds
pub fn clock_seed() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default() as u64
}

/// Produces [`Dataset`]s from a random source
#[derive(Debug)]
pub struct DatasetGenerator<R> {
    rng: R,
}

impl DatasetGenerator<StdRng> {
    /// Generator with a reproducible seed
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the wall clock
    pub fn from_clock() -> Self {
        Self::from_seed(clock_seed())
    }
}

impl<R: RngCore> DatasetGenerator<R> {
    /// Wrap a random source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `count` records whose text and sequence are `field_length` long
    pub fn generate(&mut self, count: usize, field_length: usize) -> Dataset {
        let mut dataset = Dataset::with_capacity(count);
        for _ in 0..count {
            dataset.push(self.record(field_length));
        }
        dataset
    }

    /// Generate a single record
    pub fn record(&mut self, field_length: usize) -> Record {
        let text = self.text(field_length);
        let sequence = (0..field_length).map(|_| self.rng.random::<i64>()).collect();
        Record {
            text,
            sequence,
            scalar: self.rng.random::<i64>(),
            fraction: self.rng.random::<f64>(),
        }
    }

    fn text(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
