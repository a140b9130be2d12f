//! Seeded random test data.

use colfetch::{Blob, Date, DateTime, Time};

/// Random generator with a fixed seed, so failures reproduce.
pub struct DataGen {
    rng: fastrand::Rng,
}

impl DataGen {
    pub fn new(seed: u64) -> DataGen {
        DataGen {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Lowercase ASCII text of exactly `len` bytes.
    pub fn text(&mut self, len: usize) -> String {
        (0..len).map(|_| self.rng.lowercase()).collect()
    }

    pub fn blob(&mut self, len: usize) -> Blob {
        let mut bytes = vec![0u8; len];
        self.rng.fill(&mut bytes);
        Blob::from(bytes)
    }

    pub fn date(&mut self) -> Date {
        Date::new(
            self.rng.i32(1..=9999),
            self.rng.u32(1..=12),
            self.rng.u32(1..=28),
        )
    }

    pub fn time(&mut self) -> Time {
        Time::new(self.rng.u32(0..24), self.rng.u32(0..60), self.rng.u32(0..60))
    }

    pub fn datetime(&mut self) -> DateTime {
        DateTime::new(self.date(), self.time(), self.rng.u32(0..1_000_000_000))
    }

    /// `Some(value)` or, with probability `null_ratio`, `None`.
    pub fn nullable<T>(&mut self, null_ratio: f64, value: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.rng.f64() < null_ratio {
            None
        } else {
            Some(value(self))
        }
    }

    pub fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }
}
