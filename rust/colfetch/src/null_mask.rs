//! Per-row NULL flags produced by a vectorized extraction.

use colfetch_common::{Result, verify_index};

/// NULL flags for the rows of one bulk-extracted column.
///
/// Columns without NULLs (the common case) and all-NULL columns are kept in
/// compact form and only materialized into a byte array once the rows mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NullMask {
    /// All rows are non-null.
    Trivial(usize),

    /// All rows are null.
    Nulls(usize),

    /// One byte per row: `1` if the row is null, `0` otherwise.
    Bytes(Vec<u8>),
}

impl Default for NullMask {
    fn default() -> Self {
        NullMask::Trivial(0)
    }
}

impl NullMask {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Trivial(len) | Self::Nulls(len) => *len,
            Self::Bytes(flags) => flags.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_nulls(&self) -> usize {
        match self {
            Self::Trivial(_) => 0,
            Self::Nulls(len) => *len,
            Self::Bytes(flags) => flags.iter().filter(|&&b| b != 0).count(),
        }
    }

    pub fn count_non_nulls(&self) -> usize {
        self.len() - self.count_nulls()
    }

    /// Returns whether `row` is null, or a `Range` error past the last row.
    pub fn is_null(&self, row: usize) -> Result<bool> {
        verify_index!("row", row, self.len());
        Ok(match self {
            Self::Trivial(_) => false,
            Self::Nulls(_) => true,
            Self::Bytes(flags) => flags[row] != 0,
        })
    }

    pub fn push_null(&mut self) {
        match self {
            Self::Nulls(len) => *len += 1,
            Self::Trivial(0) => *self = Self::Nulls(1),
            Self::Trivial(len) => {
                let mut flags = vec![0u8; *len];
                flags.push(1);
                *self = Self::Bytes(flags);
            }
            Self::Bytes(flags) => flags.push(1),
        }
    }

    pub fn push_non_null(&mut self) {
        match self {
            Self::Trivial(len) => *len += 1,
            Self::Nulls(0) => *self = Self::Trivial(1),
            Self::Nulls(len) => {
                let mut flags = vec![1u8; *len];
                flags.push(0);
                *self = Self::Bytes(flags);
            }
            Self::Bytes(flags) => flags.push(0),
        }
    }

    pub fn push(&mut self, is_null: bool) {
        if is_null {
            self.push_null();
        } else {
            self.push_non_null();
        }
    }

    /// Shortens the mask to `len` rows; no-op if it is already shorter.
    pub fn truncate(&mut self, len: usize) {
        match self {
            Self::Trivial(n) | Self::Nulls(n) => *n = (*n).min(len),
            Self::Bytes(flags) => flags.truncate(len),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |row| match self {
            Self::Trivial(_) => false,
            Self::Nulls(_) => true,
            Self::Bytes(flags) => flags[row] != 0,
        })
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }
}

impl FromIterator<bool> for NullMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut mask = NullMask::default();
        for is_null in iter {
            mask.push(is_null);
        }
        mask
    }
}
