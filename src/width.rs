use crate::error::{Error, Result};
use std::fmt;

const MAX_WIDTH: u32 = 32;

/// Number of bits every run length is written with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldWidth(u32);

impl FieldWidth {
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > MAX_WIDTH {
            return Err(Error::InvalidWidth(bits));
        }
        Ok(FieldWidth(bits))
    }

    #[inline(always)]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Longest run a single field can hold, `2^W - 1`.
    #[inline(always)]
    pub fn max(self) -> u32 {
        ((1u64 << self.0) - 1) as u32
    }

    pub fn count(self, value: u32) -> Result<Count> {
        if value > self.max() {
            return Err(Error::CountOutOfRange {
                value,
                max: self.max(),
            });
        }
        Ok(Count(value))
    }
}

impl Default for FieldWidth {
    /// 4 bits, max run 15.
    fn default() -> Self {
        FieldWidth(4)
    }
}

impl fmt::Display for FieldWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits (max run {})", self.0, self.max())
    }
}

/// A run length already checked against its field width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Count(pub(crate) u32);

impl Count {
    pub const ZERO: Count = Count(0);

    #[inline(always)]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<Count> for u32 {
    fn from(count: Count) -> u32 {
        count.0
    }
}
