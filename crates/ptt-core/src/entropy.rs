use std::{ops::Range, sync::Mutex};

use uuid::Uuid;

/// Source of the uniformly drawn amounts used by bank sync.
pub trait AmountSource: Send + Sync {
    /// Draws an integer uniformly from `range` (end exclusive).
    fn draw(&self, range: Range<u32>) -> u32;
}

/// Draws from the operating system RNG through v4 UUID generation.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsAmountSource;

impl AmountSource for OsAmountSource {
    fn draw(&self, range: Range<u32>) -> u32 {
        let span = range.end.saturating_sub(range.start).max(1) as u128;
        let bits = Uuid::new_v4().as_u128();
        range.start + (bits % span) as u32
    }
}

/// Replays a fixed sequence of amounts, cycling when exhausted. Values are
/// clamped into the requested range.
#[derive(Debug)]
pub struct ScriptedAmounts {
    values: Vec<u32>,
    cursor: Mutex<usize>,
}

impl ScriptedAmounts {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            cursor: Mutex::new(0),
        }
    }
}

impl AmountSource for ScriptedAmounts {
    fn draw(&self, range: Range<u32>) -> u32 {
        if self.values.is_empty() {
            return range.start;
        }
        let mut cursor = match self.cursor.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value.clamp(range.start, range.end.saturating_sub(1).max(range.start))
    }
}

/// Deterministic splitmix64 sequence used to build the seed dataset.
#[derive(Debug, Clone)]
pub(crate) struct SeedSequence(u64);

impl SeedSequence {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform index in `0..len`.
    pub(crate) fn index(&mut self, len: usize) -> usize {
        (self.next_u64() % len.max(1) as u64) as usize
    }

    pub(crate) fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}
