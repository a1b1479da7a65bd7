// Chunk: docs/chunks/buffer_config - Construction constants for the gap buffer

//! Construction-time configuration.
//!
//! The defaults reproduce the classic sizing: a 1024 byte content buffer and a
//! line index with one slot per ten bytes of capacity (never fewer than ten),
//! both doubling when they run out of room. The two buffers grow
//! independently; a text with many short lines can grow the line index
//! several times while the content buffer keeps its size.

use crate::error::ConfigError;

/// Default size of the content buffer in bytes.
pub const DEFAULT_CAPACITY: usize = 1024;

/// The line index gets `capacity / LINE_CAPACITY_DIVISOR` slots.
pub const LINE_CAPACITY_DIVISOR: usize = 10;

/// Lower bound on the number of line index slots.
pub const MIN_LINE_SLOTS: usize = 10;

/// Factor applied to both buffers when they grow.
pub const GROWTH_FACTOR: usize = 2;

/// Sizing parameters for a [`GapBuffer`](crate::GapBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Initial content capacity in bytes.
    pub capacity: usize,
    /// Bytes of content capacity per line index slot.
    pub line_capacity_divisor: usize,
    /// Minimum number of line index slots.
    pub min_line_slots: usize,
    /// Multiplier used whenever either buffer grows.
    pub growth_factor: usize,
}

impl BufferConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_line_capacity_divisor(mut self, divisor: usize) -> Self {
        self.line_capacity_divisor = divisor;
        self
    }

    pub fn with_min_line_slots(mut self, slots: usize) -> Self {
        self.min_line_slots = slots;
        self
    }

    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Checks that the parameters describe buffers that can actually grow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_capacity_divisor == 0 {
            return Err(ConfigError::ZeroLineCapacityDivisor);
        }
        if self.min_line_slots == 0 {
            return Err(ConfigError::ZeroMinLineSlots);
        }
        if self.growth_factor < 2 {
            return Err(ConfigError::GrowthFactorTooSmall(self.growth_factor));
        }
        Ok(())
    }

    /// Number of line index slots for a content buffer of `byte_capacity` bytes.
    pub fn line_slots_for(&self, byte_capacity: usize) -> usize {
        (byte_capacity / self.line_capacity_divisor).max(self.min_line_slots)
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            line_capacity_divisor: LINE_CAPACITY_DIVISOR,
            min_line_slots: MIN_LINE_SLOTS,
            growth_factor: GROWTH_FACTOR,
        }
    }
}
