//! Byte-to-pins mapping for the parallel bus
//!
//! An explicit ordered table: entry *i* is the port bit wired to data line
//! D*i*. All eight lines share one port so a byte can be placed with one
//! clear and one set of the port register.

use glcd_hal::gpio::PinId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of parallel data lines
pub const DATA_LINES: usize = 8;

/// Parallel data bus wiring (D0..D7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataBus {
    port: u8,
    bits: [u8; DATA_LINES],
}

impl DataBus {
    /// Create a data bus from the port bit of each line, D0 first
    pub const fn new(port: u8, bits: [u8; DATA_LINES]) -> Self {
        Self { port, bits }
    }

    /// D0..D7 on consecutive port bits starting at `first_bit`
    pub const fn contiguous(port: u8, first_bit: u8) -> Self {
        let mut bits = [0u8; DATA_LINES];
        let mut i = 0;
        while i < DATA_LINES {
            bits[i] = first_bit.saturating_add(i as u8);
            i += 1;
        }
        Self { port, bits }
    }

    /// Port all data lines live on
    pub const fn port(&self) -> u8 {
        self.port
    }

    /// Physical pin of data line D`index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`DATA_LINES`].
    pub const fn line(&self, index: usize) -> PinId {
        PinId::new(self.port, self.bits[index])
    }

    /// Port mask covering every data line
    pub const fn mask(&self) -> u32 {
        let mut mask = 0;
        let mut i = 0;
        while i < DATA_LINES {
            mask |= self.line(i).mask();
            i += 1;
        }
        mask
    }

    /// Port output word for `byte`: line D*i* set iff bit *i* of `byte` is set
    pub const fn encode(&self, byte: u8) -> u32 {
        let mut out = 0;
        let mut i = 0;
        while i < DATA_LINES {
            if byte & (1 << i) != 0 {
                out |= self.line(i).mask();
            }
            i += 1;
        }
        out
    }
}

/// Logical level of each data line for `byte`, D0 first
pub const fn line_levels(byte: u8) -> [bool; DATA_LINES] {
    let mut levels = [false; DATA_LINES];
    let mut i = 0;
    while i < DATA_LINES {
        levels[i] = byte & (1 << i) != 0;
        i += 1;
    }
    levels
}
