//! GPIO port abstractions
//!
//! Pins are addressed by a physical (port, bit) pair rather than by owned
//! pin objects, matching how port-oriented MCUs expose their GPIO block:
//! one direction register and one set/clear register pair per port.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of bits in one GPIO port register
pub const PORT_WIDTH: u8 = 32;

/// Physical pin descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinId {
    /// GPIO port number
    pub port: u8,
    /// Bit index within the port (0-31)
    pub bit: u8,
}

impl PinId {
    /// Create a new pin descriptor
    pub const fn new(port: u8, bit: u8) -> Self {
        Self { port, bit }
    }

    /// Single-bit mask of this pin within its port register
    ///
    /// Out-of-range bits yield an empty mask.
    pub const fn mask(&self) -> u32 {
        if self.bit < PORT_WIDTH {
            1 << self.bit
        } else {
            0
        }
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// High-impedance input
    Input,
    /// Push-pull output
    Output,
}

/// GPIO port bank
///
/// Implementations write the port registers directly. None of the
/// operations can fail: the caller guarantees the descriptor is valid for
/// the target chip.
///
/// The masked operations default to fanning out over the single-pin
/// operations. Chip HALs should override them with one register write so
/// that a whole data bus changes at once.
pub trait GpioPort {
    /// Configure the pin as input or output
    fn set_direction(&mut self, pin: PinId, direction: Direction);

    /// Drive the pin high (logic 1)
    fn set_high(&mut self, pin: PinId);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self, pin: PinId);

    /// Drive the pin to a specific level
    fn set_level(&mut self, pin: PinId, high: bool) {
        if high {
            self.set_high(pin);
        } else {
            self.set_low(pin);
        }
    }

    /// Drive every pin in `mask` on `port` high
    fn set_mask(&mut self, port: u8, mask: u32) {
        for bit in bits(mask) {
            self.set_high(PinId::new(port, bit));
        }
    }

    /// Drive every pin in `mask` on `port` low
    fn clear_mask(&mut self, port: u8, mask: u32) {
        for bit in bits(mask) {
            self.set_low(PinId::new(port, bit));
        }
    }

    /// Configure every pin in `mask` on `port`
    fn set_direction_mask(&mut self, port: u8, mask: u32, direction: Direction) {
        for bit in bits(mask) {
            self.set_direction(PinId::new(port, bit), direction);
        }
    }
}

impl<T: GpioPort + ?Sized> GpioPort for &mut T {
    fn set_direction(&mut self, pin: PinId, direction: Direction) {
        (**self).set_direction(pin, direction);
    }

    fn set_high(&mut self, pin: PinId) {
        (**self).set_high(pin);
    }

    fn set_low(&mut self, pin: PinId) {
        (**self).set_low(pin);
    }

    fn set_mask(&mut self, port: u8, mask: u32) {
        (**self).set_mask(port, mask);
    }

    fn clear_mask(&mut self, port: u8, mask: u32) {
        (**self).clear_mask(port, mask);
    }

    fn set_direction_mask(&mut self, port: u8, mask: u32, direction: Direction) {
        (**self).set_direction_mask(port, mask, direction);
    }
}

/// Iterate the set bit indices of a mask, lowest first
fn bits(mask: u32) -> impl Iterator<Item = u8> {
    (0..PORT_WIDTH).filter(move |bit| mask & (1 << bit) != 0)
}
