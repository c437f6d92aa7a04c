//! Byte transports
//!
//! A transport moves one byte at a time to the display controller and
//! owns the lines around it: chip-select, the command/data selector and,
//! for the serial variant, the reset line.
//!
//! - [`SerialTransport`] - one chip-select cycle per byte over a [`SerialBus`]
//! - [`ParallelTransport`] - eight data lines latched by EN/CS/RW strobes
//!
//! [`SerialBus`]: glcd_hal::SerialBus

mod parallel;
mod serial;

pub use parallel::{NoSettle, ParallelTransport};
pub use serial::SerialTransport;

use glcd_hal::gpio::{GpioPort, PinId};

/// Command/data flag carried by every transmitted byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteKind {
    /// Controller instruction (selector line low)
    Command,
    /// Display RAM data (selector line high)
    Data,
}

impl ByteKind {
    /// Level of the data/command selector line for this kind
    pub const fn level(self) -> bool {
        matches!(self, ByteKind::Data)
    }
}

/// Capability to move single bytes to the display controller
pub trait Transport {
    /// Configure the peripheral and drive every owned line as an output
    fn setup(&mut self);

    /// Assert chip-select
    fn select(&mut self);

    /// Deassert chip-select
    fn deselect(&mut self);

    /// Drive the data/command selector for the next byte
    fn set_kind(&mut self, kind: ByteKind);

    /// Move exactly one byte with the current selector level
    fn transmit(&mut self, byte: u8);

    /// Move one byte flagged as `kind`
    fn write(&mut self, byte: u8, kind: ByteKind) {
        self.set_kind(kind);
        self.transmit(byte);
    }

    /// Move one controller instruction
    fn command(&mut self, byte: u8) {
        self.write(byte, ByteKind::Command);
    }

    /// Move one byte of display data
    fn data(&mut self, byte: u8) {
        self.write(byte, ByteKind::Data);
    }
}

/// Transport with a hardware reset line wired to the controller
pub trait ResetLine {
    /// Drive the reset line (`false` holds the controller in reset)
    fn set_reset(&mut self, high: bool);
}

/// Data/command selector that only toggles when the kind changes
#[derive(Debug, Clone, Copy)]
struct KindLine {
    pin: PinId,
    current: Option<ByteKind>,
}

impl KindLine {
    const fn new(pin: PinId) -> Self {
        Self { pin, current: None }
    }

    fn drive<G: GpioPort>(&mut self, gpio: &mut G, kind: ByteKind) {
        if self.current != Some(kind) {
            gpio.set_level(self.pin, kind.level());
            self.current = Some(kind);
        }
    }
}
