//! Serial transport

use glcd_hal::gpio::{Direction, GpioPort};
use glcd_hal::spi::SerialBus;

use super::{ByteKind, KindLine, ResetLine, Transport};
use crate::config::SerialPins;

/// One byte per chip-select cycle over a serial bus
///
/// Chip-select is a plain GPIO, asserted only for as long as it takes to
/// push a single byte.
pub struct SerialTransport<G, B> {
    gpio: G,
    bus: B,
    pins: SerialPins,
    kind: KindLine,
}

impl<G, B> SerialTransport<G, B> {
    /// Create a serial transport
    pub fn new(gpio: G, bus: B, pins: SerialPins) -> Self {
        Self {
            gpio,
            bus,
            pins,
            kind: KindLine::new(pins.dc),
        }
    }

    /// Pin map in use
    pub fn pins(&self) -> &SerialPins {
        &self.pins
    }

    /// Give the GPIO port and bus back
    pub fn release(self) -> (G, B) {
        (self.gpio, self.bus)
    }
}

impl<G: GpioPort, B: SerialBus> Transport for SerialTransport<G, B> {
    fn setup(&mut self) {
        self.bus.configure();
        self.bus.initialize();

        for pin in [self.pins.cs, self.pins.dc, self.pins.rst] {
            self.gpio.set_direction(pin, Direction::Output);
        }
    }

    fn select(&mut self) {
        self.gpio.set_low(self.pins.cs);
    }

    fn deselect(&mut self) {
        self.gpio.set_high(self.pins.cs);
    }

    fn set_kind(&mut self, kind: ByteKind) {
        self.kind.drive(&mut self.gpio, kind);
    }

    fn transmit(&mut self, byte: u8) {
        self.select();
        self.bus.send(&[byte]);
        self.deselect();
    }
}

impl<G: GpioPort, B> ResetLine for SerialTransport<G, B> {
    fn set_reset(&mut self, high: bool) {
        self.gpio.set_level(self.pins.rst, high);
    }
}
