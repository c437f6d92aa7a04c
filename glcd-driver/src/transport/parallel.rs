//! Parallel GPIO transport

use embedded_hal::delay::DelayNs;
use glcd_hal::gpio::{Direction, GpioPort};

use super::{ByteKind, KindLine, Transport};
use crate::config::ParallelPins;

/// Settle delay that does nothing
///
/// Default for [`ParallelTransport`]: at typical core clocks the GPIO
/// writes themselves are slower than the controller's setup times.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettle;

impl DelayNs for NoSettle {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Eight data lines latched by EN/CS/RW strobes
///
/// Strobe order is a contract with the controller: EN up, CS down, RW down,
/// optional settle, then RW up, CS up, EN down. Reordering corrupts
/// transfers on real panels.
pub struct ParallelTransport<G, D = NoSettle> {
    gpio: G,
    pins: ParallelPins,
    kind: KindLine,
    settle: D,
    settle_ns: u32,
}

impl<G> ParallelTransport<G, NoSettle> {
    /// Create a parallel transport with no settle delay
    pub fn new(gpio: G, pins: ParallelPins) -> Self {
        Self {
            gpio,
            pins,
            kind: KindLine::new(pins.rs),
            settle: NoSettle,
            settle_ns: 0,
        }
    }
}

impl<G, D> ParallelTransport<G, D> {
    /// Hold the strobes asserted for `ns` nanoseconds on every byte
    ///
    /// Needed when the core clock outruns the controller's write pulse
    /// width. Zero disables the wait.
    pub fn with_settle_delay<D2: DelayNs>(self, delay: D2, ns: u32) -> ParallelTransport<G, D2> {
        ParallelTransport {
            gpio: self.gpio,
            pins: self.pins,
            kind: self.kind,
            settle: delay,
            settle_ns: ns,
        }
    }

    /// Pin map in use
    pub fn pins(&self) -> &ParallelPins {
        &self.pins
    }

    /// Give the GPIO port back
    pub fn release(self) -> G {
        self.gpio
    }
}

impl<G: GpioPort, D: DelayNs> Transport for ParallelTransport<G, D> {
    fn setup(&mut self) {
        for pin in [self.pins.en, self.pins.rw, self.pins.rs, self.pins.cs] {
            self.gpio.set_direction(pin, Direction::Output);
        }

        let data = self.pins.data;
        self.gpio
            .set_direction_mask(data.port(), data.mask(), Direction::Output);
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
        let data = self.pins.data;
        self.gpio.clear_mask(data.port(), data.mask());
        self.gpio.set_mask(data.port(), data.encode(byte));

        self.gpio.set_high(self.pins.en);
        self.gpio.set_low(self.pins.cs);
        self.gpio.set_low(self.pins.rw);

        if self.settle_ns > 0 {
            self.settle.delay_ns(self.settle_ns);
        }

        self.gpio.set_high(self.pins.rw);
        self.gpio.set_high(self.pins.cs);
        self.gpio.set_low(self.pins.en);
    }
}
