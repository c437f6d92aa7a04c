//! Instrumented pin/bus/delay doubles sharing one event log

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use glcd_hal::gpio::{Direction, GpioPort, PinId, PORT_WIDTH};
use glcd_hal::spi::SerialBus;
use heapless::Vec;

use crate::config::{ParallelPins, MAX_PORTS};
use crate::databus::DATA_LINES;
use crate::framebuffer::FrameBuffer;
use crate::transport::ByteKind;

pub const CAPACITY: usize = 1024;

/// Everything the driver did to the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Dir(PinId, Direction),
    High(PinId),
    Low(PinId),
    Configure,
    Initialize,
    Send(u8),
    /// Wait, in nanoseconds
    Delay(u64),
    SelectScreen(u8),
    Clear,
}

/// Ordered event log with a simulated clock
pub struct Recorder {
    events: RefCell<Vec<Event, CAPACITY>>,
    now_ns: Cell<u64>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            now_ns: Cell::new(0),
        }
    }

    pub fn push(&self, event: Event) {
        self.events
            .borrow_mut()
            .push(event)
            .expect("event log full");
    }

    pub fn events(&self) -> Vec<Event, CAPACITY> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn now_ns(&self) -> u64 {
        self.now_ns.get()
    }

    fn wait(&self, ns: u64) {
        self.now_ns.set(self.now_ns.get() + ns);
        self.push(Event::Delay(ns));
    }

    /// Final level of every pin touched so far
    pub fn levels(&self) -> Levels {
        let mut levels = Levels::new();
        for event in self.events.borrow().iter() {
            levels.apply(event);
        }
        levels
    }

    /// (byte, kind) of every serial send, kind taken from the D/C line
    pub fn serial_transfers(&self, dc: PinId) -> Vec<(u8, ByteKind), CAPACITY> {
        let mut levels = Levels::new();
        let mut out = Vec::new();
        for event in self.events.borrow().iter() {
            levels.apply(event);
            if let Event::Send(byte) = *event {
                let kind = match levels.get(dc) {
                    Some(true) => ByteKind::Data,
                    _ => ByteKind::Command,
                };
                out.push((byte, kind)).expect("transfer log full");
            }
        }
        out
    }

    /// (byte, kind) latched by every parallel write strobe
    ///
    /// A byte counts as latched when RW drops while EN is high and CS is
    /// low; it is read back from the data line levels at that moment.
    pub fn parallel_transfers(&self, pins: &ParallelPins) -> Vec<(u8, ByteKind), CAPACITY> {
        let mut levels = Levels::new();
        let mut out = Vec::new();
        for event in self.events.borrow().iter() {
            levels.apply(event);
            if *event != Event::Low(pins.rw) {
                continue;
            }
            if levels.get(pins.en) != Some(true) || levels.get(pins.cs) != Some(false) {
                continue;
            }

            let mut byte = 0u8;
            for i in 0..DATA_LINES {
                if levels.get(pins.data.line(i)) == Some(true) {
                    byte |= 1 << i;
                }
            }
            let kind = match levels.get(pins.rs) {
                Some(true) => ByteKind::Data,
                _ => ByteKind::Command,
            };
            out.push((byte, kind)).expect("transfer log full");
        }
        out
    }
}

/// Pin levels reconstructed from an event log
pub struct Levels {
    state: [[Option<bool>; PORT_WIDTH as usize]; MAX_PORTS],
}

impl Levels {
    fn new() -> Self {
        Self {
            state: [[None; PORT_WIDTH as usize]; MAX_PORTS],
        }
    }

    fn apply(&mut self, event: &Event) {
        match *event {
            Event::High(pin) => self.set(pin, true),
            Event::Low(pin) => self.set(pin, false),
            _ => {}
        }
    }

    fn set(&mut self, pin: PinId, high: bool) {
        if let Some(slot) = self
            .state
            .get_mut(pin.port as usize)
            .and_then(|port| port.get_mut(pin.bit as usize))
        {
            *slot = Some(high);
        }
    }

    pub fn get(&self, pin: PinId) -> Option<bool> {
        self.state
            .get(pin.port as usize)
            .and_then(|port| port.get(pin.bit as usize))
            .copied()
            .flatten()
    }
}

/// GPIO port that logs single-pin operations; masked calls fan out
pub struct MockGpio<'a> {
    rec: &'a Recorder,
}

impl<'a> MockGpio<'a> {
    pub fn new(rec: &'a Recorder) -> Self {
        Self { rec }
    }
}

impl GpioPort for MockGpio<'_> {
    fn set_direction(&mut self, pin: PinId, direction: Direction) {
        self.rec.push(Event::Dir(pin, direction));
    }

    fn set_high(&mut self, pin: PinId) {
        self.rec.push(Event::High(pin));
    }

    fn set_low(&mut self, pin: PinId) {
        self.rec.push(Event::Low(pin));
    }
}

/// Serial bus that logs every byte
pub struct MockBus<'a> {
    rec: &'a Recorder,
}

impl<'a> MockBus<'a> {
    pub fn new(rec: &'a Recorder) -> Self {
        Self { rec }
    }
}

impl SerialBus for MockBus<'_> {
    fn configure(&mut self) {
        self.rec.push(Event::Configure);
    }

    fn initialize(&mut self) {
        self.rec.push(Event::Initialize);
    }

    fn send(&mut self, data: &[u8]) {
        for &byte in data {
            self.rec.push(Event::Send(byte));
        }
    }
}

/// Delay that advances the simulated clock instead of spinning
pub struct MockDelay<'a> {
    rec: &'a Recorder,
}

impl<'a> MockDelay<'a> {
    pub fn new(rec: &'a Recorder) -> Self {
        Self { rec }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.rec.wait(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.rec.wait(us as u64 * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.rec.wait(ms as u64 * 1_000_000);
    }
}

/// Frame buffer stub; screens are identified by a number
pub struct MockFrameBuffer<'a> {
    rec: &'a Recorder,
}

impl<'a> MockFrameBuffer<'a> {
    pub fn new(rec: &'a Recorder) -> Self {
        Self { rec }
    }
}

impl FrameBuffer for MockFrameBuffer<'_> {
    type Screen = u8;

    fn select_screen(&mut self, screen: u8) {
        self.rec.push(Event::SelectScreen(screen));
    }

    fn clear(&mut self) {
        self.rec.push(Event::Clear);
    }
}
