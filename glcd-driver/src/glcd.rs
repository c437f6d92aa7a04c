//! Bring-up orchestration

use embedded_hal::delay::DelayNs;

use crate::controller::{Controller, ControllerState};
use crate::framebuffer::FrameBuffer;
use crate::transport::Transport;

/// A display: one transport, one controller and a delay source
///
/// The pairing is fixed by the type parameters. A controller that needs
/// a reset line only implements [`Controller`] for transports that have
/// one, so an unsupported pairing does not compile.
pub struct Glcd<T, C, D> {
    transport: T,
    controller: C,
    delay: D,
}

impl<T, C, D> Glcd<T, C, D>
where
    T: Transport,
    C: Controller<T>,
    D: DelayNs,
{
    /// Create a display from its parts; nothing is sent until [`Glcd::init`]
    pub fn new(transport: T, controller: C, delay: D) -> Self {
        Self {
            transport,
            controller,
            delay,
        }
    }

    /// Bring the panel from power-on to ready and hand over to `fb`
    ///
    /// Peripheral and pin setup, deselect, hardware reset (if the
    /// controller has one), controller bring-up, then `fb` is pointed at
    /// `screen` and cleared. Call once after power-on.
    pub fn init<F: FrameBuffer>(&mut self, fb: &mut F, screen: F::Screen) {
        #[cfg(feature = "defmt")]
        defmt::info!("GLCD bring-up");

        self.transport.setup();
        self.transport.deselect();

        self.controller.reset(&mut self.transport, &mut self.delay);
        self.controller.bring_up(&mut self.transport);

        fb.select_screen(screen);
        fb.clear();

        #[cfg(feature = "defmt")]
        defmt::info!("GLCD ready");
    }

    /// Hardware reset only; a no-op for controllers without a reset line
    ///
    /// The controller must be brought up again afterwards.
    pub fn reset(&mut self) {
        self.controller.reset(&mut self.transport, &mut self.delay);
    }

    /// Send one controller instruction
    pub fn command(&mut self, byte: u8) {
        self.transport.command(byte);
    }

    /// Send one byte of display data
    pub fn data(&mut self, byte: u8) {
        self.transport.data(byte);
    }

    /// Send display data, one transfer per byte
    pub fn data_slice(&mut self, bytes: &[u8]) {
        #[cfg(feature = "defmt")]
        defmt::trace!("GLCD data {} bytes", bytes.len());

        for &byte in bytes {
            self.transport.data(byte);
        }
    }

    /// Change contrast, deferred until bring-up if not ready yet
    pub fn set_contrast(&mut self, value: u8) {
        self.controller.set_contrast(&mut self.transport, value);
    }

    /// Controller bring-up state
    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Whether bring-up has finished and drawing may start
    pub fn is_ready(&self) -> bool {
        self.state() == ControllerState::Ready
    }
}

impl<T, C, D> Glcd<T, C, D> {
    /// Transport in use
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Transport in use, for raw byte access
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Controller in use
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Controller in use, for chip-specific commands
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Take the parts back
    pub fn release(self) -> (T, C, D) {
        (self.transport, self.controller, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParallelPins, SerialPins};
    use crate::controller::{Nt75451, Pcd8544};
    use crate::databus::DataBus;
    use crate::mock::{Event, MockBus, MockDelay, MockFrameBuffer, MockGpio, Recorder};
    use crate::transport::{ByteKind, ParallelTransport, SerialTransport};
    use glcd_hal::{Direction, PinId};

    const CS: PinId = PinId::new(0, 2);
    const DC: PinId = PinId::new(0, 5);
    const RST: PinId = PinId::new(0, 7);
    const SERIAL: SerialPins = SerialPins::new(CS, DC, RST);

    const PARALLEL: ParallelPins = ParallelPins::new(
        PinId::new(0, 16),
        PinId::new(0, 17),
        PinId::new(0, 18),
        PinId::new(0, 19),
        DataBus::new(1, [19, 20, 21, 22, 26, 27, 28, 31]),
    );

    type SerialGlcd<'a> =
        Glcd<SerialTransport<MockGpio<'a>, MockBus<'a>>, Pcd8544, MockDelay<'a>>;
    type ParallelGlcd<'a> = Glcd<ParallelTransport<MockGpio<'a>>, Nt75451, MockDelay<'a>>;

    fn serial(rec: &Recorder) -> SerialGlcd<'_> {
        Glcd::new(
            SerialTransport::new(MockGpio::new(rec), MockBus::new(rec), SERIAL),
            Pcd8544::new(),
            MockDelay::new(rec),
        )
    }

    fn parallel(rec: &Recorder) -> ParallelGlcd<'_> {
        Glcd::new(
            ParallelTransport::new(MockGpio::new(rec), PARALLEL),
            Nt75451::new(),
            MockDelay::new(rec),
        )
    }

    fn cycle(byte: u8) -> [Event; 3] {
        [Event::Low(CS), Event::Send(byte), Event::High(CS)]
    }

    #[test]
    fn test_pcd8544_serial_end_to_end() {
        let rec = Recorder::new();
        let mut lcd = serial(&rec);
        let mut fb = MockFrameBuffer::new(&rec);
        assert!(!lcd.is_ready());

        lcd.init(&mut fb, 0);

        let mut expected: std::vec::Vec<Event> = std::vec![
            Event::Configure,
            Event::Initialize,
            Event::Dir(CS, Direction::Output),
            Event::Dir(DC, Direction::Output),
            Event::Dir(RST, Direction::Output),
            Event::High(CS),
            Event::Low(CS),
            Event::Low(RST),
            Event::Delay(1_000_000),
            Event::High(RST),
            Event::High(CS),
            Event::Low(DC),
        ];
        for byte in [0x21, 0x12, 0xB2, 0x20, 0x0C] {
            expected.extend(cycle(byte));
        }
        expected.extend([Event::SelectScreen(0), Event::Clear]);

        assert_eq!(rec.events().as_slice(), expected.as_slice());
        assert!(lcd.is_ready());
    }

    #[test]
    fn test_nt75451_parallel_end_to_end() {
        let rec = Recorder::new();
        let mut lcd = parallel(&rec);
        let mut fb = MockFrameBuffer::new(&rec);

        lcd.init(&mut fb, 3);

        let transfers = rec.parallel_transfers(&PARALLEL);
        assert_eq!(transfers.len(), 15);
        for (&(byte, kind), &expected) in transfers.iter().zip(INIT.iter()) {
            assert_eq!(byte, expected);
            assert_eq!(kind, ByteKind::Command);
        }

        let events = rec.events();
        assert_eq!(
            &events[events.len() - 2..],
            &[Event::SelectScreen(3), Event::Clear]
        );
        assert!(!events.iter().any(|e| matches!(e, Event::Delay(_))));
        assert!(lcd.is_ready());
    }

    const INIT: [u8; 15] = crate::controller::constants::INIT_SEQUENCE;

    #[test]
    fn test_pins_are_outputs_before_first_level_change() {
        let rec = Recorder::new();
        parallel(&rec).init(&mut MockFrameBuffer::new(&rec), 0);

        let events = rec.events();
        let first_level = events
            .iter()
            .position(|e| matches!(e, Event::High(_) | Event::Low(_)))
            .unwrap();
        assert!(events[..first_level]
            .iter()
            .all(|e| matches!(e, Event::Dir(_, Direction::Output))));
        assert_eq!(first_level, 4 + 8);
    }

    #[test]
    fn test_post_init_writes() {
        let rec = Recorder::new();
        let mut lcd = serial(&rec);
        lcd.init(&mut MockFrameBuffer::new(&rec), 0);
        rec.clear();

        lcd.command(0x40);
        lcd.command(0x80);
        lcd.data_slice(&[0xFF, 0x81, 0xFF]);
        lcd.data(0x00);

        assert_eq!(
            rec.serial_transfers(DC).as_slice(),
            &[
                (0x40, ByteKind::Command),
                (0x80, ByteKind::Command),
                (0xFF, ByteKind::Data),
                (0x81, ByteKind::Data),
                (0xFF, ByteKind::Data),
                (0x00, ByteKind::Data),
            ]
        );
    }

    #[test]
    fn test_set_contrast_forwards_to_controller() {
        let rec = Recorder::new();
        let mut lcd = serial(&rec);
        lcd.set_contrast(60);
        lcd.init(&mut MockFrameBuffer::new(&rec), 0);

        assert_eq!(lcd.controller().vop(), 60);
        assert!(rec.events().contains(&Event::Send(0x80 | 60)));
    }

    #[test]
    fn test_reset_after_init_drops_ready() {
        let rec = Recorder::new();
        let mut lcd = serial(&rec);
        lcd.init(&mut MockFrameBuffer::new(&rec), 0);
        lcd.reset();

        assert_eq!(lcd.state(), ControllerState::Uninitialized);
        let (transport, _, _) = lcd.release();
        assert_eq!(transport.pins(), &SERIAL);
    }
}
