//! PCD8544 (Nokia 5110) controller
//!
//! 84x48 pixels, serial only. Bias and operating voltage live in the
//! extended instruction set, so bring-up switches modes twice.

use embedded_hal::delay::DelayNs;

use super::{Controller, ControllerState};
use crate::reset::pulse_reset;
use crate::transport::{ResetLine, Transport};

/// Panel width in pixels
pub const WIDTH: usize = 84;
/// Panel height in pixels
pub const HEIGHT: usize = 48;

/// Highest serial clock the chip accepts
pub const MAX_SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Bias system, tuned for the usual 5110 glass (1:48 mux)
pub const BIAS: u8 = 0x02;

/// Operating voltage (contrast) used at bring-up
pub const DEFAULT_VOP: u8 = 50;

/// PCD8544 commands
#[allow(dead_code)]
pub mod cmd {
    pub const FUNCTION_SET: u8 = 0x20;
    pub const EXTENDED_INSTRUCTION: u8 = 0x01;
    pub const VERTICAL_ADDRESSING: u8 = 0x02;
    pub const POWER_DOWN: u8 = 0x04;

    // Basic instruction set
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_BLANK: u8 = 0x00;
    pub const DISPLAY_NORMAL: u8 = 0x04;
    pub const DISPLAY_ALL_ON: u8 = 0x01;
    pub const DISPLAY_INVERTED: u8 = 0x05;
    pub const SET_Y_ADDRESS: u8 = 0x40;
    pub const SET_X_ADDRESS: u8 = 0x80;

    // Extended instruction set
    pub const SET_TEMP_COEFFICIENT: u8 = 0x04;
    pub const SET_BIAS: u8 = 0x10;
    pub const SET_VOP: u8 = 0x80;
}

/// VOP field width
const VOP_MASK: u8 = 0x7F;

/// PCD8544 bring-up state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pcd8544 {
    state: ControllerState,
    vop: u8,
}

impl Pcd8544 {
    /// Fresh controller, contrast at [`DEFAULT_VOP`]
    pub const fn new() -> Self {
        Self {
            state: ControllerState::Uninitialized,
            vop: DEFAULT_VOP,
        }
    }

    /// Current bring-up state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Operating voltage sent by bring-up and by contrast changes
    pub fn vop(&self) -> u8 {
        self.vop
    }

    fn write_vop<T: Transport>(&mut self, transport: &mut T) {
        transport.command(cmd::FUNCTION_SET | cmd::EXTENDED_INSTRUCTION);
        self.state = ControllerState::Extended;
        transport.command(cmd::SET_VOP | self.vop);
        transport.command(cmd::FUNCTION_SET);
        self.state = ControllerState::Ready;
    }
}

impl Default for Pcd8544 {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport + ResetLine> Controller<T> for Pcd8544 {
    fn reset<D: DelayNs>(&mut self, transport: &mut T, delay: &mut D) {
        pulse_reset(transport, delay);
        self.state = ControllerState::Uninitialized;
    }

    fn bring_up(&mut self, transport: &mut T) {
        transport.command(cmd::FUNCTION_SET | cmd::EXTENDED_INSTRUCTION);
        self.state = ControllerState::Extended;

        transport.command(cmd::SET_BIAS | BIAS);
        transport.command(cmd::SET_VOP | self.vop);

        transport.command(cmd::FUNCTION_SET);
        transport.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_NORMAL);
        self.state = ControllerState::Ready;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCD8544 ready, vop={}", self.vop);
    }

    fn set_contrast(&mut self, transport: &mut T, value: u8) {
        self.vop = value & VOP_MASK;
        if self.state == ControllerState::Ready {
            self.write_vop(transport);
        }
    }

    fn state(&self) -> ControllerState {
        Pcd8544::state(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SerialPins;
    use crate::mock::{Event, MockBus, MockDelay, MockGpio, Recorder};
    use crate::transport::{ByteKind, SerialTransport};
    use glcd_hal::PinId;

    const CS: PinId = PinId::new(0, 2);
    const DC: PinId = PinId::new(0, 5);
    const RST: PinId = PinId::new(0, 7);

    fn transport(rec: &Recorder) -> SerialTransport<MockGpio<'_>, MockBus<'_>> {
        SerialTransport::new(
            MockGpio::new(rec),
            MockBus::new(rec),
            SerialPins::new(CS, DC, RST),
        )
    }

    #[test]
    fn test_command_bytes() {
        assert_eq!(cmd::FUNCTION_SET | cmd::EXTENDED_INSTRUCTION, 0x21);
        assert_eq!(cmd::SET_BIAS | BIAS, 0x12);
        assert_eq!(cmd::SET_VOP | DEFAULT_VOP, 0xB2);
        assert_eq!(cmd::DISPLAY_CONTROL | cmd::DISPLAY_NORMAL, 0x0C);
    }

    #[test]
    fn test_bring_up_sequence() {
        let rec = Recorder::new();
        let mut t = transport(&rec);
        let mut lcd = Pcd8544::new();
        assert_eq!(lcd.state(), ControllerState::Uninitialized);

        lcd.bring_up(&mut t);

        assert_eq!(
            rec.serial_transfers(DC).as_slice(),
            &[
                (0x21, ByteKind::Command),
                (0x12, ByteKind::Command),
                (0xB2, ByteKind::Command),
                (0x20, ByteKind::Command),
                (0x0C, ByteKind::Command),
            ]
        );
        assert_eq!(lcd.state(), ControllerState::Ready);
    }

    #[test]
    fn test_reset_pulses_line() {
        let rec = Recorder::new();
        let mut t = transport(&rec);
        let mut lcd = Pcd8544::new();
        lcd.reset(&mut t, &mut MockDelay::new(&rec));

        let events = rec.events();
        assert!(events.contains(&Event::Low(RST)));
        assert!(events.contains(&Event::High(RST)));
        assert_eq!(rec.now_ns(), 1_000_000);
    }

    #[test]
    fn test_contrast_before_bring_up_is_deferred() {
        let rec = Recorder::new();
        let mut t = transport(&rec);
        let mut lcd = Pcd8544::new();

        lcd.set_contrast(&mut t, 0x3C);
        assert!(rec.events().is_empty());

        lcd.bring_up(&mut t);
        assert_eq!(rec.serial_transfers(DC)[2], (0x80 | 0x3C, ByteKind::Command));
    }

    #[test]
    fn test_contrast_when_ready() {
        let rec = Recorder::new();
        let mut t = transport(&rec);
        let mut lcd = Pcd8544::new();
        lcd.bring_up(&mut t);
        rec.clear();

        lcd.set_contrast(&mut t, 0xFF);

        assert_eq!(lcd.vop(), 0x7F);
        assert_eq!(
            rec.serial_transfers(DC).as_slice(),
            &[
                (0x21, ByteKind::Command),
                (0xFF, ByteKind::Command),
                (0x20, ByteKind::Command),
            ]
        );
        assert_eq!(lcd.state(), ControllerState::Ready);
    }
}
