//! NT75451 controller

use embedded_hal::delay::DelayNs;

use super::{Controller, ControllerState};
use crate::transport::Transport;

/// NT75451 commands
#[allow(dead_code)]
pub mod cmd {
    pub const SOFTWARE_RESET: u8 = 0xE2;
    pub const ADC_NORMAL: u8 = 0xA0;
    pub const ADC_REVERSE: u8 = 0xA1;
    pub const SHL_NORMAL: u8 = 0xC0;
    pub const SHL_REVERSE: u8 = 0xC8;
    pub const BIAS_1_9: u8 = 0xA2;
    pub const BIAS_1_7: u8 = 0xA3;
    pub const POWER_CONTROL: u8 = 0x28;
    pub const POWER_ALL_ON: u8 = 0x07;
    pub const REGULATOR_RESISTOR: u8 = 0x20;
    pub const SET_START_LINE: u8 = 0x40;
    pub const ENTIRE_DISPLAY_OFF: u8 = 0xA4;
    pub const ENTIRE_DISPLAY_ON: u8 = 0xA5;
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    pub const DISPLAY_REVERSE: u8 = 0xA7;
    pub const SET_REFERENCE_VOLTAGE: u8 = 0x81;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
}

/// Reference voltage register value used at bring-up
pub const REFERENCE_VOLTAGE: u8 = 0x3F;

/// Regulator resistor ratio
const RESISTOR_RATIO: u8 = 0x02;

const REFERENCE_VOLTAGE_MASK: u8 = 0x3F;

/// Position of the reference voltage operand in [`INIT_SEQUENCE`]
const REFERENCE_VOLTAGE_SLOT: usize = 10;

/// Bring-up sequence, sent as commands in this order
pub const INIT_SEQUENCE: [u8; 15] = [
    cmd::SOFTWARE_RESET,
    cmd::ADC_NORMAL,
    cmd::SHL_REVERSE,
    cmd::BIAS_1_7,
    cmd::POWER_CONTROL | cmd::POWER_ALL_ON,
    cmd::REGULATOR_RESISTOR | RESISTOR_RATIO,
    cmd::SET_START_LINE,
    cmd::ENTIRE_DISPLAY_OFF,
    cmd::DISPLAY_NORMAL,
    cmd::SET_REFERENCE_VOLTAGE,
    REFERENCE_VOLTAGE,
    cmd::SET_PAGE_ADDR,
    cmd::SET_HIGH_COLUMN,
    cmd::SET_LOW_COLUMN,
    cmd::DISPLAY_ON,
];

/// NT75451 bring-up state
///
/// The chip has no reset line in this wiring; it resets itself with the
/// first byte of [`INIT_SEQUENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Nt75451 {
    state: ControllerState,
    reference_voltage: u8,
}

impl Nt75451 {
    /// Fresh controller, reference voltage at [`REFERENCE_VOLTAGE`]
    pub const fn new() -> Self {
        Self {
            state: ControllerState::Uninitialized,
            reference_voltage: REFERENCE_VOLTAGE,
        }
    }

    /// Current bring-up state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Reference voltage sent by bring-up and by contrast changes
    pub fn reference_voltage(&self) -> u8 {
        self.reference_voltage
    }

    /// Blank or show the panel without touching display RAM
    pub fn set_display_on<T: Transport>(&mut self, transport: &mut T, on: bool) {
        transport.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF });
    }
}

impl Default for Nt75451 {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Controller<T> for Nt75451 {
    fn reset<D: DelayNs>(&mut self, _transport: &mut T, _delay: &mut D) {}

    fn bring_up(&mut self, transport: &mut T) {
        for (i, &byte) in INIT_SEQUENCE.iter().enumerate() {
            if i == REFERENCE_VOLTAGE_SLOT {
                transport.command(self.reference_voltage);
            } else {
                transport.command(byte);
            }
        }
        self.state = ControllerState::Ready;

        #[cfg(feature = "defmt")]
        defmt::debug!("NT75451 ready");
    }

    fn set_contrast(&mut self, transport: &mut T, value: u8) {
        self.reference_voltage = value & REFERENCE_VOLTAGE_MASK;
        if self.state == ControllerState::Ready {
            transport.command(cmd::SET_REFERENCE_VOLTAGE);
            transport.command(self.reference_voltage);
        }
    }

    fn state(&self) -> ControllerState {
        Nt75451::state(self)
    }
}
