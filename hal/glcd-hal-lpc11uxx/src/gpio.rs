//! GPIO port block for LPC11Uxx
//!
//! The LPC11Uxx GPIO block exposes one word per port for direction, set
//! and clear. `SET` and `CLR` are write-one-to-act, so driving a whole data
//! bus is a single store and never disturbs the other pins on the port.

use glcd_hal::gpio::{Direction, GpioPort, PinId};

use crate::reg::Reg;

/// GPIO port block base address
pub const GPIO_BASE: usize = 0x5000_0000;

/// Port direction registers (`DIR0`, `DIR1`)
pub const DIR_OFFSET: usize = 0x2000;

/// Port set registers (`SET0`, `SET1`)
pub const SET_OFFSET: usize = 0x2200;

/// Port clear registers (`CLR0`, `CLR1`)
pub const CLR_OFFSET: usize = 0x2280;

/// Bytes of the block this driver touches (up to and including `CLR1`)
pub const BLOCK_SIZE: usize = CLR_OFFSET + 4 * PORT_COUNT as usize;

/// Number of GPIO ports
pub const PORT_COUNT: u8 = 2;

/// LPC11Uxx GPIO port block
pub struct Lpc11uxxGpio {
    base: usize,
}

impl Lpc11uxxGpio {
    /// Take the GPIO block at its fixed address
    ///
    /// # Safety
    ///
    /// No other code may write the GPIO block while this handle is alive.
    pub unsafe fn steal() -> Self {
        // SAFETY: forwarded to the caller.
        unsafe { Self::from_base(GPIO_BASE) }
    }

    /// Use a GPIO block at an arbitrary address
    ///
    /// # Safety
    ///
    /// `base` must point to at least [`BLOCK_SIZE`] bytes of word-aligned
    /// memory laid out like the GPIO block, owned exclusively by this
    /// handle.
    pub unsafe fn from_base(base: usize) -> Self {
        Self { base }
    }

    fn port_reg(&self, offset: usize, port: u8) -> Option<Reg> {
        if port < PORT_COUNT {
            // SAFETY: `base` covers the whole block (`from_base` contract) and
            // `port < PORT_COUNT` keeps the word inside it.
            Some(unsafe { Reg::at(self.base, offset + 4 * port as usize) })
        } else {
            None
        }
    }
}

impl GpioPort for Lpc11uxxGpio {
    fn set_direction(&mut self, pin: PinId, direction: Direction) {
        self.set_direction_mask(pin.port, pin.mask(), direction);
    }

    fn set_high(&mut self, pin: PinId) {
        self.set_mask(pin.port, pin.mask());
    }

    fn set_low(&mut self, pin: PinId) {
        self.clear_mask(pin.port, pin.mask());
    }

    fn set_mask(&mut self, port: u8, mask: u32) {
        if let Some(set) = self.port_reg(SET_OFFSET, port) {
            set.write(mask);
        }
    }

    fn clear_mask(&mut self, port: u8, mask: u32) {
        if let Some(clr) = self.port_reg(CLR_OFFSET, port) {
            clr.write(mask);
        }
    }

    fn set_direction_mask(&mut self, port: u8, mask: u32, direction: Direction) {
        if let Some(dir) = self.port_reg(DIR_OFFSET, port) {
            match direction {
                Direction::Output => dir.modify(|v| v | mask),
                Direction::Input => dir.modify(|v| v & !mask),
            }
        }
    }
}
