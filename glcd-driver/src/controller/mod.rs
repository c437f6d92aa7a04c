//! Display controller protocols
//!
//! A controller knows which command bytes bring its panel from power-on to
//! ready, and whether it needs a hardware reset pulse first. It talks to
//! the panel only through a [`Transport`].

mod nt75451;
mod pcd8544;

pub use nt75451::Nt75451;
pub use pcd8544::Pcd8544;

pub mod constants {
    //! Panel-tuned values, re-exported for board code
    pub use super::nt75451::{INIT_SEQUENCE, REFERENCE_VOLTAGE};
    pub use super::pcd8544::{BIAS, DEFAULT_VOP, HEIGHT, MAX_SPI_FREQUENCY_HZ, WIDTH};
}

use embedded_hal::delay::DelayNs;

use crate::transport::Transport;

/// Where a controller is in its bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Nothing sent since power-on
    Uninitialized,
    /// Extended instruction set active (PCD8544 only)
    Extended,
    /// Bring-up finished, drawing may start
    Ready,
}

/// Bring-up protocol of one controller chip over transport `T`
pub trait Controller<T: Transport> {
    /// Hardware reset, if the chip has one wired
    fn reset<D: DelayNs>(&mut self, transport: &mut T, delay: &mut D);

    /// Send the initialisation sequence, leaving the controller ready
    fn bring_up(&mut self, transport: &mut T);

    /// Set the panel contrast
    ///
    /// The value is stored and, once the controller is ready, written out
    /// immediately. Before that it is used by the next bring-up.
    fn set_contrast(&mut self, transport: &mut T, value: u8);

    /// Current bring-up state
    fn state(&self) -> ControllerState;
}
