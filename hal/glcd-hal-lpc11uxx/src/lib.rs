//! LPC11Uxx-specific HAL for the glcd display driver
//!
//! This crate provides register-level implementations of the `glcd-hal`
//! traits for the NXP LPC11Uxx family (LPC11U14, LPC11U24, LPC11U37, ...):
//!
//! - [`gpio::Lpc11uxxGpio`] - GPIO port block (`DIR`/`SET`/`CLR` words)
//! - [`ssp::Lpc11uxxSsp`] - SSP0/SSP1 as a blocking serial bus
//! - [`delay::SpinDelay`] - Calibrated software busy-wait
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//!
//! # Safety
//!
//! Peripherals are reached through raw register addresses. Constructors
//! that hand out a peripheral are `unsafe`: the caller promises the handle
//! is the only one touching that block. Everything after construction is
//! safe to call.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod delay;
pub mod gpio;
mod reg;
pub mod ssp;

// Re-export shared types from glcd-hal
pub use glcd_hal::{Direction, GpioPort, PinId, SerialBus};
