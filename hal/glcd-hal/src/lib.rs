//! glcd Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the display driver
//! is written against. Chip-specific HALs (LPC11Uxx, ...) implement them
//! with direct register access, so the same bring-up code runs on any
//! supported microcontroller.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  glcd-driver (transports, controllers)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  glcd-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  glcd-hal-    │       │  embedded-hal │
//! │   lpc11uxx    │       │   adapters    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioPort`] - Port/pin level and direction control
//! - [`spi::SerialBus`] - Single-shot blocking serial transmission
//!
//! Delays use [`embedded_hal::delay::DelayNs`] directly.

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use gpio::{Direction, GpioPort, PinId};
pub use spi::SerialBus;
