//! Graphic LCD bring-up and byte transport
//!
//! This crate brings a monochrome dot-matrix LCD controller from power-on
//! to ready-for-drawing and moves command/data bytes to it:
//!
//! - Transports: serial bus (one byte per chip-select cycle) and parallel
//!   GPIO bus (8 data lines plus EN/CS/RW strobes)
//! - Controllers: PCD8544 (extended-mode bring-up, needs a reset pulse)
//!   and NT75451 (fixed 15-command bring-up, no reset line)
//! - Bring-up orchestration and hand-off to an external frame buffer
//!
//! The (transport, controller) pairing is chosen at build time, both by
//! the concrete types handed to [`Glcd`] and by the cargo features read in
//! [`board`]. Nothing is dispatched at runtime.
//!
//! # Failure model
//!
//! Every operation is a direct register or bus write and returns nothing.
//! A stuck bus or a disconnected panel cannot be detected here; it shows
//! up as wrong or missing pixels. Pin-map mistakes are caught at compile
//! time by [`config`].

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod board;
pub mod config;
pub mod controller;
pub mod databus;
pub mod framebuffer;
pub mod glcd;
pub mod reset;
pub mod transport;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, ParallelPins, SerialPins};
pub use controller::{Controller, ControllerState, Nt75451, Pcd8544};
pub use databus::DataBus;
pub use framebuffer::FrameBuffer;
pub use glcd::Glcd;
pub use transport::{ByteKind, ParallelTransport, ResetLine, SerialTransport, Transport};
