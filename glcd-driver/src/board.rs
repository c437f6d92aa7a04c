//! Build-time pairing selection
//!
//! Exactly one transport feature and one controller feature must be on:
//!
//! | transport            | controller           |
//! |----------------------|----------------------|
//! | `transport-serial`   | `controller-pcd8544` |
//! | `transport-parallel` | `controller-nt75451` |
//!
//! Anything else stops the build. Firmware then names the display through
//! the aliases below and never mentions the concrete types.

#[cfg(all(feature = "transport-serial", feature = "transport-parallel"))]
compile_error!("glcd-driver: enable only one of `transport-serial` and `transport-parallel`");

#[cfg(not(any(feature = "transport-serial", feature = "transport-parallel")))]
compile_error!("glcd-driver: enable one of `transport-serial` or `transport-parallel`");

#[cfg(all(feature = "controller-pcd8544", feature = "controller-nt75451"))]
compile_error!("glcd-driver: enable only one of `controller-pcd8544` and `controller-nt75451`");

#[cfg(not(any(feature = "controller-pcd8544", feature = "controller-nt75451")))]
compile_error!("glcd-driver: enable one of `controller-pcd8544` or `controller-nt75451`");

#[cfg(all(feature = "controller-pcd8544", feature = "transport-parallel"))]
compile_error!("glcd-driver: PCD8544 is only supported on `transport-serial`");

#[cfg(all(feature = "controller-nt75451", feature = "transport-serial"))]
compile_error!("glcd-driver: NT75451 is only supported on `transport-parallel`");

use crate::glcd::Glcd;

/// Transport for the selected pairing: `SerialTransport<G, Bus>`
#[cfg(feature = "transport-serial")]
pub type BoardTransport<G, B> = crate::transport::SerialTransport<G, B>;

/// Transport for the selected pairing: `ParallelTransport<G, Settle>`
#[cfg(all(feature = "transport-parallel", not(feature = "transport-serial")))]
pub type BoardTransport<G, S = crate::transport::NoSettle> =
    crate::transport::ParallelTransport<G, S>;

#[cfg(feature = "controller-pcd8544")]
pub type BoardController = crate::controller::Pcd8544;

#[cfg(all(feature = "controller-nt75451", not(feature = "controller-pcd8544")))]
pub type BoardController = crate::controller::Nt75451;

/// Display for the selected pairing
///
/// `X` is the serial bus or the parallel settle delay, `D` the reset delay.
pub type BoardGlcd<G, X, D> = Glcd<BoardTransport<G, X>, BoardController, D>;

/// Controller for the selected pairing, in its power-on state
pub const fn controller() -> BoardController {
    BoardController::new()
}
