//! Hardware reset pulse

use embedded_hal::delay::DelayNs;

use crate::transport::{ResetLine, Transport};

/// Time the reset line is held low
///
/// The PCD8544 needs 100 ns; one millisecond is the smallest step the
/// board delay offers.
pub const RESET_PULSE_MS: u32 = 1;

/// Pulse the reset line with the controller selected
///
/// Select, RST low, hold [`RESET_PULSE_MS`], RST high, deselect.
pub fn pulse_reset<T, D>(transport: &mut T, delay: &mut D)
where
    T: Transport + ResetLine,
    D: DelayNs,
{
    transport.select();
    transport.set_reset(false);
    delay.delay_ms(RESET_PULSE_MS);
    transport.set_reset(true);
    transport.deselect();
}
