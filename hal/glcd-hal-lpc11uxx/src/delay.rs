//! Software busy-wait delay
//!
//! A counted spin loop calibrated against a 60 MHz core, where 35 inner
//! iterations take about 10 µs. The count is scaled linearly for other
//! core clocks. Flash wait states, interrupts and optimisation level all
//! shift the real duration, so this is only good for coarse settle times
//! and reset pulses with generous margins. Use a hardware timer behind
//! [`DelayNs`] when precision matters.

use core::hint;

use embedded_hal::delay::DelayNs;

/// Core clock the loop constant was measured at
pub const CALIBRATION_CLOCK_HZ: u32 = 60_000_000;

/// Inner iterations per 10 µs at [`CALIBRATION_CLOCK_HZ`]
pub const LOOPS_PER_TICK_AT_CALIBRATION: u32 = 35;

/// Length of one tick in nanoseconds
pub const TICK_NS: u32 = 10_000;

/// Calibrated spin-loop delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinDelay {
    /// Inner iterations per 10 µs tick at the configured core clock
    loops_per_tick: u32,
}

impl SpinDelay {
    /// Create a delay for the given core clock
    pub fn new(core_clock_hz: u32) -> Self {
        let scaled = LOOPS_PER_TICK_AT_CALIBRATION as u64 * core_clock_hz as u64
            / CALIBRATION_CLOCK_HZ as u64;
        Self {
            loops_per_tick: scaled.clamp(1, u32::MAX as u64) as u32,
        }
    }

    /// Inner iterations per 10 µs tick
    pub fn loops_per_tick(&self) -> u32 {
        self.loops_per_tick
    }

    /// Number of inner iterations spun for `ns` nanoseconds
    pub fn loops_for_ns(&self, ns: u32) -> u64 {
        (ns as u64 * self.loops_per_tick as u64).div_ceil(TICK_NS as u64)
    }

    /// Busy-wait for `count` ticks of roughly 10 µs each
    pub fn delay_ticks(&mut self, count: u32) {
        spin(count as u64 * self.loops_per_tick as u64);
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        spin(self.loops_for_ns(ns));
    }
}

fn spin(loops: u64) {
    for i in 0..loops {
        hint::black_box(i);
        hint::spin_loop();
    }
}
