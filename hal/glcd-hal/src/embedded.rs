//! Adapters from `embedded-hal` 1.0 traits
//!
//! Lets the driver run on any chip whose HAL already implements the
//! ecosystem traits, without a dedicated register-level port.

use embedded_hal::spi::SpiBus as HalSpiBus;

use crate::spi::SerialBus;

/// [`SerialBus`] over an `embedded-hal` SPI bus
///
/// The wrapped bus is expected to be configured by its own HAL at
/// construction, so `configure` and `initialize` do nothing. Write errors
/// are counted and logged but not propagated; the display layer has no
/// recovery path for them.
pub struct HalSpi<S> {
    spi: S,
    errors: u32,
}

impl<S> HalSpi<S> {
    /// Wrap an `embedded-hal` SPI bus
    pub fn new(spi: S) -> Self {
        Self { spi, errors: 0 }
    }

    /// Number of failed transmissions since construction
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Give the wrapped bus back
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: HalSpiBus<u8>> SerialBus for HalSpi<S> {
    fn configure(&mut self) {}

    fn initialize(&mut self) {}

    fn send(&mut self, data: &[u8]) {
        let result = self.spi.write(data).and_then(|()| self.spi.flush());
        if result.is_err() {
            self.errors = self.errors.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI write of {} bytes failed", data.len());
        }
    }
}
