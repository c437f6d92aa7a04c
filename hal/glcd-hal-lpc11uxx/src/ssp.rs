//! SSP serial bus for LPC11Uxx
//!
//! Drives SSP0 or SSP1 as an 8-bit SPI master. Chip-select is not routed
//! to the SSP; the display driver toggles it as a plain GPIO around every
//! byte.

use glcd_hal::spi::{Phase, Polarity, SerialBus, SpiConfig};

use crate::reg::Reg;

/// SSP0 register block base address
pub const SSP0_BASE: usize = 0x4004_0000;

/// SSP1 register block base address
pub const SSP1_BASE: usize = 0x4005_8000;

/// System control block base address
pub const SYSCON_BASE: usize = 0x4004_8000;

/// I/O configuration block base address
pub const IOCON_BASE: usize = 0x4004_4000;

/// SSP register offsets
#[allow(dead_code)]
mod regs {
    pub const CR0: usize = 0x00;
    pub const CR1: usize = 0x04;
    pub const DR: usize = 0x08;
    pub const SR: usize = 0x0C;
    pub const CPSR: usize = 0x10;

    /// CR0: 8-bit frames, SPI format
    pub const CR0_DSS_8BIT: u32 = 0x7;
    pub const CR0_CPOL: u32 = 1 << 6;
    pub const CR0_CPHA: u32 = 1 << 7;
    pub const CR0_SCR_SHIFT: u32 = 8;

    /// CR1: SSP enable, master mode (MS = 0)
    pub const CR1_SSE: u32 = 1 << 1;

    pub const SR_TFE: u32 = 1 << 0;
    pub const SR_TNF: u32 = 1 << 1;
    pub const SR_RNE: u32 = 1 << 2;
    pub const SR_BSY: u32 = 1 << 4;
}

/// System control register offsets
mod syscon {
    pub const PRESETCTRL: usize = 0x004;
    pub const SYSAHBCLKCTRL: usize = 0x080;
    pub const SSP0CLKDIV: usize = 0x094;
    pub const SSP1CLKDIV: usize = 0x09C;

    pub const AHBCLK_IOCON: u32 = 1 << 16;
}

/// Pin function select field of an IOCON register
const IOCON_FUNC_MASK: u32 = 0x7;

/// SSP peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SspPort {
    /// SSP0 (MISO0 PIO0_8, MOSI0 PIO0_9, SCK0 PIO1_29)
    Ssp0,
    /// SSP1 (SCK1 PIO1_20, MISO1 PIO1_21, MOSI1 PIO1_22)
    Ssp1,
}

impl SspPort {
    fn base(self) -> usize {
        match self {
            SspPort::Ssp0 => SSP0_BASE,
            SspPort::Ssp1 => SSP1_BASE,
        }
    }

    /// `PRESETCTRL` reset-release bit and `SYSAHBCLKCTRL` clock bit
    fn syscon_bits(self) -> (u32, u32) {
        match self {
            SspPort::Ssp0 => (1 << 0, 1 << 11),
            SspPort::Ssp1 => (1 << 2, 1 << 18),
        }
    }

    fn clkdiv_offset(self) -> usize {
        match self {
            SspPort::Ssp0 => syscon::SSP0CLKDIV,
            SspPort::Ssp1 => syscon::SSP1CLKDIV,
        }
    }

    /// (IOCON offset, function number) for SCK, MISO and MOSI
    fn pin_functions(self) -> [(usize, u32); 3] {
        match self {
            SspPort::Ssp0 => [
                (iocon_offset(1, 29), 1),
                (iocon_offset(0, 8), 1),
                (iocon_offset(0, 9), 1),
            ],
            SspPort::Ssp1 => [
                (iocon_offset(1, 20), 2),
                (iocon_offset(1, 21), 2),
                (iocon_offset(1, 22), 2),
            ],
        }
    }
}

/// Offset of the IOCON register for PIO`port`_`pin`
const fn iocon_offset(port: u8, pin: u8) -> usize {
    match port {
        0 => 4 * pin as usize,
        _ => 0x60 + 4 * pin as usize,
    }
}

/// Error from SSP configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SspError {
    /// Requested frequency is zero
    InvalidFrequency,
    /// Requested frequency is below what the dividers can reach
    FrequencyTooLow,
}

/// SSP clock dividers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDividers {
    /// Prescale divisor (`CPSR`), even, 2-254
    pub prescale: u8,
    /// Serial clock rate (`CR0.SCR`); bit rate = PCLK / (prescale * (scr + 1))
    pub scr: u8,
}

impl ClockDividers {
    /// Slowest clock the SSP can generate
    pub const SLOWEST: Self = Self {
        prescale: 254,
        scr: 255,
    };

    /// Find the smallest prescaler whose resulting bit rate does not exceed
    /// `target_hz`
    pub fn for_frequency(pclk_hz: u32, target_hz: u32) -> Result<Self, SspError> {
        if target_hz == 0 {
            return Err(SspError::InvalidFrequency);
        }

        for prescale in (2..=254u32).step_by(2) {
            let step = prescale as u64 * target_hz as u64;
            let divisor = (pclk_hz as u64).div_ceil(step).max(1);
            if divisor <= 256 {
                return Ok(Self {
                    prescale: prescale as u8,
                    scr: (divisor - 1) as u8,
                });
            }
        }

        Err(SspError::FrequencyTooLow)
    }

    /// Resulting bit rate for a given peripheral clock
    pub fn frequency(&self, pclk_hz: u32) -> u32 {
        pclk_hz / (self.prescale as u32 * (self.scr as u32 + 1))
    }
}

/// SSP bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SspConfig {
    /// Bit rate, polarity and phase
    pub spi: SpiConfig,
    /// SSP peripheral clock in Hz (main clock, `SSPnCLKDIV` = 1)
    pub pclk_hz: u32,
}

impl Default for SspConfig {
    fn default() -> Self {
        Self {
            spi: SpiConfig::default(),
            pclk_hz: 48_000_000,
        }
    }
}

/// Register block addresses used by the SSP driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SspBlocks {
    /// SSP register block
    pub ssp: usize,
    /// System control block
    pub syscon: usize,
    /// I/O configuration block
    pub iocon: usize,
}

impl SspBlocks {
    /// Fixed hardware addresses for an SSP instance
    pub fn for_port(port: SspPort) -> Self {
        Self {
            ssp: port.base(),
            syscon: SYSCON_BASE,
            iocon: IOCON_BASE,
        }
    }
}

/// LPC11Uxx SSP as a blocking serial bus
pub struct Lpc11uxxSsp {
    port: SspPort,
    config: SspConfig,
    blocks: SspBlocks,
}

impl Lpc11uxxSsp {
    /// Take an SSP instance at its fixed address
    ///
    /// # Safety
    ///
    /// No other code may use this SSP instance, and `configure` /
    /// `initialize` perform read-modify-write on the shared `SYSCON` and
    /// `IOCON` blocks, which must not race with other writers.
    pub unsafe fn steal(port: SspPort, config: SspConfig) -> Self {
        // SAFETY: forwarded to the caller.
        unsafe { Self::from_blocks(port, config, SspBlocks::for_port(port)) }
    }

    /// Use register blocks at arbitrary addresses
    ///
    /// # Safety
    ///
    /// Every address in `blocks` must point to word-aligned memory laid out
    /// like the corresponding peripheral block, with the same exclusivity
    /// requirements as [`Lpc11uxxSsp::steal`].
    pub unsafe fn from_blocks(port: SspPort, config: SspConfig, blocks: SspBlocks) -> Self {
        Self {
            port,
            config,
            blocks,
        }
    }

    /// SSP instance this bus drives
    pub fn port(&self) -> SspPort {
        self.port
    }

    fn ssp(&self, offset: usize) -> Reg {
        // SAFETY: `blocks` addresses were vouched for by `from_blocks`.
        unsafe { Reg::at(self.blocks.ssp, offset) }
    }

    fn syscon(&self, offset: usize) -> Reg {
        // SAFETY: `blocks` addresses were vouched for by `from_blocks`.
        unsafe { Reg::at(self.blocks.syscon, offset) }
    }

    fn cr0(&self, dividers: ClockDividers) -> u32 {
        let mut cr0 = regs::CR0_DSS_8BIT | (dividers.scr as u32) << regs::CR0_SCR_SHIFT;
        if self.config.spi.polarity == Polarity::IdleHigh {
            cr0 |= regs::CR0_CPOL;
        }
        if self.config.spi.phase == Phase::CaptureOnSecondTransition {
            cr0 |= regs::CR0_CPHA;
        }
        cr0
    }
}

impl SerialBus for Lpc11uxxSsp {
    fn configure(&mut self) {
        self.syscon(syscon::SYSAHBCLKCTRL)
            .modify(|v| v | syscon::AHBCLK_IOCON);

        for (offset, func) in self.port.pin_functions() {
            // SAFETY: `blocks` addresses were vouched for by `from_blocks`.
            let reg = unsafe { Reg::at(self.blocks.iocon, offset) };
            reg.modify(|v| (v & !IOCON_FUNC_MASK) | func);
        }
    }

    fn initialize(&mut self) {
        let (reset_bit, clock_bit) = self.port.syscon_bits();
        self.syscon(syscon::PRESETCTRL).modify(|v| v | reset_bit);
        self.syscon(syscon::SYSAHBCLKCTRL).modify(|v| v | clock_bit);
        self.syscon(self.port.clkdiv_offset()).write(1);

        let target = self.config.spi.frequency;
        let dividers = match ClockDividers::for_frequency(self.config.pclk_hz, target) {
            Ok(dividers) => dividers,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("SSP clock {} Hz unreachable ({}), using slowest", target, _e);
                ClockDividers::SLOWEST
            }
        };

        // SSE must be clear while CR0/CPSR change
        self.ssp(regs::CR1).write(0);
        self.ssp(regs::CR0).write(self.cr0(dividers));
        self.ssp(regs::CPSR).write(dividers.prescale as u32);
        self.ssp(regs::CR1).write(regs::CR1_SSE);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SSP {} up at {} Hz",
            self.port,
            dividers.frequency(self.config.pclk_hz)
        );
    }

    fn send(&mut self, data: &[u8]) {
        for &byte in data {
            while self.ssp(regs::SR).read() & (regs::SR_TNF | regs::SR_BSY) != regs::SR_TNF {}
            self.ssp(regs::DR).write(byte as u32);

            // Every frame out shifts one in; pop it before the next byte
            while self.ssp(regs::SR).read() & (regs::SR_BSY | regs::SR_RNE) != regs::SR_RNE {}
            let _ = self.ssp(regs::DR).read();
        }
    }
}
