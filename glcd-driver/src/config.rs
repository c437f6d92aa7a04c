//! Pin maps for each transport
//!
//! Pin maps are meant to be `const` items. Every constructor checks the
//! map, so a wiring mistake (two signals on one pin, a bit outside the
//! port) in a `const` is a compile error and a map the transports accept
//! is always consistent:
//!
//! ```
//! use glcd_driver::config::SerialPins;
//! use glcd_hal::PinId;
//!
//! const PINS: SerialPins = SerialPins::new(PinId::new(0, 2), PinId::new(0, 5), PinId::new(0, 7));
//! ```
//!
//! ```compile_fail
//! use glcd_driver::config::SerialPins;
//! use glcd_hal::PinId;
//!
//! // CS and RST on the same pin
//! const PINS: SerialPins = SerialPins::new(PinId::new(0, 2), PinId::new(0, 5), PinId::new(0, 2));
//!
//! fn main() {
//!     let _ = PINS.cs();
//! }
//! ```

use core::fmt;

use glcd_hal::gpio::{PinId, PORT_WIDTH};

use crate::databus::{DataBus, DATA_LINES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest number of GPIO ports a pin map may reference
pub const MAX_PORTS: usize = 8;

/// Pin map error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two signals are wired to the same physical pin
    DuplicatePin(PinId),
    /// Port or bit outside what the driver can address
    InvalidPin(PinId),
}

/// Set of claimed pins, one bitmask per port
#[derive(Clone, Copy)]
struct PinSet {
    used: [u32; MAX_PORTS],
}

impl PinSet {
    const fn new() -> Self {
        Self {
            used: [0; MAX_PORTS],
        }
    }

    const fn claim(mut self, pin: PinId) -> Result<Self, ConfigError> {
        if pin.port as usize >= MAX_PORTS || pin.bit >= PORT_WIDTH {
            return Err(ConfigError::InvalidPin(pin));
        }
        let mask = pin.mask();
        if self.used[pin.port as usize] & mask != 0 {
            return Err(ConfigError::DuplicatePin(pin));
        }
        self.used[pin.port as usize] |= mask;
        Ok(self)
    }

    const fn claim_all(self, pins: &[PinId]) -> Result<Self, ConfigError> {
        let mut set = self;
        let mut i = 0;
        while i < pins.len() {
            set = match set.claim(pins[i]) {
                Ok(set) => set,
                Err(e) => return Err(e),
            };
            i += 1;
        }
        Ok(set)
    }
}

/// Abort evaluation; a compile error when reached from a `const` item
const fn reject(error: ConfigError) -> ! {
    match error {
        ConfigError::DuplicatePin(_) => panic!("glcd pin map: two signals share one pin"),
        ConfigError::InvalidPin(_) => panic!("glcd pin map: pin outside addressable ports"),
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicatePin(pin) => {
                write!(f, "pin {}_{} used by two signals", pin.port, pin.bit)
            }
            ConfigError::InvalidPin(pin) => {
                write!(f, "pin {}_{} is not addressable", pin.port, pin.bit)
            }
        }
    }
}

/// Pins for the serial transport
///
/// Only obtainable through a checking constructor, so CS, D/C and RST are
/// always three distinct addressable pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSerialPins"))]
pub struct SerialPins {
    pub(crate) cs: PinId,
    pub(crate) dc: PinId,
    pub(crate) rst: PinId,
}

impl SerialPins {
    /// Create a serial pin map, failing the build when used in a `const`
    /// item with conflicting pins
    ///
    /// # Panics
    ///
    /// When two signals share a pin or a pin is not addressable.
    pub const fn new(cs: PinId, dc: PinId, rst: PinId) -> Self {
        match Self::try_new(cs, dc, rst) {
            Ok(pins) => pins,
            Err(e) => reject(e),
        }
    }

    /// Create a serial pin map, reporting conflicts as an error
    pub const fn try_new(cs: PinId, dc: PinId, rst: PinId) -> Result<Self, ConfigError> {
        match PinSet::new().claim_all(&[cs, dc, rst]) {
            Ok(_) => Ok(Self { cs, dc, rst }),
            Err(e) => Err(e),
        }
    }

    /// Chip select (active low)
    pub const fn cs(&self) -> PinId {
        self.cs
    }

    /// Data/command select (low = command, high = data)
    pub const fn dc(&self) -> PinId {
        self.dc
    }

    /// Reset (active low)
    pub const fn rst(&self) -> PinId {
        self.rst
    }
}

/// Pins for the parallel transport
///
/// Only obtainable through a checking constructor, so the four control
/// lines and eight data lines are always distinct addressable pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParallelPins"))]
pub struct ParallelPins {
    pub(crate) en: PinId,
    pub(crate) rw: PinId,
    pub(crate) rs: PinId,
    pub(crate) cs: PinId,
    pub(crate) data: DataBus,
}

impl ParallelPins {
    /// Create a parallel pin map, failing the build when used in a `const`
    /// item with conflicting pins
    ///
    /// # Panics
    ///
    /// When two lines share a pin or a pin is not addressable.
    pub const fn new(en: PinId, rw: PinId, rs: PinId, cs: PinId, data: DataBus) -> Self {
        match Self::try_new(en, rw, rs, cs, data) {
            Ok(pins) => pins,
            Err(e) => reject(e),
        }
    }

    /// Create a parallel pin map, reporting conflicts as an error
    pub const fn try_new(
        en: PinId,
        rw: PinId,
        rs: PinId,
        cs: PinId,
        data: DataBus,
    ) -> Result<Self, ConfigError> {
        let set = match PinSet::new().claim_all(&[en, rw, rs, cs]) {
            Ok(set) => set,
            Err(e) => return Err(e),
        };

        let mut lines = [PinId::new(0, 0); DATA_LINES];
        let mut i = 0;
        while i < DATA_LINES {
            lines[i] = data.line(i);
            i += 1;
        }

        match set.claim_all(&lines) {
            Ok(_) => Ok(Self {
                en,
                rw,
                rs,
                cs,
                data,
            }),
            Err(e) => Err(e),
        }
    }

    /// Enable strobe (active high)
    pub const fn en(&self) -> PinId {
        self.en
    }

    /// Read/write select (low = write)
    pub const fn rw(&self) -> PinId {
        self.rw
    }

    /// Register select / A0 (low = command, high = data)
    pub const fn rs(&self) -> PinId {
        self.rs
    }

    /// Chip select (active low)
    pub const fn cs(&self) -> PinId {
        self.cs
    }

    /// Data lines D0..D7
    pub const fn data(&self) -> DataBus {
        self.data
    }
}

/// Unchecked serial map as read from a board description
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSerialPins {
    cs: PinId,
    dc: PinId,
    rst: PinId,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSerialPins> for SerialPins {
    type Error = ConfigError;

    fn try_from(raw: RawSerialPins) -> Result<Self, ConfigError> {
        SerialPins::try_new(raw.cs, raw.dc, raw.rst)
    }
}

/// Unchecked parallel map as read from a board description
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawParallelPins {
    en: PinId,
    rw: PinId,
    rs: PinId,
    cs: PinId,
    data: DataBus,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParallelPins> for ParallelPins {
    type Error = ConfigError;

    fn try_from(raw: RawParallelPins) -> Result<Self, ConfigError> {
        ParallelPins::try_new(raw.en, raw.rw, raw.rs, raw.cs, raw.data)
    }
}
