//! Opcodes and addressing of the BH1750FVI.
//!
//! The chip has no register file. Every command is a single opcode byte
//! written without a register prefix, and a measurement is fetched by reading
//! two bytes back.

/// Address with the ADDR pin floating or low.
pub const ADDR_LO: u8 = 0x23;
/// Address with the ADDR pin high.
pub const ADDR_HI: u8 = 0x5C;

pub const OPCODE_HIGH: u8 = 0x00;
pub const OPCODE_HIGH2: u8 = 0x01;
pub const OPCODE_LOW: u8 = 0x03;

pub const OPCODE_CONT: u8 = 0x10;
pub const OPCODE_OT: u8 = 0x20;

/// Bus address, selected by the ADDR strap pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    /// ADDR pin floating or low.
    Low,
    /// ADDR pin high.
    High,
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        match addr {
            Address::Low => ADDR_LO,
            Address::High => ADDR_HI,
        }
    }
}

impl TryFrom<u8> for Address {
    type Error = u8;

    /// Fails with the rejected value for anything but the two strap addresses.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            ADDR_LO => Ok(Self::Low),
            ADDR_HI => Ok(Self::High),
            other => Err(other),
        }
    }
}

/// Measurement mode.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Measure once, then power down.
    #[default]
    OneTime,
    /// Measure continuously.
    Continuous,
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::OneTime => OPCODE_OT,
            Mode::Continuous => OPCODE_CONT,
        }
    }
}

/// Measurement resolution.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 4 lx resolution.
    Low,
    /// 1 lx resolution.
    #[default]
    High,
    /// 0.5 lx resolution.
    HighPrecision,
}

impl Resolution {
    /// Typical conversion time from the datasheet, in milliseconds.
    ///
    /// Informational only: the driver never waits between
    /// [`configure`](crate::Bh1750::configure) and a read.
    pub const fn typical_measurement_time_ms(self) -> u32 {
        match self {
            Self::Low => 16,
            Self::High | Self::HighPrecision => 120,
        }
    }
}

impl From<Resolution> for u8 {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Low => OPCODE_LOW,
            Resolution::High => OPCODE_HIGH,
            Resolution::HighPrecision => OPCODE_HIGH2,
        }
    }
}

/// Command byte selecting `mode` and `resolution`.
pub fn opcode(mode: Mode, resolution: Resolution) -> u8 {
    u8::from(mode) | u8::from(resolution)
}

/// Convert a raw count to lux, rounding down.
///
/// The sensor reports 1.2 counts per lux.
pub const fn raw_to_lux(raw: u16) -> u16 {
    (raw as u32 * 10 / 12) as u16
}
