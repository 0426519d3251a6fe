//! TDA7439 / TDA7439DS / TDA7440 register map and value encoding.
//!
//! Every register is one byte wide and write-only. Each encoder below turns a
//! physical value into the register byte, or returns `None` when the value is
//! outside the range the chip accepts.

/// Fixed 7-bit bus address of the chip.
pub const TDA74XX_ADDR: u8 = 0x44;

pub const REG_INPUT_SELECTOR: u8 = 0x00;
pub const REG_INPUT_GAIN: u8 = 0x01;
pub const REG_VOLUME: u8 = 0x02;
pub const REG_BASS_GAIN: u8 = 0x03;
pub const REG_MID_GAIN: u8 = 0x04;
pub const REG_TREBLE_GAIN: u8 = 0x05;
pub const REG_ATTEN_R: u8 = 0x06;
pub const REG_ATTEN_L: u8 = 0x07;

/// Volume register value that mutes the output.
pub const MUTE_VALUE: u8 = 0x38;

/// Highest input index.
pub const MAX_INPUT: u8 = 3;
/// Highest input gain, dB. Set in 2 dB steps.
pub const MAX_INPUT_GAIN_DB: u8 = 30;
/// Lowest volume, dB. Selecting it mutes the output.
pub const MIN_VOLUME_DB: i8 = -48;
/// Equalizer range is ±`MAX_EQ_GAIN_DB`, set in 2 dB steps.
pub const MAX_EQ_GAIN_DB: i8 = 14;
/// Highest speaker attenuation, dB.
pub const MAX_ATTENUATION_DB: u8 = 56;

/// Equalizer band.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    Bass,
    Middle,
    Treble,
}

impl Band {
    pub const fn register(self) -> u8 {
        match self {
            Self::Bass => REG_BASS_GAIN,
            Self::Middle => REG_MID_GAIN,
            Self::Treble => REG_TREBLE_GAIN,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bass => "Bass",
            Self::Middle => "Middle",
            Self::Treble => "Treble",
        }
    }
}

/// Speaker output channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Left,
    Right,
}

impl Channel {
    pub const fn register(self) -> u8 {
        match self {
            Self::Left => REG_ATTEN_L,
            Self::Right => REG_ATTEN_R,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
        }
    }
}

pub const fn input(input: u8) -> Option<u8> {
    if input > MAX_INPUT {
        return None;
    }
    Some(input)
}

/// Odd values round down to the step below.
pub const fn input_gain(gain_db: u8) -> Option<u8> {
    if gain_db > MAX_INPUT_GAIN_DB {
        return None;
    }
    Some(gain_db / 2)
}

/// The register holds the attenuation in 1 dB steps, except at the bottom of
/// the range where the mute code takes the place of 48 dB.
pub const fn volume(volume_db: i8) -> Option<u8> {
    match volume_db {
        MIN_VOLUME_DB => Some(MUTE_VALUE),
        v if v > 0 || v < MIN_VOLUME_DB => None,
        v => Some(v.unsigned_abs()),
    }
}

/// Odd values round toward the step below.
pub const fn equalizer_gain(gain_db: i8) -> Option<u8> {
    if gain_db < -MAX_EQ_GAIN_DB || gain_db > MAX_EQ_GAIN_DB {
        return None;
    }
    Some(((gain_db + MAX_EQ_GAIN_DB) / 2) as u8)
}

pub const fn speaker_attenuation(atten_db: u8) -> Option<u8> {
    if atten_db > MAX_ATTENUATION_DB {
        return None;
    }
    Some(atten_db)
}
