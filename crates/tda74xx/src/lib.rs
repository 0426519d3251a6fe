#![no_std]
//! Driver for the ST TDA7439 / TDA7439DS / TDA7440 audio processors.
//!
//! The chips are write-only: every setter validates its argument, encodes it
//! and writes one register. Nothing is cached on the host side, so there are no
//! getters; the chip is the only holder of its current settings.

mod fmt;
pub mod registers;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::i2c::I2c;
use i2c_dev::I2cDev;

use crate::fmt::debug;

pub use crate::registers::{
    Band, Channel, MAX_ATTENUATION_DB, MAX_EQ_GAIN_DB, MAX_INPUT,
    MAX_INPUT_GAIN_DB, MIN_VOLUME_DB, MUTE_VALUE, TDA74XX_ADDR,
};
pub use i2c_dev::{Error, I2cConfig, Pin, Port};

/// Bus clock used by the chip.
pub const I2C_FREQ_HZ: u32 = 100_000;

/// TDA74xx device descriptor.
pub struct Tda74xx<M: RawMutex, I2C> {
    dev: I2cDev<M, I2C>,
}

impl<M, I2C> Tda74xx<M, I2C>
where
    M: RawMutex,
    I2C: I2c,
{
    /// Initialize the device descriptor. The address is fixed to
    /// [`TDA74XX_ADDR`].
    pub fn init_desc(
        i2c: I2C,
        port: Port,
        sda_pin: Pin,
        scl_pin: Pin,
    ) -> Result<Self, Error<I2C::Error>> {
        let config = I2cConfig::new(sda_pin, scl_pin, I2C_FREQ_HZ);
        let dev = I2cDev::new(i2c, port, TDA74XX_ADDR, config)?;

        Ok(Self { dev })
    }

    /// Free the device descriptor and hand the bus back.
    pub fn free_desc(self) -> I2C {
        self.dev.free()
    }

    pub fn port(&self) -> Port {
        self.dev.port()
    }

    pub fn config(&self) -> &I2cConfig {
        self.dev.config()
    }

    /// Select input `input` (0..=3).
    pub fn set_input(&self, input: u8) -> Result<(), Error<I2C::Error>> {
        let value = registers::input(input).ok_or(Error::InvalidArgument)?;

        self.dev.write_reg(registers::REG_INPUT_SELECTOR, &[value])?;

        debug!("Input: {=u8}", value);
        Ok(())
    }

    /// Set the input gain, 0..=30 dB in 2 dB steps.
    pub fn set_input_gain(&self, gain_db: u8) -> Result<(), Error<I2C::Error>> {
        let gain = registers::input_gain(gain_db).ok_or(Error::InvalidArgument)?;

        self.dev.write_reg(registers::REG_INPUT_GAIN, &[gain])?;

        debug!("Input gain: {=u8} dB", gain * 2);
        Ok(())
    }

    /// Set the master volume, -48..=0 dB. -48 dB mutes the output.
    pub fn set_volume(&self, volume_db: i8) -> Result<(), Error<I2C::Error>> {
        let volume = registers::volume(volume_db).ok_or(Error::InvalidArgument)?;

        self.dev.write_reg(registers::REG_VOLUME, &[volume])?;

        debug!("Volume: {=i8} dB", volume_db);
        Ok(())
    }

    /// Mute the output through the volume register.
    pub fn mute(&self) -> Result<(), Error<I2C::Error>> {
        self.set_volume(MIN_VOLUME_DB)
    }

    /// Set the gain of one equalizer band, -14..=14 dB in 2 dB steps.
    pub fn set_equalizer_gain(
        &self,
        band: Band,
        gain_db: i8,
    ) -> Result<(), Error<I2C::Error>> {
        let gain =
            registers::equalizer_gain(gain_db).ok_or(Error::InvalidArgument)?;

        self.dev.write_reg(band.register(), &[gain])?;

        debug!(
            "{=str} gain: {=i8} dB",
            band.name(),
            gain as i8 * 2 - MAX_EQ_GAIN_DB
        );
        Ok(())
    }

    /// Set the attenuation of one speaker output, 0..=56 dB.
    pub fn set_speaker_attenuation(
        &self,
        channel: Channel,
        atten_db: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let atten = registers::speaker_attenuation(atten_db)
            .ok_or(Error::InvalidArgument)?;

        self.dev.write_reg(channel.register(), &[atten])?;

        debug!(
            "Speaker attenuation ({=str}): {=u8} dB",
            channel.name(),
            atten
        );
        Ok(())
    }
}
