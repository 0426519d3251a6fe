#![no_std]
//! Driver for the ROHM BH1750FVI digital ambient light sensor.
//!
//! The sensor is command driven: [`Bh1750::configure`] writes one opcode that
//! selects the measurement mode and resolution, and [`Bh1750::read_lux`]
//! fetches the latest 16-bit count and scales it to lux.
//!
//! Reading does not start a conversion and does not wait for one. After a
//! one-time measurement is requested the caller has to allow for the
//! conversion time (see [`Resolution::typical_measurement_time_ms`]) before
//! reading.
//!
//! ```ignore
//! use bh1750::{Bh1750, Mode, Resolution, ADDR_LO};
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//!
//! let sensor: Bh1750<NoopRawMutex, _> = Bh1750::init_desc(i2c, ADDR_LO, 0, 21, 22)?;
//! sensor.configure(Mode::Continuous, Resolution::High)?;
//! // ... wait for the first conversion ...
//! let lux = sensor.read_lux()?;
//! ```

mod fmt;
pub mod registers;

use byteorder::{BigEndian, ByteOrder};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::i2c::I2c;
use i2c_dev::I2cDev;

use crate::fmt::{debug, error};

pub use crate::registers::{
    opcode, raw_to_lux, Address, Mode, Resolution, ADDR_HI, ADDR_LO,
};
pub use i2c_dev::{Error, I2cConfig, Pin, Port};

/// Bus clock used by the sensor.
pub const I2C_FREQ_HZ: u32 = 400_000;

/// BH1750 device descriptor.
pub struct Bh1750<M: RawMutex, I2C> {
    dev: I2cDev<M, I2C>,
    address: Address,
}

impl<M, I2C> Bh1750<M, I2C>
where
    M: RawMutex,
    I2C: I2c,
{
    /// Initialize the device descriptor.
    ///
    /// `addr` must be [`ADDR_LO`] or [`ADDR_HI`]; any other value is rejected
    /// with [`Error::InvalidArgument`] before the descriptor or its lock is
    /// created.
    pub fn init_desc(
        i2c: I2C,
        addr: u8,
        port: Port,
        sda_pin: Pin,
        scl_pin: Pin,
    ) -> Result<Self, Error<I2C::Error>> {
        let Ok(addr) = Address::try_from(addr) else {
            error!("Invalid I2C address {=u8:#x}", addr);
            return Err(Error::InvalidArgument);
        };

        let config = I2cConfig::new(sda_pin, scl_pin, I2C_FREQ_HZ);
        let dev = I2cDev::new(i2c, port, addr.into(), config)?;

        Ok(Self { dev, address: addr })
    }

    /// Free the device descriptor and hand the bus back.
    pub fn free_desc(self) -> I2C {
        self.dev.free()
    }

    /// Strap address the descriptor was created with.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn port(&self) -> Port {
        self.dev.port()
    }

    pub fn config(&self) -> &I2cConfig {
        self.dev.config()
    }

    /// Set the measurement mode and resolution.
    pub fn configure(
        &self,
        mode: Mode,
        resolution: Resolution,
    ) -> Result<(), Error<I2C::Error>> {
        let opcode = opcode(mode, resolution);

        self.dev.write(None, &[opcode])?;

        debug!(
            "bh1750 setup(PORT = {=u8}, ADDR = {=u8:#x}, VAL = {=u8:#x})",
            self.dev.port(),
            self.dev.addr(),
            opcode
        );

        Ok(())
    }

    /// Read the raw 16-bit measurement count.
    pub fn read_raw(&self) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.dev.read(None, &mut buf)?;

        Ok(BigEndian::read_u16(&buf))
    }

    /// Read the last measurement in lux.
    pub fn read_lux(&self) -> Result<u16, Error<I2C::Error>> {
        self.read_raw().map(raw_to_lux)
    }
}
