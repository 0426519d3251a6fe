use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use heapless::Vec;

use crate::config::{I2cConfig, Port};
use crate::error::Error;

/// Largest payload accepted by an addressed write, register byte excluded.
pub const MAX_WRITE_LEN: usize = 32;

const FRAME_LEN: usize = MAX_WRITE_LEN + 1;

/// Descriptor for one chip on an I2C bus.
///
/// The bus is owned by the descriptor's lock. Each transfer method acquires
/// the lock, performs a single bus transaction and releases it again before
/// returning, whether or not the transaction succeeded. Two descriptors never
/// share a lock, so two descriptors for the same chip are not serialized
/// against each other.
pub struct I2cDev<M: RawMutex, B> {
    port: Port,
    addr: SevenBitAddress,
    config: I2cConfig,
    bus: Mutex<M, RefCell<B>>,
}

impl<M: RawMutex, B: I2c> I2cDev<M, B> {
    /// Create a descriptor and its lock.
    ///
    /// Fails with [`Error::InvalidArgument`] if `addr` does not fit in 7 bits.
    /// No bus traffic is generated.
    pub fn new(
        bus: B,
        port: Port,
        addr: SevenBitAddress,
        config: I2cConfig,
    ) -> Result<Self, Error<B::Error>> {
        if addr > 0x7F {
            return Err(Error::InvalidArgument);
        }

        Ok(Self {
            port,
            addr,
            config,
            bus: Mutex::new(RefCell::new(bus)),
        })
    }

    /// Tear the descriptor down and hand the bus back. No bus traffic is
    /// generated.
    pub fn free(self) -> B {
        self.bus.into_inner().into_inner()
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn addr(&self) -> SevenBitAddress {
        self.addr
    }

    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Read `buf.len()` bytes from the device.
    ///
    /// With `reg` set, the register byte is written first and the data is read
    /// back after a repeated start. Without it the read is issued directly,
    /// which is what command-mode devices expect.
    pub fn read(
        &self,
        reg: Option<u8>,
        buf: &mut [u8],
    ) -> Result<(), Error<B::Error>> {
        if buf.is_empty() {
            return Err(Error::InvalidArgument);
        }

        let addr = self.addr;
        self.transaction(|bus| match reg {
            Some(reg) => bus.write_read(addr, &[reg], buf),
            None => bus.read(addr, buf),
        })
    }

    /// Write `data` to the device, prefixed by `reg` when one is given.
    pub fn write(
        &self,
        reg: Option<u8>,
        data: &[u8],
    ) -> Result<(), Error<B::Error>> {
        if data.is_empty() {
            return Err(Error::InvalidArgument);
        }

        let addr = self.addr;
        match reg {
            None => self.transaction(|bus| bus.write(addr, data)),
            Some(reg) => {
                let frame = Self::frame(reg, data)?;
                self.transaction(|bus| bus.write(addr, &frame))
            }
        }
    }

    /// Read from register `reg`.
    pub fn read_reg(
        &self,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), Error<B::Error>> {
        self.read(Some(reg), buf)
    }

    /// Write to register `reg`.
    pub fn write_reg(&self, reg: u8, data: &[u8]) -> Result<(), Error<B::Error>> {
        self.write(Some(reg), data)
    }

    fn frame(reg: u8, data: &[u8]) -> Result<Vec<u8, FRAME_LEN>, Error<B::Error>> {
        let mut frame = Vec::<u8, FRAME_LEN>::new();
        frame.push(reg).map_err(|_| Error::InvalidArgument)?;
        frame
            .extend_from_slice(data)
            .map_err(|_| Error::InvalidArgument)?;
        Ok(frame)
    }

    /// Run `f` against the bus while holding the lock.
    ///
    /// The lock is scoped to the closure, so it is released before the result
    /// is inspected.
    fn transaction<R>(
        &self,
        f: impl FnOnce(&mut B) -> Result<R, B::Error>,
    ) -> Result<R, Error<B::Error>> {
        self.bus
            .lock(|bus| f(&mut bus.borrow_mut()))
            .map_err(Error::from)
    }
}
