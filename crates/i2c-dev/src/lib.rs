#![no_std]
//! Mutex-guarded I2C device descriptors.
//!
//! An [`I2cDev`] binds one physical chip to a bus: the controller it sits on,
//! its 7-bit address, the pin/clock configuration used to bring the bus up,
//! and an exclusive lock. Every transfer made through the descriptor takes the
//! lock for exactly the duration of one bus transaction and releases it on
//! every exit path, including a failed transfer.
//!
//! The bus itself is anything implementing [`embedded_hal::i2c::I2c`]. The lock
//! is any [`RawMutex`](raw::RawMutex); pick [`NoopRawMutex`](raw::NoopRawMutex)
//! when a descriptor never leaves one execution context, or a mutex that can
//! be shared when several contexts drive the same chip.

mod config;
mod device;
mod error;

pub use config::{I2cConfig, Pin, Port};
pub use device::{I2cDev, MAX_WRITE_LEN};
pub use error::Error;

pub use embassy_sync::blocking_mutex::raw;
