/// Identifier of the I2C controller a device is attached to.
pub type Port = u8;

/// GPIO number as understood by the platform HAL.
pub type Pin = u8;

/// Bus configuration carried by a device descriptor.
///
/// The drivers never interpret these values. They are stored verbatim so the
/// platform layer can bring the controller up with the settings each chip
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Data line.
    pub sda_pin: Pin,
    /// Clock line.
    pub scl_pin: Pin,
    /// Bus clock frequency in Hz.
    pub clk_speed_hz: u32,
}

impl I2cConfig {
    pub const fn new(sda_pin: Pin, scl_pin: Pin, clk_speed_hz: u32) -> Self {
        Self { sda_pin, scl_pin, clk_speed_hz }
    }
}
