//! Register addressing and the 16-bit big-endian register wire format.

use embedded_hal::i2c::I2c;

/// Bus address of the device, selected by what the ADDR pin is strapped to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAddress {
    /// ADDR tied to ground, `0x48`.
    #[default]
    Gnd,
    /// ADDR tied to VDD, `0x49`.
    Vdd,
    /// ADDR tied to SDA, `0x4A`.
    Sda,
    /// ADDR tied to SCL, `0x4B`.
    Scl,
}

impl DeviceAddress {
    /// The right-aligned 7-bit bus address.
    pub const fn bits(self) -> u8 {
        match self {
            DeviceAddress::Gnd => 0x48,
            DeviceAddress::Vdd => 0x49,
            DeviceAddress::Sda => 0x4A,
            DeviceAddress::Scl => 0x4B,
        }
    }

    /// Iterate over all strap options.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Gnd, Self::Vdd, Self::Sda, Self::Scl].into_iter()
    }
}

/// Register selector, sent as the first byte of every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Conversion = 0x00,
    Config = 0x01,
    LowThreshold = 0x02,
    HighThreshold = 0x03,
}

/// Write a 16-bit value to `register`, most-significant byte first.
///
/// This is a single 3 byte write: `[register, high, low]`.
pub fn write_register<I2C: I2c>(
    i2c: &mut I2C,
    address: DeviceAddress,
    register: Register,
    value: u16,
) -> Result<(), I2C::Error> {
    let [high, low] = value.to_be_bytes();

    i2c.write(address.bits(), &[register as u8, high, low])
}

/// Read a 16-bit value from `register`.
///
/// Writes the register selector and reads two bytes back in one
/// repeated-start transaction.
pub fn read_register<I2C: I2c>(
    i2c: &mut I2C,
    address: DeviceAddress,
    register: Register,
) -> Result<u16, I2C::Error> {
    let mut buffer = [0; 2];

    i2c.write_read(address.bits(), &[register as u8], &mut buffer)?;

    Ok(u16::from_be_bytes(buffer))
}
