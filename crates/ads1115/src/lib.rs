//! Provides a driver for the Texas Instruments ADS1115 16-bit ADC via the `embedded-hal` ecosystem.
//!
//! The device is driven one conversion at a time: write the Config register,
//! wait out the conversion, read the Conversion register and scale the result.
//!
//! ```
//! use ads1115::{scale, Channel, ConfigWord, DataRate, GainRange, Mode};
//!
//! let word = ConfigWord::build(
//!     Channel::Ain0.mux(),
//!     GainRange::PGA_4_096V,
//!     DataRate::Sps128,
//!     Mode::Continuous,
//!     false,
//! );
//! assert_eq!(word.bits(), 0x4283);
//!
//! assert_eq!(scale(-32768, GainRange::PGA_4_096V), -4.096);
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

use core::fmt;

pub mod config;
mod device;
pub mod register;
mod scale;

pub use config::{Channel, ConfigWord, DataRate, GainRange, Mode, MuxSelector};
pub use device::{Ads1115, WaitStrategy};
pub use register::{read_register, write_register, DeviceAddress, Register};
pub use scale::scale;

/// Failure of a conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError<E> {
    /// The bus exchange for the Config write or Conversion read failed.
    Transport(E),
    /// Status polling gave up before the device reported a finished conversion.
    Timeout,
}

impl<E: fmt::Debug> fmt::Display for ConversionError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Transport(e) => write!(f, "bus transaction failed: {e:?}"),
            ConversionError::Timeout => f.write_str("conversion did not complete"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for ConversionError<E> {}
