use std::cell::RefCell;

use ads1115::{Ads1115, Channel, ConversionError, DataRate, DeviceAddress, GainRange};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;

use crate::options::Options;

/// One channel's result from a sweep.
#[derive(Debug, PartialEq)]
pub struct Reading<E> {
    pub address: DeviceAddress,
    pub channel: Channel,
    pub volts: Result<f32, ConversionError<E>>,
}

/// Reads a fixed set of channels from every ADC sharing one bus.
pub struct Sampler<'a, I2C, D> {
    devices: Vec<Ads1115<RefCellDevice<'a, I2C>, D>>,
    channels: Vec<Channel>,
    gain: GainRange,
    rate: DataRate,
}

impl<'a, I2C: I2c, D: DelayNs> Sampler<'a, I2C, D> {
    pub fn new(bus: &'a RefCell<I2C>, mut delay: impl FnMut() -> D, options: &Options) -> Self {
        let devices = options
            .addresses
            .iter()
            .map(|&address| {
                Ads1115::new(RefCellDevice::new(bus), delay(), address)
                    .with_wait_strategy(options.wait)
            })
            .collect();

        Self {
            devices,
            channels: options.channels.clone(),
            gain: options.gain,
            rate: options.rate,
        }
    }

    /// Convert every configured channel on every device, one after another.
    pub fn sweep(&mut self) -> Vec<Reading<I2C::Error>> {
        let mut readings = Vec::with_capacity(self.devices.len() * self.channels.len());

        for device in &mut self.devices {
            for &channel in &self.channels {
                readings.push(Reading {
                    address: device.address(),
                    channel,
                    volts: device.read_channel(channel, self.gain, self.rate),
                });
            }
        }

        readings
    }
}

pub fn report<E: core::fmt::Debug>(readings: &[Reading<E>]) {
    for reading in readings {
        let address = reading.address.bits();

        match &reading.volts {
            Ok(volts) => log::info!("{address:#04x} {:?}: {volts:.3} V", reading.channel),
            Err(e) => log::warn!("{address:#04x} {:?}: read failed: {e}", reading.channel),
        }
    }
}
