use std::env;
use std::str::FromStr;
use std::time::Duration;

use ads1115::{Channel, DataRate, DeviceAddress, GainRange, WaitStrategy};
use anyhow::{anyhow, bail, Context};
use log::LevelFilter;

const STATUS_POLL: WaitStrategy = WaitStrategy::PollStatus {
    interval_us: 100,
    max_polls: 50,
};

#[cfg_attr(not(feature = "raspberry_pi"), allow(dead_code))]
pub struct Options {
    pub i2c_bus: u8,
    pub addresses: Vec<DeviceAddress>,
    pub channels: Vec<Channel>,
    pub gain: GainRange,
    pub rate: DataRate,
    pub interval: Duration,
    pub wait: WaitStrategy,
    pub log_level: LevelFilter,
}

impl Options {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build options from `lookup`, which maps a variable name to its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let i2c_bus = parse_var("ADS1115_I2C_BUS", &var("ADS1115_I2C_BUS", "1"), |v| {
            Ok(u8::from_str(v)?)
        })?;

        let addresses = parse_var("ADS1115_ADDRESSES", &var("ADS1115_ADDRESSES", "gnd"), |v| {
            parse_list(v, parse_address)
        })?;

        let channels = parse_var("ADS1115_CHANNELS", &var("ADS1115_CHANNELS", "ain0,ain1"), |v| {
            parse_list(v, parse_channel)
        })?;

        let gain = parse_var("ADS1115_GAIN", &var("ADS1115_GAIN", "4.096"), parse_gain)?;

        let rate = parse_var("ADS1115_RATE", &var("ADS1115_RATE", "128"), parse_rate)?;

        let interval = parse_var("ADS1115_INTERVAL_MS", &var("ADS1115_INTERVAL_MS", "500"), |v| {
            Ok(Duration::from_millis(u64::from_str(v)?))
        })?;

        let wait = match var("ADS1115_POLL", "no").as_str() {
            "yes" => STATUS_POLL,
            "no" => WaitStrategy::FixedDelay,
            other => bail!("ADS1115_POLL must be either 'yes' or 'no', got '{other}'"),
        };

        let log_level = parse_var("ADS1115_LOG", &var("ADS1115_LOG", "info"), |v| {
            Ok(LevelFilter::from_str(v)?)
        })?;

        Ok(Options {
            i2c_bus,
            addresses,
            channels,
            gain,
            rate,
            interval,
            wait,
            log_level,
        })
    }
}

fn parse_var<T>(
    key: &str,
    value: &str,
    parse: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    parse(value.trim()).with_context(|| format!("invalid {key} '{value}'"))
}

fn parse_list<T>(value: &str, parse: fn(&str) -> anyhow::Result<T>) -> anyhow::Result<Vec<T>> {
    let items = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse)
        .collect::<anyhow::Result<Vec<_>>>()?;

    if items.is_empty() {
        bail!("at least one entry is required");
    }

    Ok(items)
}

fn parse_address(value: &str) -> anyhow::Result<DeviceAddress> {
    match value.to_ascii_lowercase().as_str() {
        "gnd" | "0x48" => Ok(DeviceAddress::Gnd),
        "vdd" | "0x49" => Ok(DeviceAddress::Vdd),
        "sda" | "0x4a" => Ok(DeviceAddress::Sda),
        "scl" | "0x4b" => Ok(DeviceAddress::Scl),
        other => Err(anyhow!("unknown address '{other}'")),
    }
}

fn parse_channel(value: &str) -> anyhow::Result<Channel> {
    match value.to_ascii_lowercase().as_str() {
        "ain0" => Ok(Channel::Ain0),
        "ain1" => Ok(Channel::Ain1),
        "ain2" => Ok(Channel::Ain2),
        "ain3" => Ok(Channel::Ain3),
        "diff01" => Ok(Channel::Diff01),
        "diff03" => Ok(Channel::Diff03),
        "diff13" => Ok(Channel::Diff13),
        "diff23" => Ok(Channel::Diff23),
        other => Err(anyhow!("unknown channel '{other}'")),
    }
}

fn parse_gain(value: &str) -> anyhow::Result<GainRange> {
    GainRange::all()
        .find(|gain| format!("{:.3}", gain.full_scale_volts()) == value)
        .ok_or_else(|| anyhow!("expected one of 6.144, 4.096, 2.048, 1.024, 0.512, 0.256"))
}

fn parse_rate(value: &str) -> anyhow::Result<DataRate> {
    let sps = u16::from_str(value)?;

    DataRate::all()
        .find(|rate| rate.samples_per_second() == sps)
        .ok_or_else(|| anyhow!("expected one of 8, 16, 32, 64, 128, 250, 475, 860"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> anyhow::Result<Options> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Options::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let options = parse(&[]).unwrap();

        assert_eq!(options.i2c_bus, 1);
        assert_eq!(options.addresses, [DeviceAddress::Gnd]);
        assert_eq!(options.channels, [Channel::Ain0, Channel::Ain1]);
        assert_eq!(options.gain, GainRange::PGA_4_096V);
        assert_eq!(options.rate, DataRate::Sps128);
        assert_eq!(options.interval, Duration::from_millis(500));
        assert_eq!(options.wait, WaitStrategy::FixedDelay);
        assert_eq!(options.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides() {
        let options = parse(&[
            ("ADS1115_I2C_BUS", "3"),
            ("ADS1115_ADDRESSES", "gnd, SCL"),
            ("ADS1115_CHANNELS", "ain3,diff01"),
            ("ADS1115_GAIN", "0.256"),
            ("ADS1115_RATE", "860"),
            ("ADS1115_INTERVAL_MS", "20"),
            ("ADS1115_POLL", "yes"),
            ("ADS1115_LOG", "debug"),
        ])
        .unwrap();

        assert_eq!(options.i2c_bus, 3);
        assert_eq!(options.addresses, [DeviceAddress::Gnd, DeviceAddress::Scl]);
        assert_eq!(options.channels, [Channel::Ain3, Channel::Diff01]);
        assert_eq!(options.gain, GainRange::PGA_0_256V);
        assert_eq!(options.rate, DataRate::Sps860);
        assert_eq!(options.interval, Duration::from_millis(20));
        assert_eq!(options.wait, STATUS_POLL);
        assert_eq!(options.log_level, LevelFilter::Debug);
    }

    #[test]
    fn errors_name_the_variable() {
        let cases = [
            ("ADS1115_GAIN", "5.0"),
            ("ADS1115_RATE", "100"),
            ("ADS1115_CHANNELS", "ain4"),
            ("ADS1115_CHANNELS", " , "),
            ("ADS1115_ADDRESSES", "0x50"),
            ("ADS1115_I2C_BUS", "-1"),
            ("ADS1115_POLL", "maybe"),
        ];

        for (key, value) in cases {
            let error = parse(&[(key, value)]).err().unwrap();

            assert!(format!("{error}").contains(key), "{key}={value}: {error}");
        }
    }
}
