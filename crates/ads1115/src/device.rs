use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{Channel, ConfigWord, DataRate, GainRange, Mode, MuxSelector};
use crate::register::{read_register, write_register, DeviceAddress, Register};
use crate::{scale, ConversionError};

/// The internal oscillator may run up to 10% slow.
const OSCILLATOR_TOLERANCE_DIVISOR: u32 = 10;

/// Power-up time from the single-shot power-down state.
const WAKE_UP_US: u32 = 100;

/// How to wait for a triggered conversion to finish.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Sleep for the conversion time plus oscillator tolerance and wake-up time.
    #[default]
    FixedDelay,
    /// Sleep for the conversion time, then read the status bit up to
    /// `max_polls` times, `interval_us` apart.
    ///
    /// Only applies in single-shot mode. The status bit never reports idle in
    /// continuous mode, so continuous reads fall back to a fixed delay.
    PollStatus { interval_us: u32, max_polls: u16 },
}

/// Total time waited by [`WaitStrategy::FixedDelay`].
fn fixed_wait_us(rate: DataRate) -> u32 {
    let conversion = rate.conversion_time_us();

    conversion + conversion / OSCILLATOR_TOLERANCE_DIVISOR + WAKE_UP_US
}

/// ADS1115 driver
pub struct Ads1115<I2C, D> {
    i2c: I2C,
    delay: D,
    address: DeviceAddress,
    mode: Mode,
    wait: WaitStrategy,
    cache_config: bool,
    last_written: Option<ConfigWord>,
}

impl<I2C: I2c, D: DelayNs> Ads1115<I2C, D> {
    /// Creates a new single-shot driver from a ready I2C bus.
    ///
    /// The bus must not be used by anything else for the duration of a read.
    /// Wrap it in one of the `embedded-hal-bus` sharing devices if it is.
    pub fn new(i2c: I2C, delay: D, address: DeviceAddress) -> Self {
        Ads1115 {
            i2c,
            delay,
            address,
            mode: Mode::SingleShot,
            wait: WaitStrategy::FixedDelay,
            cache_config: false,
            last_written: None,
        }
    }

    /// Operating mode used for subsequent conversions.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self.last_written = None;
        self
    }

    pub fn with_wait_strategy(mut self, wait: WaitStrategy) -> Self {
        self.wait = wait;
        self
    }

    /// Skip rewriting the Config register when it already holds the requested
    /// configuration. Only takes effect in continuous mode.
    pub fn with_config_cache(mut self, enabled: bool) -> Self {
        self.cache_config = enabled;
        self.last_written = None;
        self
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Give back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Convert `channel` and return the result in volts.
    pub fn read_channel(
        &mut self,
        channel: Channel,
        gain: GainRange,
        rate: DataRate,
    ) -> Result<f32, ConversionError<I2C::Error>> {
        let raw = self.read_raw(channel, gain, rate)?;

        Ok(scale(raw, gain))
    }

    /// Convert `channel` and return the signed conversion result.
    pub fn read_raw(
        &mut self,
        channel: Channel,
        gain: GainRange,
        rate: DataRate,
    ) -> Result<i16, ConversionError<I2C::Error>> {
        let start = self.mode == Mode::SingleShot;
        let word = ConfigWord::build(channel.mux(), gain, rate, self.mode, start);

        if self.is_configured(word) {
            return self.read_conversion();
        }

        self.write_config(word)?;
        self.wait_for_conversion(rate)?;
        self.read_conversion()
    }

    /// Read back and decode the Config register.
    pub fn read_config(&mut self) -> Result<ConfigWord, ConversionError<I2C::Error>> {
        match read_register(&mut self.i2c, self.address, Register::Config) {
            Ok(bits) => Ok(ConfigWord::from(bits)),
            Err(e) => {
                self.last_written = None;
                Err(ConversionError::Transport(e))
            }
        }
    }

    /// Stop any continuous conversion and leave the device powered down.
    pub fn power_down(&mut self) -> Result<(), ConversionError<I2C::Error>> {
        let word = ConfigWord::build(
            MuxSelector::Ain0Ain1,
            GainRange::default(),
            DataRate::default(),
            Mode::SingleShot,
            false,
        );

        self.write_config(word)?;
        self.last_written = None;

        Ok(())
    }

    fn is_configured(&self, word: ConfigWord) -> bool {
        self.cache_config && self.mode == Mode::Continuous && self.last_written == Some(word)
    }

    fn write_config(&mut self, word: ConfigWord) -> Result<(), ConversionError<I2C::Error>> {
        match write_register(&mut self.i2c, self.address, Register::Config, word.bits()) {
            Ok(()) => {
                self.last_written = Some(word).filter(|_| self.cache_config);
                Ok(())
            }
            Err(e) => {
                self.last_written = None;
                Err(ConversionError::Transport(e))
            }
        }
    }

    fn read_conversion(&mut self) -> Result<i16, ConversionError<I2C::Error>> {
        match read_register(&mut self.i2c, self.address, Register::Conversion) {
            Ok(bits) => Ok(bits as i16),
            Err(e) => {
                self.last_written = None;
                Err(ConversionError::Transport(e))
            }
        }
    }

    fn wait_for_conversion(&mut self, rate: DataRate) -> Result<(), ConversionError<I2C::Error>> {
        match self.wait {
            WaitStrategy::PollStatus {
                interval_us,
                max_polls,
            } if self.mode == Mode::SingleShot => {
                self.delay.delay_us(rate.conversion_time_us());

                for _ in 0..max_polls {
                    if self.read_config()?.is_ready() {
                        return Ok(());
                    }

                    self.delay.delay_us(interval_us);
                }

                Err(ConversionError::Timeout)
            }
            _ => {
                self.delay.delay_us(fixed_wait_us(rate));
                Ok(())
            }
        }
    }
}
