use anyhow::Context;
use rppal::i2c::I2c;

/// Open `/dev/i2c-{bus}` for use as the ADC transport.
pub fn open_bus(bus: u8) -> Result<I2c, anyhow::Error> {
    let i2c = I2c::with_bus(bus).with_context(|| format!("failed to open I2C bus {bus}"))?;

    match i2c.clock_speed() {
        Ok(hz) => log::debug!("Opened I2C bus {bus} at {hz} Hz"),
        Err(_) => log::debug!("Opened I2C bus {bus}"),
    }

    Ok(i2c)
}
