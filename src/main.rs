//! Periodically sample ADS1115 inputs and log the voltages.

use options::Options;

mod logging;
mod options;

#[cfg_attr(not(feature = "raspberry_pi"), allow(dead_code))]
mod sampler;

#[cfg(feature = "raspberry_pi")]
mod raspberry_pi;

fn main() -> Result<(), anyhow::Error> {
    let options = Options::from_env()?;

    logging::init(options.log_level)?;

    run(&options)
}

#[cfg(feature = "raspberry_pi")]
fn run(options: &Options) -> Result<(), anyhow::Error> {
    use std::cell::RefCell;
    use std::thread;

    use rppal::hal::Delay;

    use crate::sampler::Sampler;

    let bus = RefCell::new(raspberry_pi::open_bus(options.i2c_bus)?);

    let mut adcs = Sampler::new(&bus, Delay::new, options);

    log::info!(
        "Sampling {:?} on {} device(s) every {:?}",
        options.channels,
        options.addresses.len(),
        options.interval
    );

    loop {
        let readings = adcs.sweep();

        sampler::report(&readings);

        thread::sleep(options.interval);
    }
}

#[cfg(not(feature = "raspberry_pi"))]
fn run(_options: &Options) -> Result<(), anyhow::Error> {
    anyhow::bail!("No I2C backend available, rebuild with the `raspberry_pi` feature")
}
