use anyhow::Result;
use log::LevelFilter;

use read_sht31::sht31::transport::LinuxBus;
use read_sht31::SHT31;

mod app;

use crate::app::{Config, Invocation, USAGE};

fn main() -> Result<()> {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            eprintln!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", USAGE);
            return Err(e);
        }
    };

    let level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut sensor = SHT31::new(LinuxBus::new(config.bus), config.address);
    let output = app::run(&mut sensor, config.action)?;
    println!("{}", output);

    Ok(())
}
