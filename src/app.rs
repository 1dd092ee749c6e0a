use anyhow::{bail, Context, Result};
use log::debug;

use read_sht31::sht31::transport::Bus;
use read_sht31::{DeviceAddr, SHT31};

pub const USAGE: &str = "\
Usage: read-sht31 [arguments]
 -h|--help   Display this help.
 -s          Get the sensor status.
 -t1 -t0     Enable/disable heater.
 -a0 -a1     Select the chip address. 0 is the default.
 -b<N>       Select the bus, e.g. -b0 or -b1. 1 is the default.
 -d          Show debugging messages.";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Action {
    #[default]
    ReadValues,
    ReadStatus,
    HeaterEnable,
    HeaterDisable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub action: Action,
    pub address: DeviceAddr,
    pub bus: u8,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            action: Action::default(),
            address: DeviceAddr::default(),
            bus: 1,
            debug: false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Invocation {
    Help,
    Run(Config),
}

impl Config {
    pub fn from_args<I, S>(args: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();

        for arg in args {
            match arg.as_ref() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "-d" => config.debug = true,
                "-s" => config.action = Action::ReadStatus,
                "-t1" => config.action = Action::HeaterEnable,
                "-t0" => config.action = Action::HeaterDisable,
                "-a0" => config.address = DeviceAddr::AD0,
                "-a1" => config.address = DeviceAddr::AD1,
                other => match other.strip_prefix("-b").map(str::parse::<u8>) {
                    Some(Ok(bus)) => config.bus = bus,
                    _ => bail!("unknown argument \"{}\"", other),
                },
            }
        }

        Ok(Invocation::Run(config))
    }
}

/// Performs the configured action and renders its result as one line of JSON.
pub fn run<B: Bus>(sensor: &mut SHT31<B>, action: Action) -> Result<String> {
    sensor.open_bus().context("failed to open the bus")?;

    let output = match action {
        Action::ReadValues => {
            let m = sensor
                .read_values()
                .context("failed to read temperature and humidity")?;
            format!(
                "{{ \"temperature_celsius\": {}, \"relative_humidity\": {} }}",
                m.temperature, m.humidity
            )
        }
        Action::ReadStatus => {
            let status = sensor.read_status().context("failed to read the status")?;
            format!("{{ \"status\": {} }}", status)
        }
        Action::HeaterEnable => {
            sensor
                .control_heater(true)
                .context("failed to enable the heater")?;
            r#"{ "status": "heater_enabled" }"#.to_string()
        }
        Action::HeaterDisable => {
            sensor
                .control_heater(false)
                .context("failed to disable the heater")?;
            r#"{ "status": "heater_disabled" }"#.to_string()
        }
    };

    sensor.close_bus()?;
    debug!("success");

    Ok(output)
}
