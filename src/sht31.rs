use log::{debug, warn};

pub mod command;
pub mod crc;
pub mod error;
pub mod measurement;
pub mod transport;

use self::command::Command;
use self::error::{ErrorKind, Result};
use self::measurement::{Measurement, RawMeasurement, RESPONSE_LEN};
use self::transport::{Bus, Transport};

/// Driver for one SHT31 on a bus it owns exclusively.
pub struct SHT31<B: Bus> {
    bus: B,

    // Device address
    address: DeviceAddr,

    state: State<B::Device>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DeviceAddr {
    /// 0x44, ADDR pin low
    #[default]
    AD0 = 0x44,
    /// 0x45, ADDR pin high
    AD1 = 0x45,
}

impl DeviceAddr {
    pub fn address(&self) -> u8 {
        *self as u8
    }
}

enum State<D> {
    Closed,
    Open(D),
}

impl<B: Bus> SHT31<B> {
    /// Creates a closed driver; nothing touches the bus until [`SHT31::open_bus`].
    pub fn new(bus: B, address: DeviceAddr) -> Self {
        Self {
            bus,
            address,
            state: State::Closed,
        }
    }

    pub fn address(&self) -> DeviceAddr {
        self.address
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    pub fn open_bus(&mut self) -> Result<()> {
        if self.is_open() {
            return Ok(());
        }
        debug!("open the bus");
        let device = self.bus.open(self.address.address())?;
        self.state = State::Open(device);
        Ok(())
    }

    /// Closing a closed driver is a no-op.
    pub fn close_bus(&mut self) -> Result<()> {
        if let State::Open(device) = std::mem::replace(&mut self.state, State::Closed) {
            debug!("close the bus");
            self.bus.close(device);
        }
        Ok(())
    }

    /// Reads temperature (°C) and relative humidity (%), both rounded to one decimal.
    pub fn read_values(&mut self) -> Result<Measurement> {
        let device = self.device()?;
        device.write(&Command::Measure.bytes())?;

        let mut data = [0u8; RESPONSE_LEN];
        device.read(&mut data)?;

        let measurement = Measurement::from(RawMeasurement::from_response(&data)?);
        debug!("{}", measurement);
        Ok(measurement)
    }

    /// Reads the raw status register. The response carries no CRC.
    pub fn read_status(&mut self) -> Result<u16> {
        let device = self.device()?;
        device.write(&Command::Status.bytes())?;

        let mut data = [0u8; 2];
        device.read(&mut data)?;

        Ok(u16::from_be_bytes(data))
    }

    /// Switches the on-chip heater. Nothing is read back.
    pub fn control_heater(&mut self, enable: bool) -> Result<()> {
        let device = self.device()?;
        device.write(&Command::heater(enable).bytes())
    }

    fn device(&mut self) -> Result<&mut B::Device> {
        match &mut self.state {
            State::Open(device) => Ok(device),
            State::Closed => {
                warn!("bus access in closed state");
                Err(ErrorKind::NotOpen.into())
            }
        }
    }
}

impl<B: Bus> Drop for SHT31<B> {
    fn drop(&mut self) {
        // forgot to close the bus?
        let _ = self.close_bus();
    }
}
