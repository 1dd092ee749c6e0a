//! Byte transport to a single device on an I²C bus.
//!
//! [`Bus`] opens a device bound to one target address; the resulting
//! [`Transport`] performs blocking writes and fixed-length reads and knows
//! nothing about the commands it carries.

use embedded_hal::i2c::{self, I2c};
use log::debug;
use std::fmt;

use super::error::{Error, ErrorKind, Result};

pub trait Transport {
    /// Writes all of `bytes` to the bound device.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Fills `buffer` with exactly `buffer.len()` bytes from the bound device.
    fn read(&mut self, buffer: &mut [u8]) -> Result<()>;
}

pub trait Bus {
    type Device: Transport;

    /// Acquires the bus and binds it to the 7-bit `address`.
    fn open(&mut self, address: u8) -> Result<Self::Device>;

    /// Releases a device obtained from [`Bus::open`].
    fn close(&mut self, device: Self::Device) {
        drop(device);
    }
}

/// Comma separated hex dump used by the bus traces.
struct Hex<'a>(&'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:#04x}", byte)?;
        }
        Ok(())
    }
}

/// An embedded-hal I²C bus bound to one device address.
#[derive(Debug)]
pub struct HalDevice<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> HalDevice<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn io_error<E: i2c::Error>(error: E) -> Error {
    Error::new(ErrorKind::TransportIo(error.kind()), format!("{:?}", error))
}

impl<I2C: I2c> Transport for HalDevice<I2C> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        debug!(
            "write {} bytes to {:#04x}: {}",
            bytes.len(),
            self.address,
            Hex(bytes)
        );
        self.i2c.write(self.address, bytes).map_err(io_error)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.i2c.read(self.address, buffer).map_err(io_error)?;
        debug!(
            "read {} bytes from {:#04x}: {}",
            buffer.len(),
            self.address,
            Hex(buffer)
        );
        Ok(())
    }
}

/// A [`Bus`] over an embedded-hal peripheral that is already set up.
///
/// Opening lends the peripheral to the device; closing hands it back so the
/// bus can be opened again.
pub struct HalBus<I2C> {
    i2c: Option<I2C>,
}

impl<I2C: I2c> HalBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c: Some(i2c) }
    }

    /// Returns the peripheral, or `None` while a device still holds it.
    pub fn into_inner(self) -> Option<I2C> {
        self.i2c
    }
}

impl<I2C: I2c> Bus for HalBus<I2C> {
    type Device = HalDevice<I2C>;

    fn open(&mut self, address: u8) -> Result<Self::Device> {
        let i2c = self.i2c.take().ok_or_else(|| {
            Error::new(
                ErrorKind::TransportOpenFailed,
                "peripheral is held by an open device",
            )
        })?;
        Ok(HalDevice::new(i2c, address))
    }

    fn close(&mut self, device: Self::Device) {
        self.i2c = Some(device.release());
    }
}

pub use self::linux::{LinuxBus, LinuxDevice};

mod linux {
    use embedded_hal::i2c::{self, NoAcknowledgeSource};
    use linux_embedded_hal::i2cdev::core::I2CDevice;
    use linux_embedded_hal::i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
    use log::debug;

    use super::{Bus, Hex, Transport};
    use crate::sht31::error::{Error, ErrorKind, Result};

    const DEVICE_PATH_BASE: &str = "/dev/i2c-";

    const ENXIO: i32 = 6;
    const EAGAIN: i32 = 11;
    const EBUSY: i32 = 16;
    const ENODEV: i32 = 19;
    const EREMOTEIO: i32 = 121;

    /// `/dev/i2c-<index>` through the Linux i2c-dev interface.
    #[derive(Debug, Clone, Copy)]
    pub struct LinuxBus {
        index: u8,
    }

    impl LinuxBus {
        pub fn new(index: u8) -> Self {
            Self { index }
        }

        pub fn path(&self) -> String {
            format!("{}{}", DEVICE_PATH_BASE, self.index)
        }
    }

    /// Opening the file fails with an I/O error; binding the slave address
    /// (`I2C_SLAVE` ioctl) fails with an errno.
    fn open_error(error: LinuxI2CError) -> Error {
        let kind = match &error {
            LinuxI2CError::Io(_) => ErrorKind::TransportOpenFailed,
            LinuxI2CError::Errno(_) => ErrorKind::TransportConfigFailed,
        };
        Error::new(kind, error)
    }

    fn errno_kind(errno: i32) -> i2c::ErrorKind {
        match errno {
            ENXIO | EREMOTEIO => i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            ENODEV => i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
            EAGAIN => i2c::ErrorKind::ArbitrationLoss,
            EBUSY => i2c::ErrorKind::Bus,
            _ => i2c::ErrorKind::Other,
        }
    }

    fn io_error(error: LinuxI2CError) -> Error {
        let errno = match &error {
            LinuxI2CError::Errno(errno) => Some(*errno),
            LinuxI2CError::Io(e) => e.raw_os_error(),
        };
        let kind = errno.map_or(i2c::ErrorKind::Other, errno_kind);
        Error::new(ErrorKind::TransportIo(kind), error)
    }

    impl Bus for LinuxBus {
        type Device = LinuxDevice;

        fn open(&mut self, address: u8) -> Result<Self::Device> {
            let path = self.path();
            debug!("open {} for {:#04x}", path, address);

            let dev = LinuxI2CDevice::new(&path, u16::from(address)).map_err(open_error)?;
            Ok(LinuxDevice { dev, address })
        }
    }

    /// An open i2c-dev file bound to one slave address. Transfers are plain
    /// `write(2)`/`read(2)` calls on that file; dropping it closes the file.
    #[derive(Debug)]
    pub struct LinuxDevice {
        dev: LinuxI2CDevice,
        address: u8,
    }

    impl LinuxDevice {
        pub fn address(&self) -> u8 {
            self.address
        }
    }

    impl Transport for LinuxDevice {
        fn write(&mut self, bytes: &[u8]) -> Result<()> {
            debug!(
                "write {} bytes to {:#04x}: {}",
                bytes.len(),
                self.address,
                Hex(bytes)
            );
            self.dev.write(bytes).map_err(io_error)
        }

        fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
            self.dev.read(buffer).map_err(io_error)?;
            debug!(
                "read {} bytes from {:#04x}: {}",
                buffer.len(),
                self.address,
                Hex(buffer)
            );
            Ok(())
        }
    }

}
