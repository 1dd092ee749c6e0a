use embedded_hal::i2c;
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;

use std::{error, fmt, io};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The bus device could not be opened.
    TransportOpenFailed,
    /// The target address could not be bound on the opened device.
    TransportConfigFailed,
    /// A write or read did not transfer the requested bytes.
    TransportIo(i2c::ErrorKind),
    /// A measurement word did not match its trailing CRC byte.
    ChecksumMismatch,
    /// The driver was used while its bus is closed.
    NotOpen,
}

#[derive(Debug, thiserror::Error)]
pub struct Error {
    kind: ErrorKind,
    #[source]
    repr: Option<Box<dyn error::Error + Send + Sync>>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, error: E) -> Error
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::_new(kind, error.into())
    }

    fn _new(kind: ErrorKind, error: Box<dyn error::Error + Send + Sync>) -> Error {
        Error {
            kind,
            repr: Some(error),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The OS error code behind this error, if the source carries one.
    pub fn raw_os_error(&self) -> Option<i32> {
        let repr = self.repr.as_deref()?;
        if let Some(e) = repr.downcast_ref::<LinuxI2CError>() {
            return match e {
                LinuxI2CError::Errno(errno) => Some(*errno),
                LinuxI2CError::Io(e) => e.raw_os_error(),
            };
        }
        repr.downcast_ref::<io::Error>().and_then(io::Error::raw_os_error)
    }
}

impl From<ErrorKind> for Error {
    fn from(value: ErrorKind) -> Self {
        Error {
            kind: value,
            repr: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Some(e) => write!(f, "{}: {}", self.kind, e),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TransportIo(kind) => write!(f, "{} ({})", self.as_str(), kind),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl ErrorKind {
    pub(crate) fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match *self {
            TransportOpenFailed => "failed to open the I2C bus device",
            TransportConfigFailed => "failed to configure the I2C bus device",
            TransportIo(_) => "bus transfer failed",
            ChecksumMismatch => "CRC of the received data does not match",
            NotOpen => "the bus is not open",
        }
    }
}
