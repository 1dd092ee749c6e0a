//! Driver for the Sensirion SHT31 temperature and humidity sensor over I²C.
#![deny(unsafe_code)]

pub mod sht31;

pub use crate::sht31::error::{Error, ErrorKind, Result};
pub use crate::sht31::measurement::Measurement;
pub use crate::sht31::{DeviceAddr, SHT31};
