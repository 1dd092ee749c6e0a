use log::debug;
use std::fmt;

use super::crc::crc8;
use super::error::{ErrorKind, Result};

/// Length of a measurement response: two CRC-protected words.
pub const RESPONSE_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurement {
    pub temperature: u16,
    pub humidity: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Degrees Celsius, one decimal.
    pub temperature: f64,
    /// Relative humidity in percent, one decimal.
    pub humidity: f64,
}

impl RawMeasurement {
    /// Decodes `tempHi tempLo tempCrc humHi humLo humCrc`. Both words must
    /// carry a valid CRC before either is used.
    pub fn from_response(data: &[u8; RESPONSE_LEN]) -> Result<RawMeasurement> {
        let temperature = checked_word(&data[0..3], "temperature")?;
        let humidity = checked_word(&data[3..6], "humidity")?;

        Ok(RawMeasurement {
            temperature,
            humidity,
        })
    }
}

fn checked_word(chunk: &[u8], name: &str) -> Result<u16> {
    let calculated = crc8(&chunk[..2]);
    let expected = chunk[2];
    if calculated != expected {
        debug!(
            "CRC of read {} does not match: expected {:#04x}, calculated {:#04x}",
            name, expected, calculated
        );
        return Err(ErrorKind::ChecksumMismatch.into());
    }

    Ok(u16::from_be_bytes([chunk[0], chunk[1]]))
}

/// Rounds to one decimal place, halves away from zero.
fn round_tenth(value: f64) -> f64 {
    (10.0 * value).round() / 10.0
}

impl From<RawMeasurement> for Measurement {
    fn from(raw: RawMeasurement) -> Self {
        let temperature = -45.0 + 175.0 * f64::from(raw.temperature) / 65535.0;
        let humidity = 100.0 * f64::from(raw.humidity) / 65535.0;

        Measurement {
            temperature: round_tenth(temperature),
            humidity: round_tenth(humidity),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temperature: {:.1}°C, humidity: {:.1}%",
            self.temperature, self.humidity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: [u8; RESPONSE_LEN] = [0x65, 0x1B, 0x0A, 0x5E, 0xB8, 0x0D];

    #[test]
    fn decodes_big_endian_words() {
        let raw = RawMeasurement::from_response(&GOOD).unwrap();
        assert_eq!(
            raw,
            RawMeasurement {
                temperature: 0x651B,
                humidity: 0x5EB8,
            }
        );
    }

    #[test]
    fn converts_documented_example() {
        let raw = RawMeasurement::from_response(&GOOD).unwrap();
        let m = Measurement::from(raw);
        assert_eq!(m.temperature, 24.1);
        assert_eq!(m.humidity, 37.0);
    }

    #[test]
    fn domain_extremes() {
        let low = Measurement::from(RawMeasurement {
            temperature: 0x0000,
            humidity: 0x0000,
        });
        assert_eq!(low.temperature, -45.0);
        assert_eq!(low.humidity, 0.0);

        let high = Measurement::from(RawMeasurement {
            temperature: 0xFFFF,
            humidity: 0xFFFF,
        });
        assert_eq!(high.temperature, 130.0);
        assert_eq!(high.humidity, 100.0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_tenth(23.45), 23.5);
        assert_eq!(round_tenth(23.449999), 23.4);
        assert_eq!(round_tenth(-0.05), -0.1);
        assert_eq!(round_tenth(-44.96), -45.0);
    }

    #[test]
    fn any_flipped_crc_bit_is_rejected() {
        for index in [2, 5] {
            for bit in 0..8 {
                let mut data = GOOD;
                data[index] ^= 1 << bit;
                let err = RawMeasurement::from_response(&data).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
            }
        }
    }

    #[test]
    fn corrupt_data_byte_is_rejected() {
        let mut data = GOOD;
        data[4] ^= 0x01;
        let err = RawMeasurement::from_response(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn display() {
        let m = Measurement {
            temperature: 24.1,
            humidity: 37.0,
        };
        assert_eq!(m.to_string(), "temperature: 24.1°C, humidity: 37.0%");
    }
}
