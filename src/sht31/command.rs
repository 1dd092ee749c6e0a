/// Two-byte commands, sent MSB first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(u16)]
pub enum Command {
    /// Single shot, high repeatability, clock stretching enabled.
    Measure = 0x2C06,
    Status = 0xF32D,
    HeaterEnable = 0x306D,
    HeaterDisable = 0x3066,
}

impl Command {
    pub fn bytes(&self) -> [u8; 2] {
        (*self as u16).to_be_bytes()
    }

    pub fn heater(enable: bool) -> Command {
        if enable {
            Command::HeaterEnable
        } else {
            Command::HeaterDisable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn wire_bytes() {
        assert_eq!(Command::Measure.bytes(), [0x2C, 0x06]);
        assert_eq!(Command::Status.bytes(), [0xF3, 0x2D]);
        assert_eq!(Command::heater(true).bytes(), [0x30, 0x6D]);
        assert_eq!(Command::heater(false).bytes(), [0x30, 0x66]);
    }
}
