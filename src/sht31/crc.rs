const POLYNOMIAL: u8 = 0x31;
const INIT: u8 = 0xFF;

/// CRC-8 as specified in the SHT3x datasheet: polynomial 0x31, init 0xFF,
/// no reflection, no final XOR.
pub const fn crc8(data: &[u8]) -> u8 {
    let mut crc = INIT;
    let mut i = 0;
    while i < data.len() {
        crc ^= data[i];
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        i += 1;
    }
    crc
}
