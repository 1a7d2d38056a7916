use crc::{Algorithm, Crc, Digest};

/// CRC16 shared by requests and responses.
///
/// Polynomial 0x8001, zero initial value, no reflection, no final xor.
pub const CRC_16_WATCHDOG: Algorithm<u16> = Algorithm {
    width: 16,
    poly: 0x8001,
    init: 0x0000,
    refin: false,
    refout: false,
    xorout: 0x0000,
    check: 0xa829,
    residue: 0x0000,
};

static CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_WATCHDOG);

pub fn checksum(data: &[u8]) -> u16 {
    CRC.checksum(data)
}

/// Incremental digest, for when the covered bytes are not contiguous.
pub fn digest() -> Digest<'static, u16> {
    CRC.digest()
}

/// Split a checksum into its wire bytes, high byte first.
pub fn to_wire(crc: u16) -> [u8; 2] {
    crc.to_be_bytes()
}

pub fn from_wire(hi: u8, lo: u8) -> u16 {
    u16::from_be_bytes([hi, lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(checksum(b"123456789"), CRC_16_WATCHDOG.check);
    }

    #[test]
    fn digest_matches_checksum() {
        let mut d = digest();
        d.update(b"WC");
        d.update(&[0x01]);
        assert_eq!(d.finalize(), checksum(&[b'W', b'C', 0x01]));
    }

    #[test]
    fn request_checksums() {
        assert_eq!(checksum(&[b'W', b'C', 0x00]), 0x8246);
        assert_eq!(checksum(&[b'W', b'C', 0x01]), 0x0247);
        assert_eq!(checksum(&[b'W', b'C', 0x02]), 0x0245);
    }

    #[test]
    fn wire_order_is_high_byte_first() {
        assert_eq!(to_wire(0xc2e9), [0xc2, 0xe9]);
        assert_eq!(from_wire(0xc2, 0xe9), 0xc2e9);
    }
}
