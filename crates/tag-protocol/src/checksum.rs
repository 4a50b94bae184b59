//! Checksums shared by inbound validation and outbound generation
//!
//! Two algorithms are in play: a CRC16 over the whole header+body region
//! (frame trailer), and a one-byte wrapping sum over the label id window
//! inside a TLV record (device firmware's id check).

use crc::{Crc, CRC_16_MODBUS};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// CRC16 over a header+body byte range
///
/// Used both to validate the two trailing bytes of inbound frames and to
/// append the trailer to outbound frames.
pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// One-byte wrapping sum over a byte range
///
/// The gateway firmware guards the 4-byte label id (plus the adjacent
/// label type byte) with this check value.
pub fn byte_sum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}
