//! Antenna/label report TLV codec
//!
//! A label-report frame body carries one or more TLV segments of tag
//! `0x8B01`, each a fixed 21 bytes:
//!
//! ```text
//! offset  0..2    tlv tag (0x8B01)
//! offset  2..4    value length (0x0011)
//! offset  4       antenna channel (bit7 in-range, bit6 attached, bits0-3 direction)
//! offset  5       label type
//! offset  6..10   label id
//! offset 10       id checksum (byte sum over offsets 5..10)
//! offset 11..13   reserved
//! offset 13       label status (bit4 removed, bit0 low power)
//! offset 14       rssi (signed dBm)
//! offset 15..21   device-reported timestamp, packed BCD
//! ```
//!
//! A checksum mismatch makes the record unusable; it is dropped without
//! invalidating sibling records in the same frame.

use crate::checksum::byte_sum;
use crate::error::DecodeError;
use crate::timestamp::TIMESTAMP_LEN;

/// TLV tag of the antenna/label report
pub const TLV_LABEL_REPORT: u16 = 0x8B01;
/// Total size of one report segment, tag and length prefix included
pub const LABEL_REPORT_LEN: usize = 21;
/// Value length carried in the segment's length field
pub const LABEL_REPORT_VALUE_LEN: u16 = (LABEL_REPORT_LEN - 4) as u16;

/// One decoded antenna/label report
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelReport {
    /// Presence flags and antenna direction, bit-packed
    pub antenna_channel: u8,
    /// Label hardware type
    pub label_type: u8,
    /// Raw 4-byte label identifier
    pub label_id: [u8; 4],
    /// Transmitted check value over the label type and id bytes
    pub id_checksum: u8,
    /// Reserved by the firmware, carried but unused
    pub dummy: u16,
    /// Removal and battery flags, bit-packed
    pub label_status: u8,
    /// Signal strength in dBm
    pub rssi: i8,
    /// Device-reported sighting time, packed BCD
    pub timestamp: [u8; TIMESTAMP_LEN],
}

impl LabelReport {
    /// Build a report, computing the id checksum from the given fields
    pub fn new(
        label_type: u8,
        label_id: [u8; 4],
        antenna_channel: u8,
        label_status: u8,
        rssi: i8,
        timestamp: [u8; TIMESTAMP_LEN],
    ) -> Self {
        let mut window = [label_type, 0, 0, 0, 0];
        window[1..].copy_from_slice(&label_id);
        Self {
            antenna_channel,
            label_type,
            label_id,
            id_checksum: byte_sum(&window),
            dummy: 0,
            label_status,
            rssi,
            timestamp,
        }
    }

    /// Decode one TLV segment
    ///
    /// `segment` starts at the TLV tag. Fails with
    /// [`DecodeError::LabelChecksum`] when the embedded check value does
    /// not match the label id window; the record must then be discarded,
    /// not partially used.
    pub fn decode(segment: &[u8]) -> Result<Self, DecodeError> {
        if segment.len() < LABEL_REPORT_LEN {
            return Err(DecodeError::TruncatedFrame {
                needed: LABEL_REPORT_LEN - segment.len(),
            });
        }

        let tag = u16::from_be_bytes([segment[0], segment[1]]);
        if tag != TLV_LABEL_REPORT {
            return Err(DecodeError::UnsupportedTlv(tag));
        }

        let expected = byte_sum(&segment[5..10]);
        let actual = segment[10];
        if expected != actual {
            return Err(DecodeError::LabelChecksum { expected, actual });
        }

        let mut label_id = [0u8; 4];
        label_id.copy_from_slice(&segment[6..10]);
        let mut timestamp = [0u8; TIMESTAMP_LEN];
        timestamp.copy_from_slice(&segment[15..21]);

        Ok(Self {
            antenna_channel: segment[4],
            label_type: segment[5],
            label_id,
            id_checksum: actual,
            dummy: u16::from_be_bytes([segment[11], segment[12]]),
            label_status: segment[13],
            rssi: segment[14] as i8,
            timestamp,
        })
    }

    /// Serialize the report to its 21-byte TLV segment
    ///
    /// Writes the stored `id_checksum` verbatim, so a decode of the
    /// output reproduces this record exactly (use [`LabelReport::new`] to
    /// get a consistent check value).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(LABEL_REPORT_LEN);
        out.extend_from_slice(&TLV_LABEL_REPORT.to_be_bytes());
        out.extend_from_slice(&LABEL_REPORT_VALUE_LEN.to_be_bytes());
        out.push(self.antenna_channel);
        out.push(self.label_type);
        out.extend_from_slice(&self.label_id);
        out.push(self.id_checksum);
        out.extend_from_slice(&self.dummy.to_be_bytes());
        out.push(self.label_status);
        out.push(self.rssi as u8);
        out.extend_from_slice(&self.timestamp);
        out
    }

    /// Label id as a fixed-width lowercase hex string
    ///
    /// This is the stable identifier used across layers, child-device id
    /// included.
    pub fn label_id_hex(&self) -> String {
        hex::encode(self.label_id)
    }

    /// Whether the label is inside the station's read range (bit 7)
    pub fn in_boundary(&self) -> bool {
        self.antenna_channel & 0x80 != 0
    }

    /// Whether the label is attached to the reading station (bit 6)
    pub fn attached_to_station(&self) -> bool {
        self.antenna_channel & 0x40 != 0
    }

    /// Antenna direction, low 4 bits of the channel byte
    pub fn antenna_direction(&self) -> u8 {
        self.antenna_channel & 0x0F
    }

    /// Removal flag, bit 4 of the status byte
    pub fn is_removed(&self) -> bool {
        self.label_status & 0x10 != 0
    }

    /// Low-battery flag, bit 0 of the status byte
    pub fn low_power(&self) -> bool {
        self.label_status & 0x01 != 0
    }
}
