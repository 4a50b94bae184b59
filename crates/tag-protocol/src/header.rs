//! Fixed-length frame header codec
//!
//! Every frame type shares the same 28-byte header:
//!
//! ```text
//! offset  0..10   device id (ASCII, NUL-padded)
//! offset 10..14   sequence id (u32)
//! offset 14..16   message length (u16, header + body)
//! offset 16..18   message type id (u16)
//! offset 18..20   protocol id (u16)
//! offset 20..22   secure id (u16)
//! offset 22..28   host timestamp (6-byte packed BCD)
//! ```
//!
//! All integer fields are big-endian.

use crate::error::DecodeError;
use crate::timestamp::TIMESTAMP_LEN;

/// Size of the fixed header in bytes
pub const HEADER_LEN: usize = 28;
/// Width of the NUL-padded device id field
pub const DEVICE_ID_LEN: usize = 10;

/// The fixed-offset header shared by all frame types
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameHeader {
    /// Gateway device identifier (at most [`DEVICE_ID_LEN`] ASCII bytes)
    pub device_id: String,
    /// Per-connection message sequence number
    pub seq_id: u32,
    /// Declared length of header + body, excluding start tag and CRC
    pub message_length: u16,
    /// Frame type selector (see the `frame` module constants)
    pub message_type_id: u16,
    /// Protocol revision identifier
    pub protocol_id: u16,
    /// Security scheme identifier
    pub secure_id: u16,
    /// Sender's wall-clock time, packed BCD
    pub host_timestamp: [u8; TIMESTAMP_LEN],
}

impl FrameHeader {
    /// Decode the header from the front of a header+body slice
    ///
    /// `buf` must span exactly the region the declared message length
    /// covers; a shorter buffer fails with [`DecodeError::TruncatedFrame`]
    /// and a disagreeing declared length with
    /// [`DecodeError::LengthMismatch`].
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < HEADER_LEN {
            return Err(DecodeError::TruncatedFrame {
                needed: HEADER_LEN - buf.len(),
            });
        }

        let id_end = buf[..DEVICE_ID_LEN]
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(DEVICE_ID_LEN);
        let device_id = String::from_utf8_lossy(&buf[..id_end]).into_owned();

        let seq_id = u32::from_be_bytes([buf[10], buf[11], buf[12], buf[13]]);
        let message_length = u16::from_be_bytes([buf[14], buf[15]]);
        let message_type_id = u16::from_be_bytes([buf[16], buf[17]]);
        let protocol_id = u16::from_be_bytes([buf[18], buf[19]]);
        let secure_id = u16::from_be_bytes([buf[20], buf[21]]);

        let mut host_timestamp = [0u8; TIMESTAMP_LEN];
        host_timestamp.copy_from_slice(&buf[22..28]);

        if message_length as usize != buf.len() {
            return Err(DecodeError::LengthMismatch {
                declared: message_length as usize,
                actual: buf.len(),
            });
        }

        Ok(Self {
            device_id,
            seq_id,
            message_length,
            message_type_id,
            protocol_id,
            secure_id,
            host_timestamp,
        })
    }

    /// Serialize the header to its fixed 28-byte wire form
    ///
    /// A device id longer than [`DEVICE_ID_LEN`] bytes is a caller
    /// contract violation; the excess is truncated.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];

        let id = self.device_id.as_bytes();
        let id_len = id.len().min(DEVICE_ID_LEN);
        out[..id_len].copy_from_slice(&id[..id_len]);

        out[10..14].copy_from_slice(&self.seq_id.to_be_bytes());
        out[14..16].copy_from_slice(&self.message_length.to_be_bytes());
        out[16..18].copy_from_slice(&self.message_type_id.to_be_bytes());
        out[18..20].copy_from_slice(&self.protocol_id.to_be_bytes());
        out[20..22].copy_from_slice(&self.secure_id.to_be_bytes());
        out[22..28].copy_from_slice(&self.host_timestamp);

        out
    }
}
