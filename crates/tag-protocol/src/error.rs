//! Error types for gateway frame decoding

use thiserror::Error;

/// Errors that can occur while decoding a gateway frame
///
/// All decode failures are local to one frame (or one TLV record) and
/// non-fatal to the connection: the caller drops the offending input and
/// keeps processing subsequent frames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer is shorter than the structure being decoded
    #[error("truncated frame: need {needed} more bytes")]
    TruncatedFrame { needed: usize },

    /// Declared message length disagrees with the actual buffer size
    #[error("length mismatch: header declares {declared} bytes, got {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Frame does not begin with the start tag
    #[error("missing start tag")]
    MissingStartTag,

    /// CRC16 trailer does not match the header+body contents
    #[error("crc mismatch: expected 0x{expected:04X}, got 0x{actual:04X}")]
    CrcMismatch { expected: u16, actual: u16 },

    /// Embedded label id checksum mismatch; the record is unusable
    #[error("label checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    LabelChecksum { expected: u8, actual: u8 },

    /// Header decoded but the message type is not recognized
    #[error("unsupported message type 0x{0:04X}")]
    UnsupportedMessageType(u16),

    /// TLV segment carries a tag this codec does not understand
    #[error("unsupported tlv tag 0x{0:04X}")]
    UnsupportedTlv(u16),
}
