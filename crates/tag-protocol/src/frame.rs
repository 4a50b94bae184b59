//! Whole-frame decode and encode
//!
//! Every frame on the stream has the same envelope:
//!
//! ```text
//! 55 AA | header (28 bytes) | body (variable) | crc16 (2 bytes)
//! ```
//!
//! The CRC covers header and body. Frame-specific decode logic is
//! selected by an explicit match on the header's message type id.

use crate::checksum::crc16;
use crate::error::DecodeError;
use crate::header::{FrameHeader, HEADER_LEN};
use crate::label::{LabelReport, LABEL_REPORT_LEN, TLV_LABEL_REPORT};
use crate::timestamp::{self, TIMESTAMP_LEN};

/// Start-of-frame marker preceding every header
pub const START_TAG: [u8; 2] = [0x55, 0xAA];
/// Size of the CRC16 trailer
pub const CRC_LEN: usize = 2;

/// Antenna/label report, gateway → platform
pub const MSG_LABEL_REPORT: u16 = 0x0B01;
/// Keepalive, gateway → platform
pub const MSG_HEARTBEAT: u16 = 0x0003;
/// Keepalive acknowledgement, platform → gateway
pub const MSG_HEARTBEAT_ACK: u16 = 0x8003;

/// Protocol revision stamped on generated frames
pub const PROTOCOL_ID_DEFAULT: u16 = 0x0200;
/// Secure id for the plain (unsecured) scheme
pub const SECURE_ID_NONE: u16 = 0x0000;

/// Decoded frame body, selected by message type id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBody {
    /// One or more label report records
    LabelReport(Vec<LabelReport>),
    /// Keepalive request; the body carries nothing the platform uses
    Heartbeat,
    /// Keepalive acknowledgement with the platform's ack code and time
    HeartbeatAck {
        op_indicator: u8,
        timestamp: [u8; TIMESTAMP_LEN],
    },
}

/// One complete protocol frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: FrameHeader,
    pub body: FrameBody,
}

impl Frame {
    /// Build a label-report frame, stamped with the current time
    pub fn label_report(
        device_id: impl Into<String>,
        seq_id: u32,
        reports: Vec<LabelReport>,
    ) -> Self {
        let body_len = reports.len() * LABEL_REPORT_LEN;
        Self {
            header: FrameHeader {
                device_id: device_id.into(),
                seq_id,
                message_length: (HEADER_LEN + body_len) as u16,
                message_type_id: MSG_LABEL_REPORT,
                protocol_id: PROTOCOL_ID_DEFAULT,
                secure_id: SECURE_ID_NONE,
                host_timestamp: timestamp::now_bcd(),
            },
            body: FrameBody::LabelReport(reports),
        }
    }

    /// Build a heartbeat frame, stamped with the current time
    pub fn heartbeat(device_id: impl Into<String>, seq_id: u32) -> Self {
        Self {
            header: FrameHeader {
                device_id: device_id.into(),
                seq_id,
                message_length: HEADER_LEN as u16,
                message_type_id: MSG_HEARTBEAT,
                protocol_id: PROTOCOL_ID_DEFAULT,
                secure_id: SECURE_ID_NONE,
                host_timestamp: timestamp::now_bcd(),
            },
            body: FrameBody::Heartbeat,
        }
    }

    /// Decode one complete frame from `buf`
    ///
    /// `buf` must span exactly one frame, start tag through CRC trailer.
    /// Structural failures (truncation, length disagreement, bad CRC,
    /// unknown message type) fail the whole frame; a bad label checksum
    /// drops only that record.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let envelope = START_TAG.len() + HEADER_LEN + CRC_LEN;
        if buf.len() < envelope {
            return Err(DecodeError::TruncatedFrame {
                needed: envelope - buf.len(),
            });
        }
        if buf[..START_TAG.len()] != START_TAG {
            return Err(DecodeError::MissingStartTag);
        }

        // Header and body, the region both the declared length and the CRC cover.
        let message = &buf[START_TAG.len()..buf.len() - CRC_LEN];
        let header = FrameHeader::decode(message)?;

        let expected = crc16(message);
        let actual = u16::from_be_bytes([buf[buf.len() - 2], buf[buf.len() - 1]]);
        if expected != actual {
            return Err(DecodeError::CrcMismatch { expected, actual });
        }

        let body_bytes = &message[HEADER_LEN..];
        let body = match header.message_type_id {
            MSG_LABEL_REPORT => FrameBody::LabelReport(decode_label_reports(body_bytes)?),
            MSG_HEARTBEAT => FrameBody::Heartbeat,
            MSG_HEARTBEAT_ACK => {
                if body_bytes.len() < 1 + TIMESTAMP_LEN {
                    return Err(DecodeError::TruncatedFrame {
                        needed: 1 + TIMESTAMP_LEN - body_bytes.len(),
                    });
                }
                let mut ts = [0u8; TIMESTAMP_LEN];
                ts.copy_from_slice(&body_bytes[1..1 + TIMESTAMP_LEN]);
                FrameBody::HeartbeatAck {
                    op_indicator: body_bytes[0],
                    timestamp: ts,
                }
            }
            other => return Err(DecodeError::UnsupportedMessageType(other)),
        };

        Ok(Self { header, body })
    }

    /// Serialize the frame: start tag, header, body, CRC trailer
    ///
    /// The header's declared length is derived from the body, so frames
    /// built by the typed constructors round-trip exactly.
    pub fn encode(&self) -> Vec<u8> {
        let body: Vec<u8> = match &self.body {
            FrameBody::LabelReport(reports) => {
                reports.iter().flat_map(|r| r.encode()).collect()
            }
            FrameBody::Heartbeat => Vec::new(),
            FrameBody::HeartbeatAck {
                op_indicator,
                timestamp,
            } => {
                let mut b = Vec::with_capacity(1 + TIMESTAMP_LEN);
                b.push(*op_indicator);
                b.extend_from_slice(timestamp);
                b
            }
        };

        let mut header = self.header.clone();
        header.message_length = (HEADER_LEN + body.len()) as u16;
        assemble(&header, &body)
    }
}

/// Assemble the final byte sequence for an outbound frame
pub(crate) fn assemble(header: &FrameHeader, body: &[u8]) -> Vec<u8> {
    let head = header.encode();
    let mut out = Vec::with_capacity(START_TAG.len() + head.len() + body.len() + CRC_LEN);
    out.extend_from_slice(&START_TAG);
    out.extend_from_slice(&head);
    out.extend_from_slice(body);
    let crc = crc16(&out[START_TAG.len()..]);
    out.extend_from_slice(&crc.to_be_bytes());
    out
}

/// Walk the TLV segments of a label-report body
///
/// A record failing its id checksum is dropped alone; an unrecognized tag
/// is skipped over via its length field. A segment extending past the
/// body fails the whole frame.
fn decode_label_reports(body: &[u8]) -> Result<Vec<LabelReport>, DecodeError> {
    let mut reports = Vec::new();
    let mut offset = 0;

    while offset < body.len() {
        let remaining = &body[offset..];
        if remaining.len() < 4 {
            return Err(DecodeError::TruncatedFrame {
                needed: 4 - remaining.len(),
            });
        }
        let tag = u16::from_be_bytes([remaining[0], remaining[1]]);
        let value_len = u16::from_be_bytes([remaining[2], remaining[3]]) as usize;
        let segment_len = 4 + value_len;
        if remaining.len() < segment_len {
            return Err(DecodeError::TruncatedFrame {
                needed: segment_len - remaining.len(),
            });
        }

        if tag == TLV_LABEL_REPORT {
            match LabelReport::decode(&remaining[..segment_len]) {
                Ok(report) => reports.push(report),
                Err(err @ DecodeError::LabelChecksum { .. }) => {
                    tracing::warn!("dropping label record: {err}");
                }
                Err(err) => return Err(err),
            }
        } else {
            tracing::warn!("skipping unknown tlv tag 0x{tag:04X} ({value_len} bytes)");
        }

        offset += segment_len;
    }

    Ok(reports)
}
