//! Heartbeat acknowledgement encoder
//!
//! The platform answers each gateway keepalive with a short frame: a
//! one-byte operation indicator plus the platform's current time, so the
//! device can discipline its clock from the ack.

use crate::frame::{assemble, MSG_HEARTBEAT_ACK, PROTOCOL_ID_DEFAULT, SECURE_ID_NONE};
use crate::header::{FrameHeader, HEADER_LEN};
use crate::timestamp::{self, TIMESTAMP_LEN};

/// A heartbeat acknowledgement, constructed per response and serialized once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatAck {
    /// Gateway this ack is addressed to
    pub device_id: String,
    /// Sequence id echoed from the heartbeat being acknowledged
    pub seq_id: u32,
    /// Operation indicator (ack code)
    pub op_indicator: u8,
}

impl HeartbeatAck {
    pub fn new(device_id: impl Into<String>, seq_id: u32, op_indicator: u8) -> Self {
        Self {
            device_id: device_id.into(),
            seq_id,
            op_indicator,
        }
    }

    /// Serialize the ack, stamped with the current platform time
    pub fn encode(&self) -> Vec<u8> {
        self.encode_at(timestamp::now_bcd())
    }

    /// Serialize the ack with an explicit timestamp
    ///
    /// Deterministic seam for tests; [`HeartbeatAck::encode`] is this with
    /// the wall clock.
    pub fn encode_at(&self, now: [u8; TIMESTAMP_LEN]) -> Vec<u8> {
        let mut body = Vec::with_capacity(1 + TIMESTAMP_LEN);
        body.push(self.op_indicator);
        body.extend_from_slice(&now);

        let header = FrameHeader {
            device_id: self.device_id.clone(),
            seq_id: self.seq_id,
            message_length: (HEADER_LEN + body.len()) as u16,
            message_type_id: MSG_HEARTBEAT_ACK,
            protocol_id: PROTOCOL_ID_DEFAULT,
            secure_id: SECURE_ID_NONE,
            host_timestamp: now,
        };

        assemble(&header, &body)
    }
}
