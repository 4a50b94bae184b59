//! Virtual gateway simulation
//!
//! Provides a simulated RFID gateway that generates protocol-accurate
//! frames for tag sightings and keepalives, and tracks the platform's
//! heartbeat acknowledgements.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tag_protocol::{timestamp, Frame, FrameBody, GatewayCodec, LabelReport};

/// One tag sighting, described by the signals a real antenna reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSighting {
    /// Raw 4-byte label identifier
    pub label_id: [u8; 4],
    /// Label hardware type
    pub label_type: u8,
    /// Tag is inside the station's read range
    pub in_boundary: bool,
    /// Tag is sitting on the reading station itself
    pub attached_to_station: bool,
    /// Antenna direction, 0..=15
    pub antenna_direction: u8,
    /// Tamper/removal flag
    pub removed: bool,
    /// Battery low flag
    pub low_power: bool,
    /// Signal strength in dBm
    pub rssi: i8,
}

impl Default for LabelSighting {
    fn default() -> Self {
        Self {
            label_id: [0xAA, 0xBB, 0xCC, 0xDD],
            label_type: 0x01,
            in_boundary: true,
            attached_to_station: false,
            antenna_direction: 0,
            removed: false,
            low_power: false,
            rssi: -55,
        }
    }
}

impl LabelSighting {
    /// Pack the presence flags and direction into the channel byte
    fn antenna_channel(&self) -> u8 {
        (u8::from(self.in_boundary) << 7)
            | (u8::from(self.attached_to_station) << 6)
            | (self.antenna_direction & 0x0F)
    }

    /// Pack the removal and battery flags into the status byte
    fn label_status(&self) -> u8 {
        (u8::from(self.removed) << 4) | u8::from(self.low_power)
    }

    /// Build the wire-level report for this sighting
    pub fn to_report(&self, timestamp: [u8; 6]) -> LabelReport {
        LabelReport::new(
            self.label_type,
            self.label_id,
            self.antenna_channel(),
            self.label_status(),
            self.rssi,
            timestamp,
        )
    }
}

/// A simulated gateway that generates protocol-accurate frames
#[derive(Debug)]
pub struct VirtualGateway {
    /// Device identifier stamped on every emitted frame
    device_id: String,
    /// Next sequence id to stamp
    next_seq: u32,
    /// Reassembles platform → gateway bytes into frames
    codec: GatewayCodec,
    /// Pending encoded output, oldest first
    pending_output: VecDeque<Vec<u8>>,
    /// Sequence id and op indicator of the newest acknowledgement
    last_ack: Option<(u32, u8)>,
}

impl VirtualGateway {
    /// Create a gateway with the given device id
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            next_seq: 1,
            codec: GatewayCodec::new(),
            pending_output: VecDeque::new(),
            last_ack: None,
        }
    }

    /// Get the gateway's device identifier
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Report one tag sighting; returns the sequence id used
    pub fn sight_label(&mut self, sighting: &LabelSighting) -> u32 {
        self.sight_labels(std::slice::from_ref(sighting))
    }

    /// Report several sightings in a single multi-record frame
    pub fn sight_labels(&mut self, sightings: &[LabelSighting]) -> u32 {
        let now = timestamp::now_bcd();
        let reports = sightings.iter().map(|s| s.to_report(now)).collect();
        let seq = self.bump_seq();
        self.pending_output
            .push_back(Frame::label_report(&self.device_id, seq, reports).encode());
        seq
    }

    /// Emit a keepalive; returns the sequence id used
    pub fn heartbeat(&mut self) -> u32 {
        let seq = self.bump_seq();
        self.pending_output
            .push_back(Frame::heartbeat(&self.device_id, seq).encode());
        seq
    }

    /// Feed platform → gateway bytes into the gateway
    ///
    /// Heartbeat acknowledgements addressed to this device update the
    /// last-ack state; anything else is logged and discarded.
    pub fn handle_input(&mut self, data: &[u8]) {
        self.codec.push_bytes(data);
        while let Some(frame) = self.codec.next_frame() {
            match frame.body {
                FrameBody::HeartbeatAck { op_indicator, .. } => {
                    if frame.header.device_id == self.device_id {
                        self.last_ack = Some((frame.header.seq_id, op_indicator));
                    } else {
                        tracing::warn!(
                            "ack for {} delivered to {}",
                            frame.header.device_id,
                            self.device_id
                        );
                    }
                }
                other => {
                    tracing::warn!("unexpected platform frame: {other:?}");
                }
            }
        }
    }

    /// Sequence id and op indicator of the newest acknowledgement
    pub fn last_ack(&self) -> Option<(u32, u8)> {
        self.last_ack
    }

    /// Take the next pending output bytes
    pub fn take_output(&mut self) -> Option<Vec<u8>> {
        self.pending_output.pop_front()
    }

    /// Check if there is pending output
    pub fn has_output(&self) -> bool {
        !self.pending_output.is_empty()
    }

    fn bump_seq(&mut self) -> u32 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }
}
