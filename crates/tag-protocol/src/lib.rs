//! RFID Gateway Frame Codec
//!
//! This crate decodes and encodes the binary frames an RFID location
//! gateway exchanges with its platform over a persistent stream, and
//! derives device lifecycle events from the decoded fields.
//!
//! # Frame Format
//! ```text
//! 55 AA | header (28 bytes) | body (variable, TLV) | crc16 (2 bytes)
//! ```
//!
//! - `55 AA`: Start tag
//! - `header`: Fixed-offset fields — device id, sequence id, declared
//!   length, message/protocol/secure type ids, packed-BCD timestamp
//! - `body`: Message-type specific; label reports carry one or more
//!   21-byte TLV records of tag `0x8B01`, each guarded by a one-byte
//!   id checksum
//! - `crc16`: Over header and body
//!
//! # Architecture
//!
//! The modules line up with the decode pipeline:
//! - [`codec`] splits a raw byte stream into whole frames
//! - [`frame`] validates the envelope and dispatches on message type
//! - [`header`] and [`label`] do the fixed-offset field extraction
//! - [`event`] classifies a decoded label report into a lifecycle event
//! - [`heartbeat`] builds the outbound acknowledgement frame
//!
//! Everything is a pure, synchronous computation over in-memory buffers;
//! transport, connection lifecycle, and the host message bus belong to
//! the caller.
//!
//! # Example
//!
//! ```rust
//! use tag_protocol::{DeviceEvent, Frame, FrameBody, GatewayCodec, LabelReport};
//!
//! let report = LabelReport::new(
//!     0x01,
//!     [0xAA, 0xBB, 0xCC, 0xDD],
//!     0x00, // neither presence bit set: the tag has departed
//!     0x00,
//!     -60,
//!     [0x26, 0x08, 0x06, 0x10, 0x20, 0x30],
//! );
//! let wire = Frame::label_report("GATE01", 1, vec![report]).encode();
//!
//! let mut codec = GatewayCodec::new();
//! codec.push_bytes(&wire);
//! let frame = codec.next_frame().unwrap();
//!
//! if let FrameBody::LabelReport(reports) = &frame.body {
//!     let event = reports[0].to_offline();
//!     assert!(matches!(event, DeviceEvent::Offline { .. }));
//! }
//! ```

pub mod checksum;
pub mod codec;
pub mod error;
pub mod event;
pub mod frame;
pub mod header;
pub mod heartbeat;
pub mod label;
pub mod timestamp;

pub use codec::GatewayCodec;
pub use error::DecodeError;
pub use event::DeviceEvent;
pub use frame::{
    Frame, FrameBody, CRC_LEN, MSG_HEARTBEAT, MSG_HEARTBEAT_ACK, MSG_LABEL_REPORT,
    PROTOCOL_ID_DEFAULT, SECURE_ID_NONE, START_TAG,
};
pub use header::{FrameHeader, DEVICE_ID_LEN, HEADER_LEN};
pub use heartbeat::HeartbeatAck;
pub use label::{LabelReport, LABEL_REPORT_LEN, TLV_LABEL_REPORT};
