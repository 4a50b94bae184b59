//! RFID Gateway Simulation Library
//!
//! This crate provides a simulation layer for testing the gateway frame
//! codec without physical RFID hardware. It includes:
//!
//! - **VirtualGateway**: Simulates a gateway that emits protocol-accurate
//!   label-report and heartbeat frames and consumes acknowledgements
//! - **LabelSighting**: Describes one tag sighting in terms of the
//!   presence flags a real antenna would report
//!
//! # Example
//!
//! ```rust
//! use tag_sim::{LabelSighting, VirtualGateway};
//!
//! let mut gateway = VirtualGateway::new("GATE01");
//!
//! // A tag sitting on the station's antenna
//! gateway.sight_label(&LabelSighting {
//!     label_id: [0xAA, 0xBB, 0xCC, 0xDD],
//!     attached_to_station: true,
//!     ..LabelSighting::default()
//! });
//!
//! // Get pending protocol-encoded output
//! while let Some(bytes) = gateway.take_output() {
//!     println!("Gateway output: {:02X?}", bytes);
//! }
//! ```

pub mod gateway;

pub use gateway::{LabelSighting, VirtualGateway};
