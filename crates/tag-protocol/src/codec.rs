//! Streaming frame splitter
//!
//! Splits a raw byte stream into whole frames: scan for the start tag,
//! read the declared length out of the header, wait for the full frame,
//! then hand it to [`Frame::decode`]. Undecodable frames are logged and
//! dropped so one bad frame never stalls the stream.
//!
//! The codec holds no connection state; the caller owns the transport
//! and feeds bytes in whatever chunks the socket produces.

use crate::frame::{Frame, CRC_LEN, START_TAG};
use crate::header::HEADER_LEN;

/// Largest frame the declared length field can describe
const MAX_FRAME_LEN: usize = START_TAG.len() + u16::MAX as usize + CRC_LEN;

/// Streaming gateway protocol codec
#[derive(Debug)]
pub struct GatewayCodec {
    buffer: Vec<u8>,
}

impl GatewayCodec {
    /// Create an empty codec
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(256),
        }
    }

    /// Push raw bytes into the codec's buffer
    pub fn push_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);

        // Prevent unbounded growth on a garbage stream
        if self.buffer.len() > MAX_FRAME_LEN * 4 {
            let start = self.buffer.len() - MAX_FRAME_LEN;
            self.buffer = self.buffer[start..].to_vec();
        }
    }

    /// Try to extract the next complete frame from the buffer
    pub fn next_frame(&mut self) -> Option<Frame> {
        self.next_frame_with_bytes().map(|(frame, _)| frame)
    }

    /// Try to extract the next complete frame along with its raw bytes
    ///
    /// Useful for traffic monitoring where the exact bytes behind each
    /// frame matter.
    pub fn next_frame_with_bytes(&mut self) -> Option<(Frame, Vec<u8>)> {
        loop {
            let start = self.find_start_tag()?;
            if start > 0 {
                self.buffer.drain(..start);
            }

            // Need the fixed header before the declared length is readable.
            if self.buffer.len() < START_TAG.len() + HEADER_LEN {
                return None;
            }
            let declared =
                u16::from_be_bytes([self.buffer[16], self.buffer[17]]) as usize;
            if declared < HEADER_LEN {
                // Bogus length field; step past this start tag and resync.
                tracing::warn!("declared length {declared} below header size, resyncing");
                self.buffer.drain(..START_TAG.len());
                continue;
            }

            let total = START_TAG.len() + declared + CRC_LEN;
            if self.buffer.len() < total {
                return None;
            }

            let frame_bytes: Vec<u8> = self.buffer.drain(..total).collect();
            match Frame::decode(&frame_bytes) {
                Ok(frame) => return Some((frame, frame_bytes)),
                Err(err) => {
                    tracing::warn!("dropping undecodable frame: {err}");
                }
            }
        }
    }

    /// Clear the internal buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Find the start of the next frame (55 AA sequence)
    fn find_start_tag(&self) -> Option<usize> {
        self.buffer.windows(2).position(|w| w == START_TAG)
    }
}

impl Default for GatewayCodec {
    fn default() -> Self {
        Self::new()
    }
}
