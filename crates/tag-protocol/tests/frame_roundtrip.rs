//! Integration tests for the gateway frame codec
//!
//! These tests verify end-to-end behavior across the codec layers:
//! - Hand-built wire bytes decode to the expected fields
//! - Decode → classify → acknowledge round trips
//! - Streaming reassembly over fragmented input
//! - Property-based round trips over generated frames

use tag_protocol::{
    checksum, DeviceEvent, Frame, FrameBody, GatewayCodec, HeartbeatAck, LabelReport, CRC_LEN,
    HEADER_LEN, LABEL_REPORT_LEN, MSG_HEARTBEAT_ACK, MSG_LABEL_REPORT, START_TAG,
};

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    pub const GATEWAY: &str = "GATE01";

    /// The raw 21-byte TLV record used across the hand-built cases
    pub const RAW_TLV: [u8; LABEL_REPORT_LEN] = [
        0x8B, 0x01, 0x00, 0x11, // tlv tag + value length
        0x00, 0x01, // antenna channel, label type
        0xAA, 0xBB, 0xCC, 0xDD, // label id
        0x0F, // id checksum (byte sum of the preceding five bytes)
        0x00, 0x00, // reserved
        0x00, 0x2A, // label status, rssi
        0x26, 0x08, 0x06, 0x10, 0x20, 0x30, // timestamp
    ];

    /// Build a label-report frame byte-by-byte, without the encoder
    pub fn hand_built_report_frame() -> Vec<u8> {
        let mut header = Vec::with_capacity(HEADER_LEN);
        header.extend_from_slice(b"GATE01\0\0\0\0");
        header.extend_from_slice(&1u32.to_be_bytes());
        header.extend_from_slice(&((HEADER_LEN + RAW_TLV.len()) as u16).to_be_bytes());
        header.extend_from_slice(&MSG_LABEL_REPORT.to_be_bytes());
        header.extend_from_slice(&0x0200u16.to_be_bytes());
        header.extend_from_slice(&0x0000u16.to_be_bytes());
        header.extend_from_slice(&[0x26, 0x08, 0x06, 0x11, 0x00, 0x00]);

        let mut out = Vec::new();
        out.extend_from_slice(&START_TAG);
        out.extend_from_slice(&header);
        out.extend_from_slice(&RAW_TLV);
        let crc = checksum::crc16(&out[START_TAG.len()..]);
        out.extend_from_slice(&crc.to_be_bytes());
        out
    }

    pub fn sighting(antenna_channel: u8) -> LabelReport {
        LabelReport::new(
            0x01,
            [0xAA, 0xBB, 0xCC, 0xDD],
            antenna_channel,
            0x00,
            -55,
            [0x26, 0x08, 0x06, 0x10, 0x20, 0x30],
        )
    }

    pub fn reports(frame: &Frame) -> &[LabelReport] {
        match &frame.body {
            FrameBody::LabelReport(reports) => reports,
            other => panic!("expected label reports, got {other:?}"),
        }
    }
}

// ============================================================================
// Wire-Level Decode Tests
// ============================================================================

mod wire_tests {
    use super::*;

    #[test]
    fn hand_built_frame_decodes() {
        let frame = Frame::decode(&helpers::hand_built_report_frame()).unwrap();
        assert_eq!(frame.header.device_id, helpers::GATEWAY);
        assert_eq!(frame.header.seq_id, 1);
        assert_eq!(frame.header.message_type_id, MSG_LABEL_REPORT);

        let reports = helpers::reports(&frame);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].label_id_hex(), "aabbccdd");
        assert_eq!(reports[0].rssi, 0x2A);
    }

    #[test]
    fn raw_tlv_classifies_online() {
        let report = LabelReport::decode(&helpers::RAW_TLV).unwrap();
        assert_eq!(
            report.to_online(),
            DeviceEvent::Online {
                child_id: "aabbccdd".into()
            }
        );
    }

    #[test]
    fn encoder_agrees_with_hand_built_bytes() {
        let frame = Frame::decode(&helpers::hand_built_report_frame()).unwrap();
        assert_eq!(frame.encode(), helpers::hand_built_report_frame());
    }
}

// ============================================================================
// Decode → Classify → Acknowledge Flow
// ============================================================================

mod flow_tests {
    use super::*;

    #[test]
    fn departed_label_flows_to_unregister() {
        let wire = Frame::label_report(helpers::GATEWAY, 10, vec![helpers::sighting(0x00)]).encode();
        let frame = Frame::decode(&wire).unwrap();
        let gateway_id = frame.header.device_id.clone();

        let events: Vec<DeviceEvent> = helpers::reports(&frame)
            .iter()
            .map(|r| r.to_unregister(&gateway_id))
            .collect();

        assert_eq!(
            events,
            vec![DeviceEvent::Unregister {
                child_id: "aabbccdd".into(),
                parent_id: helpers::GATEWAY.into(),
            }]
        );
    }

    #[test]
    fn present_label_flows_to_online() {
        for channel in [0x40u8, 0x80, 0xC0] {
            let wire =
                Frame::label_report(helpers::GATEWAY, 11, vec![helpers::sighting(channel)]).encode();
            let frame = Frame::decode(&wire).unwrap();
            let events: Vec<DeviceEvent> = helpers::reports(&frame)
                .iter()
                .map(|r| r.to_offline())
                .collect();
            assert_eq!(
                events,
                vec![DeviceEvent::Online {
                    child_id: "aabbccdd".into()
                }],
                "channel 0x{channel:02X} should stay online"
            );
        }
    }

    #[test]
    fn heartbeat_is_answered_with_matching_ack() {
        let wire = Frame::heartbeat("DEV001", 42).encode();
        let heartbeat = Frame::decode(&wire).unwrap();
        assert_eq!(heartbeat.body, FrameBody::Heartbeat);

        // The adapter answers from connection state: same device, same seq.
        let ack = HeartbeatAck::new(heartbeat.header.device_id, heartbeat.header.seq_id, 1);
        let ack_wire = ack.encode();
        assert_eq!(ack_wire.len(), START_TAG.len() + HEADER_LEN + 7 + CRC_LEN);

        let decoded = Frame::decode(&ack_wire).unwrap();
        assert_eq!(decoded.header.device_id, "DEV001");
        assert_eq!(decoded.header.seq_id, 42);
        assert_eq!(decoded.header.message_type_id, MSG_HEARTBEAT_ACK);
    }
}

// ============================================================================
// Streaming Reassembly Tests
// ============================================================================

mod streaming_tests {
    use super::*;

    #[test]
    fn byte_at_a_time_reassembly() {
        let wire = Frame::label_report(helpers::GATEWAY, 21, vec![helpers::sighting(0x80)]).encode();
        let mut codec = GatewayCodec::new();

        for &byte in &wire[..wire.len() - 1] {
            codec.push_bytes(&[byte]);
            assert!(codec.next_frame().is_none());
        }
        codec.push_bytes(&[wire[wire.len() - 1]]);
        assert_eq!(codec.next_frame().unwrap().header.seq_id, 21);
    }

    #[test]
    fn interleaved_garbage_and_frames() {
        let mut codec = GatewayCodec::new();
        codec.push_bytes(&[0xDE, 0xAD]);
        codec.push_bytes(&Frame::heartbeat(helpers::GATEWAY, 1).encode());
        codec.push_bytes(&[0x55]); // dangling half start tag
        codec.push_bytes(&[0xAA; 3]);
        codec.push_bytes(&Frame::heartbeat(helpers::GATEWAY, 2).encode());

        assert_eq!(codec.next_frame().unwrap().header.seq_id, 1);
        assert_eq!(codec.next_frame().unwrap().header.seq_id, 2);
        assert!(codec.next_frame().is_none());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn label_report() -> impl Strategy<Value = LabelReport> {
        (
            any::<u8>(),
            proptest::array::uniform4(any::<u8>()),
            any::<u8>(),
            any::<u8>(),
            any::<i8>(),
            proptest::array::uniform6(any::<u8>()),
        )
            .prop_map(|(label_type, label_id, channel, status, rssi, ts)| {
                LabelReport::new(label_type, label_id, channel, status, rssi, ts)
            })
    }

    proptest! {
        #[test]
        fn label_report_round_trips(report in label_report()) {
            let decoded = LabelReport::decode(&report.encode()).unwrap();
            prop_assert_eq!(decoded, report);
        }

        #[test]
        fn frames_round_trip(
            device_id in "[A-Z0-9]{1,10}",
            seq_id: u32,
            reports in proptest::collection::vec(label_report(), 0..4),
        ) {
            let frame = Frame::label_report(device_id, seq_id, reports);
            let decoded = Frame::decode(&frame.encode()).unwrap();
            prop_assert_eq!(decoded, frame);
        }

        #[test]
        fn acks_always_decode(
            device_id in "[A-Z0-9]{1,10}",
            seq_id: u32,
            op_indicator: u8,
        ) {
            let wire = HeartbeatAck::new(device_id.clone(), seq_id, op_indicator).encode();
            let frame = Frame::decode(&wire).unwrap();
            prop_assert_eq!(frame.header.device_id, device_id);
            prop_assert_eq!(frame.header.seq_id, seq_id);
            match frame.body {
                FrameBody::HeartbeatAck { op_indicator: op, .. } => {
                    prop_assert_eq!(op, op_indicator)
                }
                other => prop_assert!(false, "expected ack body, got {:?}", other),
            }
        }

        #[test]
        fn classifier_is_total(report in label_report()) {
            // Every valid record yields a lifecycle event for each question.
            let _ = report.to_register("GW");
            let _ = report.to_unregister("GW");
            let _ = report.to_offline();
            let _ = report.to_online();
            let _ = report.to_property_report("GW");
        }
    }
}
