//! Device lifecycle events derived from label reports
//!
//! The antenna channel byte carries two independent presence signals:
//! in-boundary (bit 7) and attached-to-station (bit 6). Only when both
//! are clear has the tag actually left the reading station; any other
//! combination is treated as continued presence, so the unregister and
//! offline classifiers fall back to an online event instead.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::label::LabelReport;
use crate::timestamp;

/// Lifecycle event forwarded to the host platform
///
/// A closed sum type: the adapter matches on the variant and translates
/// it into the host's own message schema.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceEvent {
    /// Bind a label to its parent gateway
    Register { child_id: String, parent_id: String },
    /// Detach a label from its parent gateway
    Unregister { child_id: String, parent_id: String },
    /// Label sighted, still present
    Online { child_id: String },
    /// Label has left the station
    Offline { child_id: String },
    /// Current label telemetry snapshot
    PropertyReport {
        child_id: String,
        parent_id: String,
        properties: HashMap<String, Value>,
    },
}

impl DeviceEvent {
    /// The label id this event concerns
    pub fn child_id(&self) -> &str {
        match self {
            Self::Register { child_id, .. }
            | Self::Unregister { child_id, .. }
            | Self::Online { child_id }
            | Self::Offline { child_id }
            | Self::PropertyReport { child_id, .. } => child_id,
        }
    }
}

impl LabelReport {
    /// Register the label as a child device of the gateway
    ///
    /// Unconditional; the caller decides when registration applies
    /// (typically on first sighting).
    pub fn to_register(&self, gateway_id: &str) -> DeviceEvent {
        DeviceEvent::Register {
            child_id: self.label_id_hex(),
            parent_id: gateway_id.to_owned(),
        }
    }

    /// Detach the label from the gateway once it has left the station
    ///
    /// Falls back to [`DeviceEvent::Online`] while either presence bit is
    /// still set.
    pub fn to_unregister(&self, gateway_id: &str) -> DeviceEvent {
        if self.has_departed() {
            DeviceEvent::Unregister {
                child_id: self.label_id_hex(),
                parent_id: gateway_id.to_owned(),
            }
        } else {
            self.to_online()
        }
    }

    /// Mark the label offline once it has left the station
    ///
    /// Same boundary test and online fallback as [`LabelReport::to_unregister`].
    pub fn to_offline(&self) -> DeviceEvent {
        if self.has_departed() {
            DeviceEvent::Offline {
                child_id: self.label_id_hex(),
            }
        } else {
            self.to_online()
        }
    }

    /// Mark the label online, unconditionally
    pub fn to_online(&self) -> DeviceEvent {
        DeviceEvent::Online {
            child_id: self.label_id_hex(),
        }
    }

    /// Snapshot of the label's telemetry, producible from any valid record
    ///
    /// While the label sits on the station the in-boundary reading is
    /// indeterminate; the property carries the literal `"/"` in that case.
    pub fn to_property_report(&self, gateway_id: &str) -> DeviceEvent {
        let is_inboundary = if self.attached_to_station() {
            "/".to_owned()
        } else {
            u8::from(self.in_boundary()).to_string()
        };

        let mut properties = HashMap::new();
        properties.insert("labelType".to_owned(), json!(self.label_type));
        properties.insert("labelId".to_owned(), json!(self.label_id_hex()));
        properties.insert("rssi".to_owned(), json!(self.rssi));
        properties.insert(
            "timeStamp".to_owned(),
            json!(timestamp::format(&self.timestamp)),
        );
        properties.insert("isInboundary".to_owned(), json!(is_inboundary));
        properties.insert(
            "attachStation".to_owned(),
            json!(u8::from(self.attached_to_station())),
        );
        properties.insert("isRemoved".to_owned(), json!(u8::from(self.is_removed())));
        properties.insert("lowPower".to_owned(), json!(u8::from(self.low_power())));
        properties.insert(
            "antennaDirection".to_owned(),
            json!(self.antenna_direction()),
        );

        DeviceEvent::PropertyReport {
            child_id: self.label_id_hex(),
            parent_id: gateway_id.to_owned(),
            properties,
        }
    }

    // Both presence bits clear: the tag is no longer at this station.
    fn has_departed(&self) -> bool {
        !self.attached_to_station() && !self.in_boundary()
    }
}
