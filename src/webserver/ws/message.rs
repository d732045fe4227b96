/// WebSocket message schema
///
/// Every frame pushed to subscribers is a tagged envelope:
/// `{"type": "<kind>", "data": <payload>}`. The envelope is immutable and
/// transient - it is built once per publish and cloned into each
/// subscriber's queue, never persisted or retried.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tracker::IssPosition;

/// Message kinds the hub broadcasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    IssUpdate,
}

impl Topic {
    /// Wire code carried in the envelope's `type` field
    pub fn code(&self) -> &'static str {
        match self {
            Topic::IssUpdate => "iss_update",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "iss_update" => Some(Topic::IssUpdate),
            _ => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Broadcast envelope handed to every live subscriber at publish time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsEnvelope {
    /// Message kind (wire name `type`, matching the frontend contract)
    #[serde(rename = "type")]
    pub kind: String,

    /// Message payload
    pub data: serde_json::Value,
}

impl WsEnvelope {
    pub fn new(topic: Topic, data: serde_json::Value) -> Self {
        Self {
            kind: topic.code().to_string(),
            data,
        }
    }

    /// Envelope carrying a position update
    pub fn iss_update(position: &IssPosition) -> Result<Self, serde_json::Error> {
        Ok(Self::new(Topic::IssUpdate, serde_json::to_value(position)?))
    }

    /// Serialize to the JSON text frame sent over the socket
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::types::{IssNowResponse, WirePosition};

    #[test]
    fn test_topic_code_roundtrip() {
        assert_eq!(Topic::from_code(Topic::IssUpdate.code()), Some(Topic::IssUpdate));
        assert_eq!(Topic::from_code("unknown"), None);
    }

    #[test]
    fn test_envelope_wire_shape() {
        let wire = IssNowResponse {
            iss_position: WirePosition {
                latitude: "1.5".to_string(),
                longitude: "2.5".to_string(),
            },
            timestamp: 1700000000,
            message: None,
        };
        let position = IssPosition::from_wire(wire).unwrap();

        let envelope = WsEnvelope::iss_update(&position).unwrap();
        let json = envelope.to_json().unwrap();

        assert!(json.contains("\"type\":\"iss_update\""));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["data"]["latitude"], 1.5);
    }
}
