/// Domain and wire types for the position tracker
///
/// The upstream (open-notify `iss-now.json`) reports coordinates as strings
/// inside an `iss_position` object plus a unix timestamp. The domain type
/// carries parsed floats and fills in the station's average altitude and
/// velocity, which the upstream does not report.
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{TrackerError, TrackerResult};

/// Average ISS altitude in km (not reported by the upstream)
pub const ISS_ALTITUDE_KM: f64 = 408.0;

/// Average ISS velocity in km/h (not reported by the upstream)
pub const ISS_VELOCITY_KMH: f64 = 27600.0;

/// Current ISS location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// UPSTREAM WIRE FORMAT
// =============================================================================

/// Raw upstream payload
#[derive(Debug, Deserialize)]
pub struct IssNowResponse {
    pub iss_position: WirePosition,
    pub timestamp: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Coordinates as the upstream sends them: decimal strings
#[derive(Debug, Deserialize)]
pub struct WirePosition {
    pub latitude: String,
    pub longitude: String,
}

impl IssPosition {
    /// Translate the upstream payload into the domain type
    ///
    /// String coordinates that fail to parse are a bad response, not a
    /// transport failure.
    pub fn from_wire(wire: IssNowResponse) -> TrackerResult<Self> {
        let latitude = parse_coordinate("latitude", &wire.iss_position.latitude)?;
        let longitude = parse_coordinate("longitude", &wire.iss_position.longitude)?;

        let timestamp = Utc
            .timestamp_opt(wire.timestamp, 0)
            .single()
            .ok_or_else(|| {
                TrackerError::UpstreamBadResponse(format!(
                    "timestamp {} out of range",
                    wire.timestamp
                ))
            })?;

        Ok(Self {
            latitude,
            longitude,
            altitude: ISS_ALTITUDE_KM,
            velocity: ISS_VELOCITY_KMH,
            timestamp,
        })
    }
}

fn parse_coordinate(name: &str, raw: &str) -> TrackerResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        TrackerError::UpstreamBadResponse(format!("unparseable {}: {:?}", name, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(lat: &str, lng: &str, ts: i64) -> IssNowResponse {
        IssNowResponse {
            iss_position: WirePosition {
                latitude: lat.to_string(),
                longitude: lng.to_string(),
            },
            timestamp: ts,
            message: Some("success".to_string()),
        }
    }

    #[test]
    fn test_wire_translation() {
        let position = IssPosition::from_wire(wire("50.1234", "-12.5", 1700000000)).unwrap();

        assert_eq!(position.latitude, 50.1234);
        assert_eq!(position.longitude, -12.5);
        assert_eq!(position.altitude, ISS_ALTITUDE_KM);
        assert_eq!(position.velocity, ISS_VELOCITY_KMH);
        assert_eq!(position.timestamp.timestamp(), 1700000000);
    }

    #[test]
    fn test_bad_coordinate_is_bad_response() {
        let err = IssPosition::from_wire(wire("not-a-number", "0.0", 1700000000)).unwrap_err();
        assert!(matches!(err, TrackerError::UpstreamBadResponse(_)));
    }

    #[test]
    fn test_upstream_json_shape_deserializes() {
        let body = r#"{
            "iss_position": {"latitude": "-31.8", "longitude": "139.2"},
            "timestamp": 1700000123,
            "message": "success"
        }"#;

        let wire: IssNowResponse = serde_json::from_str(body).unwrap();
        let position = IssPosition::from_wire(wire).unwrap();
        assert_eq!(position.longitude, 139.2);
    }

    #[test]
    fn test_domain_serialization_field_names() {
        let position = IssPosition::from_wire(wire("1.0", "2.0", 1700000000)).unwrap();
        let json = serde_json::to_value(&position).unwrap();

        assert!(json.get("latitude").is_some());
        assert!(json.get("longitude").is_some());
        assert!(json.get("altitude").is_some());
        assert!(json.get("velocity").is_some());
        assert!(json.get("timestamp").is_some());
    }
}
