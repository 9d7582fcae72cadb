//! Sensor message models.

use serde::{Deserialize, Serialize};

/// Message published by the car after it captures sensor data.
///
/// Only the fields the vision pipeline reads are modelled; anything else
/// in the payload is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensors: Option<Sensors>,
}

/// Sensor readings attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sensors {
    /// Cloud Storage URI of the front camera image (gs://bucket/object)
    #[serde(
        rename = "frontCameraImagePathGCS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub front_camera_image_path_gcs: Option<String>,
}

impl SensorMessage {
    /// Build a message carrying a front camera image URI.
    pub fn with_front_camera_image(uri: impl Into<String>) -> Self {
        Self {
            sensors: Some(Sensors {
                front_camera_image_path_gcs: Some(uri.into()),
            }),
        }
    }

    /// The front camera image URI, if present.
    pub fn front_camera_image(&self) -> Option<&str> {
        self.sensors
            .as_ref()
            .and_then(|s| s.front_camera_image_path_gcs.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "carId": 7,
            "sensors": {
                "frontCameraImagePathGCS": "gs://derby-images/car7/0001.jpg",
                "distanceSensor": 120
            }
        }"#;
        let msg: SensorMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg.front_camera_image(),
            Some("gs://derby-images/car7/0001.jpg")
        );
    }

    #[test]
    fn test_missing_fields() {
        let msg: SensorMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.front_camera_image(), None);

        let msg: SensorMessage = serde_json::from_str(r#"{"sensors": {}}"#).unwrap();
        assert_eq!(msg.front_camera_image(), None);
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let msg = SensorMessage::with_front_camera_image("gs://b/o.jpg");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sensors"]["frontCameraImagePathGCS"], "gs://b/o.jpg");
    }
}
