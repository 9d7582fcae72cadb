//! Inference service response types.

use std::collections::BTreeMap;

use derby_models::{BoundingBox, RecognitionResult};
use serde::{Deserialize, Serialize};

use crate::error::{VisionError, VisionResult};

/// One detection as returned by the inference service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub score: f64,
}

/// Raw response body: category label to detections of that category.
pub type DetectionResponse = BTreeMap<String, Vec<DetectionRecord>>;

/// Flatten a typed response into a recognition result.
pub fn into_recognition_result(response: DetectionResponse) -> RecognitionResult {
    response
        .into_iter()
        .flat_map(|(category, records)| {
            records.into_iter().map(move |r| {
                BoundingBox::new(category.clone(), r.x, r.y, r.w, r.h, r.score)
            })
        })
        .collect()
}

/// Parse a raw inference response body.
///
/// Every record must carry numeric `x`, `y`, `w`, `h` and `score`.
/// Any shape mismatch fails the whole response.
pub fn parse_detections(body: &str) -> VisionResult<RecognitionResult> {
    let response: DetectionResponse = serde_json::from_str(body).map_err(|e| {
        VisionError::parse_error(format!("unexpected inference response: {}", e))
    })?;
    Ok(into_recognition_result(response))
}
