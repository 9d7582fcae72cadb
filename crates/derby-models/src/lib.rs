//! Shared data models for the Robot Derby vision pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Sensor messages sent by the car
//! - Bounding boxes produced by object detection
//! - Recognition results returned to the controller

pub mod bounding_box;
pub mod recognition;
pub mod sensor;

// Re-export common types
pub use bounding_box::BoundingBox;
pub use recognition::RecognitionResult;
pub use sensor::{SensorMessage, Sensors};
