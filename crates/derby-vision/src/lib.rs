//! Client for the remote object detection service.
//!
//! This crate provides:
//! - An HTTP client that sends a Cloud Storage image URI to the inference
//!   VM and turns its JSON answer into typed bounding boxes
//! - Environment-driven configuration with fail-fast validation
//! - Scripted and random response simulators for running without the
//!   inference service
//! - Tracing spans and metrics for every call

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod simulator;
pub mod types;


pub use client::{validate_locator, VisionClient, GCS_SCHEME};
pub use config::{SimulationConfig, SimulationMode, VisionConfig};
pub use error::{VisionError, VisionResult};
pub use simulator::{RandomSimulator, ResponseSimulator, ScriptedSimulator};
pub use types::{parse_detections, DetectionRecord, DetectionResponse};
