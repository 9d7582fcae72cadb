//! Object recognition HTTP client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use derby_models::{RecognitionResult, SensorMessage};
use reqwest::Client;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::config::{SimulationConfig, VisionConfig};
use crate::error::{VisionError, VisionResult};
use crate::metrics::{record_failure, record_request, record_simulated};
use crate::simulator::{simulator_from_config, ResponseSimulator};
use crate::types::parse_detections;

/// Scheme every image locator must start with.
pub const GCS_SCHEME: &str = "gs://";

/// Client for the object detection inference service.
///
/// Each call issues at most one request and holds no per-call state, so
/// a single client can be cloned and shared freely.
#[derive(Clone)]
pub struct VisionClient {
    http: Client,
    config: VisionConfig,
    endpoint: String,
    simulator: Option<Arc<dyn ResponseSimulator>>,
}

impl VisionClient {
    /// Create a new vision client.
    pub fn new(config: VisionConfig) -> VisionResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("derby-vision/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(VisionError::TransportError)?;

        let endpoint = config.endpoint();

        Ok(Self {
            http,
            config,
            endpoint,
            simulator: None,
        })
    }

    /// Create from environment variables, including simulation settings.
    pub fn from_env() -> VisionResult<Self> {
        let config = VisionConfig::from_env()?;
        let simulation = SimulationConfig::from_env()?;

        let mut client = Self::new(config)?;
        client.simulator = simulator_from_config(&simulation)?;
        Ok(client)
    }

    /// Attach a response simulator.
    pub fn with_simulator(mut self, simulator: Arc<dyn ResponseSimulator>) -> Self {
        self.simulator = Some(simulator);
        self
    }

    /// Detection endpoint URL, without query string.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// True if calls are currently served by the simulator.
    pub fn is_simulating(&self) -> bool {
        self.simulator.as_ref().is_some_and(|s| s.is_active())
    }

    /// Recognize objects in the front camera image of a sensor message.
    pub async fn recognize_objects(
        &self,
        message: &SensorMessage,
    ) -> VisionResult<RecognitionResult> {
        if let Some(result) = self.simulated_response() {
            return Ok(result);
        }

        match message.front_camera_image() {
            Some(locator) => self.recognize(locator).await,
            None => {
                let err = VisionError::invalid_input(
                    "sensor message has no sensors.frontCameraImagePathGCS",
                );
                record_failure(err.kind());
                Err(err)
            }
        }
    }

    /// Recognize objects in the image at `locator` (a gs:// URI).
    ///
    /// When a simulator is active the locator is not inspected and no
    /// request is made.
    pub async fn recognize(&self, locator: &str) -> VisionResult<RecognitionResult> {
        if let Some(result) = self.simulated_response() {
            return Ok(result);
        }

        let result = self
            .recognize_remote(locator)
            .instrument(info_span!("vision_recognize", gcs_uri = %locator))
            .await;

        match &result {
            Ok(recognition) => debug!(boxes = recognition.len(), "Objects recognized"),
            Err(e) => {
                warn!(error = %e, gcs_uri = %locator, "Object recognition failed");
                record_failure(e.kind());
            }
        }
        result
    }

    fn simulated_response(&self) -> Option<RecognitionResult> {
        let simulator = self.simulator.as_ref().filter(|s| s.is_active())?;
        debug!("Returning a simulated vision response");
        record_simulated();
        Some(simulator.next_response())
    }

    async fn recognize_remote(&self, locator: &str) -> VisionResult<RecognitionResult> {
        validate_locator(locator)?;
        let body = self.fetch_detections(locator).await?;
        parse_detections(&body)
    }

    /// Issue the inference request and return the raw body of a
    /// successful response.
    async fn fetch_detections(&self, locator: &str) -> VisionResult<String> {
        debug!(url = %self.endpoint, "Sending object inference request");

        let start = Instant::now();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("gcs_uri", locator)])
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;

        let status = response.status();
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        record_request(status.as_u16(), latency_ms);
        info!(status = status.as_u16(), latency_ms, "Vision response received");

        // The status is authoritative even if the error body cannot be read
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(body = %body, "Vision error body");
            return Err(VisionError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(body = %body, "Vision response body");
        Ok(body)
    }
}

/// Check that `locator` is a non-empty gs:// URI.
pub fn validate_locator(locator: &str) -> VisionResult<()> {
    if locator.trim().is_empty() {
        return Err(VisionError::invalid_input("image locator is empty"));
    }
    if !locator.starts_with(GCS_SCHEME) {
        return Err(VisionError::invalid_input(format!(
            "image locator must start with {}: {}",
            GCS_SCHEME, locator
        )));
    }
    Ok(())
}
