//! Simulated inference responses.
//!
//! Simulators stand in for the inference service when no live
//! infrastructure is available. The client only sees the
//! [`ResponseSimulator`] trait.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use derby_models::{BoundingBox, RecognitionResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::{SimulationConfig, SimulationMode};
use crate::error::{VisionError, VisionResult};
use crate::types::{into_recognition_result, DetectionResponse};

/// Source of fake recognition results.
pub trait ResponseSimulator: Send + Sync {
    /// Whether the client should use this simulator instead of the network.
    fn is_active(&self) -> bool;

    /// Produce the next simulated result.
    fn next_response(&self) -> RecognitionResult;
}

/// Build the simulator selected by `config`, if any.
pub fn simulator_from_config(
    config: &SimulationConfig,
) -> VisionResult<Option<Arc<dyn ResponseSimulator>>> {
    let simulator: Arc<dyn ResponseSimulator> = match config.mode {
        SimulationMode::Off => return Ok(None),
        SimulationMode::Scripted => match &config.script_path {
            Some(path) => Arc::new(ScriptedSimulator::from_file(path)?),
            None => Arc::new(ScriptedSimulator::default_sequence()),
        },
        SimulationMode::Random => {
            let simulator = match config.seed {
                Some(seed) => RandomSimulator::with_seed(seed),
                None => RandomSimulator::new(),
            };
            Arc::new(simulator)
        }
    };
    info!(mode = ?config.mode, "Vision simulation enabled");
    Ok(Some(simulator))
}

// =============================================================================
// Scripted
// =============================================================================

/// Replays a fixed sequence of results, wrapping around at the end.
#[derive(Debug)]
pub struct ScriptedSimulator {
    responses: Vec<RecognitionResult>,
    cursor: AtomicUsize,
    active: AtomicBool,
}

impl ScriptedSimulator {
    /// Create an active simulator over `responses`.
    pub fn new(responses: Vec<RecognitionResult>) -> Self {
        Self {
            responses,
            cursor: AtomicUsize::new(0),
            active: AtomicBool::new(true),
        }
    }

    /// Built-in sequence: a ball approaching the car, then home base.
    pub fn default_sequence() -> Self {
        let frames = vec![
            vec![BoundingBox::new("ball", 520.0, 40.0, 18.0, 18.0, 0.62)],
            vec![BoundingBox::new("ball", 440.0, 110.0, 36.0, 36.0, 0.78)],
            vec![BoundingBox::new("ball", 330.0, 210.0, 72.0, 72.0, 0.91)],
            vec![BoundingBox::new("ball", 280.0, 300.0, 120.0, 120.0, 0.97)],
            vec![BoundingBox::new("home_base", 60.0, 180.0, 140.0, 90.0, 0.84)],
            vec![],
        ];
        Self::new(frames.into_iter().map(RecognitionResult::from).collect())
    }

    /// Load responses from a JSON file holding an array of
    /// inference-shaped objects.
    pub fn from_file(path: impl AsRef<Path>) -> VisionResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            VisionError::config_error(format!(
                "failed to read simulation file {}: {}",
                path.display(),
                e
            ))
        })?;
        let responses: Vec<DetectionResponse> = serde_json::from_str(&raw).map_err(|e| {
            VisionError::parse_error(format!(
                "invalid simulation file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::new(
            responses.into_iter().map(into_recognition_result).collect(),
        ))
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl ResponseSimulator for ScriptedSimulator {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    fn next_response(&self) -> RecognitionResult {
        if self.responses.is_empty() {
            return RecognitionResult::new();
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.responses.len();
        self.responses[index].clone()
    }
}

// =============================================================================
// Random
// =============================================================================

/// Generates random boxes inside a fixed frame.
pub struct RandomSimulator {
    categories: Vec<String>,
    frame_width: f64,
    frame_height: f64,
    max_boxes: usize,
    rng: Mutex<StdRng>,
    active: AtomicBool,
}

impl RandomSimulator {
    /// Default: balls and home base in a 640x480 frame, up to 3 boxes.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic generator for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            categories: vec!["ball".to_string(), "home_base".to_string()],
            frame_width: 640.0,
            frame_height: 480.0,
            max_boxes: 3,
            rng: Mutex::new(rng),
            active: AtomicBool::new(true),
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_frame(mut self, width: f64, height: f64) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    pub fn with_max_boxes(mut self, max_boxes: usize) -> Self {
        self.max_boxes = max_boxes;
        self
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }
}

impl Default for RandomSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSimulator for RandomSimulator {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    fn next_response(&self) -> RecognitionResult {
        let mut result = RecognitionResult::new();
        if self.categories.is_empty()
            || !self.frame_width.is_finite()
            || !self.frame_height.is_finite()
            || self.frame_width <= 1.0
            || self.frame_height <= 1.0
        {
            return result;
        }

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let count = rng.random_range(0..=self.max_boxes);
        for _ in 0..count {
            let category = &self.categories[rng.random_range(0..self.categories.len())];
            let width = rng.random_range(1.0..=(self.frame_width / 4.0).max(1.0));
            let height = rng.random_range(1.0..=(self.frame_height / 4.0).max(1.0));
            let x = rng.random_range(0.0..=self.frame_width - width);
            let y = rng.random_range(0.0..=self.frame_height - height);
            let score = rng.random_range(0.3_f64..=1.0);
            result.add_box(BoundingBox::new(category.as_str(), x, y, width, height, score));
        }
        result
    }
}
