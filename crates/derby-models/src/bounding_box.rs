//! Bounding box model.

use serde::{Deserialize, Serialize};

/// A labelled rectangular region reported by object detection.
///
/// Coordinates are in image-relative units as returned by the inference
/// service. Fields are read-only once the box is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Detected object class (e.g. "ball", "home_base")
    category: String,
    /// X coordinate of the top-left corner
    x: f64,
    /// Y coordinate of the top-left corner
    y: f64,
    /// Width of the box
    width: f64,
    /// Height of the box
    height: f64,
    /// Detection confidence (typically 0.0 to 1.0)
    score: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(
        category: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        score: f64,
    ) -> Self {
        Self {
            category: category.into(),
            x,
            y,
            width,
            height,
            score,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Area of the box in image units.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Center point (x, y) of the box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
