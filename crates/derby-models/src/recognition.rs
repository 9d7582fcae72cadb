//! Recognition result model.

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;

/// All objects recognized in a single image.
///
/// Boxes are kept in the order they were added. The same category may
/// appear any number of times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    boxes: Vec<BoundingBox>,
}

impl RecognitionResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bounding box.
    pub fn add_box(&mut self, bbox: BoundingBox) {
        self.boxes.push(bbox);
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.boxes.iter()
    }

    /// Boxes labelled with `category`, in insertion order.
    pub fn by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a BoundingBox> + 'a {
        self.boxes.iter().filter(move |b| b.category() == category)
    }

    /// Highest-scoring box for `category`, if any.
    ///
    /// The returned box borrows only from `self`, not from `category`.
    pub fn best_match(&self, category: &str) -> Option<&BoundingBox> {
        self.boxes
            .iter()
            .filter(|b| b.category() == category)
            .max_by(|a, b| a.score().total_cmp(&b.score()))
    }

    /// Distinct categories, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for bbox in &self.boxes {
            if !seen.contains(&bbox.category()) {
                seen.push(bbox.category());
            }
        }
        seen
    }

    pub fn into_boxes(self) -> Vec<BoundingBox> {
        self.boxes
    }
}

impl From<Vec<BoundingBox>> for RecognitionResult {
    fn from(boxes: Vec<BoundingBox>) -> Self {
        Self { boxes }
    }
}

impl FromIterator<BoundingBox> for RecognitionResult {
    fn from_iter<I: IntoIterator<Item = BoundingBox>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecognitionResult {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
