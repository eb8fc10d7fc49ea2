use crate::utils::log_entry::grading::GradingEntry;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Axis-aligned rectangle in pixel space, `(x, y)` being the top-left corner.
///
/// Accepts either `label` or `class` for the optional lesion label so that
/// boxes exported by annotation tools deserialize unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, alias = "class", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label: None,
        }
    }

    pub fn with_label<T: Into<String>>(mut self, label: T) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline(always)]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline(always)]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline(always)]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.0
    }

    pub fn validate(&self, kind: BoxSetKind, index: usize) -> Result<(), GradingEntry> {
        let finite = self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite();
        if !finite {
            return Err(GradingEntry::NonFiniteCoordinate(kind, index));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(GradingEntry::NegativeDimension(kind, index));
        }
        Ok(())
    }
}

/// Which side of a grading request a box set belongs to.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoxSetKind {
    GroundTruth,
    Submitted,
}

impl Display for BoxSetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxSetKind::GroundTruth => write!(f, "Ground truth"),
            BoxSetKind::Submitted => write!(f, "Submitted"),
        }
    }
}

/// Stops at the first malformed box.
pub fn validate_boxes(boxes: &[BoundingBox], kind: BoxSetKind) -> Result<(), GradingEntry> {
    boxes.iter()
        .enumerate()
        .try_for_each(|(index, bounding_box)| bounding_box.validate(kind, index))
}
