use crate::grading::utils::bounding_box::BoxSetKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradingEntry {
    #[error("{0} box {1} has a negative width or height")]
    NegativeDimension(BoxSetKind, usize),
    #[error("{0} box {1} has a non-finite coordinate")]
    NonFiniteCoordinate(BoxSetKind, usize),
    #[error("Match threshold {0} is outside of [0, 1]")]
    InvalidThreshold(f64),
}

impl From<GradingEntry> for String {
    #[inline(always)]
    fn from(value: GradingEntry) -> Self {
        value.to_string()
    }
}
