pub mod bounding_box;
pub mod match_policy;
pub mod match_result;
