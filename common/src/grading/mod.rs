pub mod iou;
pub mod matcher;
pub mod utils;
