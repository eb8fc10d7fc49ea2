use crate::grading::utils::bounding_box::BoundingBox;

/// Intersection over Union of two boxes, always within `[0.0, 1.0]`.
///
/// Two zero-area boxes that do not overlap have no union; that case yields
/// `0.0` instead of dividing by zero.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());

    if right < left || bottom < top {
        return 0.0;
    }

    let intersection_area = (right - left).max(0.0) * (bottom - top).max(0.0);
    let union_area = a.area() + b.area() - intersection_area;
    if union_area <= 0.0 {
        return 0.0;
    }
    (intersection_area / union_area).clamp(0.0, 1.0)
}
