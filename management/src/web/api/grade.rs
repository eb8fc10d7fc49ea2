use crate::utils::config::Config;
use crate::utils::logging::*;
use actix_web::{post, web, HttpResponse, Responder, Scope};
use common::grading::matcher::grade_with_policy;
use common::grading::utils::bounding_box::BoundingBox;
use serde::Deserialize;
use serde_json::json;

pub fn initialize() -> Scope {
    web::scope("/grade")
        .service(grade)
}

#[derive(Deserialize, Debug)]
struct GradeRequest {
    ground_truth: Vec<BoundingBox>,
    boxes: Vec<BoundingBox>,
    threshold: Option<f64>,
    class_aware: Option<bool>,
}

/// Grades a box set against an ad-hoc ground truth without storing anything.
#[post("")]
async fn grade(request: web::Json<GradeRequest>) -> impl Responder {
    let request = request.into_inner();
    let mut policy = Config::now().await.match_policy();
    if let Some(threshold) = request.threshold {
        policy.threshold = threshold;
    }
    if let Some(class_aware) = request.class_aware {
        policy.class_aware = class_aware;
    }
    match grade_with_policy(&request.ground_truth, &request.boxes, &policy) {
        Ok(result) => HttpResponse::Ok().json(json!({
            "score": result.score(),
            "report": result.report(),
            "matches": result.matches,
        })),
        Err(err) => {
            logging_warning!(NetworkEntry::MalformedRequest(err.to_string()));
            HttpResponse::BadRequest().body(String::from(err))
        }
    }
}
