use crate::management::assessment_manager::AssessmentManager;
use crate::management::attempt_manager::AttemptManager;
use crate::management::grade_manager::GradeManager;
use crate::management::utils::user_attempt::UserAttempt;
use crate::utils::logging::*;
use crate::web::api::record_error_response;
use actix_web::{get, post, web, HttpResponse, Responder, Scope};
use common::grading::utils::bounding_box::{validate_boxes, BoundingBox, BoxSetKind};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

pub fn initialize() -> Scope {
    web::scope("/attempt")
        .service(submit_attempt)
        .service(user_attempts)
        .service(get_attempt)
        .service(regrade_attempt)
        .service(delete_attempt)
        .service(restore_attempt)
}

#[derive(Deserialize, Debug)]
struct SubmitAttempt {
    user_id: Uuid,
    assessment_id: Uuid,
    boxes: Vec<BoundingBox>,
}

/// Records the attempt and queues it; the score shows up on the attempt once graded.
#[post("/submit")]
async fn submit_attempt(request: web::Json<SubmitAttempt>) -> impl Responder {
    let request = request.into_inner();
    if let Err(err) = validate_boxes(&request.boxes, BoxSetKind::Submitted) {
        logging_warning!(NetworkEntry::MalformedRequest(err.to_string()));
        return HttpResponse::BadRequest().body(String::from(err));
    }
    if let Err(err) = AssessmentManager::get_assessment(request.assessment_id).await {
        return record_error_response(err);
    }
    let attempt = UserAttempt::new(request.user_id, request.assessment_id, request.boxes);
    let attempt_id = AttemptManager::add_attempt(attempt).await;
    GradeManager::add_task(attempt_id).await;
    HttpResponse::Ok().json(json!({
        "message": "Assessment submitted, grading in progress.",
        "attempt_id": attempt_id,
    }))
}

#[get("/user/{user_id}")]
async fn user_attempts(user_id: web::Path<Uuid>) -> impl Responder {
    HttpResponse::Ok().json(AttemptManager::user_attempts(user_id.into_inner()).await)
}

#[get("/{uuid}")]
async fn get_attempt(uuid: web::Path<Uuid>) -> impl Responder {
    match AttemptManager::get_attempt(uuid.into_inner()).await {
        Ok(attempt) => HttpResponse::Ok().json(attempt),
        Err(err) => record_error_response(err),
    }
}

#[post("/{uuid}/regrade")]
async fn regrade_attempt(uuid: web::Path<Uuid>) -> impl Responder {
    match GradeManager::regrade(uuid.into_inner()).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => record_error_response(err),
    }
}

#[post("/{uuid}/delete")]
async fn delete_attempt(uuid: web::Path<Uuid>) -> impl Responder {
    match AttemptManager::soft_delete(uuid.into_inner()).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => record_error_response(err),
    }
}

#[post("/{uuid}/restore")]
async fn restore_attempt(uuid: web::Path<Uuid>) -> impl Responder {
    match AttemptManager::restore(uuid.into_inner()).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => record_error_response(err),
    }
}
