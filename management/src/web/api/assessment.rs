use crate::management::assessment_manager::AssessmentManager;
use crate::management::coco_importer::{CocoDataset, CocoImporter};
use crate::management::utils::assessment_image::AssessmentImage;
use crate::management::utils::difficulty::Difficulty;
use crate::utils::logging::*;
use crate::web::api::record_error_response;
use actix_web::{get, post, web, HttpResponse, Responder, Scope};
use common::grading::utils::bounding_box::{validate_boxes, BoundingBox, BoxSetKind};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

pub fn initialize() -> Scope {
    web::scope("/assessment")
        .service(create_assessment)
        .service(import_coco)
        .service(list_assessments)
        .service(get_assessment)
        .service(delete_assessment)
        .service(restore_assessment)
}

#[derive(Deserialize, Debug)]
struct CreateAssessment {
    image_file: String,
    ground_truth: Vec<BoundingBox>,
    #[serde(default)]
    difficulty: Difficulty,
}

#[derive(Deserialize, Debug)]
struct ListQuery {
    #[serde(default)]
    with_deleted: bool,
}

#[post("/create")]
async fn create_assessment(request: web::Json<CreateAssessment>) -> impl Responder {
    let request = request.into_inner();
    if request.image_file.trim().is_empty() {
        return HttpResponse::BadRequest().body("Invalid image file name.");
    }
    if let Err(err) = validate_boxes(&request.ground_truth, BoxSetKind::GroundTruth) {
        logging_warning!(NetworkEntry::MalformedRequest(err.to_string()));
        return HttpResponse::BadRequest().body(String::from(err));
    }
    let assessment = AssessmentImage::new(request.image_file, request.ground_truth, request.difficulty);
    match AssessmentManager::add_if_absent(assessment).await {
        Ok(uuid) => HttpResponse::Ok().json(json!({ "uuid": uuid })),
        Err(err) => HttpResponse::Conflict().body(String::from(err)),
    }
}

#[post("/import_coco")]
async fn import_coco(dataset: web::Json<CocoDataset>) -> impl Responder {
    HttpResponse::Ok().json(CocoImporter::import(&dataset.into_inner()).await)
}

#[get("/list")]
async fn list_assessments(query: web::Query<ListQuery>) -> impl Responder {
    HttpResponse::Ok().json(AssessmentManager::list_assessments(query.with_deleted).await)
}

#[get("/{uuid}")]
async fn get_assessment(uuid: web::Path<Uuid>) -> impl Responder {
    match AssessmentManager::get_assessment(uuid.into_inner()).await {
        Ok(assessment) => HttpResponse::Ok().json(assessment),
        Err(err) => record_error_response(err),
    }
}

#[post("/{uuid}/delete")]
async fn delete_assessment(uuid: web::Path<Uuid>) -> impl Responder {
    match AssessmentManager::soft_delete(uuid.into_inner()).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => record_error_response(err),
    }
}

#[post("/{uuid}/restore")]
async fn restore_assessment(uuid: web::Path<Uuid>) -> impl Responder {
    match AssessmentManager::restore(uuid.into_inner()).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => record_error_response(err),
    }
}
