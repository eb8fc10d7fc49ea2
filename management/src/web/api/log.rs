use crate::utils::logging::{LogEntry, Logger};
use actix_web::{get, web, HttpResponse, Responder, Scope};
use chrono::{DateTime, Local};
use uuid::Uuid;

pub fn initialize() -> Scope {
    web::scope("/log")
        .service(system_log)
        .service(system_log_since)
        .service(attempt_log)
        .service(attempt_log_since)
}

#[get("/system_log")]
async fn system_log() -> impl Responder {
    HttpResponse::Ok().json(render(Logger::get_system_logs().await))
}

#[get("/system_log/since/{since}")]
async fn system_log_since(since: web::Path<String>) -> impl Responder {
    match parse_datetime(&since.into_inner()) {
        Ok(since_time) => HttpResponse::Ok().json(render(Logger::get_system_logs_since(since_time).await)),
        Err(err) => HttpResponse::BadRequest().body(err),
    }
}

#[get("/{attempt_id}")]
async fn attempt_log(attempt_id: web::Path<Uuid>) -> impl Responder {
    match Logger::get_attempt_logs(attempt_id.into_inner()).await {
        Some(logs) => HttpResponse::Ok().json(render(logs)),
        None => HttpResponse::NotFound().body("Attempt has no log."),
    }
}

#[get("/{attempt_id}/since/{since}")]
async fn attempt_log_since(argument: web::Path<(Uuid, String)>) -> impl Responder {
    let (attempt_id, since) = argument.into_inner();
    let since_time = match parse_datetime(&since) {
        Ok(since_time) => since_time,
        Err(err) => return HttpResponse::BadRequest().body(err),
    };
    match Logger::get_attempt_logs_since(attempt_id, since_time).await {
        Some(logs) => HttpResponse::Ok().json(render(logs)),
        None => HttpResponse::NotFound().body("Attempt has no log."),
    }
}

fn render(logs: Vec<LogEntry>) -> Vec<String> {
    logs.iter().map(LogEntry::to_plain_string).collect()
}

fn parse_datetime(datetime: &str) -> Result<DateTime<Local>, String> {
    DateTime::parse_from_rfc3339(datetime)
        .map(|datetime| datetime.with_timezone(&Local))
        .map_err(|_| "Invalid datetime format.".to_string())
}
