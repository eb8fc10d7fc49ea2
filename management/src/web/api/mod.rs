pub mod assessment;
pub mod attempt;
pub mod config;
pub mod default;
pub mod grade;
pub mod log;

use actix_web::HttpResponse;
use common::utils::log_entry::record::RecordEntry;

pub fn record_error_response(err: RecordEntry) -> HttpResponse {
    match err {
        RecordEntry::AssessmentDoesNotExist(_) | RecordEntry::AttemptDoesNotExist(_) => HttpResponse::NotFound().body(String::from(err)),
        RecordEntry::RecordDeleted(_) => HttpResponse::Gone().body(String::from(err)),
        RecordEntry::RecordNotDeleted(_) | RecordEntry::DuplicateImage(_) => HttpResponse::Conflict().body(String::from(err)),
    }
}
