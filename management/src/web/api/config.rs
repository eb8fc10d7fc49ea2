use crate::utils::config::Config;
use crate::utils::logging::*;
use actix_web::{get, post, web, HttpResponse, Responder, Scope};

pub fn initialize() -> Scope {
    web::scope("/config")
        .service(get_config)
        .service(update_config)
}

#[get("/get")]
async fn get_config() -> impl Responder {
    web::Json(Config::now().await)
}

/// Takes effect for the next graded attempt. The worker count only changes on restart.
#[post("/update")]
async fn update_config(config: web::Json<Config>) -> impl Responder {
    let config = config.into_inner();
    if let Err(err) = config.validate() {
        logging_warning!(SystemEntry::InvalidConfig, format!("Err: {err}"));
        return HttpResponse::BadRequest().body(err);
    }
    if let Err(err) = config.save() {
        logging_error!(SystemEntry::InvalidConfig, err);
        return HttpResponse::InternalServerError().finish();
    }
    Config::update(config).await;
    logging_information!(SystemEntry::ConfigUpdated);
    HttpResponse::Ok().finish()
}
