use actix_web::{HttpRequest, HttpResponse, Responder};

pub async fn default_route(req: HttpRequest) -> impl Responder {
    HttpResponse::NotFound().body(format!("{} not found.", req.path()))
}
