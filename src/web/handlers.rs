use actix_files::NamedFile;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use log::error;
use serde_json::json;

use crate::persona::{self, Continuation, Dialogue, Story};
use crate::AppState;

// Root page handler
pub async fn index(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let page = data.config.public_dir.join("kid.html");
    match NamedFile::open_async(&page).await {
        Ok(file) => file.into_response(&req),
        Err(e) => {
            error!("Failed to open {}: {}", page.display(), e);
            HttpResponse::NotFound().body("Page not found")
        }
    }
}

// Health check endpoint
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
        "env": data.config.profile.as_str(),
        "hasKey": data.config.api_key.is_some(),
    }))
}

pub async fn kids_story(data: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    persona::respond::<Story>(data.client.as_ref(), &body).await
}

pub async fn sushi(data: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    persona::respond::<Dialogue>(data.client.as_ref(), &body).await
}

pub async fn creation_continue(data: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    persona::respond::<Continuation>(data.client.as_ref(), &body).await
}
