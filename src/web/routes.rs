use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;

use crate::config::AllowedOrigins;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health_check))
            .route("/kids/story", web::post().to(handlers::kids_story))
            .route("/sushi", web::post().to(handlers::sushi))
            .route("/creation/continue", web::post().to(handlers::creation_continue)),
    )
    .route("/", web::get().to(handlers::index));
}

pub fn cors(origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);

    match origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}
