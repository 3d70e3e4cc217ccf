mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::media_service::MediaService;
use crate::application::post_service::PostService;
use crate::data::media_store::FsMediaStore;
use crate::data::post_repository::PostgresPostRepository;
use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use presentation::handlers;
use presentation::middleware::{RequestIdMiddleware, TimingMiddleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let pool = create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let post_repo = Arc::new(PostgresPostRepository::new(pool.clone()));
    let media_store = Arc::new(FsMediaStore::new(config.media_root.clone()));

    let post_service = PostService::new(Arc::clone(&post_repo));
    let media_service = MediaService::new(Arc::clone(&media_store), config.public_base_url.clone());

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TimingMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(web::PayloadConfig::new(config_data.max_upload_bytes))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(media_service.clone()))
            .service(
                web::scope("/api")
                    .service(handlers::post::create_post)
                    .service(handlers::post::get_posts)
                    .service(handlers::post::get_post)
                    .service(handlers::media::upload_media)
                    .service(handlers::media::get_media),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
