use crate::application::media_service::MediaService;
use crate::data::media_store::FsMediaStore;
use crate::domain::error::DomainError;
use crate::presentation::dto::MediaUploadResponse;
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, get, put, web};
use tracing::info;

#[put("/media/{key}")]
async fn upload_media(
    req: HttpRequest,
    service: web::Data<MediaService<FsMediaStore>>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, DomainError> {
    let key = path.into_inner();
    let stored = service.store(&key, &body).await?;

    info!(
        request_id = %request_id(&req),
        key = %stored.key,
        size = body.len(),
        "media uploaded"
    );

    Ok(HttpResponse::Created().json(MediaUploadResponse {
        key: stored.key,
        url: stored.url,
    }))
}

#[get("/media/{key}")]
async fn get_media(
    service: web::Data<MediaService<FsMediaStore>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let key = path.into_inner();
    let bytes = service.fetch(&key).await?;
    let mime = mime_guess::from_path(&key).first_or_octet_stream();

    Ok(HttpResponse::Ok()
        .content_type(mime.as_ref())
        .body(bytes))
}
