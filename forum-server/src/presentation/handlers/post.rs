use crate::application::post_service::PostService;
use crate::data::post_repository::PostgresPostRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{CreatePostRequest, ListPostsQuery, ListPostsResponse};
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;
use uuid::Uuid;

#[post("/posts")]
async fn create_post(
    req: HttpRequest,
    service: web::Data<PostService<PostgresPostRepository>>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let post = service.create_post(payload.into_inner().into()).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        post_type = ?post.post_type,
        "post created"
    );

    Ok(HttpResponse::Created().json(post))
}

#[get("/posts/{id}")]
async fn get_post(
    service: web::Data<PostService<PostgresPostRepository>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[get("/posts")]
async fn get_posts(
    req: HttpRequest,
    service: web::Data<PostService<PostgresPostRepository>>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse, DomainError> {
    let posts = service.get_posts(query.limit, query.offset).await?;

    info!(
        request_id = %request_id(&req),
        "posts retrieved"
    );

    let total = posts.len();
    Ok(HttpResponse::Ok().json(ListPostsResponse {
        posts,
        total,
        limit: query.limit,
        offset: query.offset,
    }))
}
