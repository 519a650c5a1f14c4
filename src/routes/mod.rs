use actix_web::{HttpResponse, web};

use crate::dto::api::ErrorResponse;
use crate::services::{ServiceError, ServiceResult};

pub mod api;

/// Runs a synchronous store pipeline on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| ServiceError::Unexpected(e.to_string()))?
}

/// Maps a service failure onto the JSON error envelope.
///
/// `NotFound` becomes a 404; store and configuration failures are logged
/// and collapse into an opaque 500.
pub(crate) fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
        }
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}
