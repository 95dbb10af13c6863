// Rejection → HTTP status mapping

use std::convert::Infallible;

use crate::error::ApiError;
use crate::models::StatusMessage;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub const FALLBACK_MESSAGE: &str = "Something went wrong!";

/// Turn any rejection into a `{ "message": ... }` reply with a matching status
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(api_error) = err.find::<ApiError>() {
        let status = api_error.status_code();
        if status.is_server_error() {
            tracing::error!(error = %api_error, "request failed");
        }
        (status, api_error.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type".to_string(),
        )
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            FALLBACK_MESSAGE.to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&StatusMessage::new(message)),
        status,
    ))
}
