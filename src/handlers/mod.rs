// Request handlers
//
// Each resource module exposes plain async operations over a `&dyn Store`
// (used directly by tests and the seeder) and thin warp handlers that wrap
// them into replies.

pub mod chat;
pub mod conversations;
pub mod messages;
pub mod models;
pub mod plugins;
pub mod rejection;

pub use rejection::handle_rejection;

use crate::error::ApiError;
use crate::models::request::parse_id;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::Rejection;

/// Parse an id taken from the request path
fn path_id(raw: &str) -> Result<Uuid, Rejection> {
    parse_id(raw).map_err(warp::reject::custom)
}

fn reject(err: ApiError) -> Rejection {
    warp::reject::custom(err)
}

/// 201 with a JSON body
fn created<T: serde::Serialize>(body: &T) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(body), StatusCode::CREATED)
}
