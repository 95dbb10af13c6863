// POST /api/chat handler
//
// A one-shot exchange that stands apart from conversations: nothing it
// produces is persisted. It is stricter than message creation: the model
// must be active and every requested plugin must exist and be enabled.

use chrono::Utc;

use crate::error::ApiError;
use crate::generator::generate_mock_response;
use crate::models::{ChatRequest, ChatResponse};
use crate::store::{SharedStore, Store};
use warp::{Rejection, Reply};

use super::reject;

pub async fn chat(store: &dyn Store, request: ChatRequest) -> Result<ChatResponse, ApiError> {
    let (model_id, plugin_ids, message) = request.into_parts()?;

    let model = store
        .get_model(model_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Model"))?;
    if !model.is_active() {
        return Err(ApiError::invalid("Selected model is not active"));
    }

    let plugins = if plugin_ids.is_empty() {
        Vec::new()
    } else {
        let found = store.find_plugins(&plugin_ids, true).await?;
        if found.len() != plugin_ids.len() {
            return Err(ApiError::invalid(
                "One or more plugins are not available or not enabled",
            ));
        }
        found
    };
    let plugin_names: Vec<String> = plugins.into_iter().map(|p| p.name).collect();

    let now = Utc::now();
    Ok(ChatResponse {
        id: now.timestamp_millis().to_string(),
        message: generate_mock_response(&message, &model.name, &plugin_names),
        model_name: model.name,
        plugins: plugin_names,
        timestamp: now,
    })
}

pub async fn chat_handler(
    store: SharedStore,
    request: ChatRequest,
) -> Result<impl Reply, Rejection> {
    let response = chat(&*store, request).await.map_err(reject)?;
    Ok(warp::reply::json(&response))
}
