// /api/conversations handlers

use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{
    Conversation, ConversationDetail, ConversationView, CreateConversationRequest, ModelSummary,
    PluginSummary, StatusMessage, UpdateConversationRequest,
};
use crate::store::{SharedStore, Store};
use uuid::Uuid;
use warp::{Rejection, Reply};

use super::{created, path_id, reject};

/// All conversations, most recently updated first, with model and plugin
/// references resolved to their display fields.
pub async fn list_conversations(store: &dyn Store) -> Result<Vec<ConversationView>, ApiError> {
    let conversations = store.list_conversations().await?;

    let models: HashMap<Uuid, ModelSummary> = store
        .list_models()
        .await?
        .iter()
        .map(|m| (m.id, m.into()))
        .collect();
    let plugins: HashMap<Uuid, PluginSummary> = store
        .list_plugins()
        .await?
        .iter()
        .map(|p| (p.id, p.into()))
        .collect();

    Ok(conversations
        .into_iter()
        .map(|conversation| {
            let model = models.get(&conversation.model_id).cloned();
            let attached = conversation
                .plugin_ids
                .iter()
                .filter_map(|id| plugins.get(id).cloned())
                .collect();
            ConversationView::new(conversation, model, attached)
        })
        .collect())
}

pub async fn get_conversation(store: &dyn Store, id: Uuid) -> Result<Conversation, ApiError> {
    store
        .get_conversation(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Conversation"))
}

/// One conversation (references resolved) and its messages, oldest first
pub async fn get_conversation_detail(
    store: &dyn Store,
    id: Uuid,
) -> Result<ConversationDetail, ApiError> {
    let conversation = get_conversation(store, id).await?;

    let model = store
        .get_model(conversation.model_id)
        .await?
        .as_ref()
        .map(ModelSummary::from);
    let plugins = store
        .find_plugins(&conversation.plugin_ids, false)
        .await?
        .iter()
        .map(PluginSummary::from)
        .collect();
    let messages = store.list_messages(id).await?;

    Ok(ConversationDetail {
        conversation: ConversationView::new(conversation, model, plugins),
        messages,
    })
}

/// The model must exist; plugins are stored as given without checks
pub async fn create_conversation(
    store: &dyn Store,
    request: CreateConversationRequest,
) -> Result<Conversation, ApiError> {
    let model_id = request.model_id()?;
    if store.get_model(model_id).await?.is_none() {
        return Err(ApiError::not_found("Model"));
    }

    let conversation = Conversation::new(request.title.clone(), model_id, request.plugin_ids()?);
    store.insert_conversation(&conversation).await?;
    tracing::info!(
        conversation_id = %conversation.id,
        model_id = %model_id,
        "created conversation"
    );
    Ok(conversation)
}

pub async fn update_conversation(
    store: &dyn Store,
    id: Uuid,
    patch: UpdateConversationRequest,
) -> Result<Conversation, ApiError> {
    let mut conversation = get_conversation(store, id).await?;
    patch.apply(&mut conversation)?;
    conversation.touch();

    if !store.update_conversation(&conversation).await? {
        return Err(ApiError::not_found("Conversation"));
    }
    Ok(conversation)
}

/// Deletes the conversation's messages, then the conversation itself
pub async fn delete_conversation(store: &dyn Store, id: Uuid) -> Result<StatusMessage, ApiError> {
    get_conversation(store, id).await?;

    let removed = store.delete_messages_for_conversation(id).await?;
    if !store.delete_conversation(id).await? {
        return Err(ApiError::not_found("Conversation"));
    }

    tracing::info!(conversation_id = %id, messages = removed, "deleted conversation");
    Ok(StatusMessage::new("Conversation and messages deleted"))
}

// GET /api/conversations
pub async fn list_conversations_handler(store: SharedStore) -> Result<impl Reply, Rejection> {
    let conversations = list_conversations(&*store).await.map_err(reject)?;
    Ok(warp::reply::json(&conversations))
}

// GET /api/conversations/{id}
pub async fn get_conversation_handler(
    id: String,
    store: SharedStore,
) -> Result<impl Reply, Rejection> {
    let detail = get_conversation_detail(&*store, path_id(&id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&detail))
}

// POST /api/conversations
pub async fn create_conversation_handler(
    store: SharedStore,
    request: CreateConversationRequest,
) -> Result<impl Reply, Rejection> {
    let conversation = create_conversation(&*store, request)
        .await
        .map_err(reject)?;
    Ok(created(&conversation))
}

// PATCH /api/conversations/{id}
pub async fn update_conversation_handler(
    id: String,
    store: SharedStore,
    patch: UpdateConversationRequest,
) -> Result<impl Reply, Rejection> {
    let conversation = update_conversation(&*store, path_id(&id)?, patch)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&conversation))
}

// DELETE /api/conversations/{id}
pub async fn delete_conversation_handler(
    id: String,
    store: SharedStore,
) -> Result<impl Reply, Rejection> {
    let status = delete_conversation(&*store, path_id(&id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&status))
}
