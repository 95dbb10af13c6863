// /api/messages handlers

use crate::error::ApiError;
use crate::generator::generate_mock_response;
use crate::models::entity::ROLE_ASSISTANT;
use crate::models::{
    CreateMessageRequest, CreateMessageResponse, Message, MessageMetadata, StatusMessage,
};
use crate::store::{SharedStore, Store};
use uuid::Uuid;
use warp::{Rejection, Reply};

use super::conversations::get_conversation;
use super::{created, path_id, reject};

/// Messages of an existing conversation, oldest first
pub async fn list_messages(
    store: &dyn Store,
    conversation_id: Uuid,
) -> Result<Vec<Message>, ApiError> {
    get_conversation(store, conversation_id).await?;
    Ok(store.list_messages(conversation_id).await?)
}

/// Append a turn to a conversation.
///
/// The conversation is touched and the message saved before anything else.
/// When the role is exactly "user", the conversation's model and its
/// currently enabled plugins are loaded and a synthesized assistant turn is
/// saved as well. Disabled or deleted plugins are skipped without error.
///
/// The steps are not atomic: a failure while loading the model leaves the
/// user message saved without a reply.
pub async fn create_message(
    store: &dyn Store,
    request: CreateMessageRequest,
) -> Result<CreateMessageResponse, ApiError> {
    let (conversation_id, content, role) = request.into_parts()?;

    let mut conversation = get_conversation(store, conversation_id).await?;
    conversation.touch();
    store.update_conversation(&conversation).await?;

    let message = Message::new(conversation_id, content, role);
    store.insert_message(&message).await?;

    if !message.is_user() {
        tracing::debug!(
            conversation_id = %conversation_id,
            role = %message.role,
            "stored message without reply"
        );
        return Ok(CreateMessageResponse::Single(message));
    }

    let model = store
        .get_model(conversation.model_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Model"))?;

    let plugins = if conversation.plugin_ids.is_empty() {
        Vec::new()
    } else {
        store.find_plugins(&conversation.plugin_ids, true).await?
    };
    let plugin_names: Vec<String> = plugins.into_iter().map(|p| p.name).collect();

    let reply = generate_mock_response(&message.content, &model.name, &plugin_names);
    let assistant = Message::new(conversation_id, reply, ROLE_ASSISTANT).with_metadata(
        MessageMetadata {
            model: model.name.clone(),
            plugins: plugin_names,
        },
    );
    store.insert_message(&assistant).await?;

    tracing::info!(
        conversation_id = %conversation_id,
        model = %model.name,
        "stored user message and assistant reply"
    );

    Ok(CreateMessageResponse::Exchange {
        user_message: message,
        assistant_message: assistant,
    })
}

pub async fn delete_message(store: &dyn Store, id: Uuid) -> Result<StatusMessage, ApiError> {
    if !store.delete_message(id).await? {
        return Err(ApiError::not_found("Message"));
    }
    Ok(StatusMessage::new("Message deleted"))
}

// GET /api/messages/conversation/{conversationId}
pub async fn list_messages_handler(
    conversation_id: String,
    store: SharedStore,
) -> Result<impl Reply, Rejection> {
    let messages = list_messages(&*store, path_id(&conversation_id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&messages))
}

// POST /api/messages
pub async fn create_message_handler(
    store: SharedStore,
    request: CreateMessageRequest,
) -> Result<impl Reply, Rejection> {
    let response = create_message(&*store, request).await.map_err(reject)?;
    Ok(created(&response))
}

// DELETE /api/messages/{id}
pub async fn delete_message_handler(
    id: String,
    store: SharedStore,
) -> Result<impl Reply, Rejection> {
    let status = delete_message(&*store, path_id(&id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conversation, Model, ModelStatus, Plugin};
    use crate::store::MemoryStore;

    fn request(conversation_id: Uuid, content: &str, role: &str) -> CreateMessageRequest {
        CreateMessageRequest {
            conversation_id: Some(conversation_id.to_string()),
            content: Some(content.to_string()),
            role: Some(role.to_string()),
        }
    }

    async fn conversation_with(plugins: &[Plugin]) -> (MemoryStore, Model, Conversation) {
        let store = MemoryStore::new();
        let model = Model::new("GPT-3.5", "Fast", "https://a", ModelStatus::Active);
        store.insert_model(&model).await.unwrap();
        for plugin in plugins {
            store.insert_plugin(plugin).await.unwrap();
        }
        let conversation =
            Conversation::new(None, model.id, plugins.iter().map(|p| p.id).collect());
        store.insert_conversation(&conversation).await.unwrap();
        (store, model, conversation)
    }

    #[tokio::test]
    async fn test_user_message_gets_reply() {
        let (store, _, conversation) = conversation_with(&[]).await;

        let response = create_message(&store, request(conversation.id, "hi", "user"))
            .await
            .unwrap();
        match response {
            CreateMessageResponse::Exchange {
                user_message,
                assistant_message,
            } => {
                assert_eq!(user_message.content, "hi");
                assert_eq!(assistant_message.role, "assistant");
                assert!(assistant_message.content.contains("You said: \"hi\""));
                let metadata = assistant_message.metadata.unwrap();
                assert_eq!(metadata.model, "GPT-3.5");
                assert!(metadata.plugins.is_empty());
            }
            other => panic!("expected exchange, got {:?}", other),
        }
        assert_eq!(store.list_messages(conversation.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_other_roles_store_single_message() {
        let (store, _, conversation) = conversation_with(&[]).await;

        for role in ["assistant", "system", "User"] {
            let response = create_message(&store, request(conversation.id, "note", role))
                .await
                .unwrap();
            assert!(matches!(response, CreateMessageResponse::Single(_)));
        }
        assert_eq!(store.list_messages(conversation.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_disabled_and_deleted_plugins_dropped() {
        let enabled = Plugin::new("Web Search", "a", "1.0.0", true);
        let disabled = Plugin::new("File Reader", "b", "1.1.0", false);
        let deleted = Plugin::new("Image Generation", "c", "0.9.5", true);
        let (store, _, conversation) =
            conversation_with(&[enabled.clone(), disabled, deleted.clone()]).await;
        store.delete_plugin(deleted.id).await.unwrap();

        let response = create_message(&store, request(conversation.id, "hi", "user"))
            .await
            .unwrap();
        let messages = response.messages();
        let metadata = messages[1].metadata.as_ref().unwrap();
        assert_eq!(metadata.plugins, vec!["Web Search".to_string()]);
        assert!(messages[1]
            .content
            .contains("I'm using these plugins: Web Search.\n"));
    }

    #[tokio::test]
    async fn test_touches_conversation() {
        let (store, _, conversation) = conversation_with(&[]).await;
        create_message(&store, request(conversation.id, "hi", "assistant"))
            .await
            .unwrap();
        let stored = store.get_conversation(conversation.id).await.unwrap().unwrap();
        assert!(stored.updated_at > conversation.updated_at);
    }

    #[tokio::test]
    async fn test_missing_conversation() {
        let store = MemoryStore::new();
        let err = create_message(&store, request(Uuid::new_v4(), "hi", "user"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Conversation not found");

        let err = list_messages(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_deleted_model_keeps_user_message() {
        let (store, model, conversation) = conversation_with(&[]).await;
        store.delete_model(model.id).await.unwrap();

        let err = create_message(&store, request(conversation.id, "hi", "user"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Model not found");

        let messages = store.list_messages(conversation.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[tokio::test]
    async fn test_delete_message() {
        let (store, _, conversation) = conversation_with(&[]).await;
        let response = create_message(&store, request(conversation.id, "hi", "system"))
            .await
            .unwrap();
        let id = response.messages()[0].id;

        assert_eq!(delete_message(&store, id).await.unwrap().message, "Message deleted");
        assert_eq!(
            delete_message(&store, id).await.unwrap_err().to_string(),
            "Message not found"
        );
    }
}
