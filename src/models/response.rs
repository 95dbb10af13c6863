// Response bodies

use super::entity::{Conversation, Message, Model, Plugin};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display fields of a referenced model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<&Model> for ModelSummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            description: model.description.clone(),
        }
    }
}

/// Display fields of a referenced plugin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<&Plugin> for PluginSummary {
    fn from(plugin: &Plugin) -> Self {
        Self {
            id: plugin.id,
            name: plugin.name.clone(),
            description: plugin.description.clone(),
        }
    }
}

/// Conversation with its references resolved. `model_id` is `null` when the
/// model has since been deleted; deleted plugins are left out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub model_id: Option<ModelSummary>,
    pub plugin_ids: Vec<PluginSummary>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationView {
    pub fn new(
        conversation: Conversation,
        model: Option<ModelSummary>,
        plugins: Vec<PluginSummary>,
    ) -> Self {
        Self {
            id: conversation.id,
            title: conversation.title,
            model_id: model,
            plugin_ids: plugins,
            is_active: conversation.is_active,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

// GET /api/conversations/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub conversation: ConversationView,
    pub messages: Vec<Message>,
}

// POST /api/messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateMessageResponse {
    #[serde(rename_all = "camelCase")]
    Exchange {
        user_message: Message,
        assistant_message: Message,
    },
    Single(Message),
}

impl CreateMessageResponse {
    /// Messages persisted by the request, in order
    pub fn messages(&self) -> Vec<&Message> {
        match self {
            CreateMessageResponse::Exchange {
                user_message,
                assistant_message,
            } => vec![user_message, assistant_message],
            CreateMessageResponse::Single(message) => vec![message],
        }
    }
}

// POST /api/chat (never persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: String,
    pub model_name: String,
    pub plugins: Vec<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// `{ "message": ... }` body used for deletions and errors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
