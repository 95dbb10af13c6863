// Request bodies
//
// Every field is optional at the wire level so that missing fields produce
// the domain's own 400 messages instead of a generic body-parse failure.
// Update bodies are patches: `None` leaves the stored field untouched.

use super::entity::{Conversation, Model, ModelStatus, Plugin};
use crate::error::{ApiError, Result};
use serde::Deserialize;
use uuid::Uuid;

/// Parse a record id supplied by a client
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid(format!("Invalid id '{}'", raw)))
}

fn parse_ids(raw: &[String]) -> Result<Vec<Uuid>> {
    raw.iter().map(|id| parse_id(id)).collect()
}

/// Present and non-empty
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(value: Option<String>, path: &str, entity: &str) -> Result<String> {
    provided(value).ok_or_else(|| {
        ApiError::invalid(format!(
            "{} validation failed: {}: Path `{}` is required.",
            entity, path, path
        ))
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub api_endpoint: Option<String>,
    pub status: Option<ModelStatus>,
}

impl CreateModelRequest {
    pub fn into_model(self) -> Result<Model> {
        let name = required(self.name, "name", "Model")?;
        Ok(Model::new(
            name,
            self.description.unwrap_or_default(),
            self.api_endpoint.unwrap_or_default(),
            self.status.unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModelRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub api_endpoint: Option<String>,
    /// Kept as text so an empty value is skipped like the other fields
    pub status: Option<String>,
}

impl UpdateModelRequest {
    /// Empty strings are ignored, matching the "only truthy fields" contract.
    /// An unknown status rejects the whole patch before anything is applied.
    pub fn apply(self, model: &mut Model) -> Result<()> {
        let status = provided(self.status)
            .map(|raw| raw.parse::<ModelStatus>().map_err(ApiError::InvalidInput))
            .transpose()?;

        if let Some(name) = provided(self.name) {
            model.name = name;
        }
        if let Some(description) = provided(self.description) {
            model.description = description;
        }
        if let Some(api_endpoint) = provided(self.api_endpoint) {
            model.api_endpoint = api_endpoint;
        }
        if let Some(status) = status {
            model.status = status;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePluginRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub enabled: Option<bool>,
}

impl CreatePluginRequest {
    pub fn into_plugin(self) -> Result<Plugin> {
        let name = required(self.name, "name", "Plugin")?;
        let description = required(self.description, "description", "Plugin")?;
        let version = required(self.version, "version", "Plugin")?;
        Ok(Plugin::new(name, description, version, self.enabled.unwrap_or(true)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePluginRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub enabled: Option<bool>,
}

impl UpdatePluginRequest {
    /// `enabled` is applied whenever present, so `false` disables the plugin
    pub fn apply(self, plugin: &mut Plugin) {
        if let Some(name) = provided(self.name) {
            plugin.name = name;
        }
        if let Some(description) = provided(self.description) {
            plugin.description = description;
        }
        if let Some(version) = provided(self.version) {
            plugin.version = version;
        }
        if let Some(enabled) = self.enabled {
            plugin.enabled = enabled;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub model_id: Option<String>,
    pub plugin_ids: Option<Vec<String>>,
    pub title: Option<String>,
}

impl CreateConversationRequest {
    pub fn model_id(&self) -> Result<Uuid> {
        match provided(self.model_id.clone()) {
            Some(raw) => parse_id(&raw),
            None => Err(ApiError::not_found("Model")),
        }
    }

    pub fn plugin_ids(&self) -> Result<Vec<Uuid>> {
        parse_ids(self.plugin_ids.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConversationRequest {
    pub title: Option<String>,
    pub model_id: Option<String>,
    pub plugin_ids: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl UpdateConversationRequest {
    /// `model_id` is taken as given; references are not re-validated.
    /// A present `plugin_ids` replaces the list even when empty.
    pub fn apply(self, conversation: &mut Conversation) -> Result<()> {
        let model_id = provided(self.model_id).map(|raw| parse_id(&raw)).transpose()?;
        let plugin_ids = self.plugin_ids.map(|raw| parse_ids(&raw)).transpose()?;

        if let Some(title) = provided(self.title) {
            conversation.title = title;
        }
        if let Some(model_id) = model_id {
            conversation.model_id = model_id;
        }
        if let Some(plugin_ids) = plugin_ids {
            conversation.plugin_ids = plugin_ids;
        }
        if let Some(is_active) = self.is_active {
            conversation.is_active = is_active;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub conversation_id: Option<String>,
    pub content: Option<String>,
    pub role: Option<String>,
}

impl CreateMessageRequest {
    /// (conversation id, content, role); all three must be present and non-empty
    pub fn into_parts(self) -> Result<(Uuid, String, String)> {
        match (
            provided(self.conversation_id),
            provided(self.content),
            provided(self.role),
        ) {
            (Some(conversation_id), Some(content), Some(role)) => {
                Ok((parse_id(&conversation_id)?, content, role))
            }
            _ => Err(ApiError::invalid(
                "Conversation ID, content, and role are required",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub model_id: Option<String>,
    pub plugin_ids: Option<Vec<String>>,
    pub message: Option<String>,
}

impl ChatRequest {
    /// (model id, plugin ids, message)
    pub fn into_parts(self) -> Result<(Uuid, Vec<Uuid>, String)> {
        match (provided(self.model_id), provided(self.message)) {
            (Some(model_id), Some(message)) => {
                let plugin_ids = parse_ids(self.plugin_ids.as_deref().unwrap_or_default())?;
                Ok((parse_id(&model_id)?, plugin_ids, message))
            }
            _ => Err(ApiError::invalid("Model ID and message are required")),
        }
    }
}
