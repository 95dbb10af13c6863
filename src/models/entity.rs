// Persisted records

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Current time at the precision the store keeps (microseconds)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updatedAt` value: the current time, but always strictly after `previous`
fn touched(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}

// Model status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    #[default]
    Active,
    Inactive,
}

impl ModelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Active => "active",
            ModelStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ModelStatus::Active),
            "inactive" => Ok(ModelStatus::Inactive),
            other => Err(format!("unknown model status '{}'", other)),
        }
    }
}

/// Descriptor of an AI backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub api_endpoint: String,
    pub status: ModelStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        api_endpoint: impl Into<String>,
        status: ModelStatus,
    ) -> Self {
        let created_at = now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            api_endpoint: api_endpoint.into(),
            status,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ModelStatus::Active
    }

    /// Refresh `updated_at` ahead of a write
    pub fn touch(&mut self) {
        self.updated_at = touched(self.updated_at);
    }
}

/// Descriptor of an optional capability; inert metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub version: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plugin {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        enabled: bool,
    ) -> Self {
        let created_at = now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            version: version.into(),
            enabled,
            created_at,
            updated_at: created_at,
        }
    }

    /// Refresh `updated_at` ahead of a write
    pub fn touch(&mut self) {
        self.updated_at = touched(self.updated_at);
    }
}

pub const DEFAULT_CONVERSATION_TITLE: &str = "New Conversation";

/// A titled thread bound to one model and zero or more plugins.
///
/// `model_id` and `plugin_ids` are soft references: they are resolved on
/// read and nothing stops the referenced records from being deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub model_id: Uuid,
    pub plugin_ids: Vec<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(title: Option<String>, model_id: Uuid, plugin_ids: Vec<Uuid>) -> Self {
        let created_at = now();
        Self {
            id: Uuid::new_v4(),
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_CONVERSATION_TITLE.to_string()),
            model_id,
            plugin_ids,
            is_active: true,
            created_at,
            updated_at: created_at,
        }
    }

    /// Set both timestamps, keeping `updated_at >= created_at`
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at.trunc_subsecs(6);
        self.updated_at = self.created_at;
        self
    }

    /// Refresh `updated_at` ahead of a write
    pub fn touch(&mut self) {
        self.updated_at = touched(self.updated_at);
    }
}

/// Provenance attached to synthesized assistant turns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageMetadata {
    pub model: String,
    #[serde(default)]
    pub plugins: Vec<String>,
}

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// One turn in a conversation. `role` is free-form; only "user" has meaning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub content: String,
    pub role: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    pub fn new(conversation_id: Uuid, content: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            content: content.into(),
            role: role.into(),
            timestamp: now(),
            metadata: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp.trunc_subsecs(6);
        self
    }

    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }
}
