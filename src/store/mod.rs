//! Document store
//!
//! The [`Store`] trait is the only way handlers touch persistence. Two
//! implementations exist: [`PostgresStore`] (a deadpool-managed PostgreSQL
//! pool) and [`MemoryStore`] (process-local, used for demos and tests).
//!
//! Writes take the full record; callers are responsible for refreshing
//! timestamps (see `touch()` on each entity) before saving.

pub mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Conversation, Message, Model, Plugin};

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use postgres::{PostgresConfig, PostgresStore};

/// Store handle shared by every request handler
pub type SharedStore = Arc<dyn Store>;

/// Persistence operations over the four record types
#[async_trait]
pub trait Store: Send + Sync {
    /// All models in insertion order
    async fn list_models(&self) -> Result<Vec<Model>>;
    async fn get_model(&self, id: Uuid) -> Result<Option<Model>>;
    async fn insert_model(&self, model: &Model) -> Result<()>;
    /// Returns false if no model has this id
    async fn update_model(&self, model: &Model) -> Result<bool>;
    /// Returns false if no model has this id
    async fn delete_model(&self, id: Uuid) -> Result<bool>;

    /// All plugins in insertion order
    async fn list_plugins(&self) -> Result<Vec<Plugin>>;
    async fn get_plugin(&self, id: Uuid) -> Result<Option<Plugin>>;
    async fn insert_plugin(&self, plugin: &Plugin) -> Result<()>;
    async fn update_plugin(&self, plugin: &Plugin) -> Result<bool>;
    async fn delete_plugin(&self, id: Uuid) -> Result<bool>;

    /// Plugins whose id is in `ids`, in the order of `ids`. Unknown ids (and
    /// disabled plugins when `enabled_only`) are skipped; duplicates collapse.
    async fn find_plugins(&self, ids: &[Uuid], enabled_only: bool) -> Result<Vec<Plugin>>;

    /// All conversations, most recently updated first
    async fn list_conversations(&self) -> Result<Vec<Conversation>>;
    async fn get_conversation(&self, id: Uuid) -> Result<Option<Conversation>>;
    async fn insert_conversation(&self, conversation: &Conversation) -> Result<()>;
    async fn update_conversation(&self, conversation: &Conversation) -> Result<bool>;
    async fn delete_conversation(&self, id: Uuid) -> Result<bool>;

    /// Messages of a conversation, oldest first
    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<Message>>;
    async fn get_message(&self, id: Uuid) -> Result<Option<Message>>;
    async fn insert_message(&self, message: &Message) -> Result<()>;
    async fn delete_message(&self, id: Uuid) -> Result<bool>;
    /// Returns the number of messages removed
    async fn delete_messages_for_conversation(&self, conversation_id: Uuid) -> Result<u64>;

    /// Remove every record of every type
    async fn clear(&self) -> Result<()>;

    /// Release underlying resources; further calls fail
    async fn close(&self);
}

/// Reorder `plugins` to follow `ids`, dropping duplicates
pub(crate) fn order_by_ids(ids: &[Uuid], mut plugins: Vec<Plugin>) -> Vec<Plugin> {
    let mut ordered = Vec::with_capacity(plugins.len());
    for id in ids {
        if let Some(pos) = plugins.iter().position(|p| p.id == *id) {
            ordered.push(plugins.swap_remove(pos));
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_ids() {
        let a = Plugin::new("A", "a", "1", true);
        let b = Plugin::new("B", "b", "1", true);
        let c = Plugin::new("C", "c", "1", true);
        let ids = vec![c.id, a.id, c.id, Uuid::new_v4()];

        let ordered = order_by_ids(&ids, vec![a.clone(), b, c.clone()]);
        let names: Vec<&str> = ordered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
    }
}
