//! Process-local store
//!
//! Keeps every collection in insertion order behind a single `RwLock`.
//! Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{order_by_ids, Result, Store, StoreError};
use crate::models::{Conversation, Message, Model, Plugin};

#[derive(Default)]
struct Collections {
    models: Vec<Model>,
    plugins: Vec<Plugin>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn replace<T>(items: &mut [T], id: impl Fn(&T) -> bool, record: &T) -> bool
where
    T: Clone,
{
    match items.iter_mut().find(|item| id(item)) {
        Some(slot) => {
            *slot = record.clone();
            true
        }
        None => false,
    }
}

fn remove<T>(items: &mut Vec<T>, id: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !id(item));
    items.len() != before
}

fn ensure_unique_plugin_name(plugins: &[Plugin], plugin: &Plugin) -> Result<()> {
    if plugins
        .iter()
        .any(|p| p.id != plugin.id && p.name == plugin.name)
    {
        return Err(StoreError::Conflict(format!(
            "Key (name)=({}) already exists.",
            plugin.name
        )));
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_models(&self) -> Result<Vec<Model>> {
        Ok(self.inner.read().await.models.clone())
    }

    async fn get_model(&self, id: Uuid) -> Result<Option<Model>> {
        let inner = self.inner.read().await;
        Ok(inner.models.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_model(&self, model: &Model) -> Result<()> {
        self.inner.write().await.models.push(model.clone());
        Ok(())
    }

    async fn update_model(&self, model: &Model) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(replace(&mut inner.models, |m| m.id == model.id, model))
    }

    async fn delete_model(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove(&mut inner.models, |m| m.id == id))
    }

    async fn list_plugins(&self) -> Result<Vec<Plugin>> {
        Ok(self.inner.read().await.plugins.clone())
    }

    async fn get_plugin(&self, id: Uuid) -> Result<Option<Plugin>> {
        let inner = self.inner.read().await;
        Ok(inner.plugins.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_plugin(&self, plugin: &Plugin) -> Result<()> {
        let mut inner = self.inner.write().await;
        ensure_unique_plugin_name(&inner.plugins, plugin)?;
        inner.plugins.push(plugin.clone());
        Ok(())
    }

    async fn update_plugin(&self, plugin: &Plugin) -> Result<bool> {
        let mut inner = self.inner.write().await;
        ensure_unique_plugin_name(&inner.plugins, plugin)?;
        Ok(replace(&mut inner.plugins, |p| p.id == plugin.id, plugin))
    }

    async fn delete_plugin(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove(&mut inner.plugins, |p| p.id == id))
    }

    async fn find_plugins(&self, ids: &[Uuid], enabled_only: bool) -> Result<Vec<Plugin>> {
        let inner = self.inner.read().await;
        let matched = inner
            .plugins
            .iter()
            .filter(|p| ids.contains(&p.id) && (!enabled_only || p.enabled))
            .cloned()
            .collect();
        Ok(order_by_ids(ids, matched))
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let mut conversations = self.inner.read().await.conversations.clone();
        // Ties go to the most recently inserted
        conversations.reverse();
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }

    async fn get_conversation(&self, id: Uuid) -> Result<Option<Conversation>> {
        let inner = self.inner.read().await;
        Ok(inner.conversations.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_conversation(&self, conversation: &Conversation) -> Result<()> {
        self.inner
            .write()
            .await
            .conversations
            .push(conversation.clone());
        Ok(())
    }

    async fn update_conversation(&self, conversation: &Conversation) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(replace(
            &mut inner.conversations,
            |c| c.id == conversation.id,
            conversation,
        ))
    }

    async fn delete_conversation(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove(&mut inner.conversations, |c| c.id == id))
    }

    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<Message>> {
        let inner = self.inner.read().await;
        let mut messages: Vec<Message> = inner
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        // Stable: equal timestamps keep insertion order
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(messages)
    }

    async fn get_message(&self, id: Uuid) -> Result<Option<Message>> {
        let inner = self.inner.read().await;
        Ok(inner.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_message(&self, message: &Message) -> Result<()> {
        self.inner.write().await.messages.push(message.clone());
        Ok(())
    }

    async fn delete_message(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(remove(&mut inner.messages, |m| m.id == id))
    }

    async fn delete_messages_for_conversation(&self, conversation_id: Uuid) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.messages.len();
        inner
            .messages
            .retain(|m| m.conversation_id != conversation_id);
        Ok((before - inner.messages.len()) as u64)
    }

    async fn clear(&self) -> Result<()> {
        *self.inner.write().await = Collections::default();
        Ok(())
    }

    async fn close(&self) {}
}
