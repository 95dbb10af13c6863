// /api/plugins handlers

use crate::error::ApiError;
use crate::models::{CreatePluginRequest, Plugin, StatusMessage, UpdatePluginRequest};
use crate::store::{SharedStore, Store};
use uuid::Uuid;
use warp::{Rejection, Reply};

use super::{created, path_id, reject};

pub async fn list_plugins(store: &dyn Store) -> Result<Vec<Plugin>, ApiError> {
    Ok(store.list_plugins().await?)
}

pub async fn get_plugin(store: &dyn Store, id: Uuid) -> Result<Plugin, ApiError> {
    store
        .get_plugin(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Plugin"))
}

/// Fails with a 400 if the name is already taken
pub async fn create_plugin(
    store: &dyn Store,
    request: CreatePluginRequest,
) -> Result<Plugin, ApiError> {
    let plugin = request.into_plugin()?;
    store.insert_plugin(&plugin).await?;
    tracing::info!(plugin_id = %plugin.id, name = %plugin.name, "created plugin");
    Ok(plugin)
}

pub async fn update_plugin(
    store: &dyn Store,
    id: Uuid,
    patch: UpdatePluginRequest,
) -> Result<Plugin, ApiError> {
    let mut plugin = get_plugin(store, id).await?;
    patch.apply(&mut plugin);
    plugin.touch();

    if !store.update_plugin(&plugin).await? {
        return Err(ApiError::not_found("Plugin"));
    }
    Ok(plugin)
}

pub async fn delete_plugin(store: &dyn Store, id: Uuid) -> Result<StatusMessage, ApiError> {
    if !store.delete_plugin(id).await? {
        return Err(ApiError::not_found("Plugin"));
    }
    tracing::info!(plugin_id = %id, "deleted plugin");
    Ok(StatusMessage::new("Plugin deleted"))
}

// GET /api/plugins
pub async fn list_plugins_handler(store: SharedStore) -> Result<impl Reply, Rejection> {
    let plugins = list_plugins(&*store).await.map_err(reject)?;
    Ok(warp::reply::json(&plugins))
}

// GET /api/plugins/{id}
pub async fn get_plugin_handler(id: String, store: SharedStore) -> Result<impl Reply, Rejection> {
    let plugin = get_plugin(&*store, path_id(&id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&plugin))
}

// POST /api/plugins
pub async fn create_plugin_handler(
    store: SharedStore,
    request: CreatePluginRequest,
) -> Result<impl Reply, Rejection> {
    let plugin = create_plugin(&*store, request).await.map_err(reject)?;
    Ok(created(&plugin))
}

// PATCH /api/plugins/{id}
pub async fn update_plugin_handler(
    id: String,
    store: SharedStore,
    patch: UpdatePluginRequest,
) -> Result<impl Reply, Rejection> {
    let plugin = update_plugin(&*store, path_id(&id)?, patch)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&plugin))
}

// DELETE /api/plugins/{id}
pub async fn delete_plugin_handler(
    id: String,
    store: SharedStore,
) -> Result<impl Reply, Rejection> {
    let status = delete_plugin(&*store, path_id(&id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::store::{MemoryStore, StoreError};
    use warp::http::StatusCode;

    fn request(name: &str) -> CreatePluginRequest {
        CreatePluginRequest {
            name: Some(name.to_string()),
            description: Some("Search the web".to_string()),
            version: Some("1.0.0".to_string()),
            enabled: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_enabled() {
        let store = MemoryStore::new();
        let plugin = create_plugin(&store, request("Web Search")).await.unwrap();
        assert!(plugin.enabled);
        assert_eq!(get_plugin(&store, plugin.id).await.unwrap(), plugin);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_bad_request() {
        let store = MemoryStore::new();
        create_plugin(&store, request("Web Search")).await.unwrap();
        let err = create_plugin(&store, request("Web Search")).await.unwrap_err();
        assert!(matches!(err, ApiError::Store(StoreError::Conflict(_))));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_disable_with_false() {
        let store = MemoryStore::new();
        let plugin = create_plugin(&store, request("Web Search")).await.unwrap();
        let patch = UpdatePluginRequest {
            enabled: Some(false),
            ..Default::default()
        };
        let updated = update_plugin(&store, plugin.id, patch).await.unwrap();
        assert!(!updated.enabled);
        assert!(updated.updated_at > plugin.updated_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let err = update_plugin(&store, id, UpdatePluginRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Plugin not found");
        assert!(matches!(
            delete_plugin(&store, id).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
