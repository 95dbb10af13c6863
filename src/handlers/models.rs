// /api/models handlers

use crate::error::ApiError;
use crate::models::{CreateModelRequest, Model, StatusMessage, UpdateModelRequest};
use crate::store::{SharedStore, Store};
use uuid::Uuid;
use warp::{Rejection, Reply};

use super::{created, path_id, reject};

pub async fn list_models(store: &dyn Store) -> Result<Vec<Model>, ApiError> {
    Ok(store.list_models().await?)
}

pub async fn get_model(store: &dyn Store, id: Uuid) -> Result<Model, ApiError> {
    store
        .get_model(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Model"))
}

pub async fn create_model(
    store: &dyn Store,
    request: CreateModelRequest,
) -> Result<Model, ApiError> {
    let model = request.into_model()?;
    store.insert_model(&model).await?;
    tracing::info!(model_id = %model.id, name = %model.name, "created model");
    Ok(model)
}

pub async fn update_model(
    store: &dyn Store,
    id: Uuid,
    patch: UpdateModelRequest,
) -> Result<Model, ApiError> {
    let mut model = get_model(store, id).await?;
    patch.apply(&mut model)?;
    model.touch();

    if !store.update_model(&model).await? {
        return Err(ApiError::not_found("Model"));
    }
    Ok(model)
}

/// Conversations referencing the model are left as they are
pub async fn delete_model(store: &dyn Store, id: Uuid) -> Result<StatusMessage, ApiError> {
    if !store.delete_model(id).await? {
        return Err(ApiError::not_found("Model"));
    }
    tracing::info!(model_id = %id, "deleted model");
    Ok(StatusMessage::new("Model deleted"))
}

// GET /api/models
pub async fn list_models_handler(store: SharedStore) -> Result<impl Reply, Rejection> {
    let models = list_models(&*store).await.map_err(reject)?;
    Ok(warp::reply::json(&models))
}

// GET /api/models/{id}
pub async fn get_model_handler(
    id: String,
    store: SharedStore,
) -> Result<impl Reply, Rejection> {
    let model = get_model(&*store, path_id(&id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&model))
}

// POST /api/models
pub async fn create_model_handler(
    store: SharedStore,
    request: CreateModelRequest,
) -> Result<impl Reply, Rejection> {
    let model = create_model(&*store, request).await.map_err(reject)?;
    Ok(created(&model))
}

// PATCH /api/models/{id}
pub async fn update_model_handler(
    id: String,
    store: SharedStore,
    patch: UpdateModelRequest,
) -> Result<impl Reply, Rejection> {
    let model = update_model(&*store, path_id(&id)?, patch)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&model))
}

// DELETE /api/models/{id}
pub async fn delete_model_handler(
    id: String,
    store: SharedStore,
) -> Result<impl Reply, Rejection> {
    let status = delete_model(&*store, path_id(&id)?)
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelStatus;
    use crate::store::MemoryStore;

    fn request(name: &str) -> CreateModelRequest {
        CreateModelRequest {
            name: Some(name.to_string()),
            description: Some("desc".to_string()),
            api_endpoint: Some("https://api.example.com".to_string()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let model = create_model(&store, request("GPT-3.5")).await.unwrap();
        assert_eq!(model.status, ModelStatus::Active);

        let fetched = get_model(&store, model.id).await.unwrap();
        assert_eq!(fetched, model);
        assert_eq!(list_models(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryStore::new();
        let err = get_model(&store, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "Model not found");
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let store = MemoryStore::new();
        let model = create_model(&store, request("GPT-4")).await.unwrap();

        let patch = UpdateModelRequest {
            status: Some("inactive".to_string()),
            ..Default::default()
        };
        let updated = update_model(&store, model.id, patch).await.unwrap();
        assert_eq!(updated.status, ModelStatus::Inactive);
        assert_eq!(updated.name, "GPT-4");
        assert!(updated.updated_at > model.updated_at);
        assert_eq!(get_model(&store, model.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let model = create_model(&store, request("GPT-4")).await.unwrap();

        let status = delete_model(&store, model.id).await.unwrap();
        assert_eq!(status.message, "Model deleted");
        assert!(matches!(
            delete_model(&store, model.id).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
