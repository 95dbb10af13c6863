// Route definitions

use std::convert::Infallible;

use serde::de::DeserializeOwned;
use warp::Filter;

use crate::handlers::{self, chat, conversations, messages, models, plugins};
use crate::store::SharedStore;

/// Largest accepted JSON body
const MAX_BODY_BYTES: u64 = 64 * 1024;

fn with_store(
    store: SharedStore,
) -> impl Filter<Extract = (SharedStore,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// The full API: every resource, error mapping, CORS and request logging
pub fn configure_routes(
    store: SharedStore,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type"]);

    let api = warp::path("api");

    api.and(
        model_routes(store.clone())
            .or(plugin_routes(store.clone()))
            .or(chat_routes(store.clone()))
            .or(conversation_routes(store.clone()))
            .or(message_routes(store)),
    )
    .recover(handlers::handle_rejection)
    .with(cors)
    .with(warp::log("mindchat::http"))
}

// /api/models
fn model_routes(
    store: SharedStore,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let base = warp::path("models");

    // GET /models
    let list = base
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(models::list_models_handler);

    // GET /models/{id}
    let get = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(models::get_model_handler);

    // POST /models
    let create = base
        .and(warp::path::end())
        .and(warp::post())
        .and(with_store(store.clone()))
        .and(json_body())
        .and_then(models::create_model_handler);

    // PATCH /models/{id}
    let update = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::patch())
        .and(with_store(store.clone()))
        .and(json_body())
        .and_then(models::update_model_handler);

    // DELETE /models/{id}
    let delete = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_store(store))
        .and_then(models::delete_model_handler);

    list.or(get).or(create).or(update).or(delete)
}

// /api/plugins
fn plugin_routes(
    store: SharedStore,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let base = warp::path("plugins");

    let list = base
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(plugins::list_plugins_handler);

    let get = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(plugins::get_plugin_handler);

    let create = base
        .and(warp::path::end())
        .and(warp::post())
        .and(with_store(store.clone()))
        .and(json_body())
        .and_then(plugins::create_plugin_handler);

    let update = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::patch())
        .and(with_store(store.clone()))
        .and(json_body())
        .and_then(plugins::update_plugin_handler);

    let delete = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_store(store))
        .and_then(plugins::delete_plugin_handler);

    list.or(get).or(create).or(update).or(delete)
}

// /api/chat
fn chat_routes(
    store: SharedStore,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_store(store))
        .and(json_body())
        .and_then(chat::chat_handler)
}

// /api/conversations
fn conversation_routes(
    store: SharedStore,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let base = warp::path("conversations");

    let list = base
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(conversations::list_conversations_handler);

    // GET /conversations/{id} returns the conversation and its messages
    let get = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(conversations::get_conversation_handler);

    let create = base
        .and(warp::path::end())
        .and(warp::post())
        .and(with_store(store.clone()))
        .and(json_body())
        .and_then(conversations::create_conversation_handler);

    let update = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::patch())
        .and(with_store(store.clone()))
        .and(json_body())
        .and_then(conversations::update_conversation_handler);

    let delete = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_store(store))
        .and_then(conversations::delete_conversation_handler);

    list.or(get).or(create).or(update).or(delete)
}

// /api/messages
fn message_routes(
    store: SharedStore,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let base = warp::path("messages");

    // GET /messages/conversation/{conversationId}
    let list = base
        .and(warp::path("conversation"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(messages::list_messages_handler);

    let create = base
        .and(warp::path::end())
        .and(warp::post())
        .and(with_store(store.clone()))
        .and(json_body())
        .and_then(messages::create_message_handler);

    let delete = base
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_store(store))
        .and_then(messages::delete_message_handler);

    list.or(create).or(delete)
}
