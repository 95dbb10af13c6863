// Data structures (Model, Plugin, Conversation, Message) and their wire forms

pub mod entity;
pub mod request;
pub mod response;

pub use entity::{now, Conversation, Message, MessageMetadata, Model, ModelStatus, Plugin};
pub use request::{
    ChatRequest, CreateConversationRequest, CreateMessageRequest, CreateModelRequest,
    CreatePluginRequest, UpdateConversationRequest, UpdateModelRequest, UpdatePluginRequest,
};
pub use response::{
    ChatResponse, ConversationDetail, ConversationView, CreateMessageResponse, ModelSummary,
    PluginSummary, StatusMessage,
};
