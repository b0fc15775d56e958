pub mod chat_completion;
pub mod chatbot;
pub mod image_search;
pub mod metrics_manager;
