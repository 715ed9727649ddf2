mod chat_completion_client;

pub use chat_completion_client::{ChatCompletionClient, DEFAULT_CHAT_BASE_URL, DEFAULT_CHAT_MODEL};
