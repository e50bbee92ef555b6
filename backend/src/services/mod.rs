pub mod ask_service;
pub mod fallback;
pub mod llm;

pub use ask_service::AskService;
pub use fallback::fallback_answer;
pub use llm::{CompletionClient, OpenAiClient};
