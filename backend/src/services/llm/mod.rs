//! LLM Service Module
//!
//! Talks to an OpenAI-compatible chat-completion API on behalf of the ask flow.
//!
//! # Architecture
//! ```text
//! ┌──────────────────┐
//! │ CompletionClient │  ← Trait (seam for tests and other providers)
//! └────────┬─────────┘
//!          │
//!    ┌─────┴─────┐
//!    ▼           ▼
//! ┌──────┐  ┌──────────┐
//! │OpenAI│  │  Stubs   │
//! │Client│  │ (tests)  │
//! └──────┘  └──────────┘
//! ```

mod client;
mod models;
pub mod scenarios;

pub use client::{CompletionClient, OpenAiClient};
pub use models::*;
pub use scenarios::bible_guide::{Mode, PromptProfile};
pub use scenarios::language::Lang;
