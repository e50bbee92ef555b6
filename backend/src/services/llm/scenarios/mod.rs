//! LLM Prompt Scenarios
//!
//! Each scenario turns request parameters into a system prompt.

pub mod bible_guide;
pub mod language;
