pub mod ask;

pub use ask::{AskRequest, AskRequestBody, AskResponse};
