use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::services::llm::{Lang, Mode};
use crate::utils::ApiError;

pub const NOTE_FALLBACK: &str = "fallback";

// Raw body of POST /api/ask. Fields are kept as JSON values so that a wrong
// type degrades to "absent" instead of rejecting the whole body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AskRequestBody {
    #[schema(value_type = String, example = "Who wrote the book of Ruth?")]
    pub question: Option<Value>,
    /// Answer language: pap, en, es or nl (default "pap")
    #[schema(value_type = Option<String>, example = "pap")]
    pub lang: Option<Value>,
    /// "regular" or "patronchi" (default "regular")
    #[schema(value_type = Option<String>, example = "regular")]
    pub mode: Option<Value>,
}

impl AskRequestBody {
    /// Parse raw bytes; empty, invalid or non-object JSON yields an empty body.
    pub fn parse(raw: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(raw) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn into_request(self) -> Result<AskRequest, ApiError> {
        let question = text_field(&self.question).unwrap_or_default();
        if question.is_empty() {
            return Err(ApiError::MissingQuestion);
        }

        let lang = text_field(&self.lang).map(Lang::from_code).unwrap_or_default();
        let mode = text_field(&self.mode).map(Mode::from_code).unwrap_or_default();

        Ok(AskRequest { question: question.to_string(), lang, mode })
    }
}

// Non-empty strings only; an empty string falls back to the default like a missing field.
fn text_field(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::trim)
}

/// Validated ask request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
    pub lang: Lang,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AskResponse {
    pub answer: String,
    /// "fallback" or "fallback-error:<class>" when the answer is canned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AskResponse {
    pub fn answered(answer: impl Into<String>) -> Self {
        Self { answer: answer.into(), note: None }
    }

    pub fn fallback(answer: impl Into<String>) -> Self {
        Self { answer: answer.into(), note: Some(NOTE_FALLBACK.to_string()) }
    }

    pub fn fallback_error(answer: impl Into<String>, class: &str) -> Self {
        Self { answer: answer.into(), note: Some(format!("{}-error:{}", NOTE_FALLBACK, class)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(raw: &str) -> Result<AskRequest, ApiError> {
        AskRequestBody::parse(raw.as_bytes()).into_request()
    }

    #[test]
    fn test_defaults_and_trimming() {
        let req = request(r#"{"question":"  Who was Ruth?  "}"#).unwrap();
        assert_eq!(req.question, "Who was Ruth?");
        assert_eq!(req.lang, Lang::Pap);
        assert_eq!(req.mode, Mode::Regular);

        let req = request(r#"{"question":"q","lang":" es ","mode":"patronchi "}"#).unwrap();
        assert_eq!(req.lang, Lang::Es);
        assert_eq!(req.mode, Mode::Patronchi);
    }

    #[test]
    fn test_missing_or_blank_question() {
        assert!(matches!(request(r#"{"question":""}"#), Err(ApiError::MissingQuestion)));
        assert!(matches!(request(r#"{"question":"   "}"#), Err(ApiError::MissingQuestion)));
        assert!(matches!(request(r#"{"lang":"en"}"#), Err(ApiError::MissingQuestion)));
    }

    #[test]
    fn test_unparseable_body_is_empty_object() {
        for raw in ["", "{not json", "[1,2]", "\"question\"", "null", "42"] {
            assert!(matches!(request(raw), Err(ApiError::MissingQuestion)), "body {:?}", raw);
        }
    }

    #[test]
    fn test_wrong_types_are_treated_as_absent() {
        assert!(matches!(request(r#"{"question":42}"#), Err(ApiError::MissingQuestion)));

        let req = request(r#"{"question":"q","lang":7,"mode":["patronchi"]}"#).unwrap();
        assert_eq!(req.lang, Lang::Pap);
        assert_eq!(req.mode, Mode::Regular);
    }

    #[test]
    fn test_blank_lang_is_unknown() {
        let req = request(r#"{"question":"q","lang":"  "}"#).unwrap();
        assert_eq!(req.lang, Lang::Other);

        let req = request(r#"{"question":"q","lang":""}"#).unwrap();
        assert_eq!(req.lang, Lang::Pap);
    }

    #[test]
    fn test_response_serialization_omits_note() {
        let value = serde_json::to_value(AskResponse::answered("X")).unwrap();
        assert_eq!(value, serde_json::json!({ "answer": "X" }));

        let value = serde_json::to_value(AskResponse::fallback_error("Y", "transport")).unwrap();
        assert_eq!(value, serde_json::json!({ "answer": "Y", "note": "fallback-error:transport" }));
    }
}
