//! Errors raised by the structured completion client.

use thiserror::Error;

/// Failure modes of a structured completion call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not set (use the environment or `openai_api_key` in config.toml)")]
    MissingApiKey,

    #[error("LLM endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM response contained no choices")]
    NoChoices,

    #[error("LLM refused the request: {0}")]
    Refusal(String),

    #[error("LLM response had no content")]
    EmptyContent,

    #[error("LLM content does not match the `{schema}` schema: {source}")]
    Schema {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert!(LlmError::MissingApiKey.to_string().contains("OPENAI_API_KEY"));

        let err = LlmError::Status { status: 429, body: "slow down".to_string() };
        assert_eq!(err.to_string(), "LLM endpoint returned status 429: slow down");

        let err = LlmError::Refusal("cannot help".to_string());
        assert!(err.to_string().contains("cannot help"));
    }

    #[test]
    fn test_schema_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LlmError::Schema { schema: "product", source };
        assert!(err.to_string().contains("`product`"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
