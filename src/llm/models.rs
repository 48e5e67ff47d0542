//! Structured output types and chat completion wire format.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A type the LLM is asked to return as strict JSON.
pub trait StructuredOutput: DeserializeOwned {
    /// Schema name sent with the request.
    const NAME: &'static str;

    /// JSON schema with every field required and no extra properties.
    fn schema() -> Value;
}

/// Regex pattern that separates product-detail URLs from other links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexPattern {
    pub pattern: String,
}

impl StructuredOutput for RegexPattern {
    const NAME: &'static str = "regex_pattern";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Regular expression pattern that identifies product URLs."
                }
            },
            "required": ["pattern"],
            "additionalProperties": false
        })
    }
}

/// Product fields as extracted by the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image_url: String,
    pub description: String,
}

impl StructuredOutput for Product {
    const NAME: &'static str = "product";

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "title": { "type": "string" },
                "price": { "type": "number" },
                "image_url": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["id", "title", "price", "image_url", "description"],
            "additionalProperties": false
        })
    }
}

/// Output record persisted to the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "TITLE")]
    pub title: String,
    #[serde(rename = "PRICE")]
    pub price: f64,
    #[serde(rename = "IMAGE_URL")]
    pub image_url: String,
    #[serde(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image_url: product.image_url,
            description: product.description,
        }
    }
}

// Chat completion wire format

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user", content: content.into() }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSchemaFormat {
    pub name: &'static str,
    pub strict: bool,
    pub schema: Value,
}

impl ResponseFormat {
    pub fn for_type<T: StructuredOutput>() -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchemaFormat { name: T::NAME, strict: true, schema: T::schema() },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}
