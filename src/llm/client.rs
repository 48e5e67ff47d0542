//! Chat completion client with strict JSON-schema structured output.

use crate::config::Config;
use crate::llm::error::LlmError;
use crate::llm::models::{
    ChatMessage, ChatRequest, ChatResponse, Product, RegexPattern, ResponseFormat,
    StructuredOutput,
};
use crate::llm::prompts;
use crate::store::search::host_of;
use crate::store::ProductPage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// Trait for the two LLM calls of the pipeline - enables mocking for tests.
#[async_trait]
pub trait ProductLlm: Send + Sync {
    /// Returns a regex pattern that should match the product URLs among `urls`.
    async fn pattern(&self, urls: &[String]) -> Result<String>;

    /// Extracts a product record from a downloaded page.
    async fn extract(&self, page: &ProductPage) -> Result<Product>;
}

/// OpenAI-compatible chat completions client.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    pattern_model: String,
    extract_model: String,
    store: String,
}

impl OpenAiClient {
    /// Creates a client from configuration. Fails without an API key.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.openai_api_key.clone().ok_or(LlmError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let store = host_of(&config.store_url).unwrap_or(config.store_url.as_str()).to_string();

        Ok(Self {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key,
            pattern_model: config.pattern_model.clone(),
            extract_model: config.extract_model.clone(),
            store,
        })
    }

    /// Sends one prompt and decodes the reply into `T`.
    async fn complete<T: StructuredOutput>(
        &self,
        model: &str,
        prompt: String,
        temperature: Option<f32>,
    ) -> Result<T> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
            temperature,
            response_format: ResponseFormat::for_type::<T>(),
        };
        let body = serde_json::to_vec(&request).context("Failed to encode chat request")?;

        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {} (model {}, schema {})", url, model, T::NAME);

        let response = self
            .client
            .post(url.as_str())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        let status = response.status();
        let text = response.text().await.context("Failed to read chat completion body")?;

        if !status.is_success() {
            return Err(LlmError::Status { status: status.as_u16(), body: text }.into());
        }

        let response: ChatResponse =
            serde_json::from_str(&text).context("Failed to decode chat completion response")?;

        Ok(first_choice::<T>(response)?)
    }
}

/// Decodes the first choice of a completion into `T`.
fn first_choice<T: StructuredOutput>(response: ChatResponse) -> Result<T, LlmError> {
    let choice = response.choices.into_iter().next().ok_or(LlmError::NoChoices)?;

    if let Some(refusal) = choice.message.refusal {
        return Err(LlmError::Refusal(refusal));
    }

    let content =
        choice.message.content.filter(|c| !c.trim().is_empty()).ok_or(LlmError::EmptyContent)?;

    serde_json::from_str(&content).map_err(|source| LlmError::Schema { schema: T::NAME, source })
}

#[async_trait]
impl ProductLlm for OpenAiClient {
    async fn pattern(&self, urls: &[String]) -> Result<String> {
        info!("Requesting product URL pattern for {} links", urls.len());

        let prompt = prompts::pattern_prompt(&self.store, urls);
        let reply: RegexPattern = self.complete(&self.pattern_model, prompt, Some(0.0)).await?;

        debug!("Pattern received: {}", reply.pattern);
        Ok(reply.pattern)
    }

    async fn extract(&self, page: &ProductPage) -> Result<Product> {
        info!("Extracting product from {}", page.url);

        let prompt = prompts::extraction_prompt(page);
        self.complete(&self.extract_model, prompt, None).await
    }
}
