//! Refinement through an OpenAI-compatible chat completions endpoint.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{parse_refined_response, Refiner};
use crate::error::{Error, Result};
use crate::model::StructuredDocument;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Upper bound on the serialized document sent to the model.
pub const MAX_PAYLOAD_BYTES: usize = 150_000;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const TEMPERATURE: f64 = 0.2;

const SYSTEM_PROMPT: &str = "You are a document structure refinement assistant. \
Given a JSON with pages, blocks (headings/paragraphs), and images, improve heading levels, \
merge/split paragraphs if necessary, and add alt text for images. \
Return valid JSON in the same schema.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Sends the document to a chat model and parses the reply.
#[derive(Debug, Clone)]
pub struct OpenAiRefiner {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiRefiner {
    /// Create a refiner with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Create a refiner from `OPENAI_API_KEY` and optional `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Refine("OPENAI_API_KEY not set".to_string()))?;
        let mut refiner = Self::new(api_key)?;
        if let Ok(url) = env::var("OPENAI_BASE_URL") {
            refiner = refiner.with_base_url(url);
        }
        Ok(refiner)
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Serialize `doc`, cut to at most `max` bytes on a char boundary.
pub(crate) fn capped_payload(doc: &StructuredDocument, max: usize) -> Result<String> {
    let mut payload = serde_json::to_string(doc)?;
    if payload.len() > max {
        let mut end = max;
        while !payload.is_char_boundary(end) {
            end -= 1;
        }
        payload.truncate(end);
    }
    Ok(payload)
}

impl Refiner for OpenAiRefiner {
    fn name(&self) -> &str {
        &self.model
    }

    fn refine(&self, doc: &StructuredDocument) -> Result<StructuredDocument> {
        let payload = capped_payload(doc, MAX_PAYLOAD_BYTES)?;
        log::debug!("Sending {} bytes to model {}", payload.len(), self.model);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: &payload,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Refine(format!("API error ({}): {}", status, body)));
        }

        let chat: ChatResponse = response.json()?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        parse_refined_response(&content)
    }
}
