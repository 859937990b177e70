//! Azure AI Foundry HTTP client implementation

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::base::{ChatCompletion, CompletionFactory, Message, ProviderError, ProviderResult};

const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Connection settings for the Azure chat-completion endpoint
#[derive(Debug, Clone)]
pub struct AzureSettings {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    /// API credential sent in the `api-key` header
    pub api_key: String,
    /// Deployment (model) name
    pub deployment: String,
    /// Azure API version query parameter
    pub api_version: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AzureSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: "gpt-4o".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Azure chat-completions API request format
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

/// Azure chat-completions API response format
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
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

/// Azure AI Foundry completion client
pub struct AzureClient {
    client: Client,
    settings: AzureSettings,
}

impl AzureClient {
    /// Create a new client, validating required connection settings
    pub fn new(settings: AzureSettings) -> ProviderResult<Self> {
        if settings.endpoint.trim().is_empty() || settings.api_key.trim().is_empty() {
            return Err(ProviderError::Config(
                "Missing required connection settings: \
                 AZURE_AI_FOUNDRY_ENDPOINT and AZURE_AI_FOUNDRY_API_KEY must be set"
                    .to_string(),
            ));
        }

        Ok(Self {
            client: Client::builder()
                .http1_only() // Force HTTP/1.1 to avoid issues with some local servers
                .build()
                .unwrap_or_else(|_| Client::new()),
            settings,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.deployment,
            self.settings.api_version
        )
    }

    fn parse_response(&self, response: ChatCompletionResponse) -> ProviderResult<String> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

        choice
            .message
            .content
            .clone()
            .ok_or_else(|| ProviderError::InvalidResponse("No content in response".to_string()))
    }
}

#[async_trait::async_trait]
impl ChatCompletion for AzureClient {
    async fn complete(&self, messages: Vec<Message>) -> ProviderResult<String> {
        let request = ChatCompletionRequest {
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let url = self.completions_url();
        debug!(
            "Sending chat request to {} (deployment {})",
            self.settings.endpoint, self.settings.deployment
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response_data: ChatCompletionResponse = response.json().await?;
        self.parse_response(response_data)
    }

    fn model(&self) -> &str {
        &self.settings.deployment
    }
}

/// Builds `AzureClient` instances from a fixed settings snapshot
#[derive(Debug, Clone)]
pub struct AzureFactory {
    settings: AzureSettings,
}

impl AzureFactory {
    pub fn new(settings: AzureSettings) -> Self {
        Self { settings }
    }
}

impl CompletionFactory for AzureFactory {
    fn build(&self) -> ProviderResult<Arc<dyn ChatCompletion>> {
        Ok(Arc::new(AzureClient::new(self.settings.clone())?))
    }
}
