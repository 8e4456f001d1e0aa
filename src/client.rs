use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::ModelError;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};

/// A remote model that can continue a conversation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationModel: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError>;
}

/// Client for the Gemini generateContent API
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a client whose requests fail with `ModelError::Http` once
    /// `timeout` elapses
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ModelError> {
        Self::new(
            &config.api_key,
            &config.model,
            &config.endpoint,
            Duration::from_secs(config.model_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl ConversationModel for GeminiClient {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError> {
        let url = self.generate_url();

        info!(
            "Sending {} content entries to model {}",
            request.contents.len(),
            self.model
        );
        debug!("API URL: {}", url);

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        info!("Response received with status: {}", status);

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response = res.json::<GenerateContentResponse>().await?;
        if response.candidates.is_empty() {
            debug!("Prompt feedback: {:?}", response.prompt_feedback);
            return Err(ModelError::NoCandidates);
        }

        Ok(response)
    }
}
