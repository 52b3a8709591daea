use super::chat_models::ChatMessage;
use super::chat_repository::ChatRepository;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    user_id: String,
    message: &'a str,
}

#[derive(Deserialize)]
struct InferenceResponse {
    reply: String,
}

/// Proxies symptom-chat messages to the external inference service and
/// persists each exchange.
#[derive(Clone)]
pub struct ChatService {
    client: reqwest::Client,
    base_url: String,
    repo: ChatRepository,
}

impl ChatService {
    pub fn new(base_url: String, repo: ChatRepository) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url,
            repo,
        })
    }

    pub async fn send_message(&self, user_id: Uuid, message: &str) -> Result<ChatMessage> {
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&InferenceRequest {
                user_id: user_id.to_string(),
                message,
            })
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("chat service request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "chat service returned {}",
                response.status()
            )));
        }

        let inference: InferenceResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("invalid chat service response: {}", e)))?;

        self.repo.create(user_id, message, &inference.reply).await
    }
}
