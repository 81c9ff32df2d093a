//! HTTP agent for the live Storm service

use async_trait::async_trait;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::event::{EventHandler, StormEvent};
use super::result::StormResult;
use super::{AgentSettings, StormAgent};
use crate::config::ApiConfig;
use crate::credentials::Credentials;

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    topic: &'a str,
    user_id: &'a str,
    no_of_personas: u32,
    no_of_questions: u32,
    no_of_sections: u32,
}

#[derive(Debug, Default, Deserialize)]
struct WriteResponse {
    #[serde(default)]
    article: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    events: Vec<StormEvent>,
    #[serde(default)]
    personas: Vec<String>,
    #[serde(default)]
    sections: Vec<String>,
}

impl WriteResponse {
    fn into_result(self, topic: &str) -> StormResult {
        let error = match (self.error.filter(|e| !e.trim().is_empty()), &self.article) {
            (Some(e), _) => Some(e),
            (None, None) => Some("service returned no article".to_string()),
            (None, Some(_)) => None,
        };

        StormResult {
            topic: topic.to_string(),
            article: if error.is_some() { None } else { self.article },
            error,
            events: self.events,
            personas: self.personas,
            sections: self.sections,
        }
    }
}

pub struct LiveStorm {
    settings: AgentSettings,
    api: ApiConfig,
    credentials: Credentials,
    on_event: Option<EventHandler>,
}

impl LiveStorm {
    pub fn new(
        settings: AgentSettings,
        api: ApiConfig,
        credentials: Credentials,
        on_event: Option<EventHandler>,
    ) -> Self {
        Self {
            settings,
            api,
            credentials,
            on_event,
        }
    }

    fn post(endpoint: &str, api_key: &str, timeout: Duration, body: String) -> Result<WriteResponse> {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        let agent: ureq::Agent = config.into();

        let mut response = agent
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("x-api-key", api_key)
            .send(body.as_bytes())
            .context(format!("Failed to call Storm service at {}", endpoint))?;

        let status = response.status();
        let response_body = response
            .body_mut()
            .read_to_string()
            .context("Failed to read Storm response")?;

        if !status.is_success() {
            eyre::bail!("Storm service returned HTTP {}: {}", status.as_u16(), response_body.trim());
        }

        serde_json::from_str(&response_body).context("Failed to parse Storm response")
    }
}

#[async_trait]
impl StormAgent for LiveStorm {
    fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    async fn write(&self, topic: &str) -> Result<StormResult> {
        let request = WriteRequest {
            topic,
            user_id: &self.credentials.user_id,
            no_of_personas: self.settings.personas,
            no_of_questions: self.settings.questions,
            no_of_sections: self.settings.sections,
        };
        let body = serde_json::to_string(&request).context("Failed to serialize request")?;

        let endpoint = self.api.endpoint.clone();
        let api_key = self.credentials.api_key.clone();
        let timeout = Duration::from_secs(self.api.timeout_secs);

        log::debug!("POST {} topic={:?} settings={:?}", endpoint, topic, self.settings);
        let response = tokio::task::spawn_blocking(move || Self::post(&endpoint, &api_key, timeout, body))
            .await
            .context("Storm request task failed")??;

        let result = response.into_result(topic);
        if let Some(handler) = &self.on_event {
            for event in &result.events {
                handler(event);
            }
        }
        Ok(result)
    }
}
