//! Storm article-writing agents
//!
//! The agent itself is an external collaborator. This module defines the
//! contract the rest of the crate relies on and the two implementations:
//! - `mock` - deterministic, offline (mock mode)
//! - `client` - HTTP client for the live service

pub mod client;
pub mod event;
pub mod mock;
pub mod result;

use async_trait::async_trait;
use eyre::Result;
use serde::{Deserialize, Serialize};

pub use client::LiveStorm;
pub use event::{EventHandler, print_handler};
pub use mock::MockStorm;
pub use result::StormResult;

use crate::config::{ApiConfig, MockConfig};
use crate::credentials::Credentials;

/// Shape of the article an agent is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Expert perspectives consulted
    pub personas: u32,
    /// Questions asked per persona
    pub questions: u32,
    /// Article sections
    pub sections: u32,
}

impl AgentSettings {
    pub fn new(personas: u32, questions: u32, sections: u32) -> Self {
        Self {
            personas,
            questions,
            sections,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.personas == 0 || self.questions == 0 || self.sections == 0 {
            eyre::bail!(
                "personas, questions and sections must all be >= 1 (got {}, {}, {})",
                self.personas,
                self.questions,
                self.sections
            );
        }
        Ok(())
    }
}

/// An agent that writes an article about a topic
#[async_trait]
pub trait StormAgent: Send + Sync {
    fn settings(&self) -> &AgentSettings;

    /// Write one article. `Err` means the call itself failed; a result with
    /// `is_success() == false` means the agent ran and reported an error.
    async fn write(&self, topic: &str) -> Result<StormResult>;
}

enum AgentMode {
    Mock(MockConfig),
    Live { api: ApiConfig, credentials: Credentials },
}

/// Builds fresh agents in either mock or live mode
pub struct AgentFactory {
    mode: AgentMode,
    on_event: Option<EventHandler>,
}

impl AgentFactory {
    pub fn mock(config: MockConfig, on_event: Option<EventHandler>) -> Self {
        Self {
            mode: AgentMode::Mock(config),
            on_event,
        }
    }

    pub fn live(api: ApiConfig, credentials: Credentials, on_event: Option<EventHandler>) -> Self {
        Self {
            mode: AgentMode::Live { api, credentials },
            on_event,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.mode, AgentMode::Mock(_))
    }

    pub fn build(&self, settings: AgentSettings) -> Result<Box<dyn StormAgent>> {
        settings.validate()?;
        log::debug!("Building {} agent with {:?}", if self.is_mock() { "mock" } else { "live" }, settings);

        let agent: Box<dyn StormAgent> = match &self.mode {
            AgentMode::Mock(config) => Box::new(MockStorm::new(settings, config.clone(), self.on_event.clone())),
            AgentMode::Live { api, credentials } => Box::new(LiveStorm::new(
                settings,
                api.clone(),
                credentials.clone(),
                self.on_event.clone(),
            )),
        };
        Ok(agent)
    }
}
