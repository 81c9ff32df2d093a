//! Progress events reported by an agent while it writes

use chrono::{DateTime, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind of progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    WriteStarted,
    PersonasGenerated,
    PersonaCreated,
    QuestionAsked,
    AnswerReceived,
    OutlineCreated,
    SectionWritten,
    ArticleCompleted,
    Error,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::WriteStarted => "write_started",
            EventType::PersonasGenerated => "personas_generated",
            EventType::PersonaCreated => "persona_created",
            EventType::QuestionAsked => "question_asked",
            EventType::AnswerReceived => "answer_received",
            EventType::OutlineCreated => "outline_created",
            EventType::SectionWritten => "section_written",
            EventType::ArticleCompleted => "article_completed",
            EventType::Error => "error",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single progress event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormEvent {
    pub event_type: EventType,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl StormEvent {
    pub fn new(event_type: EventType, message: impl Into<String>) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Format for console display
    pub fn format_display(&self) -> String {
        let name = self.event_type.as_str();
        let colored_name = match self.event_type {
            EventType::WriteStarted => name.green(),
            EventType::ArticleCompleted => name.green().bold(),
            EventType::PersonaCreated | EventType::PersonasGenerated => name.cyan(),
            EventType::QuestionAsked | EventType::AnswerReceived => name.blue(),
            EventType::OutlineCreated | EventType::SectionWritten => name.yellow(),
            EventType::Error => name.red(),
        };
        format!("Event: {}", colored_name)
    }
}

/// Observer invoked for every event, in arrival order
pub type EventHandler = Arc<dyn Fn(&StormEvent) + Send + Sync>;

/// Handler that prints each event to stdout
pub fn print_handler() -> EventHandler {
    Arc::new(|event: &StormEvent| println!("{}", event.format_display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_display_matches_serde() {
        let json = serde_json::to_string(&EventType::PersonaCreated).unwrap();
        assert_eq!(json, "\"persona_created\"");
        assert_eq!(EventType::PersonaCreated.to_string(), "persona_created");
    }

    #[test]
    fn test_event_deserializes_without_optional_fields() {
        let event: StormEvent = serde_json::from_str(r#"{"event_type":"section_written"}"#).unwrap();
        assert_eq!(event.event_type, EventType::SectionWritten);
        assert!(event.message.is_empty());
        assert!(event.data.is_none());
    }

    #[test]
    fn test_format_display_names_event() {
        colored::control::set_override(false);
        let event = StormEvent::new(EventType::OutlineCreated, "outline");
        assert_eq!(event.format_display(), "Event: outline_created");
    }
}
