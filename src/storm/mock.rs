//! Deterministic stand-in agent for mock mode
//!
//! Walks the same pipeline shape as the live service (personas, questions,
//! outline, sections) without credentials or network access. Every step
//! sleeps for the configured delay so timings scale with the grid.

use async_trait::async_trait;
use eyre::Result;
use std::time::Duration;

use super::event::{EventHandler, EventType, StormEvent};
use super::result::StormResult;
use super::{AgentSettings, StormAgent};
use crate::config::MockConfig;

const PERSONAS: &[&str] = &[
    "Industry Analyst",
    "Academic Researcher",
    "Security Engineer",
    "Product Manager",
    "Policy Expert",
    "End User",
];

const SECTIONS: &[&str] = &[
    "Overview",
    "Background",
    "Key Concepts",
    "Applications",
    "Challenges",
    "Future Directions",
];

pub struct MockStorm {
    settings: AgentSettings,
    config: MockConfig,
    on_event: Option<EventHandler>,
}

impl MockStorm {
    pub fn new(settings: AgentSettings, config: MockConfig, on_event: Option<EventHandler>) -> Self {
        Self {
            settings,
            config,
            on_event,
        }
    }

    fn emit(&self, events: &mut Vec<StormEvent>, event: StormEvent) {
        if let Some(handler) = &self.on_event {
            handler(&event);
        }
        events.push(event);
    }

    async fn step(&self) {
        if self.config.step_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.step_delay_ms)).await;
        }
    }

    fn filler(&self, topic: &str, persona: &str) -> String {
        let sentence = format!("{} is examined here from the point of view of the {}.", topic, persona);
        sentence
            .split_whitespace()
            .cycle()
            .take(self.config.words_per_section)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Name for the n-th item of a fixed list, numbered once the list wraps
fn pick(names: &[&str], index: usize) -> String {
    let base = names[index % names.len()];
    let round = index / names.len();
    if round == 0 { base.to_string() } else { format!("{} {}", base, round + 1) }
}

#[async_trait]
impl StormAgent for MockStorm {
    fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    async fn write(&self, topic: &str) -> Result<StormResult> {
        let mut events = Vec::new();
        self.emit(&mut events, StormEvent::new(EventType::WriteStarted, topic));

        if topic.trim().is_empty() {
            let message = "topic must not be empty";
            self.emit(&mut events, StormEvent::new(EventType::Error, message));
            return Ok(StormResult::failed(topic, message, events));
        }

        let personas: Vec<String> = (0..self.settings.personas as usize).map(|i| pick(PERSONAS, i)).collect();
        self.step().await;
        self.emit(
            &mut events,
            StormEvent::new(EventType::PersonasGenerated, format!("{} personas", personas.len()))
                .with_data(serde_json::json!({ "personas": personas })),
        );

        for persona in &personas {
            self.emit(&mut events, StormEvent::new(EventType::PersonaCreated, persona.clone()));
            for q in 1..=self.settings.questions {
                self.step().await;
                self.emit(
                    &mut events,
                    StormEvent::new(EventType::QuestionAsked, format!("{} asks question {}", persona, q)),
                );
                self.step().await;
                self.emit(
                    &mut events,
                    StormEvent::new(EventType::AnswerReceived, format!("answer {} for {}", q, persona)),
                );
            }
        }

        let sections: Vec<String> = (0..self.settings.sections as usize).map(|i| pick(SECTIONS, i)).collect();
        self.step().await;
        self.emit(
            &mut events,
            StormEvent::new(EventType::OutlineCreated, format!("{} sections", sections.len())),
        );

        let mut article = format!("# {}\n\n", topic);
        for (i, title) in sections.iter().enumerate() {
            self.step().await;
            let persona = personas
                .get(i % personas.len().max(1))
                .map(String::as_str)
                .unwrap_or("Generalist");
            article.push_str(&format!("## {}\n\n{}\n\n", title, self.filler(topic, persona)));
            self.emit(&mut events, StormEvent::new(EventType::SectionWritten, title.clone()));
        }

        self.emit(
            &mut events,
            StormEvent::new(EventType::ArticleCompleted, format!("{} chars", article.chars().count())),
        );

        Ok(StormResult {
            topic: topic.to_string(),
            article: Some(article),
            error: None,
            events,
            personas,
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn quick_config() -> MockConfig {
        MockConfig {
            step_delay_ms: 0,
            words_per_section: 12,
        }
    }

    #[tokio::test]
    async fn test_mock_write_shapes_article() {
        let agent = MockStorm::new(AgentSettings::new(2, 1, 3), quick_config(), None);
        let result = agent.write("Internet of Things").await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.personas, vec!["Industry Analyst", "Academic Researcher"]);
        assert_eq!(result.sections.len(), 3);
        let article = result.article.unwrap();
        assert!(article.starts_with("# Internet of Things\n"));
        assert_eq!(article.matches("\n## ").count(), 3);
    }

    #[tokio::test]
    async fn test_mock_event_counts() {
        let agent = MockStorm::new(AgentSettings::new(2, 3, 4), quick_config(), None);
        let result = agent.write("Rust").await.unwrap();

        let count = |t: EventType| result.events.iter().filter(|e| e.event_type == t).count();
        assert_eq!(count(EventType::PersonaCreated), 2);
        assert_eq!(count(EventType::QuestionAsked), 6);
        assert_eq!(count(EventType::AnswerReceived), 6);
        assert_eq!(count(EventType::SectionWritten), 4);
        // started + generated + outline + completed + per-persona + per-question pairs + sections
        assert_eq!(result.events.len(), 4 + 2 + 12 + 4);
        assert_eq!(result.events.first().unwrap().event_type, EventType::WriteStarted);
        assert_eq!(result.events.last().unwrap().event_type, EventType::ArticleCompleted);
    }

    #[tokio::test]
    async fn test_mock_observer_sees_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler: EventHandler = Arc::new(move |e: &StormEvent| sink.lock().unwrap().push(e.event_type));

        let agent = MockStorm::new(AgentSettings::new(1, 1, 1), quick_config(), Some(handler));
        let result = agent.write("Rust").await.unwrap();

        let recorded: Vec<EventType> = result.events.iter().map(|e| e.event_type).collect();
        assert_eq!(*seen.lock().unwrap(), recorded);
    }

    #[tokio::test]
    async fn test_mock_blank_topic_fails() {
        let agent = MockStorm::new(AgentSettings::new(1, 1, 1), quick_config(), None);
        let result = agent.write("   ").await.unwrap();

        assert!(!result.is_success());
        assert_eq!(result.error.as_deref(), Some("topic must not be empty"));
        assert_eq!(result.events.last().unwrap().event_type, EventType::Error);
    }

    #[test]
    fn test_pick_wraps_with_numbering() {
        assert_eq!(pick(SECTIONS, 0), "Overview");
        assert_eq!(pick(SECTIONS, SECTIONS.len()), "Overview 2");
    }

    #[test]
    fn test_filler_word_count() {
        let agent = MockStorm::new(AgentSettings::new(1, 1, 1), quick_config(), None);
        assert_eq!(agent.filler("Rust", "End User").split_whitespace().count(), 12);
    }
}
