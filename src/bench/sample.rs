//! Performance sample - one timed `write` call

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::storm::{AgentSettings, StormResult};

/// Error recorded when a failed result carries no message
const UNKNOWN_ERROR: &str = "unknown error";

/// One timed invocation. Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfSample {
    ts_utc: String,
    topic: String,
    test_mode: bool,
    personas: u32,
    questions: u32,
    sections: u32,
    run_index: u32,
    elapsed_s: f64,
    success: bool,
    article_chars: usize,
    events_count: usize,
    error: String,
}

impl PerfSample {
    /// Column names, in serialization order
    pub const FIELDS: [&'static str; 12] = [
        "ts_utc",
        "topic",
        "test_mode",
        "personas",
        "questions",
        "sections",
        "run_index",
        "elapsed_s",
        "success",
        "article_chars",
        "events_count",
        "error",
    ];

    /// Build a sample from a finished call.
    ///
    /// `error` is empty exactly when the result is successful.
    pub fn record(
        topic: &str,
        test_mode: bool,
        settings: AgentSettings,
        run_index: u32,
        elapsed: Duration,
        result: &StormResult,
    ) -> Self {
        let success = result.is_success();
        let error = if success {
            String::new()
        } else {
            result
                .error
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .unwrap_or(UNKNOWN_ERROR)
                .to_string()
        };

        Self {
            ts_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            topic: topic.to_string(),
            test_mode,
            personas: settings.personas,
            questions: settings.questions,
            sections: settings.sections,
            run_index,
            elapsed_s: elapsed.as_secs_f64(),
            success,
            article_chars: result.article_chars(),
            events_count: result.events.len(),
            error,
        }
    }

    pub fn ts_utc(&self) -> &str {
        &self.ts_utc
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn personas(&self) -> u32 {
        self.personas
    }

    pub fn questions(&self) -> u32 {
        self.questions
    }

    pub fn sections(&self) -> u32 {
        self.sections
    }

    pub fn run_index(&self) -> u32 {
        self.run_index
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn article_chars(&self) -> usize {
        self.article_chars
    }

    pub fn events_count(&self) -> usize {
        self.events_count
    }

    pub fn error(&self) -> &str {
        &self.error
    }
}

#[cfg(test)]
pub(crate) fn fixture(personas: u32, questions: u32, sections: u32, run_index: u32, elapsed_s: f64) -> PerfSample {
    PerfSample {
        ts_utc: "2026-01-01T00:00:00.000000+00:00".to_string(),
        topic: "Internet of Things".to_string(),
        test_mode: true,
        personas,
        questions,
        sections,
        run_index,
        elapsed_s,
        success: true,
        article_chars: 100,
        events_count: 10,
        error: String::new(),
    }
}
