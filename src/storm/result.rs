//! Outcome of one `write` call and the graph derived from it

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::event::StormEvent;

/// What an agent produced for a topic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StormResult {
    pub topic: String,
    pub article: Option<String>,
    pub error: Option<String>,
    pub events: Vec<StormEvent>,
    pub personas: Vec<String>,
    pub sections: Vec<String>,
}

impl StormResult {
    /// A failed result carrying an error message
    pub fn failed(topic: impl Into<String>, error: impl Into<String>, events: Vec<StormEvent>) -> Self {
        Self {
            topic: topic.into(),
            error: Some(error.into()),
            events,
            ..Self::default()
        }
    }

    /// Truthiness: an article was produced and no error was reported
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.article.is_some()
    }

    /// Article length in characters
    pub fn article_chars(&self) -> usize {
        self.article.as_deref().map(|a| a.chars().count()).unwrap_or(0)
    }

    /// Save the article as Markdown
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let Some(article) = self.article.as_deref() else {
            eyre::bail!(
                "No article to save for '{}': {}",
                self.topic,
                self.error.as_deref().unwrap_or("nothing was generated")
            );
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context(format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, article).context(format!("Failed to write article to {}", path.display()))?;
        log::info!("Saved article to {}", path.display());
        Ok(())
    }

    /// Topic/persona/section graph plus event totals
    pub fn graph_data(&self) -> GraphData {
        let mut nodes = vec![GraphNode {
            id: "topic".to_string(),
            label: self.topic.clone(),
            kind: NodeKind::Topic,
        }];
        let mut edges = Vec::new();

        for (i, persona) in self.personas.iter().enumerate() {
            let id = format!("persona-{}", i + 1);
            nodes.push(GraphNode {
                id: id.clone(),
                label: persona.clone(),
                kind: NodeKind::Persona,
            });
            edges.push(GraphEdge {
                source: "topic".to_string(),
                target: id,
                relation: "consults".to_string(),
            });
        }

        for (i, section) in self.sections.iter().enumerate() {
            let id = format!("section-{}", i + 1);
            nodes.push(GraphNode {
                id: id.clone(),
                label: section.clone(),
                kind: NodeKind::Section,
            });
            edges.push(GraphEdge {
                source: "topic".to_string(),
                target: id,
                relation: "contains".to_string(),
            });
        }

        let mut event_counts = IndexMap::new();
        for event in &self.events {
            *event_counts.entry(event.event_type.to_string()).or_insert(0) += 1;
        }

        GraphData {
            nodes,
            edges,
            event_counts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Topic,
    Persona,
    Section,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// Graph view of a result, printed by the demo runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Event type to count, in first-seen order
    pub event_counts: IndexMap<String, usize>,
}
