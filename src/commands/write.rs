//! Demo runner: write one article, save it, print its graph data

use colored::*;
use eyre::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::WriteArgs;
use crate::config::Config;
use crate::credentials::Credentials;
use crate::storm::{AgentFactory, AgentSettings, print_handler};

pub fn run(args: WriteArgs, config: &Config) -> Result<()> {
    let settings = AgentSettings::new(args.personas, args.questions, args.sections);
    let out = Config::expand_path(&args.out.unwrap_or_else(|| PathBuf::from(format!("{}.md", slug(&args.topic)))));

    let on_event = (!args.quiet_events).then(print_handler);
    let factory = if args.mock {
        AgentFactory::mock(config.mock.clone(), on_event)
    } else {
        let credentials = Credentials::from_env(&config.api)?;
        AgentFactory::live(config.api.clone(), credentials, on_event)
    };
    let agent = factory.build(settings)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    // Timed like a decorator: reported even when the write fails
    let started = Instant::now();
    let outcome = rt.block_on(async {
        let result = agent.write(&args.topic).await?;
        result.to_file(&out)?;
        let graph = result.graph_data();
        println!("{}", serde_json::to_string_pretty(&graph).context("Failed to serialize graph data")?);
        Ok::<_, eyre::Report>(result)
    });
    let elapsed = started.elapsed().as_secs_f64();
    println!("Function `{}` took {:.4} seconds", "write".cyan(), elapsed);
    log::info!("write finished in {:.4}s (ok={})", elapsed, outcome.is_ok());

    outcome?;
    println!("Saved article: {}", out.display().to_string().green());
    Ok(())
}

/// File-name friendly form of a topic: `Internet of Things` -> `internet_of_things`
pub fn slug(topic: &str) -> String {
    let mut slug = String::with_capacity(topic.len());
    for c in topic.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let trimmed = slug.trim_end_matches('_');
    if trimmed.is_empty() { "article".to_string() } else { trimmed.to_string() }
}
