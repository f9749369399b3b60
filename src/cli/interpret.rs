//! Interpret command: match and resolve one transcript without dispatching

use anyhow::Result;

use robonav::backend::DashboardClient;
use robonav::catalog::{CatalogSource, EntityCatalog};
use robonav::command::CommandMatcher;
use robonav::config::Config;
use robonav::domain::RawIntent;
use robonav::resolve::IntentResolver;

/// Print the rule, raw intent and resolved intent for a transcript
pub async fn interpret_command(config: &Config, transcript: &str, offline: bool, json: bool) -> Result<()> {
    let matcher = CommandMatcher::with_grammar(config.grammar.clone())?;
    let matched = matcher.match_transcript(transcript);
    let raw = match &matched {
        Some(m) => m.intent.clone(),
        None => RawIntent::Unrecognized {
            transcript: transcript.trim().to_string(),
        },
    };

    let mut catalog = EntityCatalog::new();
    if !offline && !raw.is_catalog_independent() {
        let client = DashboardClient::from_settings(&config.backend);
        let snapshot = tokio::task::spawn_blocking(move || client.fetch_snapshot()).await??;
        catalog.replace(snapshot);
    }

    let resolved = IntentResolver::default().resolve(&raw, &catalog);

    if json {
        let value = serde_json::json!({
            "transcript": transcript,
            "rule": matched.as_ref().map(|m| m.rule),
            "raw": raw,
            "resolved": resolved,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match &matched {
        Some(m) => println!("Rule:     {}", m.rule),
        None => println!("Rule:     (none)"),
    }
    println!("Intent:   {:?}", raw);
    if resolved.is_failure() {
        println!("Failure:  {}", resolved.describe());
    } else {
        println!("Resolved: {}", resolved.describe());
    }

    Ok(())
}
