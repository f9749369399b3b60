//! Map commands: click-to-navigate and entity overlay

use anyhow::{Context, Result, bail};
use std::sync::Arc;

use robonav::backend::DashboardClient;
use robonav::catalog::{CatalogSource, EntityCatalog};
use robonav::config::Config;
use robonav::dispatch::{GoalDispatcher, Outcome};
use robonav::map::MapViewport;

/// Convert a pixel click into a world goal and send it
pub async fn click_command(config: &Config, px: f64, py: f64, dry_run: bool) -> Result<()> {
    let frame = config.map.frame().context("Invalid [map] settings")?;
    let viewport = MapViewport::new(frame);
    let click = viewport.click(px, py);
    let intent = viewport.click_to_intent(&click)?;

    println!("{}", intent.describe());
    if dry_run {
        return Ok(());
    }

    let client = Arc::new(DashboardClient::from_settings(&config.backend));
    let dispatcher = GoalDispatcher::new(client);
    let outcome = tokio::task::spawn_blocking(move || dispatcher.dispatch(&intent)).await?;

    match outcome {
        Outcome::Ok => {
            println!("Goal sent");
            Ok(())
        }
        Outcome::Failed(message) => bail!(message),
    }
}

/// Print where each catalog entity falls on the map image
pub async fn overlay_command(config: &Config, json: bool) -> Result<()> {
    let frame = config.map.frame().context("Invalid [map] settings")?;
    let viewport = MapViewport::new(frame);

    let client = DashboardClient::from_settings(&config.backend);
    let snapshot = tokio::task::spawn_blocking(move || client.fetch_snapshot()).await??;
    let catalog = EntityCatalog::from_snapshot(snapshot);
    let markers = viewport.overlay(&catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&markers)?);
        return Ok(());
    }

    if markers.is_empty() {
        println!("No objects on the map.");
        return Ok(());
    }

    println!("Objects ({}):\n", markers.len());
    for marker in &markers {
        println!(
            "  #{} {} at ({:.0}, {:.0})",
            marker.entity_id, marker.label, marker.px, marker.py
        );
    }

    Ok(())
}
