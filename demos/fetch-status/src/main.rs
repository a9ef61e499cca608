//! Two consumers sharing one pending-state cell through a registry: a loader
//! that tracks fetches, and a status line that only watches the cell.

use std::time::Duration;

use anyhow::bail;
use inflight_core::{PendingTracker, StoreRegistry, TrackOptions};
use tokio::time::sleep;

async fn fetch_items() -> anyhow::Result<Vec<String>> {
    sleep(Duration::from_millis(300)).await;
    Ok(["alpha", "bravo", "charlie", "delta", "echo"]
        .into_iter()
        .map(String::from)
        .collect())
}

async fn fetch_flaky() -> anyhow::Result<Vec<String>> {
    sleep(Duration::from_millis(50)).await;
    bail!("upstream unavailable")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let registry = StoreRegistry::new();

    // The status consumer never fetches anything; it just watches the cell.
    let status = PendingTracker::new(&registry, "items");
    status.subscribe(|state| {
        let line = if state.pending {
            "Busy"
        } else if state.has_error() {
            "Failed"
        } else {
            "OK"
        };
        println!("[status] {line}");
    });

    let loader = PendingTracker::new(&registry, "items");

    // Hold the busy indicator back 100ms; the fetch takes 300ms, so it shows.
    log::info!("fetching items");
    let items = loader
        .try_track(
            fetch_items(),
            TrackOptions::delayed(Duration::from_millis(100)),
        )
        .await?;
    for item in &items {
        println!("  - {item}");
    }

    // Background refresh: no pending transition, only the settlement lands.
    let refreshed = loader.track(fetch_items(), TrackOptions::silent()).await;
    log::info!(
        "silent refresh picked up {} items",
        refreshed.map_or(0, |v| v.len())
    );

    // A failing fetch, absorbed: the reason stays on the shared cell.
    let missing = loader.track(fetch_flaky(), TrackOptions::default()).await;
    assert!(missing.is_none());
    if let Some(error) = loader.state().error {
        log::warn!("fetch failed: {error}");
    }

    Ok(())
}
