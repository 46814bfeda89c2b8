//! Location backfill command.
//!
//! Lists assets missing coordinates, geocodes the first `"Region, Country"`
//! tag on each one, and patches the result back into the content store.
//! Only the initial listing is fatal; every per-asset failure is recorded
//! in the report and the run moves on to the next asset.

use std::fmt;
use std::time::Duration;

use atlas_core::{find_location_tag, AppConfig};
use atlas_geocode::{CachedGeocoder, NominatimClient};
use atlas_sanity::{SanityClient, SanityError, UnlocatedAsset};

const RULE: &str = "============================================================";

/// Why an asset was left without coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    NoLocationTag,
    GeocodingFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoLocationTag => f.write_str("no location tag"),
            SkipReason::GeocodingFailed => f.write_str("geocoding failed"),
        }
    }
}

/// Result of processing one asset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AssetOutcome {
    /// Location written, or would have been in a dry run.
    Updated,
    Skipped(SkipReason),
    /// The store rejected the location patch.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkippedAsset {
    pub id: String,
    pub filename: Option<String>,
    pub tags: Vec<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub(crate) struct BackfillReport {
    pub total: usize,
    pub updated: usize,
    pub errors: usize,
    pub skipped: Vec<SkippedAsset>,
    pub unique_lookups: usize,
}

impl BackfillReport {
    fn record(&mut self, asset: &UnlocatedAsset, outcome: &AssetOutcome) {
        match outcome {
            AssetOutcome::Updated => self.updated += 1,
            AssetOutcome::Failed(_) => self.errors += 1,
            AssetOutcome::Skipped(reason) => self.skipped.push(SkippedAsset {
                id: asset.id.clone(),
                filename: asset.original_filename.clone(),
                tags: asset.tags.clone(),
                reason: *reason,
            }),
        }
    }
}

/// Entry point for `atlas-cli backfill-locations`.
///
/// # Errors
///
/// Returns an error if either HTTP client cannot be built or the initial
/// asset listing fails.
pub(crate) async fn run_backfill_command(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    println!("{RULE}");
    println!("Asset Location Updater (using Nominatim geocoding)");
    println!("{RULE}");
    if dry_run {
        println!("\n** DRY RUN MODE - No changes will be made **\n");
    }
    println!(
        "Note: geocoding requests are spaced {}ms apart.\n",
        config.geocoder_delay_ms
    );

    // Reads bypass the CDN so assets patched moments ago are not listed again.
    let store = SanityClient::from_app_config(config, false)
        .map_err(|e| anyhow::anyhow!("failed to build Sanity client: {e}"))?;
    let nominatim = NominatimClient::new(
        &config.geocoder_base_url,
        &config.geocoder_user_agent,
        config.request_timeout_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build geocoding client: {e}"))?;
    let mut geocoder =
        CachedGeocoder::new(nominatim, Duration::from_millis(config.geocoder_delay_ms));

    println!("Fetching assets without lat/lng...");
    let report = run_backfill(&store, &mut geocoder, dry_run)
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch assets without location: {e}"))?;

    if report.total == 0 {
        println!("No assets to update. Exiting.");
        return Ok(());
    }

    for line in summary_lines(&report, dry_run) {
        println!("{line}");
    }
    Ok(())
}

/// Processes every asset lacking coordinates, one at a time.
///
/// # Errors
///
/// Returns the store error if the initial listing fails. Nothing else is
/// fatal.
pub(crate) async fn run_backfill(
    store: &SanityClient,
    geocoder: &mut CachedGeocoder,
    dry_run: bool,
) -> Result<BackfillReport, SanityError> {
    let assets = store.fetch_assets_without_location().await?;
    println!("Found {} assets without location data.\n", assets.len());

    let mut report = BackfillReport {
        total: assets.len(),
        ..BackfillReport::default()
    };

    for asset in &assets {
        let outcome = process_asset(store, geocoder, asset, dry_run).await;
        report.record(asset, &outcome);
    }

    report.unique_lookups = geocoder.unique_lookups();
    tracing::info!(
        total = report.total,
        updated = report.updated,
        skipped = report.skipped.len(),
        errors = report.errors,
        dry_run,
        "location backfill finished"
    );
    Ok(report)
}

async fn process_asset(
    store: &SanityClient,
    geocoder: &mut CachedGeocoder,
    asset: &UnlocatedAsset,
    dry_run: bool,
) -> AssetOutcome {
    let Some(location_tag) = find_location_tag(&asset.tags) else {
        tracing::debug!(asset_id = %asset.id, "skipping asset without location tag");
        return AssetOutcome::Skipped(SkipReason::NoLocationTag);
    };

    println!(
        "[{}] {}",
        asset.id,
        asset.original_filename.as_deref().unwrap_or("unnamed")
    );
    println!("  Tag: \"{location_tag}\"");

    let Some(found) = geocoder.geocode(location_tag).await else {
        tracing::warn!(
            asset_id = %asset.id,
            filename = asset.display_name(),
            location_tag,
            "geocoding failed; skipping asset"
        );
        println!("  Status: Could not geocode location\n");
        return AssetOutcome::Skipped(SkipReason::GeocodingFailed);
    };

    println!("  Found: {}", found.display_name);
    println!("  Coordinates: {}, {}", found.lat, found.lng);

    if dry_run {
        println!("  Status: Would be updated (dry run)\n");
        return AssetOutcome::Updated;
    }

    match store.set_asset_location(&asset.id, found.point()).await {
        Ok(()) => {
            println!("  Status: Updated successfully\n");
            AssetOutcome::Updated
        }
        Err(e) => {
            tracing::error!(
                asset_id = %asset.id,
                filename = asset.display_name(),
                error = %e,
                "failed to update asset location"
            );
            println!("  Status: ERROR - {e}\n");
            AssetOutcome::Failed(e.to_string())
        }
    }
}

fn summary_lines(report: &BackfillReport, dry_run: bool) -> Vec<String> {
    let mut lines = vec![
        RULE.to_string(),
        "Summary".to_string(),
        RULE.to_string(),
        format!("Total assets processed: {}", report.total),
        format!("Updated: {}", report.updated),
        format!(
            "Skipped (no location tag or geocoding failed): {}",
            report.skipped.len()
        ),
    ];
    if !dry_run {
        lines.push(format!("Errors: {}", report.errors));
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped assets:".to_string());
        for asset in &report.skipped {
            let name = asset.filename.as_deref().unwrap_or(&asset.id);
            let tags = if asset.tags.is_empty() {
                "none".to_string()
            } else {
                asset.tags.join(", ")
            };
            lines.push(format!("  - {name} ({})", asset.reason));
            lines.push(format!("    Tags: {tags}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Geocoding cache: {} unique locations looked up",
        report.unique_lookups
    ));
    lines
}

#[cfg(test)]
#[path = "backfill_test.rs"]
mod tests;
