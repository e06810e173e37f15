//! `search` command: run the pipeline once and print or export the results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use gfinder_core::{AppConfig, EnrichedContact, SearchRequest};
use gfinder_maps::MapsClient;
use gfinder_pipeline::{EnrichmentPipeline, EnrichmentProgress, PipelineOptions};

/// Runs one lead search and prints a name/phone table to stdout.
///
/// # Errors
///
/// Returns an error if the Maps client cannot be built, the pipeline fails
/// at the request level, or the export file cannot be written.
pub(crate) async fn run_search(
    config: &AppConfig,
    location: &str,
    keyword: &str,
    count: i64,
    export: Option<&Path>,
) -> anyhow::Result<()> {
    let maps = MapsClient::with_base_url(
        &config.maps_api_key,
        config.maps_request_timeout_secs,
        &config.maps_user_agent,
        &config.maps_base_url,
    )?
    .with_language(config.maps_language.clone());

    let pipeline = EnrichmentPipeline::google(maps, PipelineOptions::from_app_config(config))
        .with_progress(Arc::new(|progress: EnrichmentProgress| {
            tracing::info!(
                completed = progress.completed,
                total = progress.total,
                percent = progress.percent(),
                "fetching place details"
            );
        }));

    let outcome = pipeline
        .run(SearchRequest::new(location, keyword, count))
        .await?;

    if outcome.results.is_empty() {
        println!("no places found for \"{keyword}\" near {location}");
        return Ok(());
    }

    print!("{}", render_table(&outcome.results));

    if let Some(warning) = &outcome.warning {
        eprintln!("warning: {warning}");
    }

    if let Some(target) = export {
        let path = resolve_export_path(target, chrono::Utc::now().date_naive());
        let bytes = gfinder_export::export_xlsx(&outcome.results)?;
        std::fs::write(&path, bytes)?;
        println!("exported {} rows to {}", outcome.results.len(), path.display());
    }

    Ok(())
}

/// Formats contacts as a fixed-width two-column table with a header row.
pub(crate) fn render_table(contacts: &[EnrichedContact]) -> String {
    let width = contacts
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len())
        + 2;

    let mut out = format!("{:<width$}PHONE\n", "NAME");
    for contact in contacts {
        out.push_str(&format!("{:<width$}{}\n", contact.name, contact.phone));
    }
    out
}

/// A directory target receives the dated export filename; anything else is
/// used as-is.
pub(crate) fn resolve_export_path(target: &Path, date: NaiveDate) -> PathBuf {
    if target.is_dir() {
        target.join(gfinder_export::export_filename(date))
    } else {
        target.to_path_buf()
    }
}
