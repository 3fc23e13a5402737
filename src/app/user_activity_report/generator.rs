//! Report generation: window → per-user lookups → workbook → file

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::window::TimeWindow;
use super::workbook::{ReportWorkbook, UserSheet};
use crate::app::data_plane::cloudtrail_events::{
    collect_all_events, CloudTrailEventsClient, EventLookup,
};
use crate::log_info;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub output_path: PathBuf,
    pub window: TimeWindow,
    /// (sheet name, event count) in sheet order
    pub sheets: Vec<(String, usize)>,
}

impl ReportSummary {
    pub fn total_events(&self) -> usize {
        self.sheets.iter().map(|(_, count)| count).sum()
    }
}

/// Fetch every identity's events for `window` and lay them out as sheets
///
/// Identities are processed one at a time in list order. The first failing
/// lookup aborts the whole report.
pub async fn build_report<L>(
    lookup: &L,
    identities: &[String],
    window: &TimeWindow,
) -> Result<ReportWorkbook>
where
    L: EventLookup + ?Sized,
{
    let mut sheets = Vec::with_capacity(identities.len());

    for identity in identities {
        log_info!("Processing logs for user: {}", identity);

        let options = window.lookup_options().with_username(identity.as_str());
        let events = collect_all_events(lookup, options)
            .await
            .with_context(|| format!("Failed to fetch CloudTrail events for user {}", identity))?;

        log_info!("Found {} events for user: {}", events.len(), identity);
        sheets.push(UserSheet::new(identity, &events));
    }

    Ok(ReportWorkbook::new(sheets))
}

/// Build the report from `lookup` and write it to `output_path`
///
/// Nothing is written unless every identity was fetched successfully.
pub async fn generate_with<L>(
    lookup: &L,
    identities: &[String],
    output_path: &Path,
    window: TimeWindow,
) -> Result<ReportSummary>
where
    L: EventLookup + ?Sized,
{
    debug!(
        "Reporting window {} .. {} for {} users",
        window.start,
        window.end,
        identities.len()
    );

    let workbook = build_report(lookup, identities, &window).await?;
    workbook.save(output_path)?;

    log_info!(
        "Logs for all users saved to {} ({} events)",
        output_path.display(),
        workbook.event_count()
    );

    Ok(ReportSummary {
        output_path: output_path.to_path_buf(),
        window,
        sheets: workbook
            .sheets()
            .iter()
            .map(|sheet| (sheet.name.clone(), sheet.rows.len()))
            .collect(),
    })
}

/// Report the previous UTC day of CloudTrail activity for `identities`
/// in `region` into the xlsx file at `output_path`
pub async fn generate(
    identities: &[String],
    region: &str,
    output_path: &Path,
) -> Result<ReportSummary> {
    let window = TimeWindow::yesterday();
    let client = CloudTrailEventsClient::for_region(region).await;

    generate_with(&client, identities, output_path, window).await
}
