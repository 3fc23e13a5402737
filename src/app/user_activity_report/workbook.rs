//! In-memory report workbook and its xlsx serialization
//!
//! The workbook is assembled as a plain list of named sheets and only turned
//! into an xlsx file in [`ReportWorkbook::save`], so everything up to that
//! point can be inspected in tests without touching the filesystem.

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use super::rows::{Cell, ReportRow, HEADER};
use crate::app::data_plane::cloudtrail_events::CloudTrailEvent;

/// Longest sheet name the report produces
pub const MAX_SHEET_NAME_CHARS: usize = 30;

/// Number format for the event time column
pub const EVENT_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Sheet name for an identity: forbidden characters replaced, cut to 30 chars
///
/// May return an empty string; [`ReportWorkbook::new`] names those sheets.
pub fn sheet_name_for(identity: &str) -> String {
    let cleaned: String = identity
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_CHARS)
        .collect();

    // Excel rejects names that begin or end with an apostrophe
    cleaned.trim_matches('\'').to_string()
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// One identity's sheet: its name and rows in retrieval order
#[derive(Debug, Clone, PartialEq)]
pub struct UserSheet {
    pub identity: String,
    pub name: String,
    pub rows: Vec<ReportRow>,
}

impl UserSheet {
    pub fn new(identity: &str, events: &[CloudTrailEvent]) -> Self {
        Self {
            identity: identity.to_string(),
            name: sheet_name_for(identity),
            rows: events
                .iter()
                .map(|event| ReportRow::from_event(identity, event))
                .collect(),
        }
    }
}

/// Ordered, immutable set of sheets ready to be written
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportWorkbook {
    sheets: Vec<UserSheet>,
}

impl ReportWorkbook {
    /// Assemble sheets in the given order, making every name unique
    ///
    /// Excel compares sheet names case-insensitively, so a name that clashes
    /// with an earlier one gets a ` (2)`, ` (3)`, ... suffix. An empty name
    /// becomes `Sheet<position>`.
    pub fn new(sheets: Vec<UserSheet>) -> Self {
        let mut taken = HashSet::new();

        let sheets = sheets
            .into_iter()
            .enumerate()
            .map(|(index, mut sheet)| {
                if sheet.name.is_empty() {
                    sheet.name = format!("Sheet{}", index + 1);
                }
                sheet.name = unique_name(&sheet.name, &mut taken);
                sheet
            })
            .collect();

        Self { sheets }
    }

    pub fn sheets(&self) -> &[UserSheet] {
        &self.sheets
    }

    pub fn event_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.rows.len()).sum()
    }

    fn to_xlsx(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let time_format = Format::new().set_num_format(EVENT_TIME_FORMAT);

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .with_context(|| format!("Invalid sheet name '{}'", sheet.name))?;

            for (col, title) in HEADER.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
            }

            for (index, row) in sheet.rows.iter().enumerate() {
                let row_num = u32::try_from(index + 1)
                    .with_context(|| format!("Too many rows for sheet '{}'", sheet.name))?;

                for (col, cell) in row.cells().iter().enumerate() {
                    let col = col as u16;
                    let written = match cell {
                        Cell::Text(text) => worksheet.write_string(row_num, col, text),
                        Cell::DateTime(time) => {
                            worksheet.write_datetime_with_format(row_num, col, time, &time_format)
                        }
                    };
                    written.with_context(|| {
                        format!("Failed to write row {} of sheet '{}'", row_num, sheet.name)
                    })?;
                }
            }

            worksheet.set_freeze_panes(1, 0)?;
            worksheet.autofit();
            debug!("Rendered sheet '{}' with {} rows", sheet.name, sheet.rows.len());
        }

        Ok(workbook)
    }

    /// Serialize to xlsx bytes without writing a file
    pub fn to_buffer(&self) -> Result<Vec<u8>> {
        let mut workbook = self.to_xlsx()?;
        workbook
            .save_to_buffer()
            .with_context(|| "Failed to serialize workbook")
    }

    /// Write the workbook to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut workbook = self.to_xlsx()?;
        workbook
            .save(path)
            .with_context(|| format!("Failed to save workbook to {}", path.display()))
    }
}

fn unique_name(name: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    let mut suffix_number = 2;

    while !taken.insert(candidate.to_lowercase()) {
        let suffix = format!(" ({})", suffix_number);
        let base = truncate_chars(name, MAX_SHEET_NAME_CHARS - suffix.chars().count());
        candidate = format!("{}{}", base, suffix);
        suffix_number += 1;
    }

    candidate
}
