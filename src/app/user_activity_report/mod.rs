//! User Activity Report
//!
//! Builds a spreadsheet of the previous UTC day's CloudTrail activity for a
//! list of IAM users, one sheet per user.
//!
//! ## Flow
//!
//! ```text
//! TimeWindow::yesterday
//!     └─ for each user (in order)
//!          └─ collect_all_events(Username = user, window)   every page, in order
//!               └─ UserSheet::new                           ReportRow per event
//! ReportWorkbook::new(sheets)                               unique sheet names
//!     └─ save(output_path)                                  single xlsx write
//! ```
//!
//! ## Sheet Layout
//!
//! Row 1 holds the fixed [`rows::HEADER`]; each following row is one event in
//! the order CloudTrail returned it. Missing values are written as `N/A`.
//! Event times are UTC wall-clock values stored without a zone.
//!
//! ## Failure Semantics
//!
//! A lookup failure for any user aborts the run before anything is written:
//! the output file is either complete or untouched.

#![warn(clippy::all, rust_2018_idioms)]

pub mod generator;
pub mod rows;
pub mod window;
pub mod workbook;

pub use generator::{build_report, generate, generate_with, ReportSummary};
pub use rows::{Cell, ReportRow, HEADER, PLACEHOLDER};
pub use window::TimeWindow;
pub use workbook::{sheet_name_for, ReportWorkbook, UserSheet, MAX_SHEET_NAME_CHARS};
