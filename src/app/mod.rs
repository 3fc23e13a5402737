//! Core application modules for trail-report.
//!
//! # Module Organization
//!
//! ## AWS Integration
//! - [`data_plane`] - CloudTrail event lookup and pagination
//!
//! ## Reporting
//! - [`user_activity_report`] - Time window, row flattening, workbook assembly and output
//! - [`report_config`] - The report's inputs and their defaults
//!
//! # Architecture
//!
//! - [`data_plane`] knows how to talk to CloudTrail and nothing about spreadsheets
//! - [`user_activity_report`] depends on [`data_plane::EventLookup`] only, so it
//!   can be driven by an in-memory source in tests

pub mod data_plane;
pub mod report_config;
pub mod user_activity_report;

pub use report_config::ReportConfig;
pub use user_activity_report::{generate, ReportSummary};
