//! trail-report - daily CloudTrail activity report per IAM user
//!
//! Looks up the previous UTC day's CloudTrail management events for a list of
//! IAM users and writes them to an Excel workbook, one sheet per user.
//!
//! # Architecture Overview
//!
//! - **Lookup Layer** ([`app::data_plane::cloudtrail_events`]): `LookupEvents`
//!   paging behind the [`app::data_plane::EventLookup`] trait
//! - **Report Layer** ([`app::user_activity_report`]): time window, row
//!   flattening with `N/A` placeholders, sheet naming, xlsx output
//! - **Inputs** ([`app::report_config`]): user list, region and output path
//!
//! # Getting Started
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! let users = vec!["alice".to_string(), "bob".to_string()];
//! let summary = trail_report::app::generate(
//!     &users,
//!     "us-east-1",
//!     std::path::Path::new("activity.xlsx"),
//! )
//! .await?;
//! println!("{} events written", summary.total_events());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
