//! CloudTrail Events Integration Module
//!
//! Queries the CloudTrail `LookupEvents` API for the management events of an
//! account in one region.
//!
//! ## Architecture
//!
//! ```text
//! Report generator → collect_all_events → EventLookup → CloudTrailEventsClient → AWS SDK → CloudTrail
//! ```
//!
//! [`EventLookup`] is the seam between the report and AWS: it fetches a single
//! page, and [`collect_all_events`] drives it until the continuation token runs
//! out.
//!
//! ## Lookup Attributes
//!
//! CloudTrail accepts exactly ONE lookup attribute per request. The report
//! filters on `Username`, which matches the IAM user (or assumed-role session
//! name) that made the call.
//!
//! ## Pagination
//!
//! CloudTrail limits results to 50 events per API call and returns a
//! `NextToken` while more events match. There is no client-side cap on the
//! number of pages; the service's own limits (90 days of history, 2 requests
//! per second per account and region) are the only bound.
//!
//! ## Record Details
//!
//! The lookup response carries only a handful of top-level fields. The source
//! region, source IP address, event type and event category are parsed out of
//! the raw `CloudTrailEvent` JSON string attached to every event.

#![warn(clippy::all, rust_2018_idioms)]

pub mod client;
pub mod types;

pub use client::{collect_all_events, convert_event, CloudTrailEventsClient, EventLookup};
pub use types::{
    CloudTrailEvent, EventResource, LookupAttribute, LookupAttributeKey, LookupOptions,
    LookupResult, MAX_RESULTS_PER_PAGE,
};
