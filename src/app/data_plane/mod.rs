//! Data Plane Services Module
//!
//! AWS data plane integrations: services that are queried for data about an
//! account, as opposed to managing its resources.
//!
//! ## Available Services
//!
//! - **CloudTrail Events**: Query API call history for audit reporting

pub mod cloudtrail_events;

pub use cloudtrail_events::{CloudTrailEventsClient, EventLookup};
