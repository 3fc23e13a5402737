//! Data types for CloudTrail Events operations

#![warn(clippy::all, rust_2018_idioms)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CloudTrail returns at most 50 events per `LookupEvents` call
pub const MAX_RESULTS_PER_PAGE: i32 = 50;

/// Lookup attribute key for filtering CloudTrail events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupAttributeKey {
    /// Event name (e.g., "RunInstances", "CreateBucket")
    EventName,
    /// Username (IAM user or role session)
    Username,
    /// Resource name
    ResourceName,
    /// Event source (e.g., "ec2.amazonaws.com")
    EventSource,
}

impl LookupAttributeKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupAttributeKey::EventName => "EventName",
            LookupAttributeKey::Username => "Username",
            LookupAttributeKey::ResourceName => "ResourceName",
            LookupAttributeKey::EventSource => "EventSource",
        }
    }

    /// Convert to AWS SDK LookupAttributeKey type
    pub fn to_sdk(self) -> aws_sdk_cloudtrail::types::LookupAttributeKey {
        use aws_sdk_cloudtrail::types::LookupAttributeKey as Sdk;
        match self {
            LookupAttributeKey::EventName => Sdk::EventName,
            LookupAttributeKey::Username => Sdk::Username,
            LookupAttributeKey::ResourceName => Sdk::ResourceName,
            LookupAttributeKey::EventSource => Sdk::EventSource,
        }
    }
}

/// Lookup attribute for filtering CloudTrail events
///
/// CloudTrail accepts a single lookup attribute per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupAttribute {
    pub attribute_key: LookupAttributeKey,
    pub attribute_value: String,
}

impl LookupAttribute {
    pub fn new(attribute_key: LookupAttributeKey, attribute_value: impl Into<String>) -> Self {
        Self {
            attribute_key,
            attribute_value: attribute_value.into(),
        }
    }

    /// Filter on the principal that made the call
    pub fn username(username: impl Into<String>) -> Self {
        Self::new(LookupAttributeKey::Username, username)
    }
}

/// Options for one `LookupEvents` page request
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOptions {
    /// Start time (Unix milliseconds timestamp)
    pub start_time: Option<i64>,

    /// End time (Unix milliseconds timestamp)
    pub end_time: Option<i64>,

    pub lookup_attribute: Option<LookupAttribute>,

    /// Maximum number of results per request (max 50)
    pub max_results: Option<i32>,

    /// Continuation token from the previous page
    pub next_token: Option<String>,
}

impl LookupOptions {
    pub fn new() -> Self {
        Self {
            start_time: None,
            end_time: None,
            lookup_attribute: None,
            max_results: Some(MAX_RESULTS_PER_PAGE),
            next_token: None,
        }
    }

    /// Builder pattern: set start time (Unix milliseconds)
    pub fn with_start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Builder pattern: set end time (Unix milliseconds)
    pub fn with_end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Builder pattern: set the lookup attribute, replacing any previous one
    pub fn with_lookup_attribute(mut self, attribute: LookupAttribute) -> Self {
        self.lookup_attribute = Some(attribute);
        self
    }

    /// Builder pattern: filter by username
    pub fn with_username(self, username: impl Into<String>) -> Self {
        self.with_lookup_attribute(LookupAttribute::username(username))
    }

    /// Builder pattern: set max results (capped at 50)
    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results.min(MAX_RESULTS_PER_PAGE));
        self
    }

    /// Builder pattern: set pagination token
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource referenced by a CloudTrail event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResource {
    /// Resource type (e.g., "AWS::S3::Bucket")
    pub resource_type: Option<String>,

    /// Resource name/identifier
    pub resource_name: Option<String>,
}

impl EventResource {
    pub fn named(resource_name: impl Into<String>) -> Self {
        Self {
            resource_type: None,
            resource_name: Some(resource_name.into()),
        }
    }
}

/// CloudTrail event
///
/// Every field is optional: the service omits whatever it did not record, and
/// the region, source IP, event type and category only exist inside the raw
/// record JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudTrailEvent {
    pub event_id: Option<String>,

    /// Event name (API operation, e.g., "RunInstances")
    pub event_name: Option<String>,

    pub event_time: Option<DateTime<Utc>>,

    /// Event source (AWS service, e.g., "ec2.amazonaws.com")
    pub event_source: Option<String>,

    pub username: Option<String>,

    pub aws_region: Option<String>,

    pub source_ip_address: Option<String>,

    /// Resources affected by this event
    pub resources: Vec<EventResource>,

    /// "true" when the call did not modify anything
    pub read_only: Option<String>,

    pub access_key_id: Option<String>,

    /// e.g. "AwsApiCall", "AwsConsoleSignIn"
    pub event_type: Option<String>,

    /// e.g. "Management", "Data", "Insight"
    pub event_category: Option<String>,

    /// Full CloudTrail record JSON (can be large)
    pub cloud_trail_event: Option<String>,
}

/// One page of a CloudTrail lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub events: Vec<CloudTrailEvent>,

    /// Token for fetching next page of results
    pub next_token: Option<String>,
}

impl LookupResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(events: Vec<CloudTrailEvent>, next_token: Option<String>) -> Self {
        Self { events, next_token }
    }

    /// Continuation token, treating an empty string as the end of the results
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }
}
