//! AWS SDK client wrapper for CloudTrail Events

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudtrail as cloudtrail_sdk;
use aws_smithy_types::DateTime;
use aws_types::region::Region;
use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{CloudTrailEvent, EventResource, LookupOptions, LookupResult};

/// A source of CloudTrail events, one page per call
///
/// Implemented by [`CloudTrailEventsClient`] against AWS and by in-memory
/// fakes in tests.
#[async_trait]
pub trait EventLookup: Send + Sync {
    /// Fetch the single page described by `options`
    async fn lookup_events(&self, options: LookupOptions) -> Result<LookupResult>;
}

/// Client for querying AWS CloudTrail Events in one region
#[derive(Clone, Debug)]
pub struct CloudTrailEventsClient {
    client: cloudtrail_sdk::Client,
    region: String,
}

impl CloudTrailEventsClient {
    /// Build a client from the default credential chain for `region`
    pub async fn for_region(region: &str) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        debug!("Created CloudTrail client for region: {}", region);
        Self::from_sdk_client(cloudtrail_sdk::Client::new(&aws_config), region)
    }

    pub fn from_sdk_client(client: cloudtrail_sdk::Client, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl EventLookup for CloudTrailEventsClient {
    async fn lookup_events(&self, options: LookupOptions) -> Result<LookupResult> {
        let mut request = self.client.lookup_events();

        if let Some(start_time) = options.start_time {
            request = request.start_time(DateTime::from_millis(start_time));
        }

        if let Some(end_time) = options.end_time {
            request = request.end_time(DateTime::from_millis(end_time));
        }

        if let Some(attr) = &options.lookup_attribute {
            let sdk_attr = cloudtrail_sdk::types::LookupAttribute::builder()
                .attribute_key(attr.attribute_key.to_sdk())
                .attribute_value(&attr.attribute_value)
                .build()
                .with_context(|| "Failed to build lookup attribute")?;

            request = request.lookup_attributes(sdk_attr);
        }

        if let Some(max_results) = options.max_results {
            request = request.max_results(max_results);
        }

        if let Some(token) = options.next_token {
            request = request.next_token(token);
        }

        let response = request.send().await.with_context(|| {
            format!(
                "Failed to lookup CloudTrail events in region {}",
                self.region
            )
        })?;

        let events = response.events().iter().map(convert_event).collect();

        Ok(LookupResult::new(
            events,
            response.next_token().map(|t| t.to_string()),
        ))
    }
}

/// Fields that only exist inside the raw CloudTrail record
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDetails {
    aws_region: Option<String>,
    #[serde(rename = "sourceIPAddress")]
    source_ip_address: Option<String>,
    event_type: Option<String>,
    event_category: Option<String>,
}

impl RecordDetails {
    fn parse(event_id: Option<&str>, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        serde_json::from_str(raw).unwrap_or_else(|e| {
            warn!(
                "Could not parse CloudTrail record for event {}: {}",
                event_id.unwrap_or("<unknown>"),
                e
            );
            Self::default()
        })
    }
}

/// Convert an SDK event into our typed record
pub fn convert_event(event: &cloudtrail_sdk::types::Event) -> CloudTrailEvent {
    let details = RecordDetails::parse(event.event_id(), event.cloud_trail_event());

    let event_time = event
        .event_time()
        .and_then(|dt| chrono::DateTime::from_timestamp(dt.secs(), dt.subsec_nanos()));

    let resources = event
        .resources()
        .iter()
        .map(|res| EventResource {
            resource_type: res.resource_type().map(|s| s.to_string()),
            resource_name: res.resource_name().map(|s| s.to_string()),
        })
        .collect();

    CloudTrailEvent {
        event_id: event.event_id().map(|s| s.to_string()),
        event_name: event.event_name().map(|s| s.to_string()),
        event_time,
        event_source: event.event_source().map(|s| s.to_string()),
        username: event.username().map(|s| s.to_string()),
        aws_region: details.aws_region,
        source_ip_address: details.source_ip_address,
        resources,
        read_only: event.read_only().map(|s| s.to_string()),
        access_key_id: event.access_key_id().map(|s| s.to_string()),
        event_type: details.event_type,
        event_category: details.event_category,
        cloud_trail_event: event.cloud_trail_event().map(|s| s.to_string()),
    }
}

/// Follow continuation tokens until the service reports no further pages
///
/// Events are returned in the order the service produced them. `options`
/// describes the first page; its `next_token` is normally `None`.
pub async fn collect_all_events<L>(
    lookup: &L,
    options: LookupOptions,
) -> Result<Vec<CloudTrailEvent>>
where
    L: EventLookup + ?Sized,
{
    let mut all_events = Vec::new();
    let mut request = options;
    let mut pages_fetched = 0usize;

    loop {
        let result = lookup.lookup_events(request.clone()).await?;
        pages_fetched += 1;

        let next_token = result.continuation().map(|t| t.to_string());
        debug!(
            "CloudTrail page {} returned {} events (more: {})",
            pages_fetched,
            result.events.len(),
            next_token.is_some()
        );
        all_events.extend(result.events);

        match next_token {
            Some(token) => request = request.with_next_token(token),
            None => break,
        }
    }

    Ok(all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data_plane::cloudtrail_events::types::LookupAttribute;
    use cloudtrail_sdk::types::{Event, Resource};
    use std::sync::Mutex;

    /// Serves pre-baked pages and records every request it receives
    struct PagedLookup {
        pages: Vec<LookupResult>,
        requests: Mutex<Vec<LookupOptions>>,
    }

    #[async_trait]
    impl EventLookup for PagedLookup {
        async fn lookup_events(&self, options: LookupOptions) -> Result<LookupResult> {
            let mut requests = self.requests.lock().unwrap();
            let index = requests.len();
            requests.push(options);
            self.pages
                .get(index)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no page {}", index))
        }
    }

    fn named(name: &str) -> CloudTrailEvent {
        CloudTrailEvent {
            event_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_event_reads_record_details() {
        let record = r#"{
            "eventVersion": "1.08",
            "awsRegion": "ap-south-1",
            "sourceIPAddress": "203.0.113.7",
            "eventType": "AwsApiCall",
            "eventCategory": "Management",
            "readOnly": true
        }"#;

        let event = Event::builder()
            .event_id("abc-123")
            .event_name("PutObject")
            .event_source("s3.amazonaws.com")
            .event_time(DateTime::from_secs(1_700_000_000))
            .username("alice")
            .read_only("true")
            .resources(
                Resource::builder()
                    .resource_type("AWS::S3::Bucket")
                    .resource_name("reports")
                    .build(),
            )
            .cloud_trail_event(record)
            .build();

        let converted = convert_event(&event);

        assert_eq!(converted.event_id.as_deref(), Some("abc-123"));
        assert_eq!(converted.event_name.as_deref(), Some("PutObject"));
        assert_eq!(converted.event_source.as_deref(), Some("s3.amazonaws.com"));
        assert_eq!(
            converted.event_time.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert_eq!(converted.aws_region.as_deref(), Some("ap-south-1"));
        assert_eq!(converted.source_ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(converted.event_type.as_deref(), Some("AwsApiCall"));
        assert_eq!(converted.event_category.as_deref(), Some("Management"));
        assert_eq!(converted.read_only.as_deref(), Some("true"));
        assert_eq!(
            converted.resources,
            vec![EventResource {
                resource_type: Some("AWS::S3::Bucket".to_string()),
                resource_name: Some("reports".to_string()),
            }]
        );
    }

    #[test]
    fn test_convert_event_tolerates_missing_and_bad_record() {
        let bare = convert_event(&Event::builder().build());
        assert_eq!(bare, CloudTrailEvent::default());

        let garbled = convert_event(
            &Event::builder()
                .event_name("ConsoleLogin")
                .cloud_trail_event("{not json")
                .build(),
        );
        assert_eq!(garbled.event_name.as_deref(), Some("ConsoleLogin"));
        assert_eq!(garbled.aws_region, None);
        assert_eq!(garbled.source_ip_address, None);
    }

    #[tokio::test]
    async fn test_collect_all_events_follows_tokens_in_order() {
        let lookup = PagedLookup {
            pages: vec![
                LookupResult::new(vec![named("A"), named("B")], Some("t1".to_string())),
                LookupResult::new(vec![], Some("t2".to_string())),
                LookupResult::new(vec![named("C")], None),
            ],
            requests: Mutex::new(Vec::new()),
        };

        let options = LookupOptions::new().with_username("alice").with_start_time(5);
        let events = collect_all_events(&lookup, options).await.unwrap();

        let names: Vec<_> = events
            .iter()
            .map(|e| e.event_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let requests = lookup.requests.lock().unwrap();
        let tokens: Vec<_> = requests.iter().map(|r| r.next_token.clone()).collect();
        assert_eq!(
            tokens,
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
        assert!(requests.iter().all(|r| r.start_time == Some(5)));
        assert!(requests
            .iter()
            .all(|r| r.lookup_attribute == Some(LookupAttribute::username("alice"))));
    }

    #[tokio::test]
    async fn test_collect_all_events_stops_on_empty_token() {
        let lookup = PagedLookup {
            pages: vec![LookupResult::new(vec![named("A")], Some(String::new()))],
            requests: Mutex::new(Vec::new()),
        };

        let events = collect_all_events(&lookup, LookupOptions::new())
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(lookup.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_collect_all_events_propagates_page_error() {
        let lookup = PagedLookup {
            pages: vec![LookupResult::new(vec![named("A")], Some("t1".to_string()))],
            requests: Mutex::new(Vec::new()),
        };

        let err = collect_all_events(&lookup, LookupOptions::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no page 1"));
    }
}
