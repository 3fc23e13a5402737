//! Flattening CloudTrail events into report rows

#![warn(clippy::all, rust_2018_idioms)]

use chrono::NaiveDateTime;

use crate::app::data_plane::cloudtrail_events::CloudTrailEvent;

/// Written wherever the event did not carry a value
pub const PLACEHOLDER: &str = "N/A";

/// Column titles, in sheet order
pub const HEADER: [&str; 10] = [
    "Username",
    "Event Time",
    "Event Source",
    "Event Name",
    "AWS Region",
    "Source IP address",
    "Resources",
    "Read-only",
    "Event Type",
    "Event Category",
];

/// A single spreadsheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Naive date-time, written as an Excel date cell
    DateTime(NaiveDateTime),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Render an optional field, falling back to [`PLACEHOLDER`]
pub fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

/// One event flattened to the ten report columns
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub username: String,
    /// UTC wall time with the zone dropped
    pub event_time: Option<NaiveDateTime>,
    pub event_source: String,
    pub event_name: String,
    pub aws_region: String,
    pub source_ip_address: String,
    pub resources: String,
    pub read_only: String,
    pub event_type: String,
    pub event_category: String,
}

impl ReportRow {
    /// Flatten `event` for the sheet of `username`
    ///
    /// The username column is always the identity the sheet was queried for,
    /// not the event's own username field.
    pub fn from_event(username: &str, event: &CloudTrailEvent) -> Self {
        Self {
            username: username.to_string(),
            event_time: event.event_time.map(|t| t.naive_utc()),
            event_source: or_placeholder(event.event_source.as_deref()),
            event_name: or_placeholder(event.event_name.as_deref()),
            aws_region: or_placeholder(event.aws_region.as_deref()),
            source_ip_address: or_placeholder(event.source_ip_address.as_deref()),
            resources: resource_names(event),
            read_only: or_placeholder(event.read_only.as_deref()),
            event_type: or_placeholder(event.event_type.as_deref()),
            event_category: or_placeholder(event.event_category.as_deref()),
        }
    }

    /// Cells in [`HEADER`] order
    pub fn cells(&self) -> [Cell; 10] {
        [
            Cell::Text(self.username.clone()),
            match self.event_time {
                Some(time) => Cell::DateTime(time),
                None => Cell::from(PLACEHOLDER),
            },
            Cell::Text(self.event_source.clone()),
            Cell::Text(self.event_name.clone()),
            Cell::Text(self.aws_region.clone()),
            Cell::Text(self.source_ip_address.clone()),
            Cell::Text(self.resources.clone()),
            Cell::Text(self.read_only.clone()),
            Cell::Text(self.event_type.clone()),
            Cell::Text(self.event_category.clone()),
        ]
    }
}

/// Comma-joined resource names, `N/A` for no resources or an unnamed one
fn resource_names(event: &CloudTrailEvent) -> String {
    if event.resources.is_empty() {
        return PLACEHOLDER.to_string();
    }

    event
        .resources
        .iter()
        .map(|resource| resource.resource_name.as_deref().unwrap_or(PLACEHOLDER))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data_plane::cloudtrail_events::EventResource;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn full_event() -> CloudTrailEvent {
        CloudTrailEvent {
            event_id: Some("id-1".to_string()),
            event_name: Some("CreateUser".to_string()),
            event_time: Some(Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 5).unwrap()),
            event_source: Some("iam.amazonaws.com".to_string()),
            username: Some("someone-else".to_string()),
            aws_region: Some("us-east-1".to_string()),
            source_ip_address: Some("198.51.100.4".to_string()),
            resources: vec![
                EventResource::named("bob"),
                EventResource {
                    resource_type: Some("AWS::IAM::Policy".to_string()),
                    resource_name: None,
                },
            ],
            read_only: Some("false".to_string()),
            access_key_id: None,
            event_type: Some("AwsApiCall".to_string()),
            event_category: Some("Management".to_string()),
            cloud_trail_event: None,
        }
    }

    #[test]
    fn test_header_is_fixed() {
        assert_eq!(
            HEADER,
            [
                "Username",
                "Event Time",
                "Event Source",
                "Event Name",
                "AWS Region",
                "Source IP address",
                "Resources",
                "Read-only",
                "Event Type",
                "Event Category",
            ]
        );
    }

    #[test]
    fn test_full_event_row() {
        let row = ReportRow::from_event("alice", &full_event());

        let time = Utc
            .with_ymd_and_hms(2024, 3, 14, 9, 30, 5)
            .unwrap()
            .naive_utc();
        assert_eq!(
            row.cells().to_vec(),
            vec![
                Cell::from("alice"),
                Cell::DateTime(time),
                Cell::from("iam.amazonaws.com"),
                Cell::from("CreateUser"),
                Cell::from("us-east-1"),
                Cell::from("198.51.100.4"),
                Cell::from("bob, N/A"),
                Cell::from("false"),
                Cell::from("AwsApiCall"),
                Cell::from("Management"),
            ]
        );
    }

    #[test]
    fn test_event_time_loses_zone_but_keeps_utc_wall_time() {
        let row = ReportRow::from_event("alice", &full_event());
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 14, 9, 30, 5)
            .unwrap()
            .naive_utc();

        assert_eq!(row.cells()[1], Cell::DateTime(expected));
    }

    #[test]
    fn test_empty_event_is_all_placeholders() {
        let row = ReportRow::from_event("alice", &CloudTrailEvent::default());

        let cells = row.cells();
        assert_eq!(cells[0], Cell::from("alice"));
        for cell in &cells[1..] {
            assert_eq!(*cell, Cell::from(PLACEHOLDER));
        }
    }

    #[test]
    fn test_single_missing_field_becomes_placeholder() {
        let mut event = full_event();
        event.source_ip_address = None;

        let row = ReportRow::from_event("alice", &event);
        assert_eq!(row.source_ip_address, "N/A");
        assert_eq!(row.aws_region, "us-east-1");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(None), "N/A");
        assert_eq!(or_placeholder(Some("")), "");
        assert_eq!(or_placeholder(Some("x")), "x");
    }
}
