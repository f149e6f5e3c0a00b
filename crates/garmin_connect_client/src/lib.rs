//! `ConnectClient` trait, the activity data model and a reqwest-based client
//! for the Garmin Connect web service.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::AsyncWrite;

pub mod config;
pub mod http_client;
pub mod utils;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("not authenticated: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("decoding response: {0}")]
    Decode(String),
}

impl ConnectError {
    /// Map a non-success HTTP status to an error. `body` is truncated to 256 chars.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body: String = body.into().chars().take(256).collect();
        match status {
            401 | 403 => ConnectError::Auth(body),
            404 => ConnectError::NotFound(body),
            429 => ConnectError::RateLimited(body),
            400 | 422 => ConnectError::InvalidInput(body),
            _ => ConnectError::Api { status, body },
        }
    }
}

/// Numeric activity identifier as used by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

impl FromStr for ActivityId {
    type Err = ConnectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(ActivityId)
            .map_err(|e| ConnectError::InvalidInput(format!("invalid activity id {s:?}: {e}")))
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActivityId {
    fn from(id: u64) -> Self {
        ActivityId(id)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityType {
    #[serde(default)]
    pub type_id: i64,
    #[serde(default)]
    pub type_key: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "activityId")]
    pub id: ActivityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Local start time as sent by the service, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time_local: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_type: ActivityType,
    /// Metres.
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: f64,
    /// Seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,
    #[serde(rename = "averageHR", default, deserialize_with = "null_as_default")]
    pub average_hr: f64,
    #[serde(rename = "maxHR", default, deserialize_with = "null_as_default")]
    pub max_hr: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calories: f64,
}

impl Activity {
    pub fn start_local(&self) -> Option<chrono::NaiveDateTime> {
        utils::parse_local_timestamp(&self.start_time_local)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityWeather {
    #[serde(default)]
    pub issue_date: Option<String>,
    /// Degrees Fahrenheit.
    #[serde(default, deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apparent_temp: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dew_point: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relative_humidity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_direction: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_direction_compass_point: String,
    /// Miles per hour.
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_speed: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub longitude: f64,
}

// The service sends explicit `null` for metrics it did not record.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// File formats an activity can be exported to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Fit,
    Tcx,
    Gpx,
    Kml,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Fit,
        ExportFormat::Tcx,
        ExportFormat::Gpx,
        ExportFormat::Kml,
        ExportFormat::Csv,
    ];

    /// Numeric format code understood by the download service.
    pub fn code(self) -> u8 {
        match self {
            ExportFormat::Fit => 0,
            ExportFormat::Tcx => 1,
            ExportFormat::Gpx => 2,
            ExportFormat::Kml => 3,
            ExportFormat::Csv => 4,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Fit => "fit",
            ExportFormat::Tcx => "tcx",
            ExportFormat::Gpx => "gpx",
            ExportFormat::Kml => "kml",
            ExportFormat::Csv => "csv",
        }
    }

    /// Output file name for an exported activity, `<id>.<ext>`.
    pub fn filename(self, id: ActivityId) -> String {
        format!("{}.{}", id, self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ConnectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension() == s)
            .ok_or_else(|| ConnectError::UnknownFormat(s.to_string()))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Sink an export is streamed into.
pub type ExportSink<'a> = dyn AsyncWrite + Send + Unpin + 'a;

#[async_trait]
pub trait ConnectClient: Send + Sync + 'static {
    /// List activities, newest first. `display_name` selects another user's
    /// public activities; `None` lists the authenticated user's own.
    async fn activities(
        &self,
        display_name: Option<&str>,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Activity>, ConnectError>;

    async fn activity(&self, id: ActivityId) -> Result<Activity, ConnectError>;

    async fn activity_weather(&self, id: ActivityId) -> Result<ActivityWeather, ConnectError>;

    /// Stream the activity in `format` into `sink`, returning the number of bytes written.
    async fn export_activity(
        &self,
        id: ActivityId,
        format: ExportFormat,
        sink: &mut ExportSink<'_>,
    ) -> Result<u64, ConnectError>;

    async fn delete_activity(&self, id: ActivityId) -> Result<(), ConnectError>;

    async fn rename_activity(&self, id: ActivityId, new_name: &str) -> Result<(), ConnectError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn export_format_codes_and_extensions() {
        let expected = [
            ("fit", 0, "7.fit"),
            ("tcx", 1, "7.tcx"),
            ("gpx", 2, "7.gpx"),
            ("kml", 3, "7.kml"),
            ("csv", 4, "7.csv"),
        ];
        for (tag, code, file) in expected {
            let f: ExportFormat = tag.parse().expect("known format");
            assert_eq!(f.code(), code);
            assert_eq!(f.filename(ActivityId(7)), file);
            assert_eq!(f.to_string(), tag);
        }
    }

    #[test]
    fn export_format_rejects_unknown_tag_by_name() {
        for tag in ["FIT", "zip", "", " gpx"] {
            let err = tag.parse::<ExportFormat>().unwrap_err();
            match err {
                ConnectError::UnknownFormat(bad) => assert_eq!(bad, tag),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn activity_id_rejects_non_integers() {
        assert_eq!("12345".parse::<ActivityId>().unwrap(), ActivityId(12345));
        for bad in ["", "abc", "12a", "-1", "1.5"] {
            assert!(bad.parse::<ActivityId>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn deserialize_activity_with_nulls() {
        let payload = json!({
            "activityId": 42,
            "activityName": "Morning Run",
            "startTimeLocal": "2024-05-01 07:30:00",
            "activityType": {"typeId": 1, "typeKey": "running"},
            "distance": 10012.5,
            "duration": 3000.0,
            "averageHR": null,
            "maxHR": 171.0,
            "calories": 640.0,
            "somethingElse": true
        });
        let a: Activity = serde_json::from_value(payload).expect("activity");
        assert_eq!(a.id, ActivityId(42));
        assert_eq!(a.activity_type.type_key, "running");
        assert_eq!(a.average_hr, 0.0);
        assert_eq!(a.max_hr, 171.0);
        assert!(a.start_local().is_some());
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(ConnectError::from_status(401, ""), ConnectError::Auth(_)));
        assert!(matches!(ConnectError::from_status(404, ""), ConnectError::NotFound(_)));
        assert!(matches!(
            ConnectError::from_status(429, ""),
            ConnectError::RateLimited(_)
        ));
        match ConnectError::from_status(500, "x".repeat(1000)) {
            ConnectError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), 256);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
