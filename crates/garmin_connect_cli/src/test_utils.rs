//! Shared test utilities and a recording mock `ConnectClient` used by unit tests.
#![cfg(test)]

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use garmin_connect_client::{
    Activity, ActivityId, ActivityType, ActivityWeather, ConnectClient, ConnectError,
    ExportFormat, ExportSink,
};

/// One recorded call on [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Activities {
        display_name: Option<String>,
        start: u32,
        limit: u32,
    },
    Activity(ActivityId),
    Weather(ActivityId),
    Export(ActivityId, ExportFormat),
    Delete(ActivityId),
    Rename(ActivityId, String),
}

/// Mock that records every call and answers from canned data.
///
/// When `fail_status` is set every call fails with the error that status maps to;
/// exports first write `export_body` so a late failure can be observed.
#[derive(Default)]
pub struct MockClient {
    pub activities: Vec<Activity>,
    pub weather: ActivityWeather,
    pub export_body: Vec<u8>,
    pub fail_status: Option<u16>,
    pub log: Mutex<Vec<Call>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.log.lock().await.clone()
    }

    async fn record(&self, call: Call) -> Result<(), ConnectError> {
        self.log.lock().await.push(call);
        match self.fail_status {
            Some(status) => Err(ConnectError::from_status(status, "mock failure")),
            None => Ok(()),
        }
    }
}

pub fn sample_activity() -> Activity {
    Activity {
        id: ActivityId(12345),
        activity_name: "Morning Run".into(),
        description: None,
        start_time_local: "2024-05-01 07:30:00".into(),
        activity_type: ActivityType {
            type_id: 1,
            type_key: "running".into(),
        },
        distance: 10012.5,
        duration: 3725.0,
        average_hr: 150.4,
        max_hr: 171.6,
        calories: 640.2,
    }
}

pub fn sample_weather() -> ActivityWeather {
    ActivityWeather {
        issue_date: None,
        temp: 61.0,
        apparent_temp: 59.0,
        dew_point: 48.2,
        relative_humidity: 63.0,
        wind_direction: 230.0,
        wind_direction_compass_point: "sw".into(),
        wind_speed: 8.0,
        latitude: 55.67,
        longitude: 12.56,
    }
}

#[async_trait]
impl ConnectClient for MockClient {
    async fn activities(
        &self,
        display_name: Option<&str>,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Activity>, ConnectError> {
        self.record(Call::Activities {
            display_name: display_name.map(str::to_string),
            start,
            limit,
        })
        .await?;
        Ok(self.activities.clone())
    }

    async fn activity(&self, id: ActivityId) -> Result<Activity, ConnectError> {
        self.record(Call::Activity(id)).await?;
        self.activities
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ConnectError::NotFound(id.to_string()))
    }

    async fn activity_weather(&self, id: ActivityId) -> Result<ActivityWeather, ConnectError> {
        self.record(Call::Weather(id)).await?;
        Ok(self.weather.clone())
    }

    async fn export_activity(
        &self,
        id: ActivityId,
        format: ExportFormat,
        sink: &mut ExportSink<'_>,
    ) -> Result<u64, ConnectError> {
        sink.write_all(&self.export_body).await?;
        sink.flush().await?;
        self.record(Call::Export(id, format)).await?;
        Ok(self.export_body.len() as u64)
    }

    async fn delete_activity(&self, id: ActivityId) -> Result<(), ConnectError> {
        self.record(Call::Delete(id)).await
    }

    async fn rename_activity(&self, id: ActivityId, new_name: &str) -> Result<(), ConnectError> {
        self.record(Call::Rename(id, new_name.to_string())).await
    }
}
