use crate::ConnectError;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://connect.garmin.com/modern/proxy";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    /// Value of the `SESSIONID` cookie of a logged-in browser session.
    pub session: SecretString,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConnectError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConnectError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let session = get("GARMIN_CONNECT_SESSION")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConnectError::Config("GARMIN_CONNECT_SESSION missing".into()))?;
        let base_url = get("GARMIN_CONNECT_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout = match get("GARMIN_CONNECT_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| {
                ConnectError::Config(format!("GARMIN_CONNECT_TIMEOUT_SECS {v:?}: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            base_url,
            session: SecretString::new(session.into()),
            timeout: Duration::from_secs(timeout),
        })
    }

}
