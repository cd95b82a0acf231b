use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use sdkup_core::{SetupError, SetupResult};
use tracing::{debug, info};

use crate::release_index::ReleaseIndex;

pub const DEFAULT_RELEASES_INDEX_URL: &str =
    "https://builds.dotnet.microsoft.com/dotnet/release-metadata/releases-index.json";
pub const RELEASES_INDEX_URL_ENV: &str = "SDKUP_RELEASES_INDEX_URL";

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ReleaseIndexClient {
    url: String,
    http: Client,
    retry_backoff: Duration,
}

impl ReleaseIndexClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("sdkup/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create HTTP client for release index")?;
        Ok(Self {
            url: url.into(),
            http,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    /// Uses `override_url`, then `SDKUP_RELEASES_INDEX_URL`, then the public index.
    pub fn from_env(override_url: Option<&str>) -> Result<Self> {
        let url = match override_url {
            Some(url) => url.to_string(),
            None => std::env::var(RELEASES_INDEX_URL_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_RELEASES_INDEX_URL.to_string()),
        };
        Self::new(url)
    }

    #[cfg(test)]
    pub(crate) fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetch_index(&self) -> SetupResult<ReleaseIndex> {
        let body = self.fetch_body()?;
        ReleaseIndex::from_json_str(&body)
            .map_err(|err| self.network_error(format!("invalid release index document: {err}")))
    }

    pub fn channel_for_major(&self, major: &str) -> SetupResult<String> {
        let index = self.fetch_index()?;
        let channel = index
            .channel_for_major(major)
            .ok_or_else(|| SetupError::ChannelNotFound {
                major: major.to_string(),
                url: self.url.clone(),
            })?;
        info!(major, channel, "resolved major tag from release index");
        Ok(channel.to_string())
    }

    fn fetch_body(&self) -> SetupResult<String> {
        let mut last_failure = String::new();
        for attempt in 1..=MAX_ATTEMPTS {
            match self.http.get(&self.url).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().map_err(|err| {
                            self.network_error(format!("failed reading response body: {err}"))
                        });
                    }
                    last_failure = format!("HTTP {status}");
                    if !is_retryable_status(status) {
                        return Err(self.network_error(last_failure));
                    }
                }
                Err(err) => {
                    last_failure = err.to_string();
                }
            }

            if attempt < MAX_ATTEMPTS {
                debug!(attempt, failure = %last_failure, url = %self.url, "retrying release index fetch");
                thread::sleep(self.retry_backoff * attempt);
            }
        }

        Err(self.network_error(format!(
            "{last_failure} (gave up after {MAX_ATTEMPTS} attempts)"
        )))
    }

    fn network_error(&self, reason: String) -> SetupError {
        SetupError::NetworkError {
            url: self.url.clone(),
            reason,
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}
