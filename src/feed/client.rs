//! HTTP client for thermostat feeds.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::errors::{FeedError, FeedResult};
use crate::log::{debug, error};

use super::nest::{DeviceFilter, DeviceReport};
use super::reading::Reading;
use super::FeedUpdate;

pub const DEFAULT_API_PATH: &str = "api/connect/v1/devices/";
pub const DEFAULT_NEST_URL: &str = "https://developer-api.nest.com/devices";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where readings come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    /// A local hub exposing one device per URL.
    Starling {
        base_url: String,
        api_path: String,
        device_id: String,
        api_key: String,
    },
    /// The Nest developer devices listing.
    Nest {
        url: String,
        token: Option<String>,
        filter: DeviceFilter,
    },
}

impl FeedSource {
    /// Name used in status errors and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            FeedSource::Starling { .. } => "Starling",
            FeedSource::Nest { .. } => "Nest",
        }
    }

    /// Request URL. Starling parts are joined as given, so `base_url` should
    /// end with a slash.
    pub fn url(&self) -> FeedResult<String> {
        match self {
            FeedSource::Starling {
                base_url,
                api_path,
                device_id,
                api_key,
            } => Ok(format!("{base_url}{api_path}{device_id}?key={api_key}")),
            FeedSource::Nest { url, token, .. } => {
                let token = token
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .ok_or(FeedError::MissingToken)?;
                Ok(format!("{url}?auth={token}"))
            }
        }
    }
}

/// Fetches and decodes one feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    source: FeedSource,
}

impl FeedClient {
    pub fn new(source: FeedSource) -> FeedResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, source })
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// One request. `Ok(None)` means the feed answered but had nothing to show.
    pub async fn fetch(&self) -> FeedResult<Option<FeedUpdate>> {
        let url = self.source.url()?;
        debug!(source = self.source.name(), "polling feed");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FeedError::Status {
                source_name: self.source.name(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;

        match &self.source {
            FeedSource::Starling { .. } => Ok(Reading::parse(&body)?.map(FeedUpdate::Reading)),
            FeedSource::Nest { filter, .. } => {
                Ok(Some(FeedUpdate::Devices(DeviceReport::parse(&body, filter)?)))
            }
        }
    }
}

/// Fetch once and hand any update to `on_update`.
///
/// Failures are logged and reported as `false`; a poll loop keeps going.
pub async fn poll_once<F>(client: &FeedClient, on_update: &mut F) -> bool
where
    F: FnMut(FeedUpdate),
{
    match client.fetch().await {
        Ok(Some(update)) => {
            on_update(update);
            true
        }
        Ok(None) => {
            debug!(source = client.source().name(), "feed returned no data");
            true
        }
        Err(e) => {
            error!("{}: Could not load temperature. ({})", client.source().name(), e);
            false
        }
    }
}

/// Poll forever, once per `every`. The first fetch happens immediately.
pub async fn poll<F>(client: &FeedClient, every: Duration, mut on_update: F)
where
    F: FnMut(FeedUpdate),
{
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        poll_once(client, &mut on_update).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starling_url_concatenates_parts() {
        let source = FeedSource::Starling {
            base_url: "http://10.0.0.5:3080/".to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            device_id: "abc".to_string(),
            api_key: "k1".to_string(),
        };
        assert_eq!(
            source.url().unwrap(),
            "http://10.0.0.5:3080/api/connect/v1/devices/abc?key=k1"
        );
        assert_eq!(source.name(), "Starling");
    }

    #[test]
    fn nest_url_needs_a_token() {
        let mut source = FeedSource::Nest {
            url: DEFAULT_NEST_URL.to_string(),
            token: None,
            filter: DeviceFilter::default(),
        };
        assert!(matches!(source.url(), Err(FeedError::MissingToken)));
        if let FeedSource::Nest { token, .. } = &mut source {
            *token = Some("c.xyz".to_string());
        }
        assert_eq!(
            source.url().unwrap(),
            "https://developer-api.nest.com/devices?auth=c.xyz"
        );
    }

    #[test]
    fn status_error_message() {
        let e = FeedError::Status {
            source_name: "Nest",
            status: 401,
        };
        assert_eq!(e.to_string(), "Nest Error - Status: 401");
    }
}
