//! Provider implementation for Ekosystem Wrocław using the waste disposal form endpoint.

/// Extraction of pickup events from the schedule message.
pub mod parser;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use ekowroc_core::{
    model::PickupEvent,
    ports::{DataError, PortError, SchedulePort},
};

/// Endpoint serving the schedules.
pub const API_URL: &str = "https://ekosystem.wroc.pl/wp-admin/admin-ajax.php";
/// Timeout in seconds for clients created by [`EkosystemClient`] itself.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const SCHEDULE_ACTION: &str = "waste_disposal_form_get_schedule_direct";

/// Settings for [`EkosystemClient`].
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Endpoint the schedule request is posted to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout for internally created HTTP clients.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    API_URL.to_owned()
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Decoded response of the schedule endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    /// Free-form schedule message.
    #[serde(rename = "wiadomosc")]
    pub message: Option<String>,
}

/// Client fetching the pickup schedule of one street in one locality.
#[derive(Debug, Clone)]
pub struct EkosystemClient {
    localization_id: i64,
    street_id: i64,
    session: Option<Client>,
    config: ClientConfig,
}

impl EkosystemClient {
    /// Create a client that builds its own short-lived HTTP client per request.
    #[must_use]
    pub fn new(localization_id: i64, street_id: i64) -> Self {
        Self {
            localization_id,
            street_id,
            session: None,
            config: ClientConfig::default(),
        }
    }

    /// Reuse a caller-owned HTTP client for every request.
    ///
    /// The client's own timeout and settings are left untouched.
    #[must_use]
    pub fn with_session(mut self, session: Client) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace the default configuration.
    #[must_use]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Locality identifier sent as `id_numeru`.
    #[must_use]
    pub fn localization_id(&self) -> i64 {
        self.localization_id
    }

    /// Street identifier sent as `id_ulicy`.
    #[must_use]
    pub fn street_id(&self) -> i64 {
        self.street_id
    }

    /// Post the schedule request and decode the JSON answer.
    ///
    /// The body is decoded as JSON whatever content type the server declares.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Request`] on transport failures and error statuses,
    /// and [`PortError::Data`] when the body is not JSON.
    #[instrument(skip(self), fields(localization_id = self.localization_id, street_id = self.street_id))]
    pub async fn fetch_schedule_data(&self) -> Result<RawPayload, PortError> {
        if let Some(session) = &self.session {
            debug!("using caller-supplied HTTP client");
            return self.post_schedule_request(session).await;
        }

        // Dropped when this call returns, whatever the outcome.
        let scoped = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;
        debug!(timeout_secs = self.config.timeout_secs, "created scoped HTTP client");
        self.post_schedule_request(&scoped).await
    }

    async fn post_schedule_request(&self, http: &Client) -> Result<RawPayload, PortError> {
        let req = http.post(&self.config.base_url).form(&[
            ("action", SCHEDULE_ACTION.to_owned()),
            ("id_numeru", self.localization_id.to_string()),
            ("id_ulicy", self.street_id.to_string()),
        ]);

        debug!(url = %self.config.base_url, "requesting pickup schedule");
        fetch_json(req).await
    }
}

#[async_trait]
impl SchedulePort for EkosystemClient {
    async fn pickup_events(&self) -> Result<Vec<PickupEvent>, PortError> {
        let payload = self.fetch_schedule_data().await?;
        Ok(parser::parse_events(&payload)?)
    }
}

// Status is checked before decoding; the declared content type is ignored.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    let body = req.send().await?.error_for_status()?.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| PortError::Data(DataError::from(err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(DEFAULT_TIMEOUT_SECS, 10, "ten second default");
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS, "default timeout");
        assert_eq!(config.base_url, API_URL, "default endpoint");
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS, "timeout default");
        assert_eq!(config.base_url, API_URL, "endpoint default");

        let config: ClientConfig =
            serde_json::from_str(r#"{"timeout_secs": 3}"#).expect("partial config");
        assert_eq!(config.timeout_secs, 3, "timeout overridden");
        assert_eq!(config.base_url, API_URL, "endpoint still defaulted");
    }
}
