// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for Fox devices.

use std::time::Duration;

use reqwest::Client;

use crate::error::{ConfigError, TransportError};
use crate::protocol::{CallResult, Transport, build_base_url, build_url, validate_call};
use crate::state::AvailabilitySink;

// ============================================================================
// HttpConfig - connection parameters for one device
// ============================================================================

/// Configuration for the HTTP transport of one device.
///
/// # Examples
///
/// ```
/// use foxrest_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.20", "0123456789")
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.base_url(), "http://192.168.1.20/0123456789/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    api_key: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default bound on connecting and on reading the response.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration for the given host and API key.
    #[must_use]
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        build_base_url(&self.host, &self.api_key)
    }

    /// Creates a `RestClient` reporting to `availability`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyField` if host or API key is empty, and
    /// `ConfigError::Document` if the HTTP client cannot be built.
    pub fn into_client(self, availability: AvailabilitySink) -> Result<RestClient, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyField("host"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyField("api key"));
        }

        let client = Client::builder()
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(|e| ConfigError::Document(e.to_string()))?;

        Ok(RestClient {
            base_url: self.base_url(),
            client,
            timeout: self.timeout,
            availability,
        })
    }
}

// ============================================================================
// RestClient - reqwest transport
// ============================================================================

/// HTTP client bound to one device.
///
/// Every request is bounded by the configured timeout. There are no retries
/// and no response caching: each call is one GET.
///
/// # Examples
///
/// ```no_run
/// use foxrest_lib::protocol::{HttpConfig, Transport};
/// use foxrest_lib::state::AvailabilitySink;
///
/// # async fn example() -> foxrest_lib::Result<()> {
/// let sink = AvailabilitySink::new();
/// let client = HttpConfig::new("192.168.1.20", "0123456789").into_client(sink.clone())?;
///
/// let body = client.call("get_state/", &[]).await;
/// assert_eq!(body.is_ok(), sink.is_available());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    client: Client,
    timeout: Duration,
    availability: AvailabilitySink,
}

impl RestClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyField` if host or API key is empty.
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        availability: AvailabilitySink,
    ) -> Result<Self, ConfigError> {
        HttpConfig::new(host, api_key).into_client(availability)
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str) -> CallResult {
        let response = self.client.get(url).send().await.map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus(response.status().as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(body.to_vec())
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            // Saturates far beyond any sensible timeout.
            #[allow(clippy::cast_possible_truncation)]
            let millis = self.timeout.as_millis() as u64;
            TransportError::Timeout(millis)
        } else if error.is_connect() {
            TransportError::ConnectionFailed(error.to_string())
        } else {
            TransportError::Http(error)
        }
    }
}

impl Transport for RestClient {
    async fn call(&self, method: &str, query: &[(&'static str, String)]) -> CallResult {
        if let Err(e) = validate_call(method, query) {
            tracing::warn!(method = %method, error = %e, "Rejected device call");
            return Err(e);
        }

        let url = build_url(&self.base_url, method, query);
        tracing::debug!(url = %url, "Sending device call");

        let result = self.get(&url).await;
        match &result {
            Ok(body) => {
                tracing::debug!(body = %String::from_utf8_lossy(body), "Received device response");
            }
            Err(e) => tracing::warn!(url = %url, error = %e, "Device call failed"),
        }

        self.availability.report(result.as_ref().map(|_| ()));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.20", "key");
        assert_eq!(config.host(), "192.168.1.20");
        assert_eq!(config.api_key(), "key");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn http_config_with_timeout() {
        let config = HttpConfig::new("h", "k").with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn client_base_url() {
        let client = RestClient::new("10.0.0.7", "abc", AvailabilitySink::new()).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.7/abc/");
    }

    #[test]
    fn empty_host_is_rejected() {
        let result = RestClient::new("", "abc", AvailabilitySink::new());
        assert!(matches!(result, Err(ConfigError::EmptyField("host"))));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = RestClient::new("10.0.0.7", " ", AvailabilitySink::new());
        assert!(matches!(result, Err(ConfigError::EmptyField("api key"))));
    }

    #[tokio::test]
    async fn empty_method_makes_no_request() {
        let sink = AvailabilitySink::new();
        let client = RestClient::new("127.0.0.1:9", "abc", sink.clone()).unwrap();
        let result = client.call("", &[]).await;
        assert!(matches!(result, Err(TransportError::InvalidArgument(_))));
        assert_eq!(sink.current(), crate::state::Availability::Unknown);
    }
}
