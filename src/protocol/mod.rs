// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to Fox devices.
//!
//! Devices speak plain HTTP GET. A call returns the raw response body or a
//! [`TransportError`]; it never panics and never raises. Every outcome is
//! also reported to the device's
//! [`AvailabilitySink`](crate::state::AvailabilitySink), which the
//! transport receives at construction.
//!
//! - [`RestClient`]: reqwest-based HTTP transport

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, RestClient};

use std::future::Future;

use crate::command::ApiCall;
use crate::error::TransportError;

/// Outcome of a transport call: the raw body or the failure cause.
pub type CallResult = Result<Vec<u8>, TransportError>;

/// Something that can carry device API calls.
///
/// Implementations must report every completed request to their
/// availability sink and must not retry.
pub trait Transport: Send + Sync {
    /// Issues a GET for `method` with the given query parameters.
    ///
    /// An empty `query` sends no query string.
    fn call(
        &self,
        method: &str,
        query: &[(&'static str, String)],
    ) -> impl Future<Output = CallResult> + Send;

    /// Issues a catalogue call.
    fn execute(&self, call: ApiCall) -> impl Future<Output = CallResult> + Send {
        async move {
            let query = call.query();
            self.call(call.method(), &query).await
        }
    }
}

/// Builds the base URL shared by every call to a device.
///
/// # Examples
///
/// ```
/// use foxrest_lib::protocol::build_base_url;
///
/// assert_eq!(build_base_url("192.168.1.20", "abc"), "http://192.168.1.20/abc/");
/// ```
#[must_use]
pub fn build_base_url(host: &str, api_key: &str) -> String {
    format!("http://{host}/{api_key}/")
}

/// Checks call arguments before anything is sent.
///
/// # Errors
///
/// Returns `TransportError::InvalidArgument` when the method path or a
/// query key is empty.
pub fn validate_call(method: &str, query: &[(&'static str, String)]) -> Result<(), TransportError> {
    if method.trim().is_empty() {
        return Err(TransportError::InvalidArgument(
            "method path must be a non-empty string".to_string(),
        ));
    }
    if query.iter().any(|(key, _)| key.is_empty()) {
        return Err(TransportError::InvalidArgument(
            "query parameter keys must be non-empty".to_string(),
        ));
    }
    Ok(())
}

/// Joins base URL, method path and encoded query string.
#[must_use]
pub fn build_url(base_url: &str, method: &str, query: &[(&'static str, String)]) -> String {
    let mut url = format!("{base_url}{}", method.trim_start_matches('/'));
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_format() {
        assert_eq!(build_base_url("fox.local", "0123"), "http://fox.local/0123/");
    }

    #[test]
    fn url_without_query() {
        let url = build_url("http://h/k/", "get_state/", &[]);
        assert_eq!(url, "http://h/k/get_state/");
    }

    #[test]
    fn url_with_query() {
        let url = build_url(
            "http://h/k/",
            "set_state/",
            &[("state", "on".to_string()), ("channel", "2".to_string())],
        );
        assert_eq!(url, "http://h/k/set_state/?state=on&channel=2");
    }

    #[test]
    fn url_encodes_values() {
        let url = build_url("http://h/k/", "x/", &[("name", "a b".to_string())]);
        assert_eq!(url, "http://h/k/x/?name=a%20b");
    }

    #[test]
    fn leading_slash_in_method_is_dropped() {
        let url = build_url("http://h/k/", "/get_state/", &[]);
        assert_eq!(url, "http://h/k/get_state/");
    }

    #[test]
    fn empty_method_is_rejected() {
        assert!(matches!(
            validate_call("", &[]),
            Err(TransportError::InvalidArgument(_))
        ));
        assert!(validate_call("  ", &[]).is_err());
    }

    #[test]
    fn empty_query_key_is_rejected() {
        assert!(validate_call("get_state/", &[("", "1".to_string())]).is_err());
        assert!(validate_call("get_state/", &[("channel", "1".to_string())]).is_ok());
    }
}
