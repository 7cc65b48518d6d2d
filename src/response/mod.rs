// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response decoding for Fox device payloads.
//!
//! Devices answer with a flat JSON object carrying a top-level `status`
//! (`ok`, `false` or `invalid_action_name`) next to the call-specific
//! fields. [`Response::decode`] turns a transport outcome into a typed
//! record and never fails: a transport error or an unreadable body yields
//! [`ResponseStatus::Fail`] with the default payload, and fields that are
//! missing or malformed fall back to their documented sentinel.
//!
//! # Examples
//!
//! ```
//! use foxrest_lib::response::{DeviceStatePayload, Response, ResponseStatus};
//! use foxrest_lib::state::ChannelReading;
//!
//! let body = br#"{"status":"ok","channel_1_state":"on","channel_2_state":"off"}"#;
//! let response = Response::<DeviceStatePayload>::decode(Ok(body.to_vec()));
//!
//! assert_eq!(response.status, ResponseStatus::Ok);
//! assert_eq!(response.body.reading(), ChannelReading::Channels([true, false]));
//! ```

mod brightness;
mod device_info;
mod energy;
mod hsv;
mod level;
mod state;

pub(crate) mod lenient;

pub use brightness::BrightnessPayload;
pub use device_info::DeviceInfo;
pub use energy::{ElectricalParams, EnergyReadings, EnergyTotals, PhaseValues, SENSOR_KEYS};
pub use hsv::HsvPayload;
pub use level::LevelPayload;
pub use state::DeviceStatePayload;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TransportError;
use crate::protocol::CallResult;

/// Wire value of a successful status.
pub const STATUS_OK: &str = "ok";
/// Wire value of a failed status.
pub const STATUS_FAIL: &str = "false";
/// Wire value returned for an unknown method.
pub const STATUS_INVALID_ACTION: &str = "invalid_action_name";

/// Top-level status of a device response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseStatus {
    /// The device executed the call.
    Ok,
    /// The call failed, or no usable answer was received.
    #[default]
    Fail,
    /// The device does not know the method.
    InvalidAction,
}

impl ResponseStatus {
    /// Parses a wire status. Absent or unrecognised values read as
    /// [`ResponseStatus::Fail`].
    #[must_use]
    pub fn parse(status: Option<&str>) -> Self {
        match status {
            Some(STATUS_OK) => Self::Ok,
            Some(STATUS_INVALID_ACTION) => Self::InvalidAction,
            _ => Self::Fail,
        }
    }

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => STATUS_OK,
            Self::Fail => STATUS_FAIL,
            Self::InvalidAction => STATUS_INVALID_ACTION,
        }
    }

    /// Returns `true` for [`ResponseStatus::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Payload of calls that only report a status (all `set_*` methods).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Ack {}

/// A decoded device response.
#[derive(Debug)]
pub struct Response<T> {
    /// Top-level status.
    pub status: ResponseStatus,
    /// Human-readable error detail; empty when there is none.
    pub error: String,
    /// The transport failure behind a [`ResponseStatus::Fail`], if any.
    pub error_cause: Option<TransportError>,
    /// Call-specific fields.
    pub body: T,
}

impl<T: DeserializeOwned + Default> Response<T> {
    /// Decodes the outcome of a transport call.
    #[must_use]
    pub fn decode(result: CallResult) -> Self {
        match result {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(cause) => Self::failed(String::new(), Some(cause)),
        }
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Device response is not valid JSON");
                return Self::failed(format!("malformed response: {e}"), None);
            }
        };
        let Value::Object(fields) = value else {
            tracing::warn!("Device response is not a JSON object");
            return Self::failed("malformed response: expected an object".to_string(), None);
        };

        let status = ResponseStatus::parse(fields.get("status").and_then(Value::as_str));
        let error = fields
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let body = match serde_json::from_value(Value::Object(fields)) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Device response fields could not be decoded");
                T::default()
            }
        };

        Self {
            status,
            error,
            error_cause: None,
            body,
        }
    }

    fn failed(error: String, error_cause: Option<TransportError>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            error,
            error_cause,
            body: T::default(),
        }
    }
}

impl<T> Response<T> {
    /// Returns `true` if an error string or an error cause is present.
    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.error.is_empty() || self.error_cause.is_some()
    }

    /// Returns `true` if the status is [`ResponseStatus::Ok`].
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing() {
        assert_eq!(ResponseStatus::parse(Some("ok")), ResponseStatus::Ok);
        assert_eq!(ResponseStatus::parse(Some("false")), ResponseStatus::Fail);
        assert_eq!(
            ResponseStatus::parse(Some("invalid_action_name")),
            ResponseStatus::InvalidAction
        );
        assert_eq!(ResponseStatus::parse(Some("OK!")), ResponseStatus::Fail);
        assert_eq!(ResponseStatus::parse(None), ResponseStatus::Fail);
    }

    #[test]
    fn transport_error_decodes_to_fail() {
        let response = Response::<Ack>::decode(Err(TransportError::Timeout(5000)));
        assert_eq!(response.status, ResponseStatus::Fail);
        assert!(response.has_error());
        assert!(matches!(response.error_cause, Some(TransportError::Timeout(5000))));
    }

    #[test]
    fn missing_status_is_fail() {
        let response = Response::<Ack>::decode(Ok(b"{}".to_vec()));
        assert_eq!(response.status, ResponseStatus::Fail);
        assert!(!response.has_error());
    }

    #[test]
    fn garbage_body_is_fail_with_error() {
        let response = Response::<Ack>::decode(Ok(b"<html>".to_vec()));
        assert_eq!(response.status, ResponseStatus::Fail);
        assert!(response.error.starts_with("malformed response"));
        assert!(response.has_error());
    }

    #[test]
    fn non_object_body_is_fail() {
        let response = Response::<Ack>::decode(Ok(b"[1,2]".to_vec()));
        assert_eq!(response.status, ResponseStatus::Fail);
        assert!(response.has_error());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let response = Response::<Ack>::decode(Ok(br#"{"status":"ok","uptime":12}"#.to_vec()));
        assert!(response.is_ok());
        assert!(!response.has_error());
    }

    #[test]
    fn invalid_action_is_reported() {
        let body = br#"{"status":"invalid_action_name"}"#.to_vec();
        let response = Response::<Ack>::decode(Ok(body));
        assert_eq!(response.status, ResponseStatus::InvalidAction);
        assert!(!response.is_ok());
    }
}
