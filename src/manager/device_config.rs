// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manually configured devices.

use serde::{Deserialize, Serialize};

use crate::capabilities::DeviceType;
use crate::device::DeviceIdentity;
use crate::error::{ConfigError, Error};

/// Configuration record for one device.
///
/// # Examples
///
/// ```
/// use foxrest_lib::manager::DeviceConfig;
///
/// let configs = DeviceConfig::list_from_json(r#"[
///     {
///         "name": "Hall",
///         "host": "192.168.1.20",
///         "api_key": "0123456789",
///         "mac_address": "a0b1c2d3e4f5",
///         "device_type": 4,
///         "channels": [2]
///     }
/// ]"#).unwrap();
///
/// let identity = configs[0].clone().into_identity().unwrap();
/// assert_eq!(identity.channels(), &[2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Display name. When empty the model name is used.
    #[serde(default)]
    pub name: String,
    /// Host name or IP address.
    pub host: String,
    /// API key printed on the device.
    pub api_key: String,
    /// MAC address, used as the unique identifier.
    pub mac_address: String,
    /// Device type code.
    pub device_type: u16,
    /// Channels to expose; all channels of the model when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<u8>>,
}

impl DeviceConfig {
    /// Creates a configuration exposing every channel of the model.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        api_key: impl Into<String>,
        mac_address: impl Into<String>,
        device_type: u16,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            api_key: api_key.into(),
            mac_address: mac_address.into(),
            device_type,
            channels: None,
        }
    }

    /// Restricts the exposed channels.
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<u8>) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Parses a JSON array of configurations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Document` if the text is not such an array.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Document(e.to_string()))
    }

    /// Validates the record and converts it into a device identity.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyField` if the host, API key or MAC address
    /// is blank, and `Error::UnsupportedDevice` for a type code that cannot
    /// be driven.
    pub fn into_identity(self) -> Result<DeviceIdentity, Error> {
        require("host", &self.host)?;
        require("api key", &self.api_key)?;
        require("mac address", &self.mac_address)?;
        let device_type = DeviceType::supported(self.device_type)?;

        let name = if self.name.trim().is_empty() {
            device_type.model_name().to_owned()
        } else {
            self.name
        };

        let identity = DeviceIdentity::new(
            name,
            self.host.trim(),
            self.api_key.trim(),
            self.mac_address.trim().to_ascii_lowercase(),
            self.device_type,
        );
        Ok(match self.channels {
            Some(channels) => identity.with_channels(channels),
            None => identity,
        })
    }
}

impl From<&DeviceIdentity> for DeviceConfig {
    fn from(identity: &DeviceIdentity) -> Self {
        Self {
            name: identity.name().to_owned(),
            host: identity.host().to_owned(),
            api_key: identity.api_key().to_owned(),
            mac_address: identity.mac_address().to_owned(),
            device_type: identity.device_type(),
            channels: Some(identity.channels().to_vec()),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::EmptyField(field))
    } else {
        Ok(())
    }
}
