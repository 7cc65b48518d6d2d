// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::time::Duration;

use crate::device::{Device, DeviceIdentity};
use crate::error::Error;
use crate::protocol::{HttpConfig, RestClient};
use crate::state::AvailabilitySink;

/// Builder for devices reached over HTTP.
///
/// # Examples
///
/// ```no_run
/// use foxrest_lib::device::{Device, DeviceIdentity};
/// use std::time::Duration;
///
/// # async fn example() -> foxrest_lib::Result<()> {
/// let identity = DeviceIdentity::new("Hall", "192.168.1.20", "0123456789", "a0b1c2d3e4f5", 2);
///
/// // Without network access
/// let device = Device::http(identity.clone()).build()?;
///
/// // With a shorter timeout, fetching everything once
/// let device = Device::http(identity)
///     .with_timeout(Duration::from_secs(2))
///     .build_and_refresh()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    identity: DeviceIdentity,
    timeout: Duration,
}

impl HttpDeviceBuilder {
    pub(crate) fn new(identity: DeviceIdentity) -> Self {
        Self {
            identity,
            timeout: HttpConfig::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the API key, e.g. for a device found by discovery.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.identity = self.identity.with_api_key(api_key);
        self
    }

    /// Returns the identity the device will be built from.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Builds the device without contacting it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyField` for an empty host or API key and
    /// `Error::UnsupportedDevice` for an unknown or unsupported type code.
    pub fn build(self) -> Result<Device<RestClient>, Error> {
        let availability = AvailabilitySink::new();
        let client = HttpConfig::new(self.identity.host(), self.identity.api_key())
            .with_timeout(self.timeout)
            .into_client(availability.clone())?;
        Device::from_parts(self.identity, client, availability)
    }

    /// Builds the device and runs one full refresh.
    ///
    /// An unreachable device is not an error: it is returned with its
    /// availability set accordingly.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub async fn build_and_refresh(self) -> Result<Device<RestClient>, Error> {
        let mut device = self.build()?;
        device.refresh_all().await;
        Ok(device)
    }
}
