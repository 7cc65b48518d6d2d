// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `get_device_info/` payload.

use serde::Deserialize;

/// Identity and firmware details reported by a device.
///
/// Every field defaults to empty when missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DeviceInfo {
    /// Internal device name.
    #[serde(default, deserialize_with = "super::lenient::text_or_empty")]
    pub device_name: String,
    /// Firmware version.
    #[serde(default, deserialize_with = "super::lenient::text_or_empty")]
    pub firmware: String,
    /// Hardware revision.
    #[serde(rename = "hw", default, deserialize_with = "super::lenient::text_or_empty")]
    pub hardware: String,
    /// Updater version.
    #[serde(default, deserialize_with = "super::lenient::text_or_empty")]
    pub updater: String,
    /// Name configured in the vendor mobile app.
    #[serde(default, deserialize_with = "super::lenient::text_or_empty")]
    pub device_friendly_name: String,
    /// Commercial model name.
    #[serde(default, deserialize_with = "super::lenient::text_or_empty")]
    pub device_commercial_name: String,
    /// Per-channel names, channel 1 first.
    #[serde(default, deserialize_with = "super::lenient::text_list")]
    pub device_channels_name: Vec<String>,
}

impl DeviceInfo {
    /// Returns the friendly name if the device reports a non-empty one.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        Some(self.device_friendly_name.trim()).filter(|name| !name.is_empty())
    }

    /// Returns the name of a 1-based channel, if reported and non-empty.
    #[must_use]
    pub fn channel_name(&self, channel: u8) -> Option<&str> {
        let index = usize::from(channel.checked_sub(1)?);
        self.device_channels_name
            .get(index)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}
