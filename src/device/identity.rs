// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable device identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::capabilities::DeviceType;

/// API key placeholder for devices found by discovery.
///
/// The discovery protocol does not carry the real key; callers replace it
/// with [`DeviceIdentity::with_api_key`] before talking to the device.
pub const PLACEHOLDER_API_KEY: &str = "000";

/// Everything needed to reach and classify one device.
///
/// Two identities are equal when their MAC addresses are equal.
///
/// # Examples
///
/// ```
/// use foxrest_lib::device::DeviceIdentity;
///
/// let a = DeviceIdentity::new("Hall", "192.168.1.20", "key", "a0b1c2d3e4f5", 2);
/// let b = DeviceIdentity::new("Other", "192.168.1.99", "key", "a0b1c2d3e4f5", 2);
/// assert_eq!(a, b);
/// assert_eq!(a.channels(), &[1, 2]);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct DeviceIdentity {
    name: String,
    host: String,
    api_key: String,
    mac_address: String,
    device_type: u16,
    channels: Vec<u8>,
}

impl DeviceIdentity {
    /// Creates an identity. Channels default to `1..=N` where `N` is the
    /// channel count of the device type.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        api_key: impl Into<String>,
        mac_address: impl Into<String>,
        device_type: u16,
    ) -> Self {
        let count = DeviceType::from_code(device_type).map_or(0, |ty| ty.channel_count());
        Self {
            name: name.into(),
            host: host.into(),
            api_key: api_key.into(),
            mac_address: mac_address.into(),
            device_type,
            channels: (1..=count).collect(),
        }
    }

    /// Replaces the channel list.
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<u8>) -> Self {
        self.channels = channels;
        self
    }

    /// Replaces the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Returns the configured name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the host (IP address or hostname, optionally with port).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the MAC address, lowercase hex without separators.
    #[must_use]
    pub fn mac_address(&self) -> &str {
        &self.mac_address
    }

    /// Returns the raw device type code.
    #[must_use]
    pub fn device_type(&self) -> u16 {
        self.device_type
    }

    /// Returns the channel indices.
    #[must_use]
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    /// Returns `true` if the API key is the discovery placeholder.
    #[must_use]
    pub fn has_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

impl PartialEq for DeviceIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.mac_address == other.mac_address
    }
}

impl Eq for DeviceIdentity {}

impl Hash for DeviceIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mac_address.hash(state);
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.mac_address, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_channels_follow_device_type() {
        assert_eq!(DeviceIdentity::new("a", "h", "k", "m", 1).channels(), &[1]);
        assert_eq!(DeviceIdentity::new("a", "h", "k", "m", 4).channels(), &[1, 2]);
        assert!(DeviceIdentity::new("a", "h", "k", "m", 5).channels().is_empty());
        assert!(DeviceIdentity::new("a", "h", "k", "m", 999).channels().is_empty());
    }

    #[test]
    fn identities_dedupe_by_mac() {
        let mut set = HashSet::new();
        set.insert(DeviceIdentity::new("a", "10.0.0.1", "k", "aa", 1));
        set.insert(DeviceIdentity::new("b", "10.0.0.2", "k", "aa", 2));
        set.insert(DeviceIdentity::new("c", "10.0.0.3", "k", "bb", 2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn placeholder_key() {
        let id = DeviceIdentity::new("a", "h", PLACEHOLDER_API_KEY, "m", 1);
        assert!(id.has_placeholder_key());
        assert!(!id.with_api_key("secret").has_placeholder_key());
    }
}
