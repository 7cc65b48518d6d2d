// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `get_brightness/` payload.

use serde::Deserialize;

use crate::types::Channel;

/// Dimmer output levels.
///
/// A channel-specific query answers with `value`; an all-channel query
/// answers with `channel_1_value` and `channel_2_value`. Missing or
/// unparseable fields read as [`BrightnessPayload::UNSET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct BrightnessPayload {
    #[serde(default, deserialize_with = "super::lenient::int")]
    value: Option<i64>,
    #[serde(default, deserialize_with = "super::lenient::int")]
    channel_1_value: Option<i64>,
    #[serde(default, deserialize_with = "super::lenient::int")]
    channel_2_value: Option<i64>,
}

impl BrightnessPayload {
    /// Sentinel for a field the device did not report.
    pub const UNSET: i64 = -1;

    /// Returns the single-channel value.
    #[must_use]
    pub fn brightness(&self) -> i64 {
        self.value.unwrap_or(Self::UNSET)
    }

    /// Returns the channel 1 value.
    #[must_use]
    pub fn channel_1_value(&self) -> i64 {
        self.channel_1_value.unwrap_or(Self::UNSET)
    }

    /// Returns the channel 2 value.
    #[must_use]
    pub fn channel_2_value(&self) -> i64 {
        self.channel_2_value.unwrap_or(Self::UNSET)
    }

    /// Returns the `value` field when it is a valid level.
    #[must_use]
    pub fn single_value(&self) -> Option<u8> {
        u8::try_from(self.brightness()).ok()
    }

    /// Returns the `channel_N_value` field of `channel` when it is a valid
    /// level.
    #[must_use]
    pub fn channel_value(&self, channel: Channel) -> Option<u8> {
        let raw = match channel.position() {
            0 => self.channel_1_value(),
            _ => self.channel_2_value(),
        };
        u8::try_from(raw).ok()
    }

    /// Returns every reported value in field order, skipping unset ones.
    ///
    /// Values outside 0..=255 are treated as unset.
    #[must_use]
    pub fn values(&self) -> Vec<u8> {
        [self.brightness(), self.channel_1_value(), self.channel_2_value()]
            .into_iter()
            .filter_map(|v| u8::try_from(v).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;

    fn decode(json: &str) -> BrightnessPayload {
        Response::<BrightnessPayload>::decode(Ok(json.as_bytes().to_vec())).body
    }

    #[test]
    fn single_value() {
        let b = decode(r#"{"status":"ok","value":"128"}"#);
        assert_eq!(b.brightness(), 128);
        assert_eq!(b.channel_1_value(), BrightnessPayload::UNSET);
        assert_eq!(b.values(), vec![128]);
    }

    #[test]
    fn two_channels() {
        let b = decode(r#"{"status":"ok","channel_1_value":10,"channel_2_value":255}"#);
        assert_eq!(b.values(), vec![10, 255]);
    }

    #[test]
    fn malformed_value_is_unset() {
        let b = decode(r#"{"status":"ok","value":"bright"}"#);
        assert_eq!(b.brightness(), -1);
        assert!(b.values().is_empty());
    }

    #[test]
    fn keyed_lookup_ignores_other_fields() {
        let b = decode(r#"{"status":"ok","channel_2_value":200}"#);
        assert_eq!(b.values(), vec![200]);
        assert_eq!(b.single_value(), None);
        assert_eq!(b.channel_value(Channel::ONE), None);
        assert_eq!(b.channel_value(Channel::TWO), Some(200));
    }

    #[test]
    fn keyed_lookup_rejects_out_of_range() {
        let b = decode(r#"{"status":"ok","value":300,"channel_1_value":-5}"#);
        assert_eq!(b.single_value(), None);
        assert_eq!(b.channel_value(Channel::ONE), None);
    }
}
