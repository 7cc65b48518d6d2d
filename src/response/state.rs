// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `get_state/` payload.

use serde::Deserialize;

use crate::state::ChannelReading;
use crate::types::PowerState;

/// Fields of a `get_state/` answer.
///
/// Single-channel devices send `state`; two-channel devices send
/// `channel_1_state` and `channel_2_state`. Some relays also report an
/// `overcurrent` flag.
///
/// # Examples
///
/// ```
/// use foxrest_lib::response::{DeviceStatePayload, Response};
/// use foxrest_lib::state::ChannelReading;
///
/// let response = Response::<DeviceStatePayload>::decode(Ok(br#"{"status":"ok","state":"on"}"#.to_vec()));
/// assert_eq!(response.body.reading(), ChannelReading::Single(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DeviceStatePayload {
    /// Whole-device state.
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub state: Option<String>,
    /// State of channel 1.
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub channel_1_state: Option<String>,
    /// State of channel 2.
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub channel_2_state: Option<String>,
    /// Overcurrent protection flag.
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub overcurrent: Option<String>,
}

impl DeviceStatePayload {
    /// Interprets the payload.
    ///
    /// A recognised `state` wins. Otherwise the per-channel fields are read,
    /// with anything other than `on` counting as off.
    #[must_use]
    pub fn reading(&self) -> ChannelReading {
        if let Some(state) = self.state.as_deref().and_then(|s| s.parse::<PowerState>().ok()) {
            return ChannelReading::Single(state.is_on());
        }
        ChannelReading::Channels([
            is_on(self.channel_1_state.as_deref()),
            is_on(self.channel_2_state.as_deref()),
        ])
    }

    /// Returns `true` if the device reports an overcurrent condition.
    #[must_use]
    pub fn is_overcurrent(&self) -> bool {
        self.overcurrent
            .as_deref()
            .is_some_and(|flag| matches!(flag, "1" | "true" | "on" | "yes"))
    }
}

fn is_on(state: Option<&str>) -> bool {
    state.is_some_and(|s| s == PowerState::On.as_str())
}
