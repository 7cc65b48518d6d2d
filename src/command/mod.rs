// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device API call catalogue.
//!
//! Fox devices expose every operation as an HTTP GET on
//! `http://{host}/{api_key}/{method}` with parameters in the query string.
//!
//! | Call | Method path | Query |
//! |------|-------------|-------|
//! | [`ApiCall::GetState`] | `get_state/` | `channel` |
//! | [`ApiCall::SetState`] | `set_state/` | `state=on\|off`, `channel` |
//! | [`ApiCall::GetDeviceInfo`] | `get_device_info/` | |
//! | [`ApiCall::GetBrightness`] | `get_brightness/` | `channel` |
//! | [`ApiCall::SetBrightness`] | `set_brightness/` | `value`, `channel` |
//! | [`ApiCall::GetHsv`] | `get_hsv/` | |
//! | [`ApiCall::SetHsv`] | `set_hsv/` | `h`, `s`, `v` |
//! | [`ApiCall::GetOpenLevel`] | `get_open_level/` | |
//! | [`ApiCall::SetOpenLevel`] | `set_open_level/` | `level` |
//! | [`ApiCall::GetTiltLevel`] | `get_tilt_level/` | |
//! | [`ApiCall::SetTiltLevel`] | `set_tilt_level/` | `level` |
//! | [`ApiCall::GetAcParameters`] | `get_ac_parameters/` | |
//! | [`ApiCall::GetTotalEnergyData`] | `get_total_energy_data/` | |
//! | [`ApiCall::GetCurrentParameters`] | `get_current_parameters/` | |
//! | [`ApiCall::GetTotalEnergy`] | `get_total_energy/` | |
//!
//! # Examples
//!
//! ```
//! use foxrest_lib::command::ApiCall;
//! use foxrest_lib::types::{Channel, PowerState};
//!
//! let call = ApiCall::SetState {
//!     state: PowerState::On,
//!     channel: Some(Channel::TWO),
//! };
//! assert_eq!(call.method(), "set_state/");
//! assert_eq!(
//!     call.query(),
//!     vec![("state", "on".to_string()), ("channel", "2".to_string())]
//! );
//! ```

use crate::types::{Brightness, Channel, HsvUpdate, Level, PowerState};

/// Query parameters of a call, in wire order.
pub type QueryParams = Vec<(&'static str, String)>;

/// A single request to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    /// Read the on/off state of one or all channels.
    GetState {
        /// Channel to read; all channels when `None`.
        channel: Option<Channel>,
    },
    /// Switch one or all channels.
    SetState {
        /// Target state.
        state: PowerState,
        /// Channel to switch; all channels when `None`.
        channel: Option<Channel>,
    },
    /// Read name, firmware and channel names.
    GetDeviceInfo,
    /// Read dimmer output of one or all channels.
    GetBrightness {
        /// Channel to read; all channels when `None`.
        channel: Option<Channel>,
    },
    /// Set dimmer output.
    SetBrightness {
        /// Output level.
        value: Brightness,
        /// Channel to set; all channels when `None`.
        channel: Option<Channel>,
    },
    /// Read the HSV color of an RGBW controller.
    GetHsv,
    /// Update the HSV color of an RGBW controller.
    SetHsv(HsvUpdate),
    /// Read cover opening level.
    GetOpenLevel,
    /// Move cover to an opening level.
    SetOpenLevel(Level),
    /// Read cover tilt level.
    GetTiltLevel,
    /// Move cover tilt to a level.
    SetTiltLevel(Level),
    /// Read single-phase AC parameters (R1S1).
    GetAcParameters,
    /// Read single-phase energy totals (R1S1).
    GetTotalEnergyData,
    /// Read per-phase electrical parameters (ENERGY).
    GetCurrentParameters,
    /// Read per-phase energy totals (ENERGY).
    GetTotalEnergy,
}

impl ApiCall {
    /// Returns the method path appended to the device base URL.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::GetState { .. } => "get_state/",
            Self::SetState { .. } => "set_state/",
            Self::GetDeviceInfo => "get_device_info/",
            Self::GetBrightness { .. } => "get_brightness/",
            Self::SetBrightness { .. } => "set_brightness/",
            Self::GetHsv => "get_hsv/",
            Self::SetHsv(_) => "set_hsv/",
            Self::GetOpenLevel => "get_open_level/",
            Self::SetOpenLevel(_) => "set_open_level/",
            Self::GetTiltLevel => "get_tilt_level/",
            Self::SetTiltLevel(_) => "set_tilt_level/",
            Self::GetAcParameters => "get_ac_parameters/",
            Self::GetTotalEnergyData => "get_total_energy_data/",
            Self::GetCurrentParameters => "get_current_parameters/",
            Self::GetTotalEnergy => "get_total_energy/",
        }
    }

    /// Returns the query parameters for this call.
    #[must_use]
    pub fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        match self {
            Self::GetState { channel } | Self::GetBrightness { channel } => {
                push_channel(&mut params, *channel);
            }
            Self::SetState { state, channel } => {
                params.push(("state", state.as_str().to_string()));
                push_channel(&mut params, *channel);
            }
            Self::SetBrightness { value, channel } => {
                params.push(("value", value.to_string()));
                push_channel(&mut params, *channel);
            }
            Self::SetHsv(update) => {
                if let Some(h) = update.hue() {
                    params.push(("h", h.to_string()));
                }
                if let Some(s) = update.saturation() {
                    params.push(("s", s.to_string()));
                }
                if let Some(v) = update.value() {
                    params.push(("v", v.to_string()));
                }
            }
            Self::SetOpenLevel(level) | Self::SetTiltLevel(level) => {
                params.push(("level", level.value().to_string()));
            }
            Self::GetDeviceInfo
            | Self::GetHsv
            | Self::GetOpenLevel
            | Self::GetTiltLevel
            | Self::GetAcParameters
            | Self::GetTotalEnergyData
            | Self::GetCurrentParameters
            | Self::GetTotalEnergy => {}
        }
        params
    }
}

fn push_channel(params: &mut QueryParams, channel: Option<Channel>) {
    if let Some(channel) = channel {
        params.push(("channel", channel.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_state_without_channel_has_no_query() {
        let call = ApiCall::GetState { channel: None };
        assert_eq!(call.method(), "get_state/");
        assert!(call.query().is_empty());
    }

    #[test]
    fn set_brightness_query() {
        let call = ApiCall::SetBrightness {
            value: Brightness::new(200).unwrap(),
            channel: Some(Channel::ONE),
        };
        assert_eq!(
            call.query(),
            vec![("value", "200".to_string()), ("channel", "1".to_string())]
        );
    }

    #[test]
    fn set_hsv_skips_unset_components() {
        let update = HsvUpdate::new(Some(120), None, Some(40)).unwrap();
        let call = ApiCall::SetHsv(update);
        assert_eq!(
            call.query(),
            vec![("h", "120".to_string()), ("v", "40".to_string())]
        );
    }

    #[test]
    fn cover_levels() {
        let call = ApiCall::SetTiltLevel(Level::new(30).unwrap());
        assert_eq!(call.method(), "set_tilt_level/");
        assert_eq!(call.query(), vec![("level", "30".to_string())]);
        assert_eq!(ApiCall::SetOpenLevel(Level::OPEN).method(), "set_open_level/");
    }
}
