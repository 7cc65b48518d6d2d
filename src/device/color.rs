// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGBW controller.

use crate::capabilities::Capability;
use crate::command::ApiCall;
use crate::error::Error;
use crate::protocol::Transport;
use crate::response::{Ack, HsvPayload, Response};
use crate::state::{AvailabilitySink, ChannelStates};
use crate::types::{HsvColor, HsvUpdate};

use super::{DeviceCore, DeviceIdentity};

/// On/off plus HSV color.
///
/// Hue is set in degrees (1-359), saturation and value in percent (1-100).
/// The value is read back and cached as a 0-255 brightness.
#[derive(Debug)]
pub struct ColorDevice<T> {
    core: DeviceCore<T>,
    states: ChannelStates,
    color: HsvColor,
}

impl<T: Transport> ColorDevice<T> {
    /// Creates an RGBW controller.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDevice` for an unknown type code and
    /// `ConfigError::CapabilityMismatch` if the type has no color output.
    pub fn new(
        identity: DeviceIdentity,
        transport: T,
        availability: AvailabilitySink,
    ) -> Result<Self, Error> {
        let core = DeviceCore::new(identity, transport, availability, &[Capability::Color], "color")?;
        Ok(Self {
            states: ChannelStates::new(core.device_type().channel_count()),
            color: HsvColor::default(),
            core,
        })
    }

    /// Reads the color. A failed read returns all zeros and keeps the cache.
    pub async fn fetch_color_hsv(&mut self) -> HsvColor {
        let response: Response<HsvPayload> = self.core.request(ApiCall::GetHsv).await;
        if !response.is_ok() {
            return HsvColor::default();
        }
        self.color = response.body.color();
        self.color
    }

    /// Sets any of hue, saturation and value.
    ///
    /// Out-of-range components are rejected without a call; nothing is
    /// clamped.
    pub async fn set_color_hsv(
        &mut self,
        hue: Option<i64>,
        saturation: Option<i64>,
        value: Option<i64>,
    ) -> bool {
        let update = match HsvUpdate::new(hue, saturation, value) {
            Ok(update) => update,
            Err(e) => {
                tracing::warn!(mac = %self.core.mac_address(), error = %e, "HSV color rejected");
                return false;
            }
        };

        let response: Response<Ack> = self.core.request(ApiCall::SetHsv(update)).await;
        if !response.is_ok() {
            return false;
        }
        self.color = update.apply_to(self.color);
        true
    }

    /// Sets only the value component (1-100).
    pub async fn set_brightness(&mut self, value: i64) -> bool {
        self.set_color_hsv(None, None, Some(value)).await
    }

    /// Refreshes state and color.
    pub async fn refresh(&mut self) {
        self.fetch_channel_state(None).await;
        self.fetch_color_hsv().await;
    }

    /// Fetches device info, then refreshes.
    pub async fn refresh_all(&mut self) {
        self.fetch_device_info().await;
        self.refresh().await;
    }
}

impl<T> ColorDevice<T> {
    /// Returns the cached color.
    #[must_use]
    pub fn hsv_color(&self) -> HsvColor {
        self.color
    }

    /// Returns the cached `(hue, saturation)`.
    #[must_use]
    pub fn hs_color(&self) -> (u16, u8) {
        self.color.hs()
    }

    /// Returns the cached brightness (0-255).
    #[must_use]
    pub fn brightness(&self) -> u8 {
        self.color.value
    }
}

device_common!(ColorDevice);
power_control!(ColorDevice);
