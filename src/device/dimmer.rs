// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimmers (DIM1S2, LED2S2).

use crate::capabilities::Capability;
use crate::command::ApiCall;
use crate::error::Error;
use crate::protocol::Transport;
use crate::response::{Ack, BrightnessPayload, Response};
use crate::state::{AvailabilitySink, ChannelStates};
use crate::types::{Brightness, Channel};

use super::{DeviceCore, DeviceIdentity};

/// On/off plus per-channel brightness (0-255).
#[derive(Debug)]
pub struct DimmerDevice<T> {
    core: DeviceCore<T>,
    states: ChannelStates,
    brightness: Vec<u8>,
}

impl<T: Transport> DimmerDevice<T> {
    /// Creates a dimmer.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDevice` for an unknown type code and
    /// `ConfigError::CapabilityMismatch` if the type does not dim.
    pub fn new(
        identity: DeviceIdentity,
        transport: T,
        availability: AvailabilitySink,
    ) -> Result<Self, Error> {
        let core = DeviceCore::new(
            identity,
            transport,
            availability,
            &[Capability::Dimmable],
            "dimmable",
        )?;
        let count = core.device_type().channel_count();
        Ok(Self {
            states: ChannelStates::new(count),
            brightness: vec![0; usize::from(count)],
            core,
        })
    }

    /// Reads brightness of one channel, or of every channel when `None`.
    ///
    /// Returns every reported level in field order. Each level is cached
    /// under the channel its field names; a missing field leaves that
    /// channel's cache alone. A failed read returns zeros (one per requested
    /// channel) and leaves the cache untouched.
    pub async fn fetch_brightness(&mut self, channel: Option<Channel>) -> Vec<u8> {
        let response: Response<BrightnessPayload> =
            self.core.request(ApiCall::GetBrightness { channel }).await;
        if !response.is_ok() {
            let requested = if channel.is_some() { 1 } else { self.brightness.len() };
            return vec![0; requested];
        }

        let body = response.body;
        match channel {
            Some(channel) => {
                let reading = body.channel_value(channel).or_else(|| body.single_value());
                if let (Some(slot), Some(value)) =
                    (self.brightness.get_mut(channel.position()), reading)
                {
                    *slot = value;
                }
            }
            None => {
                // `value` only identifies a channel on one-channel dimmers.
                let single = if self.brightness.len() == 1 {
                    body.single_value()
                } else {
                    None
                };
                for (channel, slot) in [Channel::ONE, Channel::TWO]
                    .into_iter()
                    .zip(self.brightness.iter_mut())
                {
                    if let Some(value) = body.channel_value(channel).or(single) {
                        *slot = value;
                    }
                }
            }
        }
        body.values()
    }

    /// Sets brightness of one channel, or of every channel when `None`.
    ///
    /// Values outside 0..=255 are rejected without a call.
    pub async fn update_brightness(&mut self, value: i64, channel: Option<Channel>) -> bool {
        let value = match Brightness::new(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(mac = %self.core.mac_address(), error = %e, "Brightness rejected");
                return false;
            }
        };

        let response: Response<Ack> = self
            .core
            .request(ApiCall::SetBrightness { value, channel })
            .await;
        if !response.is_ok() {
            tracing::warn!(
                mac = %self.core.mac_address(),
                status = response.status.as_str(),
                "Setting brightness failed"
            );
            return false;
        }

        match channel {
            Some(channel) => {
                if let Some(slot) = self.brightness.get_mut(channel.position()) {
                    *slot = value.value();
                }
            }
            None => self.brightness.fill(value.value()),
        }
        true
    }

    /// Refreshes state and brightness of every channel.
    pub async fn refresh(&mut self) {
        self.fetch_channel_state(None).await;
        self.fetch_brightness(None).await;
    }

    /// Fetches device info, then refreshes.
    pub async fn refresh_all(&mut self) {
        self.fetch_device_info().await;
        self.refresh().await;
    }
}

impl<T> DimmerDevice<T> {
    /// Returns the cached brightness of a 1-based channel.
    #[must_use]
    pub fn brightness(&self, channel: u8) -> u8 {
        channel
            .checked_sub(1)
            .and_then(|i| self.brightness.get(usize::from(i)))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the cached brightness of every channel.
    #[must_use]
    pub fn brightness_values(&self) -> &[u8] {
        &self.brightness
    }
}

device_common!(DimmerDevice);
power_control!(DimmerDevice);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::ScriptedTransport;

    fn dimmer(device_type: u16, transport: &ScriptedTransport) -> DimmerDevice<ScriptedTransport> {
        let identity = DeviceIdentity::new("Dimmer", "10.0.0.3", "key", "0a0b0c0d0e0f", device_type);
        DimmerDevice::new(identity, transport.clone(), transport.availability()).unwrap()
    }

    #[tokio::test]
    async fn out_of_range_brightness_makes_no_call() {
        let transport = ScriptedTransport::new();
        let mut dimmer = dimmer(4, &transport);

        assert!(!dimmer.update_brightness(-1, None).await);
        assert!(!dimmer.update_brightness(256, Some(Channel::ONE)).await);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn boundary_brightness_is_sent() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok"}"#);
        transport.reply(r#"{"status":"ok"}"#);
        let mut dimmer = dimmer(4, &transport);

        assert!(dimmer.update_brightness(0, Some(Channel::ONE)).await);
        assert!(dimmer.update_brightness(255, Some(Channel::TWO)).await);

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].1,
            vec![("value".to_string(), "255".to_string()), ("channel".to_string(), "2".to_string())]
        );
        assert_eq!(dimmer.brightness_values(), &[0, 255]);
    }

    #[tokio::test]
    async fn failed_update_returns_false() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"invalid_action_name"}"#);
        let mut dimmer = dimmer(3, &transport);

        assert!(!dimmer.update_brightness(100, None).await);
        assert_eq!(dimmer.brightness(1), 0);
    }

    #[tokio::test]
    async fn fetch_all_channels() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","channel_1_value":"40","channel_2_value":"200"}"#);
        let mut dimmer = dimmer(4, &transport);

        assert_eq!(dimmer.fetch_brightness(None).await, vec![40, 200]);
        assert_eq!(dimmer.brightness(2), 200);
    }

    #[tokio::test]
    async fn fetch_one_channel() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","value":77}"#);
        let mut dimmer = dimmer(4, &transport);

        assert_eq!(dimmer.fetch_brightness(Some(Channel::TWO)).await, vec![77]);
        assert_eq!(dimmer.brightness_values(), &[0, 77]);
        assert_eq!(transport.calls()[0].1, vec![("channel".to_string(), "2".to_string())]);
    }

    #[tokio::test]
    async fn partial_reply_caches_by_channel_key() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","channel_2_value":200}"#);
        let mut dimmer = dimmer(4, &transport);

        assert_eq!(dimmer.fetch_brightness(None).await, vec![200]);
        assert_eq!(dimmer.brightness_values(), &[0, 200]);
        assert_eq!(dimmer.brightness(1), 0);
        assert_eq!(dimmer.brightness(2), 200);
    }

    #[tokio::test]
    async fn channel_query_uses_matching_key() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","channel_1_value":15,"channel_2_value":90}"#);
        let mut dimmer = dimmer(4, &transport);

        dimmer.fetch_brightness(Some(Channel::TWO)).await;
        assert_eq!(dimmer.brightness_values(), &[0, 90]);
    }

    #[tokio::test]
    async fn single_value_fills_one_channel_dimmer() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","value":64}"#);
        transport.reply(r#"{"status":"ok","value":64}"#);
        let mut dim = dimmer(3, &transport);
        let mut led = dimmer(4, &transport);

        dim.fetch_brightness(None).await;
        led.fetch_brightness(None).await;
        assert_eq!(dim.brightness_values(), &[64]);
        assert_eq!(led.brightness_values(), &[0, 0]);
    }

    #[tokio::test]
    async fn failed_fetch_returns_zeros() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","channel_1_value":9,"channel_2_value":9}"#);
        transport.reply(r#"{"status":"false"}"#);
        let mut dimmer = dimmer(4, &transport);

        dimmer.fetch_brightness(None).await;
        assert_eq!(dimmer.fetch_brightness(None).await, vec![0, 0]);
        assert_eq!(dimmer.brightness_values(), &[9, 9]);
    }

    #[tokio::test]
    async fn refresh_order() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","device_friendly_name":"Desk"}"#);
        transport.reply(r#"{"status":"ok","state":"on"}"#);
        transport.reply(r#"{"status":"ok","value":128}"#);
        let mut dimmer = dimmer(3, &transport);

        dimmer.refresh_all().await;

        assert_eq!(
            transport.methods(),
            vec!["get_device_info/", "get_state/", "get_brightness/"]
        );
        assert_eq!(dimmer.name(), "Desk");
        assert!(dimmer.is_on(1));
        assert_eq!(dimmer.brightness(1), 128);
    }
}
