// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State and operations shared by every device variant.

use serde::Serialize;

use crate::capabilities::{Capability, DeviceType, MANUFACTURER_NAME};
use crate::command::ApiCall;
use crate::error::{ConfigError, Error};
use crate::protocol::Transport;
use crate::response::{Ack, DeviceInfo, DeviceStatePayload, Response};
use crate::state::{Availability, AvailabilitySink, ChannelReading};
use crate::types::{Channel, PowerState};

use super::DeviceIdentity;

/// Firmware version reported before device info has been fetched.
pub const UNKNOWN_FIRMWARE: &str = "0.0.0";

/// Description of a device for a host integration layer.
///
/// # Examples
///
/// ```
/// use foxrest_lib::device::DeviceDescriptor;
///
/// let descriptor = DeviceDescriptor {
///     identifiers: ("switch".into(), "a0b1c2d3e4f5".into()),
///     name: "Hall".into(),
///     manufacturer: "F&F".into(),
///     model: "R2S2".into(),
///     sw_version: "0.0.0".into(),
/// };
/// let json = serde_json::to_value(&descriptor).unwrap();
/// assert_eq!(json["identifiers"][0], "switch");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    /// `(platform, mac address)`.
    pub identifiers: (String, String),
    /// Display name.
    pub name: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model name.
    pub model: String,
    /// Firmware version.
    pub sw_version: String,
}

/// Transport, identity and device info of one device.
///
/// Every variant embeds one `DeviceCore` and builds its capability-specific
/// operations on top of it.
#[derive(Debug)]
pub struct DeviceCore<T> {
    identity: DeviceIdentity,
    device_type: DeviceType,
    name: String,
    transport: T,
    availability: AvailabilitySink,
    device_info: Option<DeviceInfo>,
}

impl<T: Transport> DeviceCore<T> {
    /// Validates the device type against the capabilities a variant drives.
    ///
    /// `availability` must be the sink `transport` reports to.
    pub(crate) fn new(
        identity: DeviceIdentity,
        transport: T,
        availability: AvailabilitySink,
        accepted: &[Capability],
        expected: &'static str,
    ) -> Result<Self, Error> {
        let device_type = DeviceType::supported(identity.device_type())?;
        if !device_type
            .capability()
            .is_some_and(|capability| accepted.contains(&capability))
        {
            return Err(ConfigError::CapabilityMismatch {
                device_type: identity.device_type(),
                expected,
            }
            .into());
        }

        Ok(Self {
            name: identity.name().to_string(),
            identity,
            device_type,
            transport,
            availability,
            device_info: None,
        })
    }

    /// Issues a catalogue call and decodes the answer.
    pub(crate) async fn request<R>(&self, call: ApiCall) -> Response<R>
    where
        R: serde::de::DeserializeOwned + Default,
    {
        Response::decode(self.transport.execute(call).await)
    }

    /// Reads the on/off state of one or all channels.
    ///
    /// A `Fail` or `InvalidAction` answer marks the device unavailable and
    /// reads as off. Such an answer carries no per-channel fields, so even a
    /// two-channel device gets a single `ChannelReading::Single(false)`;
    /// [`ChannelStates::apply`](crate::state::ChannelStates::apply) spreads
    /// it over every requested channel.
    pub async fn fetch_channel_state(&self, channel: Option<Channel>) -> ChannelReading {
        let response: Response<DeviceStatePayload> =
            self.request(ApiCall::GetState { channel }).await;
        if !response.is_ok() {
            tracing::debug!(
                mac = %self.mac_address(),
                status = response.status.as_str(),
                "State fetch failed"
            );
            self.availability.mark_unavailable();
            return ChannelReading::default();
        }
        self.availability.mark_available();
        if response.body.is_overcurrent() {
            tracing::warn!(mac = %self.mac_address(), "Device reports overcurrent");
        }
        response.body.reading()
    }

    /// Switches one or all channels. Returns `true` only on an `Ok` answer.
    pub async fn update_channel_state(&self, on: bool, channel: Option<Channel>) -> bool {
        let call = ApiCall::SetState {
            state: PowerState::from(on),
            channel,
        };
        let response: Response<Ack> = self.request(call).await;
        response.is_ok()
    }

    /// Reads device info.
    ///
    /// On success the info is stored and a non-empty friendly name replaces
    /// the configured name. On failure the previous info is kept.
    pub async fn fetch_device_info(&mut self) -> bool {
        let response: Response<DeviceInfo> = self.request(ApiCall::GetDeviceInfo).await;
        if !response.is_ok() {
            return false;
        }
        let info = response.body;
        if let Some(friendly) = info.friendly_name() {
            self.name = friendly.to_string();
        }
        self.device_info = Some(info);
        true
    }
}

impl<T> DeviceCore<T> {
    /// Returns the identity the device was created from.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Returns the device type.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MAC address.
    #[must_use]
    pub fn mac_address(&self) -> &str {
        self.identity.mac_address()
    }

    /// Returns the last fetched device info.
    #[must_use]
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.device_info.as_ref()
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the availability sink.
    #[must_use]
    pub fn availability(&self) -> &AvailabilitySink {
        &self.availability
    }

    /// Returns `true` if the last call reached the device.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    /// Returns the current availability.
    #[must_use]
    pub fn availability_state(&self) -> Availability {
        self.availability.current()
    }

    /// Returns the device-reported name of a channel, falling back to the
    /// device name.
    #[must_use]
    pub fn channel_name(&self, channel: u8) -> &str {
        self.device_info
            .as_ref()
            .and_then(|info| info.channel_name(channel))
            .unwrap_or(&self.name)
    }

    /// Returns `true` if both cores drive the same physical device.
    #[must_use]
    pub fn same_device<U>(&self, other: &DeviceCore<U>) -> bool {
        self.mac_address() == other.mac_address()
    }

    /// Builds the host integration descriptor.
    #[must_use]
    pub fn descriptor(&self) -> DeviceDescriptor {
        let platform = self
            .device_type
            .capability()
            .map_or("unknown", |capability| capability.platform());
        let sw_version = self
            .device_info
            .as_ref()
            .map(|info| info.firmware.as_str())
            .filter(|firmware| !firmware.is_empty())
            .unwrap_or(UNKNOWN_FIRMWARE);

        DeviceDescriptor {
            identifiers: (platform.to_string(), self.mac_address().to_string()),
            name: self.name.clone(),
            manufacturer: MANUFACTURER_NAME.to_string(),
            model: self.device_type.model_name().to_string(),
            sw_version: sw_version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::ScriptedTransport;

    fn core(device_type: u16, transport: &ScriptedTransport) -> DeviceCore<ScriptedTransport> {
        let identity = DeviceIdentity::new("Configured", "10.0.0.5", "key", "a0b1c2d3e4f5", device_type);
        DeviceCore::new(
            identity,
            transport.clone(),
            transport.availability(),
            &[Capability::Switch, Capability::MultiChannelSwitch],
            "switch",
        )
        .unwrap()
    }

    #[test]
    fn capability_mismatch_is_rejected() {
        let transport = ScriptedTransport::new();
        let identity = DeviceIdentity::new("x", "h", "k", "m", 5);
        let result = DeviceCore::new(
            identity,
            transport.clone(),
            transport.availability(),
            &[Capability::Switch],
            "switch",
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::CapabilityMismatch { device_type: 5, .. }))
        ));
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let transport = ScriptedTransport::new();
        let identity = DeviceIdentity::new("x", "h", "k", "m", 77);
        let result = DeviceCore::new(
            identity,
            transport.clone(),
            transport.availability(),
            &[Capability::Switch],
            "switch",
        );
        assert!(matches!(result, Err(Error::UnsupportedDevice { device_type: 77 })));
    }

    #[tokio::test]
    async fn fetch_state_two_channels() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","channel_1_state":"on","channel_2_state":"off"}"#);
        let core = core(2, &transport);

        let reading = core.fetch_channel_state(None).await;

        assert_eq!(reading, ChannelReading::Channels([true, false]));
        assert!(core.is_available());
        assert_eq!(transport.calls(), vec![("get_state/".to_string(), vec![])]);
    }

    #[tokio::test]
    async fn failed_state_fetch_marks_unavailable() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"false"}"#);
        let core = core(1, &transport);

        assert_eq!(core.fetch_channel_state(None).await, ChannelReading::Single(false));
        assert_eq!(core.availability_state(), Availability::Unavailable);
    }

    #[tokio::test]
    async fn update_state_follows_status() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok"}"#);
        transport.reply(r#"{"status":"false"}"#);
        transport.reply(r#"{"status":"invalid_action_name"}"#);
        let core = core(2, &transport);

        assert!(core.update_channel_state(true, Some(Channel::TWO)).await);
        assert!(!core.update_channel_state(true, None).await);
        assert!(!core.update_channel_state(false, None).await);

        let calls = transport.calls();
        assert_eq!(
            calls[0].1,
            vec![("state".to_string(), "on".to_string()), ("channel".to_string(), "2".to_string())]
        );
        assert_eq!(calls[2].1, vec![("state".to_string(), "off".to_string())]);
    }

    #[tokio::test]
    async fn transport_failure_returns_false() {
        let transport = ScriptedTransport::new();
        transport.fail_unreachable();
        let core = core(1, &transport);

        assert!(!core.update_channel_state(true, None).await);
        assert!(!core.is_available());
    }

    #[tokio::test]
    async fn device_info_overrides_name() {
        let transport = ScriptedTransport::new();
        transport.reply(
            r#"{"status":"ok","firmware":"2.1.0","device_friendly_name":"Kitchen","device_channels_name":["Lamp","Fan"]}"#,
        );
        let mut core = core(2, &transport);

        assert!(core.fetch_device_info().await);
        assert_eq!(core.name(), "Kitchen");
        assert_eq!(core.channel_name(2), "Fan");
        assert_eq!(core.channel_name(3), "Kitchen");

        let descriptor = core.descriptor();
        assert_eq!(descriptor.identifiers, ("switch".to_string(), "a0b1c2d3e4f5".to_string()));
        assert_eq!(descriptor.sw_version, "2.1.0");
        assert_eq!(descriptor.model, "R2S2");
        assert_eq!(descriptor.manufacturer, "F&F");
    }

    #[tokio::test]
    async fn failed_device_info_keeps_previous() {
        let transport = ScriptedTransport::new();
        transport.reply(r#"{"status":"ok","firmware":"1.0","device_friendly_name":"Hall"}"#);
        transport.reply(r#"{"status":"false"}"#);
        let mut core = core(1, &transport);

        assert!(core.fetch_device_info().await);
        assert!(!core.fetch_device_info().await);
        assert_eq!(core.device_info().map(|i| i.firmware.as_str()), Some("1.0"));
        assert_eq!(core.name(), "Hall");
    }

    #[test]
    fn descriptor_before_device_info() {
        let transport = ScriptedTransport::new();
        let core = core(1, &transport);
        let descriptor = core.descriptor();
        assert_eq!(descriptor.name, "Configured");
        assert_eq!(descriptor.sw_version, UNKNOWN_FIRMWARE);
        assert_eq!(core.channel_name(1), "Configured");
    }

    #[test]
    fn same_device_compares_mac() {
        let transport = ScriptedTransport::new();
        let a = core(1, &transport);
        let b = core(2, &transport);
        assert!(a.same_device(&b));
    }
}
