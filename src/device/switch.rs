// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay devices (R1S1, R2S2).

use crate::capabilities::Capability;
use crate::command::ApiCall;
use crate::error::Error;
use crate::protocol::Transport;
use crate::response::EnergyReadings;
use crate::state::{AvailabilitySink, ChannelStates};

use super::meter::fetch_energy;
use super::{DeviceCore, DeviceIdentity};

/// One- or two-channel relay.
///
/// The R1S1 relay also meters the switched circuit; its readings are
/// fetched together with the state on every refresh.
#[derive(Debug)]
pub struct SwitchDevice<T> {
    core: DeviceCore<T>,
    states: ChannelStates,
    readings: Option<EnergyReadings>,
}

impl<T: Transport> SwitchDevice<T> {
    /// Creates a relay device.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDevice` for an unknown type code and
    /// `ConfigError::CapabilityMismatch` if the type is not a relay.
    pub fn new(
        identity: DeviceIdentity,
        transport: T,
        availability: AvailabilitySink,
    ) -> Result<Self, Error> {
        let core = DeviceCore::new(
            identity,
            transport,
            availability,
            &[Capability::Switch, Capability::MultiChannelSwitch],
            "switch",
        )?;
        let device_type = core.device_type();
        Ok(Self {
            states: ChannelStates::new(device_type.channel_count()),
            readings: device_type.has_metering().then(EnergyReadings::default),
            core,
        })
    }

    /// Reads AC parameters and energy totals of a metering relay.
    ///
    /// Returns `false` without a call on relays that do not meter.
    pub async fn fetch_readings(&mut self) -> bool {
        let Some(readings) = self.readings.as_mut() else {
            tracing::debug!(mac = %self.core.mac_address(), "Relay has no energy meter");
            return false;
        };
        fetch_energy(
            &self.core,
            ApiCall::GetAcParameters,
            ApiCall::GetTotalEnergyData,
            readings,
        )
        .await
    }

    /// Refreshes the channel state and, if metered, the readings.
    pub async fn refresh(&mut self) {
        self.fetch_channel_state(None).await;
        if self.readings.is_some() {
            self.fetch_readings().await;
        }
    }

    /// Fetches device info, then refreshes.
    pub async fn refresh_all(&mut self) {
        self.fetch_device_info().await;
        self.refresh().await;
    }
}

impl<T> SwitchDevice<T> {
    /// Returns the last readings of a metering relay.
    #[must_use]
    pub fn readings(&self) -> Option<&EnergyReadings> {
        self.readings.as_ref()
    }

    /// Looks up one reading by key.
    #[must_use]
    pub fn sensor_value(&self, key: &str) -> Option<&[Option<f64>]> {
        self.readings.as_ref().and_then(|r| r.get(key))
    }
}

device_common!(SwitchDevice);
power_control!(SwitchDevice);
