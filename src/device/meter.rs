// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Three-phase energy meter (ENERGY).

use crate::capabilities::Capability;
use crate::command::ApiCall;
use crate::error::Error;
use crate::protocol::Transport;
use crate::response::{ElectricalParams, EnergyReadings, EnergyTotals, Response};
use crate::state::{AvailabilitySink, ChannelStates};

use super::{DeviceCore, DeviceIdentity};

/// Fetches totals then parameters, keeping the cached value of any part
/// that fails. Returns `true` if both parts were read.
pub(crate) async fn fetch_energy<T: Transport>(
    core: &DeviceCore<T>,
    params_call: ApiCall,
    totals_call: ApiCall,
    readings: &mut EnergyReadings,
) -> bool {
    let totals: Response<EnergyTotals> = core.request(totals_call).await;
    let totals_ok = totals.is_ok();
    if totals_ok {
        readings.totals = totals.body;
    }

    let params: Response<ElectricalParams> = core.request(params_call).await;
    let params_ok = params.is_ok();
    if params_ok {
        readings.params = params.body;
    }

    if !(totals_ok && params_ok) {
        tracing::debug!(mac = %core.mac_address(), totals_ok, params_ok, "Energy fetch incomplete");
    }
    totals_ok && params_ok
}

/// Per-phase energy meter with an on/off output.
#[derive(Debug)]
pub struct EnergyMeterDevice<T> {
    core: DeviceCore<T>,
    states: ChannelStates,
    readings: EnergyReadings,
}

impl<T: Transport> EnergyMeterDevice<T> {
    /// Creates an energy meter.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDevice` for an unknown type code and
    /// `ConfigError::CapabilityMismatch` if the type is not a meter.
    pub fn new(
        identity: DeviceIdentity,
        transport: T,
        availability: AvailabilitySink,
    ) -> Result<Self, Error> {
        let core = DeviceCore::new(
            identity,
            transport,
            availability,
            &[Capability::EnergyMetered],
            "energy meter",
        )?;
        Ok(Self {
            states: ChannelStates::new(core.device_type().channel_count()),
            readings: EnergyReadings::default(),
            core,
        })
    }

    /// Reads per-phase parameters and totals.
    pub async fn fetch_readings(&mut self) -> bool {
        fetch_energy(
            &self.core,
            ApiCall::GetCurrentParameters,
            ApiCall::GetTotalEnergy,
            &mut self.readings,
        )
        .await
    }

    /// Refreshes the state and the readings.
    pub async fn refresh(&mut self) {
        self.fetch_channel_state(None).await;
        self.fetch_readings().await;
    }

    /// Fetches device info, then refreshes.
    pub async fn refresh_all(&mut self) {
        self.fetch_device_info().await;
        self.refresh().await;
    }
}

impl<T> EnergyMeterDevice<T> {
    /// Returns the last readings.
    #[must_use]
    pub fn readings(&self) -> &EnergyReadings {
        &self.readings
    }

    /// Looks up one reading by key; unknown keys return `None`.
    #[must_use]
    pub fn sensor_value(&self, key: &str) -> Option<&[Option<f64>]> {
        self.readings.get(key)
    }
}

device_common!(EnergyMeterDevice);
power_control!(EnergyMeterDevice);
