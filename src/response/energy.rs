// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Electrical parameter and energy total payloads.
//!
//! The three-phase meter reports every quantity as a list with one entry
//! per phase. The R1S1 relay reports the same quantities as scalars, which
//! decode to a single-entry list, and names its export totals
//! `active_energy` / `reactive_energy`.

use serde::Deserialize;

/// Per-phase values; `None` marks an entry that could not be read.
pub type PhaseValues = Vec<Option<f64>>;

/// Every key accepted by [`EnergyReadings::get`].
pub const SENSOR_KEYS: [&str; 10] = [
    "voltage",
    "current",
    "power_active",
    "power_reactive",
    "frequency",
    "power_factor",
    "active_energy_export",
    "reactive_energy_export",
    "active_energy_import",
    "reactive_energy_import",
];

/// Instantaneous electrical parameters
/// (`get_ac_parameters/`, `get_current_parameters/`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ElectricalParams {
    /// Voltage in volts.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub voltage: PhaseValues,
    /// Current in amperes.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub current: PhaseValues,
    /// Active power in watts.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub power_active: PhaseValues,
    /// Reactive power in var.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub power_reactive: PhaseValues,
    /// Frequency in hertz.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub frequency: PhaseValues,
    /// Power factor.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub power_factor: PhaseValues,
}

/// Accumulated energy (`get_total_energy_data/`, `get_total_energy/`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EnergyTotals {
    /// Exported active energy.
    #[serde(
        default,
        alias = "active_energy",
        deserialize_with = "super::lenient::phases"
    )]
    pub active_energy_export: PhaseValues,
    /// Exported reactive energy.
    #[serde(
        default,
        alias = "reactive_energy",
        deserialize_with = "super::lenient::phases"
    )]
    pub reactive_energy_export: PhaseValues,
    /// Imported active energy.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub active_energy_import: PhaseValues,
    /// Imported reactive energy.
    #[serde(default, deserialize_with = "super::lenient::phases")]
    pub reactive_energy_import: PhaseValues,
}

/// Last known readings of a metering device.
///
/// # Examples
///
/// ```
/// use foxrest_lib::response::{ElectricalParams, EnergyReadings};
///
/// let readings = EnergyReadings {
///     params: ElectricalParams {
///         voltage: vec![Some(230.0), Some(231.5), None],
///         ..ElectricalParams::default()
///     },
///     ..EnergyReadings::default()
/// };
/// assert_eq!(readings.get("voltage").unwrap()[1], Some(231.5));
/// assert!(readings.get("humidity").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnergyReadings {
    /// Instantaneous parameters.
    pub params: ElectricalParams,
    /// Accumulated totals.
    pub totals: EnergyTotals,
}

impl EnergyReadings {
    /// Looks up a reading by key; unknown keys return `None`.
    ///
    /// `active_energy` and `reactive_energy` are accepted as aliases of the
    /// export totals.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[Option<f64>]> {
        let values = match key {
            "voltage" => &self.params.voltage,
            "current" => &self.params.current,
            "power_active" => &self.params.power_active,
            "power_reactive" => &self.params.power_reactive,
            "frequency" => &self.params.frequency,
            "power_factor" => &self.params.power_factor,
            "active_energy_export" | "active_energy" => &self.totals.active_energy_export,
            "reactive_energy_export" | "reactive_energy" => &self.totals.reactive_energy_export,
            "active_energy_import" => &self.totals.active_energy_import,
            "reactive_energy_import" => &self.totals.reactive_energy_import,
            _ => return None,
        };
        Some(values)
    }

    /// Iterates over every reading in [`SENSOR_KEYS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[Option<f64>])> {
        SENSOR_KEYS
            .into_iter()
            .filter_map(move |key| self.get(key).map(|values| (key, values)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;

    #[test]
    fn three_phase_parameters() {
        let json = r#"{
            "status": "ok",
            "voltage": [230.1, 229.8, 231.0],
            "current": ["0.5", "0.4", "x"],
            "frequency": [50, 50, 50]
        }"#;
        let params = Response::<ElectricalParams>::decode(Ok(json.as_bytes().to_vec())).body;
        assert_eq!(params.voltage.len(), 3);
        assert_eq!(params.current, vec![Some(0.5), Some(0.4), None]);
        assert_eq!(params.frequency[2], Some(50.0));
        assert!(params.power_factor.is_empty());
    }

    #[test]
    fn single_phase_totals_use_aliases() {
        let json = r#"{"status":"ok","active_energy":"12.5","reactive_energy":3,"active_energy_import":"0"}"#;
        let totals = Response::<EnergyTotals>::decode(Ok(json.as_bytes().to_vec())).body;
        assert_eq!(totals.active_energy_export, vec![Some(12.5)]);
        assert_eq!(totals.reactive_energy_export, vec![Some(3.0)]);
        assert_eq!(totals.active_energy_import, vec![Some(0.0)]);
        assert!(totals.reactive_energy_import.is_empty());
    }

    #[test]
    fn lookup_by_key() {
        let readings = EnergyReadings {
            totals: EnergyTotals {
                active_energy_export: vec![Some(1.0)],
                ..EnergyTotals::default()
            },
            ..EnergyReadings::default()
        };
        assert_eq!(readings.get("active_energy"), Some(&[Some(1.0)][..]));
        assert_eq!(readings.get("active_energy_export"), Some(&[Some(1.0)][..]));
        assert_eq!(readings.get("nope"), None);
        assert_eq!(readings.iter().count(), SENSOR_KEYS.len());
    }
}
