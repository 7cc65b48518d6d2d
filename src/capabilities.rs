// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device catalogue and capability model.
//!
//! Every Fox device announces a numeric type code, both in discovery
//! replies and in manual configuration. The code fixes the model and from
//! the model follows the capability set: how many output channels it has,
//! whether it dims, mixes colors, drives a cover or meters energy.

use std::fmt;

use crate::error::Error;

/// Manufacturer reported in device descriptors.
pub const MANUFACTURER_NAME: &str = "F&F";

/// Known device models, keyed by their wire type code.
///
/// # Examples
///
/// ```
/// use foxrest_lib::{Capability, DeviceType};
///
/// let ty = DeviceType::from_code(4).unwrap();
/// assert_eq!(ty, DeviceType::Led2S2);
/// assert_eq!(ty.model_name(), "LED2S2");
/// assert_eq!(ty.capability(), Some(Capability::Dimmable));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Single relay with a single-phase energy meter.
    R1S1,
    /// Two relays, two switch inputs.
    R2S2,
    /// Single channel 230V dimmer.
    Dim1S2,
    /// Two channel LED dimmer.
    Led2S2,
    /// Roller shutter controller.
    Str1S2,
    /// RGBW LED controller.
    Rgbw,
    /// Three-phase energy meter.
    Energy,
    /// Gate controller. Recognised but not supported.
    Gate,
}

impl DeviceType {
    /// Every known device type.
    pub const ALL: [Self; 8] = [
        Self::R1S1,
        Self::R2S2,
        Self::Dim1S2,
        Self::Led2S2,
        Self::Str1S2,
        Self::Rgbw,
        Self::Energy,
        Self::Gate,
    ];

    /// Looks up a device type by its wire code.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }

    /// Resolves a wire code to a device type that can be driven.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDevice` if the code is unknown or names a
    /// device without a capability set (the gate controller).
    pub fn supported(code: u16) -> Result<Self, Error> {
        Self::from_code(code)
            .filter(|ty| ty.capability().is_some())
            .ok_or(Error::UnsupportedDevice { device_type: code })
    }

    /// Returns the wire type code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::R1S1 => 1,
            Self::R2S2 => 2,
            Self::Dim1S2 => 3,
            Self::Led2S2 => 4,
            Self::Str1S2 => 5,
            Self::Rgbw => 6,
            Self::Energy => 7,
            Self::Gate => 8,
        }
    }

    /// Returns the commercial model name.
    #[must_use]
    pub const fn model_name(&self) -> &'static str {
        match self {
            Self::R1S1 => "R1S1",
            Self::R2S2 => "R2S2",
            Self::Dim1S2 => "DIM1S2",
            Self::Led2S2 => "LED2S2",
            Self::Str1S2 => "STR1S2",
            Self::Rgbw => "RGBW",
            Self::Energy => "ENERGY",
            Self::Gate => "GATE",
        }
    }

    /// Returns the capability set, or `None` for unsupported models.
    #[must_use]
    pub const fn capability(&self) -> Option<Capability> {
        match self {
            Self::R1S1 => Some(Capability::Switch),
            Self::R2S2 => Some(Capability::MultiChannelSwitch),
            Self::Dim1S2 | Self::Led2S2 => Some(Capability::Dimmable),
            Self::Str1S2 => Some(Capability::Cover),
            Self::Rgbw => Some(Capability::Color),
            Self::Energy => Some(Capability::EnergyMetered),
            Self::Gate => None,
        }
    }

    /// Returns the number of independently switched output channels.
    #[must_use]
    pub const fn channel_count(&self) -> u8 {
        match self {
            Self::R2S2 | Self::Led2S2 => 2,
            Self::Str1S2 | Self::Gate => 0,
            Self::R1S1 | Self::Dim1S2 | Self::Rgbw | Self::Energy => 1,
        }
    }

    /// Returns `true` if the model reports electrical readings.
    #[must_use]
    pub const fn has_metering(&self) -> bool {
        matches!(self, Self::R1S1 | Self::Energy)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

/// The operation set a device variant supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Single on/off output.
    Switch,
    /// Several independently switched outputs.
    MultiChannelSwitch,
    /// On/off plus per-channel brightness.
    Dimmable,
    /// On/off plus HSV color.
    Color,
    /// Cover position and tilt; no on/off state.
    Cover,
    /// On/off plus per-phase electrical readings.
    EnergyMetered,
}

impl Capability {
    /// Returns the host platform a device with this capability maps to.
    #[must_use]
    pub const fn platform(&self) -> &'static str {
        match self {
            Self::Switch | Self::MultiChannelSwitch => "switch",
            Self::Dimmable | Self::Color => "light",
            Self::Cover => "cover",
            Self::EnergyMetered => "sensor",
        }
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::MultiChannelSwitch => "multi-channel switch",
            Self::Dimmable => "dimmable",
            Self::Color => "color",
            Self::Cover => "cover",
            Self::EnergyMetered => "energy-metered",
        }
    }

    /// Returns `true` if devices with this capability have on/off state.
    #[must_use]
    pub const fn has_power_state(&self) -> bool {
        !matches!(self, Self::Cover)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
