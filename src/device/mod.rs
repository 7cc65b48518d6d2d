// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state machines.
//!
//! Each capability set has its own variant type holding only the state
//! that capability needs:
//!
//! | Variant | Models | Operations |
//! |---------|--------|------------|
//! | [`SwitchDevice`] | R1S1, R2S2 | on/off per channel, R1S1 energy readings |
//! | [`DimmerDevice`] | DIM1S2, LED2S2 | on/off, brightness per channel |
//! | [`ColorDevice`] | RGBW | on/off, HSV color |
//! | [`CoverDevice`] | STR1S2 | position, tilt |
//! | [`EnergyMeterDevice`] | ENERGY | on/off, per-phase readings |
//!
//! [`Device`] wraps any of them and is what discovery and configuration
//! produce. Operations never fail: transport errors are reported through
//! the device availability and show up as `false` or default values.
//!
//! # Examples
//!
//! ```no_run
//! use foxrest_lib::device::{Device, DeviceIdentity};
//! use foxrest_lib::types::Channel;
//!
//! # async fn example() -> foxrest_lib::Result<()> {
//! let identity = DeviceIdentity::new("Hall", "192.168.1.20", "0123456789", "a0b1c2d3e4f5", 2);
//! let mut device = Device::http(identity).build()?;
//! device.refresh_all().await;
//!
//! if let Device::Switch(relay) = &mut device {
//!     relay.turn_on(Some(Channel::TWO)).await;
//! }
//! println!("{} available: {}", device.name(), device.is_available());
//! # Ok(())
//! # }
//! ```

/// Accessors every variant shares through its `core` field.
macro_rules! device_common {
    ($device:ident) => {
        impl<T: $crate::protocol::Transport> $device<T> {
            /// Reads device info. A non-empty friendly name replaces the
            /// configured name; a failed read keeps the previous info.
            pub async fn fetch_device_info(&mut self) -> bool {
                self.core.fetch_device_info().await
            }
        }

        impl<T> $device<T> {
            /// Returns the shared device core.
            #[must_use]
            pub fn core(&self) -> &$crate::device::DeviceCore<T> {
                &self.core
            }

            /// Returns the display name.
            #[must_use]
            pub fn name(&self) -> &str {
                self.core.name()
            }

            /// Returns the MAC address.
            #[must_use]
            pub fn mac_address(&self) -> &str {
                self.core.mac_address()
            }

            /// Returns `true` if the last call reached the device.
            #[must_use]
            pub fn is_available(&self) -> bool {
                self.core.is_available()
            }

            /// Returns the name of a channel, falling back to the device name.
            #[must_use]
            pub fn channel_name(&self, channel: u8) -> &str {
                self.core.channel_name(channel)
            }

            /// Builds the host integration descriptor.
            #[must_use]
            pub fn descriptor(&self) -> $crate::device::DeviceDescriptor {
                self.core.descriptor()
            }
        }
    };
}

/// On/off operations for variants with a `states` cache.
macro_rules! power_control {
    ($device:ident) => {
        impl<T: $crate::protocol::Transport> $device<T> {
            /// Reads the on/off state of one or all channels and caches it.
            ///
            /// A failed read marks the device unavailable and reads as off
            /// on every requested channel.
            pub async fn fetch_channel_state(
                &mut self,
                channel: Option<$crate::types::Channel>,
            ) -> $crate::state::ChannelReading {
                let reading = self.core.fetch_channel_state(channel).await;
                self.states.apply(channel, reading);
                reading
            }

            /// Switches one or all channels. Returns `true` only if the
            /// device answered `ok`.
            pub async fn update_channel_state(
                &mut self,
                on: bool,
                channel: Option<$crate::types::Channel>,
            ) -> bool {
                let updated = self.core.update_channel_state(on, channel).await;
                if updated {
                    self.states.set(channel, on);
                }
                updated
            }

            /// Turns one or all channels on.
            pub async fn turn_on(&mut self, channel: Option<$crate::types::Channel>) -> bool {
                self.update_channel_state(true, channel).await
            }

            /// Turns one or all channels off.
            pub async fn turn_off(&mut self, channel: Option<$crate::types::Channel>) -> bool {
                self.update_channel_state(false, channel).await
            }
        }

        impl<T> $device<T> {
            /// Returns the cached state of a 1-based channel.
            #[must_use]
            pub fn is_on(&self, channel: u8) -> bool {
                self.states.is_on(channel)
            }

            /// Returns `true` if any channel is on.
            #[must_use]
            pub fn any_on(&self) -> bool {
                self.states.any_on()
            }

            /// Returns the cached channel states.
            #[must_use]
            pub fn channel_states(&self) -> &$crate::state::ChannelStates {
                &self.states
            }
        }
    };
}

mod base;
mod color;
mod cover;
mod dimmer;
#[cfg(feature = "http")]
mod http_builder;
mod identity;
mod meter;
mod switch;

#[cfg(test)]
pub(crate) mod testing;

pub use base::{DeviceCore, DeviceDescriptor, UNKNOWN_FIRMWARE};
pub use color::ColorDevice;
pub use cover::CoverDevice;
pub use dimmer::DimmerDevice;
#[cfg(feature = "http")]
pub use http_builder::HttpDeviceBuilder;
pub use identity::{DeviceIdentity, PLACEHOLDER_API_KEY};
pub use meter::EnergyMeterDevice;
pub use switch::SwitchDevice;

use crate::capabilities::{Capability, DeviceType};
use crate::error::Error;
use crate::protocol::Transport;
use crate::state::AvailabilitySink;

/// Any supported device.
#[derive(Debug)]
pub enum Device<T> {
    /// Relay.
    Switch(SwitchDevice<T>),
    /// Dimmer.
    Dimmer(DimmerDevice<T>),
    /// RGBW controller.
    Color(ColorDevice<T>),
    /// Roller shutter.
    Cover(CoverDevice<T>),
    /// Energy meter.
    EnergyMeter(EnergyMeterDevice<T>),
}

impl<T: Transport> Device<T> {
    /// Creates the variant matching the identity's device type.
    ///
    /// `availability` must be the sink `transport` reports to.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDevice` if the type code is unknown or
    /// names an unsupported model.
    pub fn from_parts(
        identity: DeviceIdentity,
        transport: T,
        availability: AvailabilitySink,
    ) -> Result<Self, Error> {
        let device_type = DeviceType::supported(identity.device_type())?;
        match device_type.capability() {
            Some(Capability::Switch | Capability::MultiChannelSwitch) => {
                SwitchDevice::new(identity, transport, availability).map(Self::Switch)
            }
            Some(Capability::Dimmable) => {
                DimmerDevice::new(identity, transport, availability).map(Self::Dimmer)
            }
            Some(Capability::Color) => {
                ColorDevice::new(identity, transport, availability).map(Self::Color)
            }
            Some(Capability::Cover) => {
                CoverDevice::new(identity, transport, availability).map(Self::Cover)
            }
            Some(Capability::EnergyMetered) => {
                EnergyMeterDevice::new(identity, transport, availability).map(Self::EnergyMeter)
            }
            None => Err(Error::UnsupportedDevice {
                device_type: identity.device_type(),
            }),
        }
    }

    /// Fetches device info, then the capability-specific state.
    ///
    /// Every sub-fetch runs even if an earlier one failed.
    pub async fn refresh_all(&mut self) {
        match self {
            Self::Switch(d) => d.refresh_all().await,
            Self::Dimmer(d) => d.refresh_all().await,
            Self::Color(d) => d.refresh_all().await,
            Self::Cover(d) => d.refresh_all().await,
            Self::EnergyMeter(d) => d.refresh_all().await,
        }
    }

    /// Refreshes the capability-specific state only.
    pub async fn refresh(&mut self) {
        match self {
            Self::Switch(d) => d.refresh().await,
            Self::Dimmer(d) => d.refresh().await,
            Self::Color(d) => d.refresh().await,
            Self::Cover(d) => d.refresh().await,
            Self::EnergyMeter(d) => d.refresh().await,
        }
    }

    /// Reads device info.
    pub async fn fetch_device_info(&mut self) -> bool {
        match self {
            Self::Switch(d) => d.fetch_device_info().await,
            Self::Dimmer(d) => d.fetch_device_info().await,
            Self::Color(d) => d.fetch_device_info().await,
            Self::Cover(d) => d.fetch_device_info().await,
            Self::EnergyMeter(d) => d.fetch_device_info().await,
        }
    }
}

#[cfg(feature = "http")]
impl Device<crate::protocol::RestClient> {
    /// Starts building an HTTP device.
    #[must_use]
    pub fn http(identity: DeviceIdentity) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(identity)
    }
}

impl<T> Device<T> {
    /// Returns the shared device core.
    #[must_use]
    pub fn core(&self) -> &DeviceCore<T> {
        match self {
            Self::Switch(d) => d.core(),
            Self::Dimmer(d) => d.core(),
            Self::Color(d) => d.core(),
            Self::Cover(d) => d.core(),
            Self::EnergyMeter(d) => d.core(),
        }
    }

    /// Returns the capability set.
    #[must_use]
    pub fn capability(&self) -> Capability {
        match self {
            Self::Switch(d) if d.core().device_type().channel_count() > 1 => {
                Capability::MultiChannelSwitch
            }
            Self::Switch(_) => Capability::Switch,
            Self::Dimmer(_) => Capability::Dimmable,
            Self::Color(_) => Capability::Color,
            Self::Cover(_) => Capability::Cover,
            Self::EnergyMeter(_) => Capability::EnergyMetered,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.core().name()
    }

    /// Returns the MAC address.
    #[must_use]
    pub fn mac_address(&self) -> &str {
        self.core().mac_address()
    }

    /// Returns `true` if the last call reached the device.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.core().is_available()
    }

    /// Returns the availability sink, e.g. to subscribe to transitions.
    #[must_use]
    pub fn availability(&self) -> &AvailabilitySink {
        self.core().availability()
    }

    /// Returns the cached state of a channel, or `None` for covers.
    #[must_use]
    pub fn is_on(&self, channel: u8) -> Option<bool> {
        match self {
            Self::Switch(d) => Some(d.is_on(channel)),
            Self::Dimmer(d) => Some(d.is_on(channel)),
            Self::Color(d) => Some(d.is_on(channel)),
            Self::EnergyMeter(d) => Some(d.is_on(channel)),
            Self::Cover(_) => None,
        }
    }

    /// Returns `true` if both wrap the same physical device.
    #[must_use]
    pub fn same_device<U>(&self, other: &Device<U>) -> bool {
        self.core().same_device(other.core())
    }

    /// Builds the host integration descriptor.
    #[must_use]
    pub fn descriptor(&self) -> DeviceDescriptor {
        self.core().descriptor()
    }
}
