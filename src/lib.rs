// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `FoxRest` Lib - A Rust library to discover and control F&F Fox devices.
//!
//! Fox relays, dimmers, RGBW controllers, roller shutters and energy meters
//! expose a small HTTP GET API and answer a UDP broadcast discovery probe.
//! This library finds them, keeps a cached copy of their state and sends
//! commands, tracking whether each device is reachable.
//!
//! # Supported Devices
//!
//! | Model  | Code | Driven as                               |
//! |--------|------|-----------------------------------------|
//! | R1S1   | 1    | relay with single-phase energy meter    |
//! | R2S2   | 2    | two-channel relay                       |
//! | DIM1S2 | 3    | dimmer                                  |
//! | LED2S2 | 4    | two-channel LED dimmer                  |
//! | STR1S2 | 5    | roller shutter                          |
//! | RGBW   | 6    | colour controller                       |
//! | ENERGY | 7    | three-phase energy meter                |
//!
//! The gate controller (code 8) is recognised but not supported.
//!
//! # Error Model
//!
//! Only construction can fail with an [`Error`]. Once a device exists, its
//! fetch and update operations never return errors: a failed call marks the
//! device unavailable and yields a `false` or default value, keeping the
//! last cached state.
//!
//! # Quick Start
//!
//! ## Discover and drive devices
//!
//! ```no_run
//! use foxrest_lib::device::Device;
//! use foxrest_lib::discovery::{discover, DiscoveryOptions};
//!
//! #[tokio::main]
//! async fn main() -> foxrest_lib::Result<()> {
//!     for identity in discover(DiscoveryOptions::new()).await? {
//!         // Discovery does not reveal the API key.
//!         let mut device = Device::http(identity)
//!             .with_api_key("0123456789")
//!             .build_and_refresh()
//!             .await?;
//!
//!         if let Device::Switch(relay) = &mut device {
//!             relay.turn_on(None).await;
//!         }
//!         println!("{}: available = {}", device.name(), device.is_available());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configured device
//!
//! ```no_run
//! use foxrest_lib::device::{Device, DeviceIdentity};
//! use foxrest_lib::types::Channel;
//!
//! #[tokio::main]
//! async fn main() -> foxrest_lib::Result<()> {
//!     let identity = DeviceIdentity::new("Lights", "192.168.1.30", "0123456789", "a0b1c2d3e4f5", 4);
//!     let Device::Dimmer(mut dimmer) = Device::http(identity).build()? else {
//!         unreachable!("LED2S2 is a dimmer");
//!     };
//!
//!     dimmer.update_brightness(128, Some(Channel::TWO)).await;
//!     println!("{:?}", dimmer.fetch_brightness(None).await);
//!     Ok(())
//! }
//! ```

mod capabilities;
pub mod command;
pub mod device;
#[cfg(feature = "discovery")]
pub mod discovery;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use capabilities::{Capability, DeviceType, MANUFACTURER_NAME};
pub use command::ApiCall;
pub use device::{
    ColorDevice, CoverDevice, Device, DeviceDescriptor, DeviceIdentity, DimmerDevice,
    EnergyMeterDevice, SwitchDevice,
};
#[cfg(feature = "http")]
pub use device::HttpDeviceBuilder;
pub use error::{ConfigError, Error, ProtocolError, Result, TransportError, ValueError};
pub use manager::{DeviceConfig, DeviceManager};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, RestClient};
pub use protocol::Transport;
pub use response::{DeviceInfo, EnergyReadings, Response, ResponseStatus};
pub use state::{Availability, AvailabilitySink};
pub use types::{Brightness, Channel, HsvColor, Level, PowerState};
