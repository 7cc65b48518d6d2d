// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Managing several devices at once.
//!
//! [`DeviceConfig`] describes a manually configured device and converts
//! into a [`DeviceIdentity`](crate::device::DeviceIdentity).
//! [`DeviceManager`] keeps devices keyed by MAC address and refreshes them
//! concurrently.
//!
//! # Examples
//!
//! Combining discovery with configured API keys:
//!
//! ```no_run
//! use foxrest_lib::device::Device;
//! use foxrest_lib::discovery::{discover, DiscoveryOptions};
//! use foxrest_lib::manager::DeviceManager;
//!
//! # async fn example() -> foxrest_lib::Result<()> {
//! let manager = DeviceManager::new();
//! for identity in discover(DiscoveryOptions::new()).await? {
//!     let device = Device::http(identity).with_api_key("0123456789").build()?;
//!     manager.add(device).await?;
//! }
//! manager.refresh_all().await;
//! # Ok(())
//! # }
//! ```

mod device_config;
mod device_manager;

pub use device_config::DeviceConfig;
pub use device_manager::{DeviceManager, SharedDevice};
