// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of devices keyed by MAC address.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinSet;

use crate::device::Device;
use crate::error::{ConfigError, Error};
use crate::protocol::Transport;
use crate::state::Availability;

/// A device shared between the manager and its callers.
///
/// The mutex serializes fetches and updates on one device.
pub type SharedDevice<T> = Arc<Mutex<Device<T>>>;

/// Manager for a set of devices.
///
/// Each device sits behind its own async mutex, so operations on one device
/// are serialized while different devices are driven concurrently.
///
/// # Examples
///
/// ```no_run
/// use foxrest_lib::manager::{DeviceConfig, DeviceManager};
///
/// # async fn example() -> foxrest_lib::Result<()> {
/// let configs = DeviceConfig::list_from_json(r#"[
///     {"name":"Hall","host":"192.168.1.20","api_key":"0123456789",
///      "mac_address":"a0b1c2d3e4f5","device_type":2}
/// ]"#)?;
/// let manager = DeviceManager::from_configs(configs).await?;
///
/// let availability = manager.refresh_all().await;
/// println!("{availability:?}");
///
/// if let Some(device) = manager.get("a0b1c2d3e4f5").await {
///     let device = device.lock().await;
///     println!("{} is on: {:?}", device.name(), device.is_on(1));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeviceManager<T> {
    devices: RwLock<HashMap<String, SharedDevice<T>>>,
}

impl<T> Default for DeviceManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeviceManager<T> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a device and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateDevice` if a device with the same MAC
    /// address is already registered. MAC addresses compare
    /// case-insensitively.
    pub async fn add(&self, device: Device<T>) -> Result<SharedDevice<T>, Error> {
        let key = mac_key(device.mac_address());
        let mut devices = self.devices.write().await;
        if devices.contains_key(&key) {
            return Err(ConfigError::DuplicateDevice(key).into());
        }

        tracing::debug!(mac = %key, name = %device.name(), "Registering device");
        let shared = Arc::new(Mutex::new(device));
        devices.insert(key, Arc::clone(&shared));
        Ok(shared)
    }

    /// Removes a device, returning it if it was registered.
    pub async fn remove(&self, mac_address: &str) -> Option<SharedDevice<T>> {
        self.devices.write().await.remove(&mac_key(mac_address))
    }

    /// Returns the device with the given MAC address.
    pub async fn get(&self, mac_address: &str) -> Option<SharedDevice<T>> {
        self.devices.read().await.get(&mac_key(mac_address)).cloned()
    }

    /// Returns the MAC addresses of every registered device, sorted.
    pub async fn macs(&self) -> Vec<String> {
        let mut macs: Vec<String> = self.devices.read().await.keys().cloned().collect();
        macs.sort();
        macs
    }

    /// Returns the number of registered devices.
    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Returns `true` if no device is registered.
    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    /// Subscribes to availability transitions of one device.
    pub async fn watch_availability(&self, mac_address: &str) -> Option<watch::Receiver<Availability>> {
        let device = self.get(mac_address).await?;
        let receiver = device.lock().await.availability().subscribe();
        Some(receiver)
    }
}

impl<T: Transport + 'static> DeviceManager<T> {
    /// Runs a full refresh on every device concurrently.
    ///
    /// Returns the availability of each device after its refresh, keyed by
    /// MAC address.
    pub async fn refresh_all(&self) -> HashMap<String, bool> {
        let snapshot: Vec<(String, SharedDevice<T>)> = self
            .devices
            .read()
            .await
            .iter()
            .map(|(mac, device)| (mac.clone(), Arc::clone(device)))
            .collect();

        let mut tasks = JoinSet::new();
        for (mac, device) in snapshot {
            tasks.spawn(async move {
                let mut device = device.lock().await;
                device.refresh_all().await;
                (mac, device.is_available())
            });
        }

        let mut availability = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((mac, available)) => {
                    availability.insert(mac, available);
                }
                Err(e) => tracing::warn!(error = %e, "Device refresh task failed"),
            }
        }

        tracing::info!(
            devices = availability.len(),
            available = availability.values().filter(|a| **a).count(),
            "Refreshed all devices"
        );
        availability
    }
}

#[cfg(feature = "http")]
impl DeviceManager<crate::protocol::RestClient> {
    /// Builds HTTP devices for every configuration record.
    ///
    /// No device is contacted.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid record or duplicate MAC address.
    pub async fn from_configs(
        configs: impl IntoIterator<Item = super::DeviceConfig>,
    ) -> Result<Self, Error> {
        let manager = Self::new();
        for config in configs {
            let device = Device::http(config.into_identity()?).build()?;
            manager.add(device).await?;
        }
        Ok(manager)
    }
}

fn mac_key(mac_address: &str) -> String {
    mac_address.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceIdentity;
    use crate::device::testing::ScriptedTransport;

    fn device(mac: &str, transport: &ScriptedTransport) -> Device<ScriptedTransport> {
        let identity = DeviceIdentity::new("Dev", "10.0.0.2", "key", mac, 2);
        Device::from_parts(identity, transport.clone(), transport.availability()).unwrap()
    }

    #[tokio::test]
    async fn add_and_lookup() {
        let manager = DeviceManager::new();
        let t = ScriptedTransport::new();
        manager.add(device("a0b1c2d3e4f5", &t)).await.unwrap();
        manager.add(device("112233445566", &t)).await.unwrap();

        assert_eq!(manager.len().await, 2);
        assert_eq!(manager.macs().await, vec!["112233445566", "a0b1c2d3e4f5"]);
        assert!(manager.get("A0B1C2D3E4F5").await.is_some());
        assert!(manager.get("ffffffffffff").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_mac_rejected() {
        let manager = DeviceManager::new();
        let t = ScriptedTransport::new();
        manager.add(device("a0b1c2d3e4f5", &t)).await.unwrap();

        let err = manager.add(device("A0B1C2D3E4F5", &t)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::DuplicateDevice(ref mac)) if mac == "a0b1c2d3e4f5"
        ));
        assert_eq!(manager.len().await, 1);
    }

    #[tokio::test]
    async fn remove_device() {
        let manager = DeviceManager::new();
        let t = ScriptedTransport::new();
        manager.add(device("a0b1c2d3e4f5", &t)).await.unwrap();

        assert!(manager.remove("a0b1c2d3e4f5").await.is_some());
        assert!(manager.remove("a0b1c2d3e4f5").await.is_none());
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn refresh_all_reports_availability() {
        let manager = DeviceManager::new();

        let online = ScriptedTransport::new();
        online.reply(r#"{"status":"ok","device_name":"R2S2"}"#);
        online.reply(r#"{"status":"ok","channel_1_state":"on","channel_2_state":"off"}"#);
        let offline = ScriptedTransport::new();
        offline.fail_unreachable();
        offline.fail_unreachable();

        let shared = manager.add(device("000000000001", &online)).await.unwrap();
        manager.add(device("000000000002", &offline)).await.unwrap();

        let availability = manager.refresh_all().await;
        assert_eq!(availability.get("000000000001"), Some(&true));
        assert_eq!(availability.get("000000000002"), Some(&false));

        let device = shared.lock().await;
        assert_eq!(device.is_on(1), Some(true));
        assert_eq!(device.is_on(2), Some(false));
    }

    #[tokio::test]
    async fn watch_availability_sees_transitions() {
        let manager = DeviceManager::new();
        let t = ScriptedTransport::new();
        t.fail_unreachable();
        manager.add(device("a0b1c2d3e4f5", &t)).await.unwrap();

        let mut rx = manager.watch_availability("a0b1c2d3e4f5").await.unwrap();
        let device = manager.get("a0b1c2d3e4f5").await.unwrap();
        device.lock().await.fetch_device_info().await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Availability::Unavailable);
    }
}
