// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UDP broadcast discovery of Fox devices.
//!
//! A scan binds a local UDP socket, broadcasts a fixed ASCII request a few
//! times and collects the replies that arrive meanwhile. A reply is laid
//! out as:
//!
//! | Bytes    | Content                              |
//! |----------|--------------------------------------|
//! | `0..36`  | ASCII header [`RESPONSE_HEADER`]     |
//! | `36..42` | MAC address of the device            |
//! | `42..44` | device type code, little-endian      |
//!
//! Replies that are too short, carry another header or name an unknown or
//! unsupported device type are logged and dropped. Devices are deduplicated
//! by MAC address within a scan.
//!
//! # Examples
//!
//! ```no_run
//! use foxrest_lib::discovery::{discover, DiscoveryOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> foxrest_lib::Result<()> {
//! let options = DiscoveryOptions::new()
//!     .with_probes(3)
//!     .with_interval(Duration::from_secs(2));
//!
//! for identity in discover(options).await? {
//!     println!("{identity} at {}", identity.host());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use crate::capabilities::DeviceType;
use crate::device::{DeviceIdentity, PLACEHOLDER_API_KEY};
use crate::error::{Error, ProtocolError};

/// Request broadcast to solicit replies.
pub const REQUEST_HEADER: &[u8] = b"FOX_DEVICE_DISCOVERY_REQUEST_V01.00";

/// Header every reply starts with.
pub const RESPONSE_HEADER: &[u8; 36] = b"FOX_DEVICE_DISCOVERY_RESPONSE_V01.00";

/// Header, MAC address and type code.
pub const MIN_DATAGRAM_LEN: usize = RESPONSE_HEADER.len() + MAC_LEN + 2;

/// Default local port replies are sent to.
pub const DEFAULT_LOCAL_PORT: u16 = 1395;

/// Default port devices listen on.
pub const DEFAULT_DEVICE_PORT: u16 = 1918;

const MAC_LEN: usize = 6;
const RECV_BUFFER_LEN: usize = 512;

/// Options for a discovery scan.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    probes: u32,
    interval: Duration,
    bind_addr: SocketAddr,
    target: SocketAddr,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoveryOptions {
    /// Default number of probes.
    pub const DEFAULT_PROBES: u32 = 5;

    /// Default wait after each probe.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(4);

    /// Creates options with the defaults: 5 probes, 4 s apart, listening on
    /// `0.0.0.0:1395` and broadcasting to `255.255.255.255:1918`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            probes: Self::DEFAULT_PROBES,
            interval: Self::DEFAULT_INTERVAL,
            bind_addr: SocketAddr::V4(SocketAddrV4::new(
                Ipv4Addr::UNSPECIFIED,
                DEFAULT_LOCAL_PORT,
            )),
            target: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::BROADCAST, DEFAULT_DEVICE_PORT)),
        }
    }

    /// Sets how many probes are sent. Zero sends none and returns an
    /// empty result.
    #[must_use]
    pub fn with_probes(mut self, probes: u32) -> Self {
        self.probes = probes;
        self
    }

    /// Sets how long to listen after each probe.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the local address the scan socket binds to.
    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets where probes are sent.
    #[must_use]
    pub fn with_target(mut self, addr: SocketAddr) -> Self {
        self.target = addr;
        self
    }

    /// Returns the number of probes.
    #[must_use]
    pub fn probes(&self) -> u32 {
        self.probes
    }

    /// Returns the wait after each probe.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the local bind address.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Returns the probe destination.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

/// Parses one reply datagram into a device identity.
///
/// The identity is named after the device model and carries the
/// placeholder API key.
///
/// # Errors
///
/// Returns a [`ProtocolError`] if the datagram is too short, carries
/// another header, or names an unknown or unsupported device type.
///
/// # Examples
///
/// ```
/// use foxrest_lib::discovery::{parse_datagram, RESPONSE_HEADER};
///
/// let mut datagram = RESPONSE_HEADER.to_vec();
/// datagram.extend_from_slice(&[0xa0, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5]);
/// datagram.extend_from_slice(&2u16.to_le_bytes());
///
/// let identity = parse_datagram(&datagram, "192.168.1.20:1918".parse().unwrap()).unwrap();
/// assert_eq!(identity.mac_address(), "a0b1c2d3e4f5");
/// assert_eq!(identity.name(), "R2S2");
/// assert_eq!(identity.host(), "192.168.1.20");
/// ```
pub fn parse_datagram(datagram: &[u8], from: SocketAddr) -> Result<DeviceIdentity, ProtocolError> {
    if datagram.len() < MIN_DATAGRAM_LEN {
        return Err(ProtocolError::TooShort {
            len: datagram.len(),
            min: MIN_DATAGRAM_LEN,
        });
    }

    let (header, rest) = datagram.split_at(RESPONSE_HEADER.len());
    if header != RESPONSE_HEADER {
        return Err(ProtocolError::HeaderMismatch);
    }

    let (mac, rest) = rest.split_at(MAC_LEN);
    let code = u16::from_le_bytes([rest[0], rest[1]]);

    let device_type = DeviceType::from_code(code).ok_or(ProtocolError::UnknownDeviceType(code))?;
    if device_type.capability().is_none() {
        return Err(ProtocolError::UnsupportedDeviceType(code));
    }

    let mac_address: String = mac.iter().map(|byte| format!("{byte:02x}")).collect();

    Ok(DeviceIdentity::new(
        device_type.model_name(),
        from.ip().to_string(),
        PLACEHOLDER_API_KEY,
        mac_address,
        code,
    ))
}

/// Devices found during one scan, in arrival order, unique by MAC.
///
/// Every scan starts from an empty set.
#[derive(Debug, Default)]
struct DiscoveredDevices {
    seen: HashSet<String>,
    devices: Vec<DeviceIdentity>,
}

impl DiscoveredDevices {
    fn insert(&mut self, identity: DeviceIdentity) -> bool {
        if !self.seen.insert(identity.mac_address().to_owned()) {
            return false;
        }
        self.devices.push(identity);
        true
    }
}

/// Receive task of a running scan.
///
/// Dropping it only requests cancellation; [`ReceiveTask::stop`] also waits
/// for the task to release its socket handle.
struct ReceiveTask(Option<JoinHandle<()>>);

impl ReceiveTask {
    async fn stop(mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
            if let Err(e) = handle.await
                && !e.is_cancelled()
            {
                tracing::warn!(error = %e, "Discovery receive task failed");
            }
        }
    }
}

impl Drop for ReceiveTask {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

/// Binds the scan socket with broadcast and address reuse enabled.
///
/// Must be called from within a tokio runtime.
fn bind_socket(addr: SocketAddr) -> crate::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| Error::socket("socket", e))?;
    socket
        .set_reuse_address(true)
        .map_err(|e| Error::socket("set_reuse_address", e))?;
    #[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos"))))]
    socket
        .set_reuse_port(true)
        .map_err(|e| Error::socket("set_reuse_port", e))?;
    socket
        .set_broadcast(true)
        .map_err(|e| Error::socket("set_broadcast", e))?;
    socket
        .set_nonblocking(true)
        .map_err(|e| Error::socket("set_nonblocking", e))?;
    socket
        .bind(&SockAddr::from(addr))
        .map_err(|e| Error::socket("bind", e))?;

    UdpSocket::from_std(socket.into()).map_err(|e| Error::socket("register", e))
}

/// Runs a full discovery scan.
///
/// The scan lasts about `probes * interval`.
///
/// # Errors
///
/// Returns `Error::Socket` if the local socket cannot be created, configured
/// or bound. Bad replies are never an error.
///
/// The socket is bound with address and port reuse, and it is closed before
/// this returns, so scans may run back to back on the same port.
pub async fn discover(options: DiscoveryOptions) -> crate::Result<Vec<DeviceIdentity>> {
    discover_until(options, std::future::pending::<()>()).await
}

/// Runs a discovery scan that stops early when `shutdown` resolves.
///
/// Devices found before the shutdown are returned.
///
/// # Errors
///
/// Same as [`discover`].
pub async fn discover_until<F>(
    options: DiscoveryOptions,
    shutdown: F,
) -> crate::Result<Vec<DeviceIdentity>>
where
    F: Future<Output = ()>,
{
    let socket = Arc::new(bind_socket(options.bind_addr)?);

    tracing::info!(
        bind = %options.bind_addr,
        target = %options.target,
        probes = options.probes,
        "Starting device discovery"
    );

    let found = Arc::new(Mutex::new(DiscoveredDevices::default()));

    let receiver = ReceiveTask(Some(tokio::spawn(receive_replies(
        Arc::clone(&socket),
        Arc::clone(&found),
    ))));

    tokio::select! {
        () = send_probes(&socket, &options) => {}
        () = shutdown => {
            tracing::info!("Discovery stopped early");
        }
    }
    receiver.stop().await;
    drop(socket);

    let devices = std::mem::take(&mut found.lock().devices);
    tracing::info!(count = devices.len(), "Discovery finished");
    Ok(devices)
}

async fn send_probes(socket: &UdpSocket, options: &DiscoveryOptions) {
    for probe in 1..=options.probes {
        tracing::debug!(probe, target = %options.target, "Sending discovery probe");
        if let Err(e) = socket.send_to(REQUEST_HEADER, options.target).await {
            tracing::warn!(probe, error = %e, "Failed to send discovery probe");
        }
        tokio::time::sleep(options.interval).await;
    }
}

async fn receive_replies(socket: Arc<UdpSocket>, found: Arc<Mutex<DiscoveredDevices>>) {
    let mut buf = [0u8; RECV_BUFFER_LEN];
    loop {
        let (len, from) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                tracing::warn!(error = %e, "Discovery receive failed");
                continue;
            }
        };

        match parse_datagram(&buf[..len], from) {
            Ok(identity) => {
                let mac = identity.mac_address().to_owned();
                if found.lock().insert(identity) {
                    tracing::info!(mac = %mac, host = %from.ip(), "Discovered device");
                } else {
                    tracing::debug!(mac = %mac, "Ignoring duplicate discovery reply");
                }
            }
            Err(e) => {
                tracing::debug!(from = %from, error = %e, "Discarding discovery datagram");
            }
        }
    }
}
