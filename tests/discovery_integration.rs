// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for UDP discovery over loopback sockets.

#![cfg(feature = "discovery")]

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use foxrest_lib::Error;
use foxrest_lib::discovery::{DiscoveryOptions, REQUEST_HEADER, RESPONSE_HEADER, discover, discover_until};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

fn reply(mac: [u8; 6], device_type: u16) -> Vec<u8> {
    let mut datagram = RESPONSE_HEADER.to_vec();
    datagram.extend_from_slice(&mac);
    datagram.extend_from_slice(&device_type.to_le_bytes());
    datagram
}

/// Answers every probe with the given datagrams.
async fn fake_devices(replies: Vec<Vec<u8>>) -> (SocketAddr, JoinHandle<()>) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut buf = [0u8; 256];
        loop {
            let Ok((len, from)) = socket.recv_from(&mut buf).await else {
                return;
            };
            if &buf[..len] != REQUEST_HEADER {
                continue;
            }
            for datagram in &replies {
                let _ = socket.send_to(datagram, from).await;
            }
        }
    });
    (addr, handle)
}

fn loopback_options(target: SocketAddr) -> DiscoveryOptions {
    DiscoveryOptions::new()
        .with_bind_addr("127.0.0.1:0".parse().unwrap())
        .with_target(target)
}

#[tokio::test]
async fn finds_devices_and_dedupes() {
    let (target, devices) = fake_devices(vec![
        reply([0xa0, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5], 2),
        b"short".to_vec(),
        reply([0xa0, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5], 2),
        reply([0x11, 0x22, 0x33, 0x44, 0x55, 0x66], 8),
        reply([0x10, 0x20, 0x30, 0x40, 0x50, 0x60], 5),
    ])
    .await;

    let options = loopback_options(target)
        .with_probes(2)
        .with_interval(Duration::from_millis(200));
    let found = discover(options).await.unwrap();
    devices.abort();

    let macs: Vec<&str> = found.iter().map(|d| d.mac_address()).collect();
    assert_eq!(macs, vec!["a0b1c2d3e4f5", "102030405060"]);

    assert_eq!(found[0].name(), "R2S2");
    assert_eq!(found[0].host(), "127.0.0.1");
    assert_eq!(found[0].channels(), &[1, 2]);
    assert!(found[0].has_placeholder_key());
    assert_eq!(found[1].name(), "STR1S2");
}

#[tokio::test]
async fn no_replies_yields_empty_set() {
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let options = loopback_options(silent.local_addr().unwrap())
        .with_probes(1)
        .with_interval(Duration::from_millis(100));

    let found = discover(options).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn shutdown_stops_scan_early() {
    let (target, devices) = fake_devices(vec![reply([1, 2, 3, 4, 5, 6], 6)]).await;

    let options = loopback_options(target)
        .with_probes(50)
        .with_interval(Duration::from_secs(1));

    let started = Instant::now();
    let found = discover_until(options, tokio::time::sleep(Duration::from_millis(300)))
        .await
        .unwrap();
    devices.abort();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "RGBW");
}

#[tokio::test]
async fn each_scan_starts_empty() {
    let (target, devices) = fake_devices(vec![reply([9, 9, 9, 9, 9, 9], 3)]).await;
    let options = loopback_options(target)
        .with_probes(1)
        .with_interval(Duration::from_millis(200));

    let first = discover(options.clone()).await.unwrap();
    let second = discover(options).await.unwrap();
    devices.abort();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

/// Returns a loopback address on a port that was free a moment ago.
fn fixed_loopback_addr() -> SocketAddr {
    let socket = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap()
}

#[tokio::test]
async fn back_to_back_scans_on_fixed_port() {
    let (target, devices) = fake_devices(vec![reply([7, 7, 7, 7, 7, 7], 2)]).await;
    let options = DiscoveryOptions::new()
        .with_bind_addr(fixed_loopback_addr())
        .with_target(target)
        .with_probes(1)
        .with_interval(Duration::from_millis(150));

    let first = discover(options.clone()).await;
    let second = discover(options).await;
    devices.abort();

    assert_eq!(first.unwrap().len(), 1);
    assert_eq!(second.unwrap().len(), 1);
}

#[tokio::test]
async fn finished_scan_releases_its_port() {
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let bind = fixed_loopback_addr();
    let options = DiscoveryOptions::new()
        .with_bind_addr(bind)
        .with_target(silent.local_addr().unwrap())
        .with_probes(1)
        .with_interval(Duration::from_millis(50));

    discover(options).await.unwrap();

    // Without reuse flags this bind fails while the scan socket is open.
    assert!(std::net::UdpSocket::bind(bind).is_ok());
}

#[tokio::test]
async fn bind_failure_is_a_socket_error() {
    // TEST-NET-1, never assigned to a local interface.
    let options = DiscoveryOptions::new()
        .with_bind_addr("192.0.2.1:0".parse().unwrap())
        .with_probes(1);

    let err = discover(options).await.unwrap_err();
    assert!(matches!(err, Error::Socket { operation: "bind", .. }));
}
