// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `foxrest` library.
//!
//! Only construction-time misconfiguration is fatal. Failures that happen
//! while talking to a device are reported as [`TransportError`] through the
//! device availability sink and degrade to sentinel values; they never
//! surface as `Err` from a fetch or update operation.

use std::io;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction arguments.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The device type code does not map to a supported device.
    #[error("unsupported device type {device_type}")]
    UnsupportedDevice {
        /// The raw device type code.
        device_type: u16,
    },

    /// A device call failed at the transport level.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A discovery datagram could not be interpreted.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A client-side range guard rejected a value.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A UDP socket operation failed during discovery.
    #[error("socket {operation} failed: {source}")]
    Socket {
        /// The socket operation that failed.
        operation: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Creates a socket error for the given operation.
    pub(crate) fn socket(operation: &'static str, source: io::Error) -> Self {
        Self::Socket { operation, source }
    }
}

/// Errors raised while validating construction arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// The device type exists but belongs to another capability set.
    #[error("device type {device_type} cannot be driven as a {expected} device")]
    CapabilityMismatch {
        /// The raw device type code.
        device_type: u16,
        /// The capability the caller asked for.
        expected: &'static str,
    },

    /// A device with the same MAC address is already registered.
    #[error("device {0} is already registered")]
    DuplicateDevice(String),

    /// A configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Document(String),
}

/// Errors produced by a transport call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The device answered with a non-success HTTP status.
    #[error("device answered with HTTP {0}")]
    HttpStatus(u16),

    /// The call was rejected locally before any request was made.
    #[error("invalid call argument: {0}")]
    InvalidArgument(String),
}

impl TransportError {
    /// Returns `true` if this error means the device could not be reached.
    ///
    /// Local argument rejections and HTTP status errors say nothing about
    /// reachability: in the first case no request was sent, in the second
    /// the device did answer.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            Self::Http(_) => true,
            Self::Timeout(_) | Self::ConnectionFailed(_) => true,
            Self::HttpStatus(_) | Self::InvalidArgument(_) => false,
        }
    }
}

/// Errors raised while parsing discovery datagrams.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The datagram is shorter than a complete reply.
    #[error("datagram too short: {len} bytes, need at least {min}")]
    TooShort {
        /// Received length.
        len: usize,
        /// Minimum length of a reply.
        min: usize,
    },

    /// The datagram does not start with the reply header.
    #[error("datagram does not carry the discovery reply header")]
    HeaderMismatch,

    /// The reply names a device type this library does not know.
    #[error("unknown device type {0}")]
    UnknownDeviceType(u16),

    /// The reply names a device type that cannot be driven.
    #[error("device type {0} is not supported")]
    UnsupportedDeviceType(u16),
}

/// Errors raised by client-side range guards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("{name} {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// What the value represents.
        name: &'static str,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The value that was provided.
        actual: i64,
    },

    /// An on/off string was not recognised.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),
}

impl ValueError {
    /// Checks that `actual` lies in `[min, max]`.
    pub(crate) fn check(
        name: &'static str,
        actual: i64,
        min: i64,
        max: i64,
    ) -> std::result::Result<(), Self> {
        if (min..=max).contains(&actual) {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                name,
                min,
                max,
                actual,
            })
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
