// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device reachability tracking.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::TransportError;

/// Reachability of a device, as seen by its last call.
///
/// Starts at [`Availability::Unknown`] and moves between
/// [`Available`](Availability::Available) and
/// [`Unavailable`](Availability::Unavailable) as calls succeed or fail.
/// No state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Availability {
    /// No call has completed yet.
    #[default]
    Unknown,
    /// The last call reached the device.
    Available,
    /// The last call could not reach the device.
    Unavailable,
}

impl Availability {
    /// Returns `true` only for [`Availability::Available`].
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Shared handle through which a transport reports call outcomes.
///
/// A device creates the sink, hands a clone to its transport at
/// construction and reads the current value back. Subscribers created with
/// [`AvailabilitySink::subscribe`] are woken on every transition.
///
/// Reporting never blocks and never fails, so it is safe to call on the
/// request path.
///
/// # Examples
///
/// ```
/// use foxrest_lib::state::{Availability, AvailabilitySink};
///
/// let sink = AvailabilitySink::new();
/// assert_eq!(sink.current(), Availability::Unknown);
///
/// sink.mark_available();
/// assert!(sink.is_available());
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilitySink {
    tx: Arc<watch::Sender<Availability>>,
}

impl AvailabilitySink {
    /// Creates a sink in the [`Availability::Unknown`] state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Availability::Unknown);
        Self { tx: Arc::new(tx) }
    }

    /// Records the outcome of a transport call.
    ///
    /// Success and HTTP status errors mean the device answered. Connection
    /// failures and timeouts mean it did not. Local argument rejections are
    /// ignored since no request was sent.
    pub fn report(&self, outcome: Result<(), &TransportError>) {
        match outcome {
            Ok(()) => self.mark_available(),
            Err(e) if e.is_unreachable() => self.mark_unavailable(),
            Err(TransportError::HttpStatus(_)) => self.mark_available(),
            Err(_) => {}
        }
    }

    /// Marks the device reachable.
    pub fn mark_available(&self) {
        self.set(Availability::Available);
    }

    /// Marks the device unreachable.
    pub fn mark_unavailable(&self) {
        self.set(Availability::Unavailable);
    }

    /// Returns the current availability.
    #[must_use]
    pub fn current(&self) -> Availability {
        *self.tx.borrow()
    }

    /// Returns `true` if the last call reached the device.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.current().is_available()
    }

    /// Creates a receiver that observes availability transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Availability> {
        self.tx.subscribe()
    }

    fn set(&self, next: Availability) {
        self.tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            tracing::debug!(from = ?*current, to = ?next, "Device availability changed");
            *current = next;
            true
        });
    }
}

impl Default for AvailabilitySink {
    fn default() -> Self {
        Self::new()
    }
}
