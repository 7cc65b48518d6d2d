// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached per-channel on/off state.

use crate::types::Channel;

/// Result of a state fetch.
///
/// A device answers `get_state/` either with a single `state` field or with
/// per-channel fields. The per-channel form always carries two entries; a
/// channel the device did not report reads as off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelReading {
    /// The device reported one state.
    Single(bool),
    /// The device reported channel 1 and channel 2.
    Channels([bool; 2]),
}

impl ChannelReading {
    /// Returns the state of a channel in this reading.
    ///
    /// A single state applies to every channel.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> bool {
        match self {
            Self::Single(on) => *on,
            Self::Channels(states) => states[channel.position()],
        }
    }

    /// Returns `true` if any reported channel is on.
    #[must_use]
    pub fn any_on(&self) -> bool {
        match self {
            Self::Single(on) => *on,
            Self::Channels(states) => states.iter().any(|on| *on),
        }
    }
}

impl Default for ChannelReading {
    fn default() -> Self {
        Self::Single(false)
    }
}

/// Last known on/off state of each output channel.
///
/// # Examples
///
/// ```
/// use foxrest_lib::state::{ChannelReading, ChannelStates};
///
/// let mut states = ChannelStates::new(2);
/// states.apply(None, ChannelReading::Channels([true, false]));
/// assert!(states.is_on(1));
/// assert!(!states.is_on(2));
/// assert!(!states.is_on(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelStates {
    states: Vec<bool>,
}

impl ChannelStates {
    /// Creates `count` channels, all off.
    #[must_use]
    pub fn new(count: u8) -> Self {
        Self {
            states: vec![false; usize::from(count)],
        }
    }

    /// Returns the number of tracked channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no channels are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the cached state of a 1-based channel; unknown channels read
    /// as off.
    #[must_use]
    pub fn is_on(&self, channel: u8) -> bool {
        channel
            .checked_sub(1)
            .and_then(|i| self.states.get(usize::from(i)))
            .copied()
            .unwrap_or(false)
    }

    /// Returns `true` if any channel is on.
    #[must_use]
    pub fn any_on(&self) -> bool {
        self.states.iter().any(|on| *on)
    }

    /// Returns the cached states in channel order.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.states
    }

    /// Sets one channel, or all when `channel` is `None`.
    pub fn set(&mut self, channel: Option<Channel>, on: bool) {
        match channel {
            Some(channel) => {
                if let Some(slot) = self.states.get_mut(channel.position()) {
                    *slot = on;
                }
            }
            None => self.states.iter_mut().for_each(|slot| *slot = on),
        }
    }

    /// Folds a fetched reading into the cache.
    pub fn apply(&mut self, requested: Option<Channel>, reading: ChannelReading) {
        match reading {
            ChannelReading::Single(on) => self.set(requested, on),
            ChannelReading::Channels(states) => {
                for (slot, on) in self.states.iter_mut().zip(states) {
                    *slot = on;
                }
            }
        }
    }

    /// Turns every channel off.
    pub fn reset(&mut self) {
        self.set(None, false);
    }
}
