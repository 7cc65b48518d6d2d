// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off state and channel addressing.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// On/off state of a relay or output channel.
///
/// Devices spell the state as lowercase `on` / `off` both in `set_state`
/// query parameters and in `get_state` responses.
///
/// # Examples
///
/// ```
/// use foxrest_lib::types::PowerState;
///
/// assert_eq!(PowerState::On.as_str(), "on");
/// assert_eq!("OFF".parse::<PowerState>().unwrap(), PowerState::Off);
/// assert!(PowerState::from(true).is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Output is off.
    Off,
    /// Output is on.
    On,
}

impl PowerState {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns `true` for [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Ok(Self::Off),
            "on" | "1" => Ok(Self::On),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// Index of an output channel on a multi-channel device.
///
/// Channels are numbered from 1. The device protocol addresses at most two
/// channels.
///
/// # Examples
///
/// ```
/// use foxrest_lib::types::Channel;
///
/// let second = Channel::new(2).unwrap();
/// assert_eq!(second.value(), 2);
/// assert!(Channel::new(0).is_err());
/// assert!(Channel::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Highest channel index the protocol can address.
    pub const MAX: u8 = 2;

    /// The first channel.
    pub const ONE: Self = Self(1);

    /// The second channel.
    pub const TWO: Self = Self(2);

    /// Creates a channel index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` unless `index` is 1 or 2.
    pub fn new(index: u8) -> Result<Self, ValueError> {
        ValueError::check("channel", i64::from(index), 1, i64::from(Self::MAX))?;
        Ok(Self(index))
    }

    /// Returns the 1-based channel index.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the 0-based position of this channel.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
