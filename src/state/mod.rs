// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking types.
//!
//! [`AvailabilitySink`] records whether the most recent call reached the
//! device. [`ChannelStates`] caches the on/off state of each output channel
//! between refreshes.
//!
//! # Examples
//!
//! ```
//! use foxrest_lib::state::{AvailabilitySink, ChannelReading, ChannelStates};
//!
//! let sink = AvailabilitySink::new();
//! sink.mark_unavailable();
//! assert!(!sink.is_available());
//!
//! let mut states = ChannelStates::new(1);
//! states.apply(None, ChannelReading::Single(true));
//! assert!(states.is_on(1));
//! ```

mod availability;
mod device_state;

pub use availability::{Availability, AvailabilitySink};
pub use device_state::{ChannelReading, ChannelStates};
