// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types with client-side range guards.
//!
//! Constructors validate their input so that out-of-range values are caught
//! before any request leaves the host.

mod brightness;
mod hsv;
mod power;

pub use brightness::{Brightness, Level};
pub use hsv::{HsvColor, HsvUpdate, percent_to_byte};
pub use power::{Channel, PowerState};
