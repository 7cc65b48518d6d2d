// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `get_open_level/` and `get_tilt_level/` payload.

use serde::Deserialize;

use crate::types::Level;

/// Cover or tilt opening level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct LevelPayload {
    #[serde(default, deserialize_with = "super::lenient::int")]
    level: Option<i64>,
}

impl LevelPayload {
    /// Returns the level; missing or invalid values read as closed.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
            .and_then(|v| Level::new(v).ok())
            .unwrap_or(Level::CLOSED)
    }
}
