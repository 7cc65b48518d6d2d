// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roller shutter controller (STR1S2).
//!
//! A cover has a position and a tilt, both 0-100 where 0 is closed. It has
//! no on/off state, so [`CoverDevice`] offers no state operations at all.

use crate::capabilities::Capability;
use crate::command::ApiCall;
use crate::error::Error;
use crate::protocol::Transport;
use crate::response::{Ack, LevelPayload, Response};
use crate::state::AvailabilitySink;
use crate::types::Level;

use super::{DeviceCore, DeviceIdentity};

/// Which level a call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Position,
    Tilt,
}

/// Cover position and tilt control.
#[derive(Debug)]
pub struct CoverDevice<T> {
    core: DeviceCore<T>,
    position: Level,
    tilt: Level,
}

impl<T: Transport> CoverDevice<T> {
    /// Creates a cover.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedDevice` for an unknown type code and
    /// `ConfigError::CapabilityMismatch` if the type is not a cover.
    pub fn new(
        identity: DeviceIdentity,
        transport: T,
        availability: AvailabilitySink,
    ) -> Result<Self, Error> {
        let core = DeviceCore::new(identity, transport, availability, &[Capability::Cover], "cover")?;
        Ok(Self {
            core,
            position: Level::CLOSED,
            tilt: Level::CLOSED,
        })
    }

    /// Opens fully.
    pub async fn open(&mut self) -> bool {
        self.set_level(Axis::Position, Level::OPEN).await
    }

    /// Closes fully.
    pub async fn close(&mut self) -> bool {
        self.set_level(Axis::Position, Level::CLOSED).await
    }

    /// Moves to a position (0-100). Out-of-range values make no call.
    pub async fn set_position(&mut self, position: i64) -> bool {
        self.set_checked(Axis::Position, position).await
    }

    /// Moves the tilt to a level (0-100). Out-of-range values make no call.
    pub async fn set_tilt_position(&mut self, position: i64) -> bool {
        self.set_checked(Axis::Tilt, position).await
    }

    /// Reads the cover position. A failed read keeps the cached value.
    pub async fn fetch_cover_level(&mut self) -> bool {
        self.fetch_level(Axis::Position).await
    }

    /// Reads the tilt level. A failed read keeps the cached value.
    pub async fn fetch_tilt_level(&mut self) -> bool {
        self.fetch_level(Axis::Tilt).await
    }

    /// Refreshes position and tilt.
    pub async fn refresh(&mut self) {
        self.fetch_cover_level().await;
        self.fetch_tilt_level().await;
    }

    /// Fetches device info, then refreshes.
    pub async fn refresh_all(&mut self) {
        self.fetch_device_info().await;
        self.refresh().await;
    }

    async fn set_checked(&mut self, axis: Axis, level: i64) -> bool {
        match Level::new(level) {
            Ok(level) => self.set_level(axis, level).await,
            Err(e) => {
                tracing::warn!(mac = %self.core.mac_address(), error = %e, ?axis, "Cover level rejected");
                false
            }
        }
    }

    async fn set_level(&mut self, axis: Axis, level: Level) -> bool {
        let call = match axis {
            Axis::Position => ApiCall::SetOpenLevel(level),
            Axis::Tilt => ApiCall::SetTiltLevel(level),
        };
        let response: Response<Ack> = self.core.request(call).await;
        if !response.is_ok() {
            return false;
        }
        *self.slot(axis) = level;
        true
    }

    async fn fetch_level(&mut self, axis: Axis) -> bool {
        let call = match axis {
            Axis::Position => ApiCall::GetOpenLevel,
            Axis::Tilt => ApiCall::GetTiltLevel,
        };
        let response: Response<LevelPayload> = self.core.request(call).await;
        if !response.is_ok() {
            return false;
        }
        *self.slot(axis) = response.body.level();
        true
    }

    fn slot(&mut self, axis: Axis) -> &mut Level {
        match axis {
            Axis::Position => &mut self.position,
            Axis::Tilt => &mut self.tilt,
        }
    }
}

impl<T> CoverDevice<T> {
    /// Returns the cached position.
    #[must_use]
    pub fn position(&self) -> Level {
        self.position
    }

    /// Returns the cached tilt.
    #[must_use]
    pub fn tilt_position(&self) -> Level {
        self.tilt
    }

    /// Returns `true` if the cover is at least partly open.
    #[must_use]
    pub fn is_opened(&self) -> bool {
        self.position > Level::CLOSED
    }

    /// Returns `true` if the cover is fully closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.position == Level::CLOSED
    }
}

device_common!(CoverDevice);
