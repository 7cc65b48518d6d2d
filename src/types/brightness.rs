// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness and position levels.

use std::fmt;

use crate::error::ValueError;

/// Dimmer output level (0-255).
///
/// Dimmable devices take and report brightness as a raw byte, where 0 is
/// off and 255 is full output.
///
/// # Examples
///
/// ```
/// use foxrest_lib::types::Brightness;
///
/// let half = Brightness::new(128).unwrap();
/// assert_eq!(half.value(), 128);
///
/// assert!(Brightness::new(-1).is_err());
/// assert!(Brightness::new(256).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Brightness(u8);

impl Brightness {
    /// Output off.
    pub const MIN: Self = Self(0);

    /// Full output.
    pub const MAX: Self = Self(u8::MAX);

    /// Creates a brightness level from an unchecked integer.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [0, 255].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        ValueError::check("brightness", value, 0, 255)?;
        // Range checked above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Returns the raw level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cover opening or tilt level as a percentage (0-100).
///
/// 0 is fully closed, 100 fully open.
///
/// # Examples
///
/// ```
/// use foxrest_lib::types::Level;
///
/// assert_eq!(Level::OPEN.value(), 100);
/// assert!(Level::new(150).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u8);

impl Level {
    /// Fully closed.
    pub const CLOSED: Self = Self(0);

    /// Fully open.
    pub const OPEN: Self = Self(100);

    /// Creates a level from an unchecked integer.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [0, 100].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        ValueError::check("level", value, 0, 100)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_boundaries() {
        assert_eq!(Brightness::new(0).unwrap(), Brightness::MIN);
        assert_eq!(Brightness::new(255).unwrap(), Brightness::MAX);
        assert!(Brightness::new(-1).is_err());
        assert!(Brightness::new(256).is_err());
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(Level::new(0).unwrap(), Level::CLOSED);
        assert_eq!(Level::new(100).unwrap(), Level::OPEN);
        assert!(Level::new(-5).is_err());
        assert!(Level::new(101).is_err());
    }

    #[test]
    fn level_display() {
        assert_eq!(Level::new(42).unwrap().to_string(), "42%");
    }
}
