// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSV color types for RGBW controllers.
//!
//! RGBW controllers take hue in degrees and saturation/value as
//! percentages. The value channel is read back and cached as a 0-255
//! brightness so it lines up with the dimmer devices.

use std::fmt;

use crate::error::ValueError;

/// Converts a 0-100 percentage to a 0-255 brightness, rounding to nearest.
///
/// # Examples
///
/// ```
/// use foxrest_lib::types::percent_to_byte;
///
/// assert_eq!(percent_to_byte(0), 0);
/// assert_eq!(percent_to_byte(70), 179);
/// assert_eq!(percent_to_byte(100), 255);
/// ```
#[must_use]
pub fn percent_to_byte(percent: u8) -> u8 {
    let scaled = (u32::from(percent.min(100)) * 255 + 50) / 100;
    // At most 255 after the clamp above.
    #[allow(clippy::cast_possible_truncation)]
    let byte = scaled as u8;
    byte
}

/// Color as last reported by an RGBW controller.
///
/// `value` is the brightness scaled to 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HsvColor {
    /// Hue in degrees (0-359).
    pub hue: u16,
    /// Saturation percentage (0-100).
    pub saturation: u8,
    /// Brightness (0-255).
    pub value: u8,
}

impl HsvColor {
    /// Returns `(hue, saturation)`.
    #[must_use]
    pub fn hs(&self) -> (u16, u8) {
        (self.hue, self.saturation)
    }
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.hue, self.saturation, self.value)
    }
}

/// A validated partial HSV update.
///
/// Each component is optional; omitted components are left unchanged on
/// the device. Present components must lie in hue [1, 359], saturation
/// [1, 100] and value [1, 100]. Out-of-range input is rejected, never
/// clamped.
///
/// # Examples
///
/// ```
/// use foxrest_lib::types::HsvUpdate;
///
/// let update = HsvUpdate::new(Some(100), Some(80), Some(70)).unwrap();
/// assert_eq!(update.hue(), Some(100));
///
/// assert!(HsvUpdate::new(Some(360), None, None).is_err());
/// assert!(HsvUpdate::new(None, Some(0), None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HsvUpdate {
    hue: Option<u16>,
    saturation: Option<u8>,
    value: Option<u8>,
}

impl HsvUpdate {
    /// Validates and creates an update.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for the first component outside
    /// its accepted range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(
        hue: Option<i64>,
        saturation: Option<i64>,
        value: Option<i64>,
    ) -> Result<Self, ValueError> {
        if let Some(h) = hue {
            ValueError::check("hue", h, 1, 359)?;
        }
        if let Some(s) = saturation {
            ValueError::check("saturation", s, 1, 100)?;
        }
        if let Some(v) = value {
            ValueError::check("value", v, 1, 100)?;
        }
        Ok(Self {
            hue: hue.map(|h| h as u16),
            saturation: saturation.map(|s| s as u8),
            value: value.map(|v| v as u8),
        })
    }

    /// Hue in degrees, if set.
    #[must_use]
    pub fn hue(&self) -> Option<u16> {
        self.hue
    }

    /// Saturation percentage, if set.
    #[must_use]
    pub fn saturation(&self) -> Option<u8> {
        self.saturation
    }

    /// Value percentage, if set.
    #[must_use]
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    /// Applies this update on top of a cached color.
    #[must_use]
    pub fn apply_to(&self, color: HsvColor) -> HsvColor {
        HsvColor {
            hue: self.hue.unwrap_or(color.hue),
            saturation: self.saturation.unwrap_or(color.saturation),
            value: self.value.map_or(color.value, percent_to_byte),
        }
    }
}
