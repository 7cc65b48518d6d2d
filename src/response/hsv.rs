// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `get_hsv/` payload.

use serde::Deserialize;

use crate::types::{HsvColor, percent_to_byte};

/// Raw `h`, `s`, `v` fields of an RGBW controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct HsvPayload {
    #[serde(default, deserialize_with = "super::lenient::int")]
    h: Option<i64>,
    #[serde(default, deserialize_with = "super::lenient::int")]
    s: Option<i64>,
    #[serde(default, deserialize_with = "super::lenient::int")]
    v: Option<i64>,
}

impl HsvPayload {
    /// Converts to a color, scaling `v` from percent to 0-255.
    ///
    /// Missing, malformed or out-of-range components read as 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use foxrest_lib::response::{HsvPayload, Response};
    ///
    /// let body = br#"{"status":"ok","h":"100","s":"80","v":"70"}"#.to_vec();
    /// let color = Response::<HsvPayload>::decode(Ok(body)).body.color();
    /// assert_eq!((color.hue, color.saturation, color.value), (100, 80, 179));
    /// ```
    #[must_use]
    pub fn color(&self) -> HsvColor {
        HsvColor {
            hue: in_range(self.h, 359).and_then(|h| u16::try_from(h).ok()).unwrap_or(0),
            saturation: percent(self.s),
            value: percent_to_byte(percent(self.v)),
        }
    }
}

fn in_range(value: Option<i64>, max: i64) -> Option<i64> {
    value.filter(|v| (0..=max).contains(v))
}

fn percent(value: Option<i64>) -> u8 {
    in_range(value, 100)
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;

    fn decode(json: &str) -> HsvColor {
        Response::<HsvPayload>::decode(Ok(json.as_bytes().to_vec())).body.color()
    }

    #[test]
    fn full_scale_value() {
        let c = decode(r#"{"status":"ok","h":359,"s":100,"v":100}"#);
        assert_eq!((c.hue, c.saturation, c.value), (359, 100, 255));
    }

    #[test]
    fn missing_fields_are_zero() {
        assert_eq!(decode(r#"{"status":"ok"}"#), HsvColor::default());
    }

    #[test]
    fn malformed_fields_are_zero() {
        let c = decode(r#"{"status":"ok","h":"red","s":400,"v":-3}"#);
        assert_eq!(c, HsvColor::default());
    }
}
