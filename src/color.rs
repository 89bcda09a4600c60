//! Plain color shapes used as cookie payloads.
//!
//! These carry no conversion math and no range checks; they exist so that
//! color preferences can round-trip through
//! [`CookieStore::set_json`](crate::cookies::store::CookieStore::set_json) and
//! [`CookieStore::get_as`](crate::cookies::store::CookieStore::get_as).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Red, green and blue channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue, saturation and lightness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Hue and saturation without a lightness channel, as picked from a color wheel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HueSaturation {
    pub h: f64,
    pub s: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Drop the lightness channel.
    pub const fn hue_saturation(self) -> HueSaturation {
        HueSaturation {
            h: self.h,
            s: self.s,
        }
    }
}

impl HueSaturation {
    pub const fn new(h: f64, s: f64) -> Self {
        Self { h, s }
    }

    pub const fn with_lightness(self, l: f64) -> Hsl {
        Hsl {
            h: self.h,
            s: self.s,
            l,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}
