// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns an escape result into a colour.
//!
//! Counting iterations alone paints the outside of the set in flat
//! bands, one per iteration count.  The normalized iteration count
//! folds the magnitude at escape back into the count, which gives a
//! continuous value and smooth gradients.  That value, shifted by the
//! configured hue offset and wrapped into `[0, 1)`, picks a hue at
//! full saturation and half lightness; in grayscale mode it picks a
//! lightness instead.

use crate::config::{wrap_unit, RenderConfig};
use crate::escape::Escape;
use image::Rgba;
use num::clamp;
use std::f64::consts::LN_2;

/// An opaque 8-bit display colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White.
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Constructor.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// The three channels, red first.
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, 255])
    }
}

/// The normalized iteration count: the discrete escape step corrected
/// by how far past the bailout the orbit landed, divided by the
/// iteration budget.  `magnitude` must be past the bailout radius, so
/// both logarithms are defined.
#[inline]
pub fn smooth_escape(iterations: u32, magnitude: f64, max_iterations: u32) -> f64 {
    (f64::from(iterations) + 1.0 - magnitude.ln().ln() / LN_2) / f64::from(max_iterations)
}

/// Colour for one sample.  `config.max_iterations` must be at least 1;
/// `RenderConfig::validate` guarantees it.
pub fn color_for(result: Escape, config: &RenderConfig) -> Color {
    match result {
        Escape::Bounded => {
            if config.inside_set_is_black {
                Color::BLACK
            } else {
                Color::WHITE
            }
        }
        Escape::Escaped {
            iterations,
            magnitude,
        } => {
            let smooth = smooth_escape(iterations, magnitude, config.max_iterations);
            let smooth = if smooth.is_finite() { smooth } else { 0.0 };
            let hue = wrap_unit(smooth + config.hue_offset());
            if config.grayscale {
                hsl_to_rgb(0.0, 0.0, hue)
            } else {
                hsl_to_rgb(hue, 1.0, 0.5)
            }
        }
    }
}

/// Standard HSL to RGB.  All three inputs are in `[0, 1]`.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    if saturation == 0.0 {
        let v = to_byte(lightness);
        return Color::new(v, v, v);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    Color::new(
        to_byte(hue_to_channel(p, q, hue + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, hue)),
        to_byte(hue_to_channel(p, q, hue - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_byte(v: f64) -> u8 {
    clamp((v * 255.0).round(), 0.0, 255.0) as u8
}
