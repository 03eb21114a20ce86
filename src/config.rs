// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two values that describe a render: where to look (`View`) and
//! how to draw it (`RenderConfig`).  Both are plain values; once a
//! render starts they are only ever read.

use crate::errors::{RenderError, Result};
use serde::{Deserialize, Serialize};

/// A window onto the complex plane: a center point and a zoom.  At a
/// zoom of 1 the window is one unit tall.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Real part of the center.
    #[serde(rename = "XCenter")]
    pub center_x: f64,
    /// Imaginary part of the center.  Positive is up in the image.
    #[serde(rename = "YCenter")]
    pub center_y: f64,
    /// Magnification; must be positive.
    #[serde(rename = "Zoom")]
    pub zoom: f64,
}

impl View {
    /// Constructor.
    pub fn new(center_x: f64, center_y: f64, zoom: f64) -> Self {
        View {
            center_x,
            center_y,
            zoom,
        }
    }

    /// The whole set, roughly centered.
    pub fn overview() -> Self {
        View::new(-0.75, 0.0, 1.0)
    }

    /// Rejects views the renderer cannot map pixels into.
    pub fn validate(&self) -> Result<()> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(RenderError::invalid(format!(
                "zoom must be positive and finite, got {}",
                self.zoom
            )));
        }
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(RenderError::invalid(format!(
                "center must be finite, got ({}, {})",
                self.center_x, self.center_y
            )));
        }
        Ok(())
    }
}

/// How to draw a view.  Shared read-only by every worker for the
/// duration of a render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Jittered samples averaged into each pixel.
    pub samples_per_pixel: u32,
    /// Iteration budget before a point is declared inside the set.
    pub max_iterations: u32,
    /// Added to the smooth escape value before it becomes a hue.
    /// Reduced modulo 1 when used.
    pub hue_offset: f64,
    /// Average samples in linear light rather than display space.
    pub linear_mixing: bool,
    /// Paint points inside the set black; white otherwise.
    pub inside_set_is_black: bool,
    /// Map escape speed to lightness instead of hue.
    pub grayscale: bool,
    /// Base seed from which every worker's generator is derived.
    pub rng_seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1024,
            height: 1024,
            samples_per_pixel: 50,
            max_iterations: 1500,
            hue_offset: 0.0,
            linear_mixing: true,
            inside_set_is_black: true,
            grayscale: false,
            rng_seed: 0,
        }
    }
}

impl RenderConfig {
    /// Fails fast on anything the renderer would otherwise have to
    /// clamp or divide by.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::invalid(format!(
                "image must have a non-zero size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::invalid("samples per pixel must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(RenderError::invalid("max iterations must be at least 1"));
        }
        if !self.hue_offset.is_finite() {
            return Err(RenderError::invalid(format!(
                "hue offset must be finite, got {}",
                self.hue_offset
            )));
        }
        Ok(())
    }

    /// The hue offset folded into `[0, 1)`.
    pub fn hue_offset(&self) -> f64 {
        wrap_unit(self.hue_offset)
    }
}

/// Folds any finite value into `[0, 1)`.  `rem_euclid` can round a
/// tiny negative value up to exactly 1.0, which is folded to 0.
pub(crate) fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
