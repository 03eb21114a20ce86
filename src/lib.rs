#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  Points outside the set escape,
//! and how quickly they escape is the number used to colour them.
//!
//! This crate renders a view of the set (a center and a zoom) into an
//! RGBA raster.  Every pixel is sampled several times at jittered
//! positions inside the pixel, each sample is coloured from a smooth
//! (continuous) escape count, and the samples are averaged in linear
//! light so the anti-aliased edges don't come out darker than they
//! should.  Rows of the image are handed out to a fixed pool of
//! worker threads; each worker owns its own random number generator
//! and the rows it writes, so nothing on the hot path takes a lock.

pub mod config;
pub mod errors;
pub mod escape;
pub mod jitter;
pub mod mixing;
pub mod output;
pub mod palette;
pub mod planes;
pub mod render;
pub mod views;

pub use config::{RenderConfig, View};
pub use errors::{RenderError, Result};
pub use escape::{evaluate, Escape};
pub use jitter::JitterRng;
pub use mixing::{accumulate, PixelAccumulator};
pub use palette::{color_for, Color};
pub use render::{render, render_with_threads};
