// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a render, or the collaborators around it,
//! from finishing.  The renderer itself works on numbers in memory;
//! the only ways it can fail are a bad configuration, which is caught
//! before any worker starts, and the operating system refusing us a
//! thread.

// failure's derive expands into impls inside an anonymous const.
#![allow(non_local_definitions)]

use failure::Fail;
use std::io;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, RenderError>;

/// The error taxonomy of the renderer and its file collaborators.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// A configuration value the renderer cannot work with.  Values are
    /// never clamped into range; they are rejected.
    #[fail(display = "invalid render configuration: {}", reason)]
    InvalidConfig {
        /// What was wrong, in words.
        reason: String,
    },

    /// The raster handed to the renderer is not the size the
    /// configuration describes.
    #[fail(
        display = "image is {}x{} but the configuration asks for {}x{}",
        image_width, image_height, width, height
    )]
    DimensionMismatch {
        /// Width of the raster.
        image_width: u32,
        /// Height of the raster.
        image_height: u32,
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },

    /// The operating system would not give us a worker thread.
    #[fail(display = "could not start render worker {}: {}", worker, cause)]
    Spawn {
        /// Index of the worker that failed to start.
        worker: usize,
        /// The underlying error.
        #[cause]
        cause: io::Error,
    },

    /// A worker died mid-render; the raster is incomplete.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The views file exists but could not be read.
    #[fail(display = "could not read views from {}: {}", path, cause)]
    ViewsRead {
        /// The file we tried to read.
        path: String,
        /// The underlying error.
        #[cause]
        cause: io::Error,
    },

    /// The views file is not the JSON we expect.
    #[fail(display = "could not parse views in {}: {}", path, cause)]
    ViewsParse {
        /// The file we tried to parse.
        path: String,
        /// The underlying error.
        #[cause]
        cause: serde_json::Error,
    },

    /// The output directory could not be created.
    #[fail(display = "could not create output directory {}: {}", path, cause)]
    OutputDir {
        /// The directory we tried to create.
        path: String,
        /// The underlying error.
        #[cause]
        cause: io::Error,
    },

    /// A rendered image could not be encoded or written.
    #[fail(display = "could not write {}: {}", path, cause)]
    Output {
        /// The file we tried to write.
        path: String,
        /// The underlying error.
        #[cause]
        cause: image::ImageError,
    },
}

impl RenderError {
    pub(crate) fn invalid<S: Into<String>>(reason: S) -> Self {
        RenderError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
