// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The list of views to render, read from a JSON file of the form
//! `{"Locations": [{"XCenter": .., "YCenter": .., "Zoom": ..}, ..]}`.

use crate::config::View;
use crate::errors::{RenderError, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// The on-disk shape of a views file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewsFile {
    /// The views, in render order.
    #[serde(rename = "Locations", default)]
    pub views: Vec<View>,
}

impl ViewsFile {
    /// Parses a views file from JSON text.  `origin` names the source
    /// in error messages.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|cause| RenderError::ViewsParse {
            path: origin.to_string(),
            cause,
        })
    }
}

/// Reads the views in `path` and, if `overview` is set, appends the
/// whole-set view after them.  A missing file is not an error: the
/// list is whatever the overview contributes.  Every view is validated
/// here, so a bad zoom in the file is reported before anything renders.
pub fn load_views<P: AsRef<Path>>(path: P, overview: bool) -> Result<Vec<View>> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let mut views = match fs::read_to_string(path) {
        Ok(json) => ViewsFile::from_json(&json, &display)?.views,
        Err(ref e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} not found, rendering the overview only", display);
            Vec::new()
        }
        Err(cause) => {
            return Err(RenderError::ViewsRead {
                path: display,
                cause,
            })
        }
    };

    if overview {
        views.push(View::overview());
    }
    for view in &views {
        view.validate()?;
    }

    info!("Found {} views.", views.len());
    Ok(views)
}
