// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing finished rasters to disk as PNG.

use crate::config::View;
use crate::errors::{RenderError, Result};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the `index`th view is written: `<zoom>x_<index>.png` inside
/// `dir`, with the zoom in its shortest exact decimal form.
pub fn image_path(dir: &Path, view: &View, index: usize) -> PathBuf {
    dir.join(format!("{}x_{}.png", view.zoom, index))
}

/// Creates `dir`, and any parents, if it doesn't exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|cause| RenderError::OutputDir {
        path: dir.display().to_string(),
        cause,
    })
}

/// Encodes `image` as PNG at `path`.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<()> {
    image.save(path).map_err(|cause| RenderError::Output {
        path: path.display().to_string(),
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn file_names_carry_zoom_and_index() {
        let dir = Path::new("out");
        assert_eq!(
            image_path(dir, &View::new(0.0, 0.0, 1.0), 3),
            Path::new("out/1x_3.png")
        );
        assert_eq!(
            image_path(dir, &View::new(0.0, 0.0, 2500.5), 0),
            Path::new("out/2500.5x_0.png")
        );
    }

    #[test]
    fn written_png_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        write_png(&path, &img).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.get_pixel(1, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn nested_output_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn unwritable_path_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.png");
        match write_png(&path, &RgbaImage::new(1, 1)) {
            Err(RenderError::Output { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
