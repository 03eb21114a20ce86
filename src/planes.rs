//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! (the image), and a window onto the complex plane described by a
//! `View`.  Sample positions are real-valued pixel coordinates: the
//! integral pixel plus the jitter inside it.
use crate::config::View;
use crate::errors::{RenderError, Result};
use num::Complex;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub u32, pub u32);

/// Describes the x, y of a pixel in the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub u32, pub u32);

/// Maps sample positions in the image to points on the complex plane.
///
/// The window is `1/zoom` tall and `aspect/zoom` wide.  The real part
/// grows to the right.  The imaginary part is computed as the row's
/// offset from the middle minus the center's imaginary part, which is
/// the conjugate of the point actually displayed at that row; the set
/// is symmetric about the real axis, so the image comes out the right
/// way up with positive imaginary values at the top.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The size of the image.
    pub integral_plane: IntegralPlane,
    /// The window onto the complex plane.
    pub view: View,
    // Width and height of the window on the complex plane.
    span: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the image and the view to map
    /// it onto.
    pub fn new(width: u32, height: u32, view: View) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(RenderError::invalid(format!(
                "cannot map an empty {}x{} image",
                width, height
            )));
        }
        view.validate()?;

        let aspect = f64::from(width) / f64::from(height);
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            view,
            span: (aspect / view.zoom, 1.0 / view.zoom),
        })
    }

    /// The total number of pixels in the image.
    pub fn len(&self) -> usize {
        self.integral_plane.0 as usize * self.integral_plane.1 as usize
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps a real-valued position in the image, `(x, y)` in pixels,
    /// to the complex plane.
    #[inline]
    pub fn sample_to_point(&self, x: f64, y: f64) -> Complex<f64> {
        let width = f64::from(self.integral_plane.0);
        let height = f64::from(self.integral_plane.1);
        Complex::new(
            self.span.0 * (x / width - 0.5) + self.view.center_x,
            self.span.1 * (y / height - 0.5) - self.view.center_y,
        )
    }

    /// Maps a pixel, plus a jitter in `[0, 1)` on each axis, to the
    /// complex plane.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel, jitter: (f64, f64)) -> Complex<f64> {
        self.sample_to_point(
            f64::from(pixel.0) + jitter.0,
            f64::from(pixel.1) + jitter.1,
        )
    }
}
