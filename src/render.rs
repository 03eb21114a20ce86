// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The row-parallel renderer.
//!
//! The raster is cut into rows, and the rows are handed out one at a
//! time over a rendezvous channel to a fixed pool of worker threads.
//! Each row travels as a `&mut [u8]` slice of the raster, so a worker
//! owns the pixels it writes outright: no two workers can ever see the
//! same row, and the buffer needs no lock.  Each worker also owns its
//! own jitter generator, derived from the base seed and the worker's
//! index.  The channel is the only thing the workers share; when the
//! last row has been sent it is dropped, the workers drain out, and
//! the scope joins them.

use crate::config::{RenderConfig, View};
use crate::errors::{RenderError, Result};
use crate::escape::evaluate;
use crate::jitter::JitterRng;
use crate::mixing::PixelAccumulator;
use crate::palette::{color_for, Color};
use crate::planes::{Pixel, PlaneMapper};
use crossbeam::channel;
use image::RgbaImage;
use log::{debug, trace};

const CHANNELS: usize = 4;

/// Renders `view` into `image`, using one worker per hardware thread.
/// Blocks until every row has been written.
pub fn render(image: &mut RgbaImage, view: View, config: &RenderConfig) -> Result<()> {
    render_with_threads(image, view, config, num_cpus::get())
}

/// As `render`, with an explicit worker count.  Given the same view,
/// configuration and a single worker, the output is identical from run
/// to run.
pub fn render_with_threads(
    image: &mut RgbaImage,
    view: View,
    config: &RenderConfig,
    threads: usize,
) -> Result<()> {
    config.validate()?;
    if threads == 0 {
        return Err(RenderError::invalid("at least one render worker is required"));
    }
    if image.dimensions() != (config.width, config.height) {
        return Err(RenderError::DimensionMismatch {
            image_width: image.width(),
            image_height: image.height(),
            width: config.width,
            height: config.height,
        });
    }
    let plane = PlaneMapper::new(config.width, config.height, view)?;

    let height = config.height as usize;
    let stride = config.width as usize * CHANNELS;
    let pixels: &mut [u8] = &mut **image;
    let plane = &plane;

    debug!(
        "rendering {:?} at {}x{} with {} workers, {} samples, {} iterations",
        view, config.width, config.height, threads, config.samples_per_pixel, config.max_iterations
    );

    crossbeam::scope(|spawner| -> Result<()> {
        let (rows_tx, rows_rx) = channel::bounded::<(usize, &mut [u8])>(0);

        // Every worker must be running before the first row is sent, so
        // a failure to start one leaves the raster untouched.
        for worker in 0..threads {
            let rows = rows_rx.clone();
            spawner
                .builder()
                .name(format!("mandel-row-{}", worker))
                .spawn(move |_| {
                    let mut rng = JitterRng::for_worker(config.rng_seed, worker);
                    debug!("worker {} seeded with {:#018x}", worker, rng.state());
                    for (y, row) in rows.iter() {
                        render_row(plane, config, &mut rng, y, row);
                    }
                })
                .map_err(|cause| RenderError::Spawn { worker, cause })?;
        }
        drop(rows_rx);

        let mut reported = 0;
        for (y, row) in pixels.chunks_mut(stride).enumerate() {
            if rows_tx.send((y, row)).is_err() {
                // Every receiver is gone, which only happens if every
                // worker has panicked; the scope reports that below.
                break;
            }
            let percent = 100 * (y + 1) / height;
            if percent >= reported + 10 {
                reported = percent - percent % 10;
                trace!("dispatched {}/{} rows ({}%)", y + 1, height, percent);
            }
        }
        Ok(())
    })
    .map_err(|_| RenderError::WorkerPanicked)?
}

/// Renders one row of the raster.  `row` is `width * 4` bytes of RGBA.
pub fn render_row(
    plane: &PlaneMapper,
    config: &RenderConfig,
    rng: &mut JitterRng,
    y: usize,
    row: &mut [u8],
) {
    let y = y as u32;
    for (x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let color = render_pixel(plane, config, rng, Pixel(x as u32, y));
        out.copy_from_slice(&[color.r, color.g, color.b, 255]);
    }
}

/// Samples one pixel `samples_per_pixel` times at jittered positions
/// and returns the mixed colour.
#[inline]
pub fn render_pixel(
    plane: &PlaneMapper,
    config: &RenderConfig,
    rng: &mut JitterRng,
    pixel: Pixel,
) -> Color {
    let mut acc = PixelAccumulator::new(config.linear_mixing);
    for _ in 0..config.samples_per_pixel {
        let jitter = (rng.next_f64(), rng.next_f64());
        let c = plane.pixel_to_point(&pixel, jitter);
        acc.add(color_for(evaluate(c, config.max_iterations), config));
    }
    acc.finish()
}
