// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Averaging the samples of one pixel.
//!
//! Display values are gamma-compressed: a byte of 128 is a good deal
//! less than half the light of 255.  Averaging the bytes directly makes
//! every anti-aliased edge too dark.  In linear mode each channel is
//! expanded through the sRGB transfer curve into 16-bit linear light,
//! averaged there, and compressed back.  Both directions are table
//! lookups, built once on first use.

use crate::palette::Color;
use once_cell::sync::Lazy;

/// 8-bit sRGB to 16-bit linear light.
static TO_LINEAR: Lazy<[u16; 256]> = Lazy::new(|| {
    let mut table = [0u16; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let linear = srgb_to_linear(i as f64 / 255.0);
        *entry = (linear * 65535.0).round() as u16;
    }
    table
});

/// 16-bit linear light to 8-bit sRGB.
static TO_SRGB: Lazy<Vec<u8>> = Lazy::new(|| {
    (0..=u16::MAX)
        .map(|i| {
            let srgb = linear_to_srgb(f64::from(i) / 65535.0);
            (srgb * 255.0).round() as u8
        })
        .collect()
});

fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Expands a display byte to linear light.
#[inline]
pub fn to_linear(v: u8) -> u16 {
    TO_LINEAR[v as usize]
}

/// Compresses linear light back to a display byte.
#[inline]
pub fn to_display(v: u16) -> u8 {
    TO_SRGB[v as usize]
}

/// Running sum of the samples of one pixel.  Channels are summed in
/// `u64`, so the sample count cannot overflow them in practice.
#[derive(Clone, Debug)]
pub struct PixelAccumulator {
    linear: bool,
    sums: [u64; 3],
    count: u64,
}

impl PixelAccumulator {
    /// An empty accumulator.  `linear` selects linear-light mixing.
    pub fn new(linear: bool) -> Self {
        PixelAccumulator {
            linear,
            sums: [0; 3],
            count: 0,
        }
    }

    /// Adds one sample.
    #[inline]
    pub fn add(&mut self, color: Color) {
        for (sum, channel) in self.sums.iter_mut().zip(color.channels().iter()) {
            *sum += if self.linear {
                u64::from(to_linear(*channel))
            } else {
                u64::from(*channel)
            };
        }
        self.count += 1;
    }

    /// The rounded mean of everything added.  An accumulator with no
    /// samples is black.
    pub fn finish(&self) -> Color {
        if self.count == 0 {
            return Color::BLACK;
        }
        let mut out = [0u8; 3];
        for (o, sum) in out.iter_mut().zip(self.sums.iter()) {
            let mean = (sum + self.count / 2) / self.count;
            *o = if self.linear {
                to_display(mean as u16)
            } else {
                mean as u8
            };
        }
        Color::new(out[0], out[1], out[2])
    }
}

/// Averages a set of samples, in linear light if `mix_linear` is set.
pub fn accumulate<I>(samples: I, mix_linear: bool) -> Color
where
    I: IntoIterator<Item = Color>,
{
    let mut acc = PixelAccumulator::new(mix_linear);
    for sample in samples {
        acc.add(sample);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_tables_hit_the_endpoints() {
        assert_eq!(to_linear(0), 0);
        assert_eq!(to_linear(255), 65535);
        assert_eq!(to_display(0), 0);
        assert_eq!(to_display(65535), 255);
    }

    #[test]
    fn every_byte_survives_the_round_trip() {
        for v in 0..=255u8 {
            assert_eq!(to_display(to_linear(v)), v);
        }
    }

    #[test]
    fn identical_samples_average_to_themselves() {
        let colors = [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(12, 200, 97),
            Color::new(1, 128, 254),
        ];
        for &c in &colors {
            for &n in &[1usize, 2, 7, 50, 256, 1000] {
                let samples = std::iter::repeat(c).take(n);
                assert_eq!(accumulate(samples.clone(), true), c);
                assert_eq!(accumulate(samples, false), c);
            }
        }
    }

    #[test]
    fn linear_mixing_is_brighter_than_naive_mixing() {
        let samples = vec![Color::BLACK, Color::WHITE];
        let naive = accumulate(samples.clone(), false);
        let linear = accumulate(samples, true);
        assert_eq!(naive, Color::new(128, 128, 128));
        // Half the light of white is about 188 in sRGB.
        assert!(linear.r >= 187 && linear.r <= 189, "{:?}", linear);
        assert!(linear.r > naive.r);
    }

    #[test]
    fn many_white_samples_do_not_overflow() {
        let samples = std::iter::repeat(Color::WHITE).take(100_000);
        assert_eq!(accumulate(samples, true), Color::WHITE);
    }

    #[test]
    fn empty_accumulator_is_black() {
        assert_eq!(PixelAccumulator::new(true).finish(), Color::BLACK);
        assert_eq!(accumulate(Vec::<Color>::new(), false), Color::BLACK);
    }
}
