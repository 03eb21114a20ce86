// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The generator that places samples inside a pixel.  It is not a
//! good random number generator by any cryptographic standard, but it
//! is fast, it is small enough that every worker gets its own, and it
//! is reproducible: the same seed produces the same stream, which the
//! benchmarks and regression tests depend on.
//!
//! Each step is a linear congruential update of the state followed by
//! two xor-shift/multiply rounds that spread the state's bits across
//! the output.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x3243_f6a8_885a_308d;
const FINISHER: u64 = 1_111_111_111_111_111_111;
const FLOAT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Per-worker jitter generator.  Never shared between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct JitterRng {
    state: u64,
}

impl JitterRng {
    /// A generator whose state is exactly `seed`.
    pub fn new(seed: u64) -> Self {
        JitterRng { state: seed }
    }

    /// Derives a worker's generator from the render's base seed.  The
    /// worker index is mixed into the seed and the result is passed
    /// through one step of the generator, so neighbouring workers start
    /// far apart in the stream.
    pub fn for_worker(seed: u64, worker: usize) -> Self {
        let mut derivation = JitterRng::new(seed ^ worker as u64);
        JitterRng::new(derivation.next_bits())
    }

    /// The current state; what a generator built with `new` from this
    /// value would continue from.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// The next 64 bits of the stream.
    #[inline]
    pub fn next_bits(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(1);
        let mut r = self.state;
        r ^= r >> 32;
        r = r.wrapping_mul(FINISHER);
        r ^= r >> 32;
        r
    }

    /// A uniform float in `[0, 1)`.  Only the top 53 bits are kept so
    /// the conversion is exact and can never round up to 1.0.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_bits() >> 11) as f64 * FLOAT_SCALE
    }
}

impl RngCore for JitterRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_bits() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_bits()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_bits().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for JitterRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        JitterRng::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        JitterRng::new(state)
    }
}
