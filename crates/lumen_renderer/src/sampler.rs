//! Distribution sampling over the unit square.
//!
//! The same sample sets drive sub-pixel antialiasing and area-light soft
//! shadows.

use rand::{Rng, RngCore};

/// A 2D offset in `[0, 1) x [0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub s: f64,
    pub t: f64,
}

impl Sample {
    #[inline]
    pub fn new(s: f64, t: f64) -> Self {
        Self { s, t }
    }
}

/// Uniform `[0, 1)` draw from an injected generator.
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// An `n x n` stratified sample pattern, optionally jittered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    /// Grid side; `n²` samples are produced
    pub n: u32,
    pub jitter: bool,
}

impl Distribution {
    /// Create a distribution. A grid side of 0 is treated as 1.
    pub fn new(n: u32, jitter: bool) -> Self {
        Self { n: n.max(1), jitter }
    }

    /// Number of samples produced by [`generate`](Self::generate).
    pub fn len(&self) -> usize {
        self.n as usize * self.n as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produce a fresh set of `n²` samples.
    ///
    /// Without jitter each sample sits at the center of its cell and `rng` is
    /// not touched. With jitter each axis of each sample gets its own uniform
    /// offset inside the cell.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Vec<Sample> {
        let n = self.n as f64;
        let mut samples = Vec::with_capacity(self.len());

        for i in 0..self.n {
            for j in 0..self.n {
                let (ds, dt) = if self.jitter {
                    (gen_f64(rng), gen_f64(rng))
                } else {
                    (0.5, 0.5)
                };
                samples.push(Sample::new((i as f64 + ds) / n, (j as f64 + dt) / n));
            }
        }

        samples
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self::new(1, false)
    }
}
