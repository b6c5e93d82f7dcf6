//! Seeded random streams.
//!
//! Every jitter in a drawable comes from one stream so that the same seed
//! always reproduces the same geometry. Option variants share their parent's
//! stream through [`Randomizer`]; independent passes derive a fresh stream
//! with [`Rng::substream`].

use std::cell::Cell;
use std::rc::Rc;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 stream: a Weyl counter run through a 64-bit finalizer.
///
/// ```
/// use rat_sketch::rng::Rng;
///
/// let mut rng = Rng::new(7);
/// let jitter = rng.next_f64();
/// assert!((0.0..1.0).contains(&jitter));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Stream for one pass of a multi-pass shape.
    ///
    /// The same `(base_seed, pass_index)` pair always gives the same stream,
    /// and neighboring indices start far apart in the sequence.
    pub fn substream(base_seed: u64, pass_index: u64) -> Self {
        Self::new(base_seed ^ mix(pass_index.wrapping_add(GOLDEN_GAMMA)))
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix(self.state)
    }

    /// Uniform in [0, 1), from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A shared handle to one random stream.
///
/// Cloning the handle does not fork the stream: every clone draws from the
/// same sequence. The handle is neither `Send` nor `Sync`, which keeps a
/// stream (and the options holding it) on the thread that created it.
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: Rc<Cell<Rng>>,
}

impl Randomizer {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(Rng::new(seed))
    }

    /// A handle on stream number `pass_index` derived from `seed`.
    pub fn substream(seed: u64, pass_index: u64) -> Self {
        Self::from_rng(Rng::substream(seed, pass_index))
    }

    fn from_rng(rng: Rng) -> Self {
        Self { rng: Rc::new(Cell::new(rng)) }
    }

    /// Draw the next value in [0, 1).
    pub fn next(&self) -> f64 {
        let mut rng = self.rng.get();
        let value = rng.next_f64();
        self.rng.set(rng);
        value
    }
}

// ============================================================================
// TESTS
// ============================================================================
