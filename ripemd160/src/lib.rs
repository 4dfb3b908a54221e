//! Round-reduced [RIPEMD-160][1] hash function.
//!
//! Both lines of the compression function execute the first `rounds` of
//! their 80 steps; the cross feed-forward into the chaining value is always
//! applied, so any limit from 0 to 80 yields a well-defined digest. With all
//! 80 steps the output is standard RIPEMD-160.
//!
//! # Examples
//! ```
//! use ripemd160::Ripemd160;
//! use round_core::HashCore;
//! use hex_literal::hex;
//!
//! let mut hasher = Ripemd160::new();
//! hasher.update(b"abc");
//! assert_eq!(hasher.finalize(), hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
//!
//! let mut reduced = Ripemd160::new_reduced(16).unwrap();
//! reduced.update(b"abc");
//! assert_eq!(reduced.finalize(), hex!("510de94377ac42ae643b0ac246fc645ad2969efc"));
//! ```
//!
//! [1]: https://homes.esat.kuleuven.be/~bosselae/ripemd160.html
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use round_core;

mod consts;

pub use consts::{LEFT, RIGHT};

use round_core::{
    words::{self, Endian},
    BlockBuffer, HashCore, RoundLimit,
};

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 64;
/// Digest size in bytes.
pub const OUTPUT_SIZE: usize = 20;

/// Boolean function of one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    /// `x ^ y ^ z`
    F1,
    /// `(x & y) | (!x & z)`
    F2,
    /// `(x | !y) ^ z`
    F3,
    /// `(x & z) | (y & !z)`
    F4,
    /// `x ^ (y | !z)`
    F5,
}

impl Func {
    #[inline(always)]
    fn apply(self, x: u32, y: u32, z: u32) -> u32 {
        match self {
            Func::F1 => x ^ y ^ z,
            Func::F2 => (x & y) | (!x & z),
            Func::F3 => (x | !y) ^ z,
            Func::F4 => (x & z) | (y & !z),
            Func::F5 => x ^ (y | !z),
        }
    }
}

/// One step of a line: message word, rotation, function and constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Index of the message word.
    pub word: u8,
    /// Left rotation applied to the sum.
    pub shift: u8,
    /// Boolean function.
    pub func: Func,
    /// Additive constant.
    pub k: u32,
}

// The five registers stay in place; step `j` updates register `(5 - j % 5) % 5`
// and the roles of the other four rotate with it.
fn run_line(v: &mut [u32; 5], x: &[u32], steps: &[Step]) {
    for (j, step) in steps.iter().enumerate() {
        let a = (5 - j % 5) % 5;
        let (b, c, d, e) = ((a + 1) % 5, (a + 2) % 5, (a + 3) % 5, (a + 4) % 5);
        let t = v[a]
            .wrapping_add(step.func.apply(v[b], v[c], v[d]))
            .wrapping_add(x[step.word as usize])
            .wrapping_add(step.k);
        v[a] = t.rotate_left(u32::from(step.shift)).wrapping_add(v[e]);
        v[c] = v[c].rotate_left(10);
    }
}

fn compress(h: &mut [u32; 5], block: &[u8], limit: RoundLimit) {
    let mut scratch = [0u32; 16];
    words::with_u32_words(Endian::Little, block, &mut scratch, |x| {
        let mut l = *h;
        let mut r = *h;
        run_line(&mut l, x, LEFT.steps(limit));
        run_line(&mut r, x, RIGHT.steps(limit));

        let t = h[1].wrapping_add(l[2]).wrapping_add(r[3]);
        h[1] = h[2].wrapping_add(l[3]).wrapping_add(r[4]);
        h[2] = h[3].wrapping_add(l[4]).wrapping_add(r[0]);
        h[3] = h[4].wrapping_add(l[0]).wrapping_add(r[1]);
        h[4] = h[0].wrapping_add(l[1]).wrapping_add(r[2]);
        h[0] = t;
    });
}

/// Incremental RIPEMD-160 hasher with a configurable step count.
#[derive(Clone)]
pub struct Ripemd160 {
    h: [u32; 5],
    buffer: BlockBuffer<BLOCK_SIZE>,
    limit: RoundLimit,
}

impl Ripemd160 {
    /// Pads the message and returns the digest.
    pub fn finalize(mut self) -> [u8; OUTPUT_SIZE] {
        let (h, limit) = (&mut self.h, self.limit);
        self.buffer
            .md_finalize(Endian::Little, |block| compress(h, block, limit));
        let mut out = [0u8; OUTPUT_SIZE];
        words::write_u32_into(Endian::Little, &self.h, &mut out);
        out
    }
}

impl HashCore for Ripemd160 {
    const NAME: &'static str = "RIPEMD160";
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const OUTPUT_SIZE: usize = OUTPUT_SIZE;
    const MAX_ROUNDS: usize = 80;

    fn with_rounds(limit: RoundLimit) -> Self {
        Self {
            h: consts::H0,
            buffer: BlockBuffer::new(),
            limit,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let (h, limit) = (&mut self.h, self.limit);
        self.buffer.update(data, |block| compress(h, block, limit));
    }

    fn finalize_into(self, out: &mut [u8]) {
        out.copy_from_slice(&self.finalize());
    }

    fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for Ripemd160 {
    fn default() -> Self {
        <Self as HashCore>::new()
    }
}

opaque_debug::implement!(Ripemd160);
