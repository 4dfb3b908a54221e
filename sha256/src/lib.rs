//! Round-reduced SHA-256 hash function.
//!
//! The compression function runs the first `rounds` of its 64 steps,
//! expanding the message schedule only as far as needed, and always adds
//! the working variables back into the chaining value.
//!
//! # Examples
//! ```
//! use sha256::Sha256;
//! use round_core::HashCore;
//! use hex_literal::hex;
//!
//! let mut hasher = Sha256::new();
//! hasher.update(b"abc");
//! assert_eq!(
//!     hasher.finalize(),
//!     hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
//! );
//! ```
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use round_core;

mod consts;

pub use consts::SHA256_STEPS;

use round_core::{
    words::{self, Endian},
    BlockBuffer, HashCore, RoundLimit,
};

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 64;
/// Digest size in bytes.
pub const OUTPUT_SIZE: usize = 32;

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

fn compress(h: &mut [u32; 8], block: &[u8], limit: RoundLimit) {
    let mut w = [0u32; 16];
    words::read_u32_into(Endian::Big, block, &mut w);

    let mut v = *h;
    for (i, &k) in SHA256_STEPS.steps(limit).iter().enumerate() {
        if i >= 16 {
            w[i % 16] = w[i % 16]
                .wrapping_add(small_sigma1(w[(i - 2) % 16]))
                .wrapping_add(w[(i - 7) % 16])
                .wrapping_add(small_sigma0(w[(i - 15) % 16]));
        }
        let [a, b, c, d, e, f, g, hh] = v;
        let t1 = hh
            .wrapping_add(big_sigma1(e))
            .wrapping_add((e & f) ^ (!e & g))
            .wrapping_add(k)
            .wrapping_add(w[i % 16]);
        let t2 = big_sigma0(a).wrapping_add((a & b) ^ (a & c) ^ (b & c));
        v = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
    }

    for (s, x) in h.iter_mut().zip(v.iter()) {
        *s = s.wrapping_add(*x);
    }
}

/// Incremental SHA-256 hasher with a configurable step count.
#[derive(Clone)]
pub struct Sha256 {
    h: [u32; 8],
    buffer: BlockBuffer<BLOCK_SIZE>,
    limit: RoundLimit,
}

impl Sha256 {
    /// Pads the message and returns the digest.
    pub fn finalize(mut self) -> [u8; OUTPUT_SIZE] {
        let (h, limit) = (&mut self.h, self.limit);
        self.buffer
            .md_finalize(Endian::Big, |block| compress(h, block, limit));
        let mut out = [0u8; OUTPUT_SIZE];
        words::write_u32_into(Endian::Big, &self.h, &mut out);
        out
    }
}

impl HashCore for Sha256 {
    const NAME: &'static str = "SHA256";
    const BLOCK_SIZE: usize = BLOCK_SIZE;
    const OUTPUT_SIZE: usize = OUTPUT_SIZE;
    const MAX_ROUNDS: usize = 64;

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

impl Default for Sha256 {
    fn default() -> Self {
        <Self as HashCore>::new()
    }
}

opaque_debug::implement!(Sha256);
