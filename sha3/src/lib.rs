//! Round-reduced SHA-3, Keccak and SHAKE sponge functions.
//!
//! All functions share the Keccak-f[1600] permutation, which runs the first
//! `rounds` of its 24 rounds on every absorb and squeeze; its combination
//! step is the identity.
//!
//! FIPS 202 SHA-3 and the pre-standard Keccak submission differ only in the
//! padding domain byte (0x06 versus 0x01). They are kept as distinct types
//! with distinct finalize routines so the two conventions never mix.
//!
//! # Examples
//! ```
//! use sha3::{Keccak256, Sha3_256};
//! use round_core::HashCore;
//! use hex_literal::hex;
//!
//! let mut hasher = Sha3_256::new();
//! hasher.update(b"abc");
//! assert_eq!(
//!     hasher.finalize(),
//!     hex!("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"),
//! );
//!
//! let hasher = Keccak256::new();
//! assert_eq!(
//!     hasher.finalize(),
//!     hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"),
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

mod keccak;

pub use keccak::{keccak_p, KECCAK_F};

use round_core::{
    words::{self, Endian},
    BlockBuffer, HashCore, RoundLimit,
};

const SHA3_DOMAIN: u8 = 0x06;
const KECCAK_DOMAIN: u8 = 0x01;
const SHAKE_DOMAIN: u8 = 0x1f;

const MAX_RATE_WORDS: usize = 21;

#[derive(Clone)]
struct Sponge<const RATE: usize> {
    state: [u64; 25],
    buffer: BlockBuffer<RATE>,
    limit: RoundLimit,
}

fn absorb_block(state: &mut [u64; 25], block: &[u8], limit: RoundLimit) {
    let mut scratch = [0u64; MAX_RATE_WORDS];
    let n = block.len() / 8;
    words::with_u64_words(Endian::Little, block, &mut scratch[..n], |lanes| {
        for (s, l) in state.iter_mut().zip(lanes) {
            *s ^= *l;
        }
    });
    keccak_p(state, limit);
}

impl<const RATE: usize> Sponge<RATE> {
    fn new(limit: RoundLimit) -> Self {
        Self {
            state: [0; 25],
            buffer: BlockBuffer::new(),
            limit,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let (state, limit) = (&mut self.state, self.limit);
        self.buffer
            .update(data, |block| absorb_block(state, block, limit));
    }

    fn pad(&mut self, domain: u8) {
        let (state, limit) = (&mut self.state, self.limit);
        self.buffer
            .sponge_finalize(domain, |block| absorb_block(state, block, limit));
    }

    fn squeeze(&mut self, out: &mut [u8]) {
        let mut chunks = out.chunks_mut(RATE).peekable();
        while let Some(chunk) = chunks.next() {
            words::unpack_u64(Endian::Little, &self.state, chunk);
            if chunks.peek().is_some() {
                keccak_p(&mut self.state, self.limit);
            }
        }
    }

    /// FIPS 202 padding.
    fn finalize_sha3(mut self, out: &mut [u8]) {
        self.pad(SHA3_DOMAIN);
        self.squeeze(out);
    }

    /// Original Keccak submission padding.
    fn finalize_keccak(mut self, out: &mut [u8]) {
        self.pad(KECCAK_DOMAIN);
        self.squeeze(out);
    }

    fn finalize_shake(mut self, out: &mut [u8]) {
        self.pad(SHAKE_DOMAIN);
        self.squeeze(out);
    }
}

macro_rules! define_sponge_hash {
    (
        $name:ident,
        $reg_name:expr,
        $rate:expr,
        $output_size:expr,
        $finalize:ident,
        $doc:expr
    ) => {
        #[doc = $doc]
        #[derive(Clone)]
        pub struct $name(Sponge<$rate>);

        impl $name {
            /// Pads the message and returns the digest.
            pub fn finalize(self) -> [u8; $output_size] {
                let mut out = [0u8; $output_size];
                self.0.$finalize(&mut out);
                out
            }
        }

        impl HashCore for $name {
            const NAME: &'static str = $reg_name;
            const BLOCK_SIZE: usize = $rate;
            const OUTPUT_SIZE: usize = $output_size;
            const MAX_ROUNDS: usize = 24;

            fn with_rounds(limit: RoundLimit) -> Self {
                $name(Sponge::new(limit))
            }

            fn update(&mut self, data: &[u8]) {
                self.0.update(data);
            }

            fn finalize_into(self, out: &mut [u8]) {
                assert_eq!(out.len(), $output_size);
                self.0.$finalize(out);
            }

            fn buffered_len(&self) -> usize {
                self.0.buffer.len()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as HashCore>::new()
            }
        }

        opaque_debug::implement!($name);
    };
}

macro_rules! define_shake {
    ($name:ident, $reg_name:expr, $rate:expr, $output_size:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone)]
        pub struct $name(Sponge<$rate>);

        impl $name {
            /// Pads the message and fills `out` with output of any length.
            pub fn finalize_xof_into(self, out: &mut [u8]) {
                self.0.finalize_shake(out);
            }
        }

        impl HashCore for $name {
            const NAME: &'static str = $reg_name;
            const BLOCK_SIZE: usize = $rate;
            const OUTPUT_SIZE: usize = $output_size;
            const MAX_ROUNDS: usize = 24;

            fn with_rounds(limit: RoundLimit) -> Self {
                $name(Sponge::new(limit))
            }

            fn update(&mut self, data: &[u8]) {
                self.0.update(data);
            }

            fn finalize_into(self, out: &mut [u8]) {
                self.0.finalize_shake(out);
            }

            fn buffered_len(&self) -> usize {
                self.0.buffer.len()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as HashCore>::new()
            }
        }

        opaque_debug::implement!($name);
    };
}

define_sponge_hash!(Sha3_224, "SHA3-224", 144, 28, finalize_sha3, "SHA3-224 hasher");
define_sponge_hash!(Sha3_256, "SHA3-256", 136, 32, finalize_sha3, "SHA3-256 hasher");
define_sponge_hash!(Sha3_384, "SHA3-384", 104, 48, finalize_sha3, "SHA3-384 hasher");
define_sponge_hash!(Sha3_512, "SHA3-512", 72, 64, finalize_sha3, "SHA3-512 hasher");

define_sponge_hash!(Keccak224, "KECCAK-224", 144, 28, finalize_keccak, "Keccak-224 hasher");
define_sponge_hash!(Keccak256, "KECCAK-256", 136, 32, finalize_keccak, "Keccak-256 hasher");
define_sponge_hash!(Keccak384, "KECCAK-384", 104, 48, finalize_keccak, "Keccak-384 hasher");
define_sponge_hash!(Keccak512, "KECCAK-512", 72, 64, finalize_keccak, "Keccak-512 hasher");

define_shake!(Shake128, "SHAKE128", 168, 32, "SHAKE128 extendable-output function");
define_shake!(Shake256, "SHAKE256", 136, 64, "SHAKE256 extendable-output function");
