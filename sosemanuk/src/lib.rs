//! Round-reduced [SOSEMANUK][1] stream cipher.
//!
//! The IV setup runs the first `rounds` of 24 Serpent rounds (every round
//! keeps its linear transformation) over the zero-padded IV. The LFSR and
//! FSM are seeded from the states after `min(12, rounds)` and
//! `min(18, rounds)` rounds and from the final state after the last
//! subkey is added. Keystream generation itself is not reduced.
//!
//! # Examples
//! ```
//! use sosemanuk::{Sosemanuk, SosemanukCore};
//! use sosemanuk::cipher::StreamCipher;
//! use hex_literal::hex;
//!
//! let core = SosemanukCore::from_slices(
//!     &hex!("a7c083feb7"),
//!     &hex!("00112233445566778899aabbccddeeff"),
//! )
//! .unwrap();
//! let mut cipher = Sosemanuk::from_core(core);
//! let mut buf = [0u8; 8];
//! cipher.apply_keystream(&mut buf);
//! assert_eq!(buf, hex!("fe81d2162c9a100d"));
//! ```
//!
//! [1]: https://www.ecrypt.eu.org/stream/e2-sosemanuk.html
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;
pub use round_core;

mod backend;
mod consts;

pub use consts::{InitRound, SOSEMANUK_SPEC};

use cipher::{
    consts::{U16, U32, U80},
    BlockSizeUser, InvalidLength, IvSizeUser, KeyIvInit, KeySizeUser, StreamCipherCore,
    StreamCipherCoreWrapper, StreamClosure,
};
use core::fmt;
use round_core::{
    words::{self, Endian},
    CoreEngine, Error, RoundLimit, SizeRange, StreamContext, StreamKeySetup,
};
use serpent::hazmat::{expand_key, linear_transform, sbox, xor_words, Subkeys, Words};

/// SOSEMANUK keystream core: ten LFSR cells and two FSM registers.
#[derive(Clone)]
pub struct SosemanukCore {
    pub(crate) lfsr: [u32; 10],
    pub(crate) r1: u32,
    pub(crate) r2: u32,
}

impl SosemanukCore {
    /// Loads the state from expanded subkeys and an IV of at most 16
    /// bytes, running the first `limit` IV setup rounds. `limit` must have
    /// been checked against [`SOSEMANUK_SPEC`].
    pub fn with_rounds(subkeys: &Subkeys, iv: &[u8], limit: RoundLimit) -> Result<Self, Error> {
        if iv.len() > 16 {
            return Err(Error::InvalidIvSize(iv.len() * 8));
        }
        let rounds = SOSEMANUK_SPEC.steps(limit);
        Ok(Self::load(subkeys, iv, rounds))
    }

    /// Full-round core for a key of 1 to 32 bytes and an IV of up to 16
    /// bytes; shorter IVs are zero-padded.
    pub fn from_slices(key: &[u8], iv: &[u8]) -> Result<Self, InvalidLength> {
        if key.is_empty() || key.len() > 32 || iv.len() > 16 {
            return Err(InvalidLength);
        }
        Ok(Self::load(&expand_key(key), iv, SOSEMANUK_SPEC.all()))
    }

    fn load(subkeys: &Subkeys, iv: &[u8], rounds: &[InitRound]) -> Self {
        let mut padded = [0u8; 16];
        padded[..iv.len()].copy_from_slice(iv);
        let mut x: Words = [0; 4];
        words::read_u32_into(Endian::Little, &padded, &mut x);

        let mut y12 = x;
        let mut y18 = x;
        for (i, round) in rounds.iter().enumerate() {
            xor_words(&mut x, &subkeys[i]);
            sbox(round.sbox as usize, &mut x);
            linear_transform(&mut x);
            if round.lfsr_tap {
                y12 = x;
            }
            if round.fsm_tap {
                y18 = x;
            }
        }
        xor_words(&mut x, &subkeys[rounds.len()]);

        Self {
            lfsr: [
                x[3], x[2], x[1], x[0], y18[1], y18[3], y12[3], y12[2], y12[1], y12[0],
            ],
            r1: y18[0],
            r2: y18[2],
        }
    }
}

impl KeySizeUser for SosemanukCore {
    type KeySize = U32;
}

impl IvSizeUser for SosemanukCore {
    type IvSize = U16;
}

impl BlockSizeUser for SosemanukCore {
    type BlockSize = U80;
}

impl KeyIvInit for SosemanukCore {
    fn new(key: &cipher::Key<Self>, iv: &cipher::Iv<Self>) -> Self {
        Self::load(&expand_key(key), iv, SOSEMANUK_SPEC.all())
    }
}

impl StreamCipherCore for SosemanukCore {
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut backend::Backend(self));
    }
}

impl fmt::Debug for SosemanukCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SosemanukCore { .. }")
    }
}

/// Full-round SOSEMANUK.
///
/// `new` takes a 32-byte key and a 16-byte IV; shorter keys and IVs go
/// through [`SosemanukCore::from_slices`] and `from_core`.
pub type Sosemanuk = StreamCipherCoreWrapper<SosemanukCore>;

/// Serpent key schedule shared by every message under one key.
#[derive(Clone)]
pub struct SosemanukKey {
    subkeys: Subkeys,
    limit: RoundLimit,
}

impl StreamKeySetup for SosemanukKey {
    type Engine = CoreEngine<SosemanukCore>;

    const NAME: &'static str = "SOSEMANUK";
    const BLOCK_LEN: usize = 80;
    const KEY_SIZES: SizeRange = SizeRange {
        base: 8,
        step: 8,
        max: 256,
    };
    const IV_SIZES: SizeRange = SizeRange {
        base: 8,
        step: 8,
        max: 128,
    };
    const MAX_ROUNDS: usize = 24;

    fn key_setup(key: &[u8], limit: RoundLimit) -> Result<Self, Error> {
        if key.is_empty() || key.len() > 32 {
            return Err(Error::InvalidKeySize(key.len() * 8));
        }
        Ok(Self {
            subkeys: expand_key(key),
            limit,
        })
    }

    fn iv_setup(&self, iv: &[u8]) -> Result<Self::Engine, Error> {
        SosemanukCore::with_rounds(&self.subkeys, iv, self.limit).map(CoreEngine::new)
    }
}

/// SOSEMANUK stream session with key and IV sequencing.
pub type SosemanukSession = StreamContext<SosemanukKey>;
