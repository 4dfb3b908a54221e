//! Round-reduced FUBUKI-style stream cipher.
//!
//! IV setup seeds MT19937 with the key words followed by the IV words and
//! draws the per-message tables: 32 odd multipliers with their inverses
//! modulo 2^32, 32 addends and a shift distance. Each 16-byte block is
//! whitened with four generator outputs and then passes through the first
//! `rounds` of 8 layers, every layer applying to each 32-bit word
//!
//! ```text
//! x = x * multi + add
//! x = x ^ (x >> jump)
//! ```
//!
//! Decryption runs the inverse layers in reverse order. A trailing partial
//! block is XORed with the encryption of an all-zero block.
//!
//! # Examples
//! ```
//! use fubuki::FubukiSession;
//! use round_core::{Action, StreamCipherLike};
//!
//! let mut ctx = FubukiSession::new(4).unwrap();
//! ctx.key_setup(&[7u8; 16], 128).unwrap();
//! ctx.iv_setup(&[1u8; 16]).unwrap();
//! let mut ct = [0u8; 32];
//! ctx.process_blocks(Action::Encrypt, b"sixteen byte msgsixteen byte msg", &mut ct)
//!     .unwrap();
//!
//! ctx.iv_setup(&[1u8; 16]).unwrap();
//! let mut pt = [0u8; 32];
//! ctx.process_blocks(Action::Decrypt, &ct, &mut pt).unwrap();
//! assert_eq!(&pt, b"sixteen byte msgsixteen byte msg");
//! ```
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use round_core;

mod mt;

use mt::Mt19937;
use round_core::{
    words::{self, Endian},
    Action, Error, RoundLimit, RoundSpec, SizeRange, StreamContext, StreamEngine,
    StreamKeySetup,
};

const BLOCK_LEN: usize = 16;
const BLOCK_WORDS: usize = BLOCK_LEN / 4;
const MAX_KEY_WORDS: usize = 2048 / 32;
const TABLE_LEN: usize = 32;

const LAYERS: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

/// Layer schedule: the table row each layer reads.
pub static FUBUKI_SPEC: RoundSpec<u8> = RoundSpec::new("FUBUKI", &LAYERS);

/// Inverse of an odd `x` modulo 2^32.
fn inverse(x: u32) -> u32 {
    debug_assert!(x & 1 == 1);
    // x * x == 1 mod 8; every Newton step doubles the correct low bits
    let mut y = x;
    for _ in 0..4 {
        y = y.wrapping_mul(2u32.wrapping_sub(x.wrapping_mul(y)));
    }
    y
}

fn unshift(x: u32, jump: u32) -> u32 {
    let mut y = x;
    let mut covered = jump;
    while covered < 32 {
        y = x ^ (y >> jump);
        covered += jump;
    }
    y
}

/// Key words, reused to reseed the generator on every IV setup.
#[derive(Clone)]
pub struct FubukiKey {
    words: [u32; MAX_KEY_WORDS],
    len: usize,
    limit: RoundLimit,
}

impl StreamKeySetup for FubukiKey {
    type Engine = FubukiEngine;

    const NAME: &'static str = "FUBUKI";
    const BLOCK_LEN: usize = BLOCK_LEN;
    const KEY_SIZES: SizeRange = SizeRange {
        base: 128,
        step: 32,
        max: 2048,
    };
    const IV_SIZES: SizeRange = SizeRange {
        base: 128,
        step: 32,
        max: 2048,
    };
    const MAX_ROUNDS: usize = 8;

    fn key_setup(key: &[u8], limit: RoundLimit) -> Result<Self, Error> {
        if key.is_empty() || key.len() % 4 != 0 || key.len() > MAX_KEY_WORDS * 4 {
            return Err(Error::InvalidKeySize(key.len() * 8));
        }
        let len = key.len() / 4;
        let mut words = [0u32; MAX_KEY_WORDS];
        words::read_u32_into(Endian::Little, key, &mut words[..len]);
        Ok(Self { words, len, limit })
    }

    fn iv_setup(&self, iv: &[u8]) -> Result<FubukiEngine, Error> {
        if iv.len() % 4 != 0 || iv.len() > MAX_KEY_WORDS * 4 {
            return Err(Error::InvalidIvSize(iv.len() * 8));
        }
        let layers = FUBUKI_SPEC.steps(self.limit);

        let mut seed = [0u32; 2 * MAX_KEY_WORDS];
        seed[..self.len].copy_from_slice(&self.words[..self.len]);
        let iv_len = iv.len() / 4;
        words::read_u32_into(
            Endian::Little,
            iv,
            &mut seed[self.len..self.len + iv_len],
        );
        Ok(FubukiEngine::new(&seed[..self.len + iv_len], layers))
    }
}

opaque_debug::implement!(FubukiKey);

/// Per-message state: the generator and the tables it drew.
#[derive(Clone)]
pub struct FubukiEngine {
    mt: Mt19937,
    multi: [u32; TABLE_LEN],
    inv: [u32; TABLE_LEN],
    add: [u32; TABLE_LEN],
    jump: u32,
    layers: &'static [u8],
}

impl FubukiEngine {
    fn new(seed: &[u32], layers: &'static [u8]) -> Self {
        let mut mt = Mt19937::from_key(seed);
        let mut multi = [0u32; TABLE_LEN];
        let mut inv = [0u32; TABLE_LEN];
        let mut add = [0u32; TABLE_LEN];
        for ((m, i), a) in multi.iter_mut().zip(inv.iter_mut()).zip(add.iter_mut()) {
            *m = mt.next_u32() | 1;
            *i = inverse(*m);
            *a = mt.next_u32();
        }
        let jump = 1 + mt.next_u32() % 31;
        Self {
            mt,
            multi,
            inv,
            add,
            jump,
            layers,
        }
    }

    /// Shift distance of the xor-shift step, in `1..=31`.
    pub fn jump(&self) -> u32 {
        self.jump
    }

    fn encrypt_words(&mut self, x: &mut [u32; BLOCK_WORDS]) {
        for (i, w) in x.iter_mut().enumerate() {
            *w ^= self.mt.next_u32();
            for &layer in self.layers {
                let idx = BLOCK_WORDS * layer as usize + i;
                *w = w.wrapping_mul(self.multi[idx]).wrapping_add(self.add[idx]);
                *w ^= *w >> self.jump;
            }
        }
    }

    fn decrypt_words(&mut self, x: &mut [u32; BLOCK_WORDS]) {
        for (i, w) in x.iter_mut().enumerate() {
            let mask = self.mt.next_u32();
            for &layer in self.layers.iter().rev() {
                let idx = BLOCK_WORDS * layer as usize + i;
                *w = unshift(*w, self.jump);
                *w = w.wrapping_sub(self.add[idx]).wrapping_mul(self.inv[idx]);
            }
            *w ^= mask;
        }
    }
}

impl StreamEngine for FubukiEngine {
    fn block_len(&self) -> usize {
        BLOCK_LEN
    }

    fn keystream_block(&mut self, out: &mut [u8]) {
        let mut x = [0u32; BLOCK_WORDS];
        self.encrypt_words(&mut x);
        words::write_u32_into(Endian::Little, &x, out);
    }

    fn process_block(&mut self, action: Action, data: &mut [u8]) {
        let mut x = [0u32; BLOCK_WORDS];
        words::read_u32_into(Endian::Little, data, &mut x);
        match action {
            Action::Encrypt => self.encrypt_words(&mut x),
            Action::Decrypt => self.decrypt_words(&mut x),
        }
        words::write_u32_into(Endian::Little, &x, data);
    }
}

opaque_debug::implement!(FubukiEngine);

/// FUBUKI stream session with key and IV sequencing.
pub type FubukiSession = StreamContext<FubukiKey>;
