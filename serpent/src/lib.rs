//! Round-reduced [Serpent][1] block cipher.
//!
//! A reduced cipher runs rounds `0..rounds` (subkey mix, S-box `i mod 8`,
//! linear transformation except in round 31) and then mixes in subkey
//! `rounds`. With all 32 rounds this is standard Serpent.
//!
//! Keys of 1 to 32 bytes are accepted through `new_from_slice` and
//! `with_rounds`.
//!
//! # Examples
//! ```
//! use serpent::Serpent;
//! use serpent::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
//! use hex_literal::hex;
//!
//! let key = hex!("80000000000000000000000000000000");
//! let cipher = Serpent::new_from_slice(&key).unwrap();
//! let mut block = GenericArray::clone_from_slice(&[0u8; 16]);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(block.as_slice(), &hex!("264e5481eff42a4606abda06c0bfda3d"));
//! cipher.decrypt_block(&mut block);
//! assert_eq!(block.as_slice(), &[0u8; 16]);
//! ```
//!
//! [1]: https://www.cl.cam.ac.uk/~rja14/serpent.html
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;
pub use round_core;

mod consts;
mod primitives;

use byteorder::{ByteOrder, LittleEndian};
use cipher::{
    consts::U16,
    generic_array::GenericArray,
    BlockCipher, InvalidLength, KeyInit, KeySizeUser,
};
use primitives::{
    expand_key, linear_transform, linear_transform_inv, sbox, sbox_inv, xor_words, Subkeys, Words,
};
use round_core::{Error, RoundSpec};

/// Serpent S-box layer, linear transformation and key schedule.
///
/// These are the unkeyed building blocks of the cipher, exposed for
/// constructions such as SOSEMANUK that reuse them.
#[cfg(feature = "hazmat")]
#[cfg_attr(docsrs, doc(cfg(feature = "hazmat")))]
pub mod hazmat {
    pub use crate::primitives::{
        expand_key, linear_transform, linear_transform_inv, sbox, sbox_inv, xor_words, Subkeys,
        Words,
    };
}

/// 128-bit Serpent block
pub type Block = GenericArray<u8, U16>;

/// One Serpent round: the S-box it applies and whether the linear
/// transformation follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerpentRound {
    /// S-box index.
    pub sbox: u8,
    /// `false` only in round 31.
    pub linear: bool,
}

const fn rounds() -> [SerpentRound; 32] {
    let mut r = [SerpentRound {
        sbox: 0,
        linear: true,
    }; 32];
    let mut i = 0;
    while i < 32 {
        r[i] = SerpentRound {
            sbox: (i % 8) as u8,
            linear: i != 31,
        };
        i += 1;
    }
    r
}

const ROUNDS: [SerpentRound; 32] = rounds();

/// Round schedule of Serpent.
pub static SERPENT_SPEC: RoundSpec<SerpentRound> = RoundSpec::new("SERPENT", &ROUNDS);

/// Serpent block cipher
#[derive(Clone)]
pub struct Serpent {
    k: Subkeys,
    rounds: &'static [SerpentRound],
}

impl Serpent {
    /// Creates a cipher running the first `rounds` of the 32 rounds.
    pub fn with_rounds(key: &[u8], rounds: usize) -> Result<Self, Error> {
        if key.is_empty() || key.len() > 32 {
            return Err(Error::InvalidKeySize(key.len() * 8));
        }
        let limit = SERPENT_SPEC.limit(rounds)?;
        Ok(Self {
            k: expand_key(key),
            rounds: SERPENT_SPEC.steps(limit),
        })
    }

    /// Number of rounds this instance runs.
    pub fn rounds(&self) -> usize {
        self.rounds.len()
    }

    fn encrypt_words(&self, x: &mut Words) {
        for (i, round) in self.rounds.iter().enumerate() {
            xor_words(x, &self.k[i]);
            sbox(round.sbox as usize, x);
            if round.linear {
                linear_transform(x);
            }
        }
        xor_words(x, &self.k[self.rounds.len()]);
    }

    fn decrypt_words(&self, x: &mut Words) {
        xor_words(x, &self.k[self.rounds.len()]);
        for (i, round) in self.rounds.iter().enumerate().rev() {
            if round.linear {
                linear_transform_inv(x);
            }
            sbox_inv(round.sbox as usize, x);
            xor_words(x, &self.k[i]);
        }
    }
}

impl KeySizeUser for Serpent {
    type KeySize = U16;
}

impl KeyInit for Serpent {
    fn new(key: &GenericArray<u8, U16>) -> Self {
        Self {
            k: expand_key(key),
            rounds: SERPENT_SPEC.all(),
        }
    }

    fn new_from_slice(key: &[u8]) -> Result<Self, InvalidLength> {
        if key.is_empty() || key.len() > 32 {
            return Err(InvalidLength);
        }
        Ok(Self {
            k: expand_key(key),
            rounds: SERPENT_SPEC.all(),
        })
    }
}

impl BlockCipher for Serpent {}

cipher::impl_simple_block_encdec!(
    Serpent, U16, cipher, block,
    encrypt: {
        let mut x = [0u32; 4];
        LittleEndian::read_u32_into(block.get_in(), &mut x);
        cipher.encrypt_words(&mut x);
        LittleEndian::write_u32_into(&x, block.get_out());
    }
    decrypt: {
        let mut x = [0u32; 4];
        LittleEndian::read_u32_into(block.get_in(), &mut x);
        cipher.decrypt_words(&mut x);
        LittleEndian::write_u32_into(&x, block.get_out());
    }
);

opaque_debug::implement!(Serpent);
