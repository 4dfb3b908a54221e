//! Round-reduced [Advanced Encryption Standard][1] block cipher.
//!
//! [`Aes128`], [`Aes192`] and [`Aes256`] implement the `cipher` crate's
//! block cipher traits at full strength through [`KeyInit`](cipher::KeyInit), and any prefix
//! of their round schedule through `with_rounds`.
//!
//! With the `ctr` feature enabled, [`AesCtr`] runs counter mode (128-bit
//! big endian counter) over the reduced cipher as a stream session.
//!
//! # Examples
//! ```
//! use aes::Aes128;
//! use aes::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! let key = hex!("000102030405060708090a0b0c0d0e0f");
//! let plaintext = hex!("00112233445566778899aabbccddeeff");
//!
//! let cipher = Aes128::new(GenericArray::from_slice(&key));
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(block.as_slice(), &hex!("69c4e0d86a7b0430d8cdb78070b4c55a"));
//!
//! // one round: AddRoundKey, SubBytes, ShiftRows, MixColumns, AddRoundKey
//! let reduced = Aes128::with_rounds(&key, 1).unwrap();
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! reduced.encrypt_block(&mut block);
//! assert_eq!(block.as_slice(), &hex!("89d810e8855ace682d1843d8cb128fe4"));
//! reduced.decrypt_block(&mut block);
//! assert_eq!(block.as_slice(), &plaintext);
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/Advanced_Encryption_Standard
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
mod soft;
#[cfg(feature = "ctr")]
mod stream;

pub use soft::{Aes128, Aes192, Aes256, AesRound, AES128_SPEC, AES192_SPEC, AES256_SPEC};
#[cfg(feature = "ctr")]
#[cfg_attr(docsrs, doc(cfg(feature = "ctr")))]
pub use stream::{AesCtr, AesCtrEngine, AesCtrKey};

use cipher::{consts::U16, generic_array::GenericArray};

/// 128-bit AES block
pub type Block = GenericArray<u8, U16>;

/// Full-round count for a key of `key_bits` bits.
pub fn max_rounds(key_bits: usize) -> Option<usize> {
    match key_bits {
        128 => Some(10),
        192 => Some(12),
        256 => Some(14),
        _ => None,
    }
}
