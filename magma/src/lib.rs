//! Round-reduced implementation of the [block cipher][1] defined in
//! GOST 28147-89 and GOST R 34.12-2015.
//!
//! The 32 Feistel rounds follow the key-index schedule `0..8` three times
//! and `7..=0` once. A reduced cipher runs the first `rounds` entries and
//! still applies the final half swap; decryption runs the same prefix in
//! reverse.
//!
//! # Examples
//! ```
//! use magma::Magma;
//! use magma::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt};
//! use hex_literal::hex;
//!
//! let key = hex!(
//!     "ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff"
//! );
//! let full = Magma::with_rounds(&key, 32).unwrap();
//! let mut block = GenericArray::clone_from_slice(&hex!("fedcba9876543210"));
//! full.encrypt_block(&mut block);
//! assert_eq!(block.as_slice(), &hex!("4ee901e5c2d8ca3d"));
//!
//! let reduced = Magma::with_rounds(&key, 5).unwrap();
//! let mut block = GenericArray::clone_from_slice(&hex!("fedcba9876543210"));
//! reduced.encrypt_block(&mut block);
//! assert_ne!(block.as_slice(), &hex!("4ee901e5c2d8ca3d"));
//! reduced.decrypt_block(&mut block);
//! assert_eq!(block.as_slice(), &hex!("fedcba9876543210"));
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/GOST_(block_cipher)
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;
pub use round_core;

use byteorder::{BigEndian, ByteOrder};
use cipher::{
    consts::{U32, U8},
    generic_array::GenericArray,
    BlockCipher, KeyInit, KeySizeUser,
};
use core::{fmt, marker::PhantomData};
use round_core::{Error, RoundSpec};

mod sboxes;

pub use sboxes::{Sbox, Tc26};

/// Block over which the Magma cipher operates.
pub type Block = GenericArray<u8, U8>;
/// The Magma cipher initialization key.
pub type Key = GenericArray<u8, U32>;

const KEY_SCHEDULE: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0,
];

/// Key-index schedule of the 32 rounds.
pub static MAGMA_SPEC: RoundSpec<u8> = RoundSpec::new("MAGMA", &KEY_SCHEDULE);

/// Block cipher defined in GOST 28147-89 generic over S-box
#[derive(Clone, Copy)]
pub struct Gost89<S: Sbox> {
    key: [u32; 8],
    schedule: &'static [u8],
    _p: PhantomData<S>,
}

impl<S: Sbox> Gost89<S> {
    /// Creates a cipher running the first `rounds` of the 32 rounds.
    pub fn with_rounds(key: &[u8], rounds: usize) -> Result<Self, Error> {
        if key.len() != 32 {
            return Err(Error::InvalidKeySize(key.len() * 8));
        }
        let limit = MAGMA_SPEC.limit(rounds)?;
        Ok(Self {
            key: expand_key(key),
            schedule: MAGMA_SPEC.steps(limit),
            _p: PhantomData,
        })
    }

    /// Number of rounds this instance runs.
    pub fn rounds(&self) -> usize {
        self.schedule.len()
    }

    #[inline]
    fn feistel<'a>(&self, block: &[u8], order: impl Iterator<Item = &'a u8>) -> (u32, u32) {
        let mut v = (BigEndian::read_u32(&block[0..4]), BigEndian::read_u32(&block[4..8]));
        for &i in order {
            v = (v.1, v.0 ^ S::g(v.1, self.key[i as usize]));
        }
        v
    }
}

fn expand_key(key: &[u8]) -> [u32; 8] {
    let mut key_u32 = [0u32; 8];
    BigEndian::read_u32_into(key, &mut key_u32);
    key_u32
}

impl<S: Sbox> KeySizeUser for Gost89<S> {
    type KeySize = U32;
}

impl<S: Sbox> KeyInit for Gost89<S> {
    fn new(key: &Key) -> Self {
        Self {
            key: expand_key(key),
            schedule: MAGMA_SPEC.all(),
            _p: PhantomData,
        }
    }
}

impl<S: Sbox> BlockCipher for Gost89<S> {}

cipher::impl_simple_block_encdec!(
    <S: Sbox> Gost89, U8, cipher, block,
    encrypt: {
        let v = cipher.feistel(block.get_in(), cipher.schedule.iter());
        let block = block.get_out();
        BigEndian::write_u32(&mut block[0..4], v.1);
        BigEndian::write_u32(&mut block[4..8], v.0);
    }
    decrypt: {
        let v = cipher.feistel(block.get_in(), cipher.schedule.iter().rev());
        let block = block.get_out();
        BigEndian::write_u32(&mut block[0..4], v.1);
        BigEndian::write_u32(&mut block[4..8], v.0);
    }
);

impl<S: Sbox> fmt::Debug for Gost89<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gost89<{}> {{ .. }}", S::NAME)
    }
}

/// Block cipher defined in GOST R 34.12-2015 (Magma)
pub type Magma = Gost89<Tc26>;
