//! Round-reduced [Salsa20][1] stream cipher.
//!
//! Each keystream block runs the first `rounds` single rounds of the 20,
//! alternating column and row rounds, and then adds the input block back
//! in. Salsa20/8 and Salsa20/12 are simply limits of 8 and 12.
//!
//! # Examples
//! ```
//! use salsa20::Salsa20;
//! use salsa20::cipher::{KeyIvInit, StreamCipher};
//! use hex_literal::hex;
//!
//! let key = hex!("80000000000000000000000000000000 00000000000000000000000000000000");
//! let mut cipher = Salsa20::new(&key.into(), &[0u8; 8].into());
//! let mut buf = [0u8; 16];
//! cipher.apply_keystream(&mut buf);
//! assert_eq!(buf, hex!("e3be8fdd8beca2e3ea8ef9475b29a6e7"));
//! ```
//!
//! [1]: https://cr.yp.to/snuffle.html
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

use cipher::{
    consts::{U32, U64, U8},
    BlockSizeUser, IvSizeUser, KeyIvInit, KeySizeUser, StreamCipherCore,
    StreamCipherCoreWrapper, StreamCipherSeekCore, StreamClosure,
};
use core::fmt;
use round_core::{
    words::{self, Endian},
    CoreEngine, Error, RoundLimit, RoundSpec, SizeRange, StreamContext, StreamKeySetup,
};

pub(crate) const STATE_WORDS: usize = 16;

const SIGMA: &[u8; 16] = b"expand 32-byte k";
const TAU: &[u8; 16] = b"expand 16-byte k";

/// One single round: four quarter-rounds given by their word indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SalsaRound {
    /// Index quadruples `(a, b, c, d)` of the quarter-rounds.
    pub quarters: [[usize; 4]; 4],
}

const COLUMN: SalsaRound = SalsaRound {
    quarters: [[0, 4, 8, 12], [5, 9, 13, 1], [10, 14, 2, 6], [15, 3, 7, 11]],
};

const ROW: SalsaRound = SalsaRound {
    quarters: [[0, 1, 2, 3], [5, 6, 7, 4], [10, 11, 8, 9], [15, 12, 13, 14]],
};

const ROUNDS: [SalsaRound; 20] = [
    COLUMN, ROW, COLUMN, ROW, COLUMN, ROW, COLUMN, ROW, COLUMN, ROW, COLUMN, ROW, COLUMN, ROW,
    COLUMN, ROW, COLUMN, ROW, COLUMN, ROW,
];

/// Round schedule of Salsa20.
pub static SALSA20_SPEC: RoundSpec<SalsaRound> = RoundSpec::new("SALSA20", &ROUNDS);

fn input_block(constants: &[u8; 16], k0: &[u8], k1: &[u8], iv: &[u8]) -> [u32; STATE_WORDS] {
    let mut c = [0u32; 4];
    words::read_u32_into(Endian::Little, constants, &mut c);
    let mut state = [0u32; STATE_WORDS];
    state[0] = c[0];
    words::read_u32_into(Endian::Little, k0, &mut state[1..5]);
    state[5] = c[1];
    words::read_u32_into(Endian::Little, iv, &mut state[6..8]);
    state[10] = c[2];
    words::read_u32_into(Endian::Little, k1, &mut state[11..15]);
    state[15] = c[3];
    state
}

/// Salsa20 keystream core: input block and round schedule prefix.
#[derive(Clone)]
pub struct Salsa20Core {
    state: [u32; STATE_WORDS],
    rounds: &'static [SalsaRound],
}

impl Salsa20Core {
    /// Builds the input block for a 16- or 32-byte key and an 8-byte IV,
    /// running the first `limit` rounds.
    ///
    /// `limit` must have been checked against [`SALSA20_SPEC`].
    pub fn with_rounds(key: &[u8], iv: &[u8], limit: RoundLimit) -> Result<Self, Error> {
        let (constants, k1) = match key.len() {
            16 => (TAU, key),
            32 => (SIGMA, &key[16..]),
            n => return Err(Error::InvalidKeySize(n * 8)),
        };
        if iv.len() != 8 {
            return Err(Error::InvalidIvSize(iv.len() * 8));
        }

        Ok(Self {
            state: input_block(constants, &key[..16], k1, iv),
            rounds: SALSA20_SPEC.steps(limit),
        })
    }

    /// Number of rounds per keystream block.
    pub fn rounds(&self) -> usize {
        self.rounds.len()
    }

    pub(crate) fn counter(&self) -> u64 {
        u64::from(self.state[8]) | (u64::from(self.state[9]) << 32)
    }

    pub(crate) fn set_counter(&mut self, counter: u64) {
        self.state[8] = counter as u32;
        self.state[9] = (counter >> 32) as u32;
    }
}

impl KeySizeUser for Salsa20Core {
    type KeySize = U32;
}

impl IvSizeUser for Salsa20Core {
    type IvSize = U8;
}

impl BlockSizeUser for Salsa20Core {
    type BlockSize = U64;
}

impl KeyIvInit for Salsa20Core {
    fn new(key: &cipher::Key<Self>, iv: &cipher::Iv<Self>) -> Self {
        Self {
            state: input_block(SIGMA, &key[..16], &key[16..], iv),
            rounds: SALSA20_SPEC.all(),
        }
    }
}

impl StreamCipherCore for Salsa20Core {
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut backend::Backend(self));
    }
}

impl StreamCipherSeekCore for Salsa20Core {
    type Counter = u64;

    fn get_block_pos(&self) -> u64 {
        self.counter()
    }

    fn set_block_pos(&mut self, pos: u64) {
        self.set_counter(pos);
    }
}

impl fmt::Debug for Salsa20Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salsa20Core {{ rounds: {}, .. }}", self.rounds.len())
    }
}

/// Full-round Salsa20 with a 256-bit key.
pub type Salsa20 = StreamCipherCoreWrapper<Salsa20Core>;

/// Key of a Salsa20 stream session.
#[derive(Clone)]
pub struct Salsa20Key {
    key: [u8; 32],
    len: usize,
    limit: RoundLimit,
}

impl StreamKeySetup for Salsa20Key {
    type Engine = CoreEngine<Salsa20Core>;

    const NAME: &'static str = "SALSA20";
    const BLOCK_LEN: usize = 64;
    const KEY_SIZES: SizeRange = SizeRange {
        base: 128,
        step: 128,
        max: 256,
    };
    const IV_SIZES: SizeRange = SizeRange::single(64);
    const MAX_ROUNDS: usize = 20;

    fn key_setup(key: &[u8], limit: RoundLimit) -> Result<Self, Error> {
        if key.len() != 16 && key.len() != 32 {
            return Err(Error::InvalidKeySize(key.len() * 8));
        }
        let mut buf = [0u8; 32];
        buf[..key.len()].copy_from_slice(key);
        Ok(Self {
            key: buf,
            len: key.len(),
            limit,
        })
    }

    fn iv_setup(&self, iv: &[u8]) -> Result<Self::Engine, Error> {
        Salsa20Core::with_rounds(&self.key[..self.len], iv, self.limit).map(CoreEngine::new)
    }
}

/// Salsa20 stream session with key and IV sequencing.
pub type Salsa20Session = StreamContext<Salsa20Key>;
