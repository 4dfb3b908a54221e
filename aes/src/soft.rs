//! Byte-oriented AES with a round limit.
//!
//! Encryption applies the initial AddRoundKey and then the first `rounds`
//! entries of the key size's round schedule. MixColumns is skipped only in
//! the genuine final round, so a reduced cipher is a prefix of the full one.
//! Decryption inverts exactly the rounds encryption ran.

#![deny(unsafe_code)]

use crate::consts::{INV_SBOX, RCON, SBOX};
use core::fmt;
use cipher::{
    consts::{U16, U24, U32},
    generic_array::GenericArray,
    BlockCipher, KeyInit, KeySizeUser,
};
use round_core::{Error, RoundSpec};

pub(crate) type RoundKeys = [[u8; 16]; 15];

/// One AES round: the round key it adds and whether MixColumns runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AesRound {
    /// Index of the round key added at the end of the round.
    pub round_key: u8,
    /// `false` only in the last round of the full cipher.
    pub mix_columns: bool,
}

const fn schedule<const NR: usize>() -> [AesRound; NR] {
    let mut rounds = [AesRound {
        round_key: 0,
        mix_columns: true,
    }; NR];
    let mut i = 0;
    while i < NR {
        rounds[i] = AesRound {
            round_key: (i + 1) as u8,
            mix_columns: i + 1 != NR,
        };
        i += 1;
    }
    rounds
}

const AES128_ROUNDS: [AesRound; 10] = schedule::<10>();
const AES192_ROUNDS: [AesRound; 12] = schedule::<12>();
const AES256_ROUNDS: [AesRound; 14] = schedule::<14>();

/// Round schedule of AES-128.
pub static AES128_SPEC: RoundSpec<AesRound> = RoundSpec::new("AES128", &AES128_ROUNDS);
/// Round schedule of AES-192.
pub static AES192_SPEC: RoundSpec<AesRound> = RoundSpec::new("AES192", &AES192_ROUNDS);
/// Round schedule of AES-256.
pub static AES256_SPEC: RoundSpec<AesRound> = RoundSpec::new("AES256", &AES256_ROUNDS);

pub(crate) fn expand_key(key: &[u8], nr: usize) -> RoundKeys {
    let nk = key.len() / 4;
    let mut w = [[0u8; 4]; 60];
    for (wi, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
        wi.copy_from_slice(chunk);
    }
    for i in nk..4 * (nr + 1) {
        let mut t = w[i - 1];
        if i % nk == 0 {
            t.rotate_left(1);
            t.iter_mut().for_each(|b| *b = SBOX[*b as usize]);
            t[0] ^= RCON[i / nk - 1];
        } else if nk > 6 && i % nk == 4 {
            t.iter_mut().for_each(|b| *b = SBOX[*b as usize]);
        }
        for j in 0..4 {
            w[i][j] = w[i - nk][j] ^ t[j];
        }
    }

    let mut keys = [[0u8; 16]; 15];
    for (r, k) in keys.iter_mut().enumerate().take(nr + 1) {
        for c in 0..4 {
            k[4 * c..4 * c + 4].copy_from_slice(&w[4 * r + c]);
        }
    }
    keys
}

#[inline(always)]
fn xtime(x: u8) -> u8 {
    (x << 1) ^ (((x >> 7) & 1) * 0x1b)
}

fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut r = 0;
    while b != 0 {
        if b & 1 != 0 {
            r ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    r
}

fn add_round_key(state: &mut [u8; 16], key: &[u8; 16]) {
    state.iter_mut().zip(key.iter()).for_each(|(s, k)| *s ^= k);
}

// state[r + 4 * c] holds row r of column c
fn shift_rows(state: &mut [u8; 16]) {
    let s = *state;
    for c in 0..4 {
        for r in 0..4 {
            state[r + 4 * c] = s[r + 4 * ((c + r) % 4)];
        }
    }
}

fn inv_shift_rows(state: &mut [u8; 16]) {
    let s = *state;
    for c in 0..4 {
        for r in 0..4 {
            state[r + 4 * ((c + r) % 4)] = s[r + 4 * c];
        }
    }
}

fn mix_columns(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
        let all = a0 ^ a1 ^ a2 ^ a3;
        col[0] ^= all ^ xtime(a0 ^ a1);
        col[1] ^= all ^ xtime(a1 ^ a2);
        col[2] ^= all ^ xtime(a2 ^ a3);
        col[3] ^= all ^ xtime(a3 ^ a0);
    }
}

fn inv_mix_columns(state: &mut [u8; 16]) {
    for col in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
        col[0] = gmul(a0, 14) ^ gmul(a1, 11) ^ gmul(a2, 13) ^ gmul(a3, 9);
        col[1] = gmul(a0, 9) ^ gmul(a1, 14) ^ gmul(a2, 11) ^ gmul(a3, 13);
        col[2] = gmul(a0, 13) ^ gmul(a1, 9) ^ gmul(a2, 14) ^ gmul(a3, 11);
        col[3] = gmul(a0, 11) ^ gmul(a1, 13) ^ gmul(a2, 9) ^ gmul(a3, 14);
    }
}

pub(crate) fn encrypt(keys: &RoundKeys, rounds: &[AesRound], state: &mut [u8; 16]) {
    add_round_key(state, &keys[0]);
    for round in rounds {
        state.iter_mut().for_each(|b| *b = SBOX[*b as usize]);
        shift_rows(state);
        if round.mix_columns {
            mix_columns(state);
        }
        add_round_key(state, &keys[round.round_key as usize]);
    }
}

pub(crate) fn decrypt(keys: &RoundKeys, rounds: &[AesRound], state: &mut [u8; 16]) {
    for round in rounds.iter().rev() {
        add_round_key(state, &keys[round.round_key as usize]);
        if round.mix_columns {
            inv_mix_columns(state);
        }
        inv_shift_rows(state);
        state.iter_mut().for_each(|b| *b = INV_SBOX[*b as usize]);
    }
    add_round_key(state, &keys[0]);
}

macro_rules! define_aes_impl {
    (
        $name:ident,
        $key_size:ty,
        $key_len:expr,
        $spec:ident,
        $doc:expr
    ) => {
        #[doc=$doc]
        #[derive(Clone)]
        pub struct $name {
            keys: RoundKeys,
            rounds: &'static [AesRound],
        }

        impl $name {
            /// Key length in bytes.
            pub const KEY_LEN: usize = $key_len;

            /// Expands `key` for a cipher running the first `rounds` rounds.
            pub fn with_rounds(key: &[u8], rounds: usize) -> Result<Self, Error> {
                if key.len() != $key_len {
                    return Err(Error::InvalidKeySize(key.len() * 8));
                }
                let limit = $spec.limit(rounds)?;
                Ok(Self {
                    keys: expand_key(key, $spec.max_rounds()),
                    rounds: $spec.steps(limit),
                })
            }

            /// Number of rounds this instance runs.
            pub fn rounds(&self) -> usize {
                self.rounds.len()
            }
        }

        impl KeySizeUser for $name {
            type KeySize = $key_size;
        }

        impl KeyInit for $name {
            #[inline]
            fn new(key: &GenericArray<u8, $key_size>) -> Self {
                Self {
                    keys: expand_key(key, $spec.max_rounds()),
                    rounds: $spec.all(),
                }
            }
        }

        impl BlockCipher for $name {}

        cipher::impl_simple_block_encdec!(
            $name, U16, cipher, block,
            encrypt: {
                let mut state = [0u8; 16];
                state.copy_from_slice(block.get_in());
                encrypt(&cipher.keys, cipher.rounds, &mut state);
                block.get_out().copy_from_slice(&state);
            }
            decrypt: {
                let mut state = [0u8; 16];
                state.copy_from_slice(block.get_in());
                decrypt(&cipher.keys, cipher.rounds, &mut state);
                block.get_out().copy_from_slice(&state);
            }
        );

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
                f.write_str(concat!(stringify!($name), " { .. }"))
            }
        }
    };
}

define_aes_impl!(Aes128, U16, 16, AES128_SPEC, "AES-128 block cipher instance");
define_aes_impl!(Aes192, U24, 24, AES192_SPEC, "AES-192 block cipher instance");
define_aes_impl!(Aes256, U32, 32, AES256_SPEC, "AES-256 block cipher instance");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sbox_inverse() {
        for i in 0..=255u8 {
            assert_eq!(INV_SBOX[SBOX[i as usize] as usize], i);
        }
    }

    #[test]
    fn mix_columns_inverse() {
        let mut state = [0u8; 16];
        state.iter_mut().enumerate().for_each(|(i, b)| *b = (i * 37) as u8);
        let orig = state;
        mix_columns(&mut state);
        shift_rows(&mut state);
        assert_ne!(state, orig);
        inv_shift_rows(&mut state);
        inv_mix_columns(&mut state);
        assert_eq!(state, orig);
    }

    #[test]
    fn schedules() {
        assert_eq!(AES128_SPEC.max_rounds(), 10);
        assert!(!AES256_ROUNDS[13].mix_columns);
        assert!(AES256_ROUNDS[..13].iter().all(|r| r.mix_columns));
    }

    #[test]
    fn fips197_key_expansion() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let keys = expand_key(&key, 10);
        assert_eq!(&keys[10][12..], &[0xb6, 0x63, 0x0c, 0xa6]);
    }
}
