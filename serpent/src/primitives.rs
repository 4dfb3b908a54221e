//! Serpent building blocks on four 32-bit words in bitslice order.

use crate::consts::{PHI, SBOX, SBOX_INV};
use byteorder::{ByteOrder, LittleEndian};

/// Four-word Serpent state or subkey.
pub type Words = [u32; 4];

/// Full Serpent key schedule: 33 subkeys.
pub type Subkeys = [Words; 33];

fn apply_sbox(table: &[u8; 16], x: &mut Words) {
    let mut out = [0u32; 4];
    for bit in 0..32 {
        let nibble = ((x[0] >> bit) & 1)
            | (((x[1] >> bit) & 1) << 1)
            | (((x[2] >> bit) & 1) << 2)
            | (((x[3] >> bit) & 1) << 3);
        let s = u32::from(table[nibble as usize]);
        for (j, o) in out.iter_mut().enumerate() {
            *o |= ((s >> j) & 1) << bit;
        }
    }
    *x = out;
}

/// Applies S-box `index % 8` to every bit column of `x`.
pub fn sbox(index: usize, x: &mut Words) {
    apply_sbox(&SBOX[index % 8], x);
}

/// Applies the inverse of S-box `index % 8`.
pub fn sbox_inv(index: usize, x: &mut Words) {
    apply_sbox(&SBOX_INV[index % 8], x);
}

/// Serpent linear transformation.
pub fn linear_transform(x: &mut Words) {
    let [mut x0, mut x1, mut x2, mut x3] = *x;
    x0 = x0.rotate_left(13);
    x2 = x2.rotate_left(3);
    x1 ^= x0 ^ x2;
    x3 ^= x2 ^ (x0 << 3);
    x1 = x1.rotate_left(1);
    x3 = x3.rotate_left(7);
    x0 ^= x1 ^ x3;
    x2 ^= x3 ^ (x1 << 7);
    x0 = x0.rotate_left(5);
    x2 = x2.rotate_left(22);
    *x = [x0, x1, x2, x3];
}

/// Inverse of [`linear_transform`].
pub fn linear_transform_inv(x: &mut Words) {
    let [mut x0, mut x1, mut x2, mut x3] = *x;
    x2 = x2.rotate_right(22);
    x0 = x0.rotate_right(5);
    x2 ^= x3 ^ (x1 << 7);
    x0 ^= x1 ^ x3;
    x3 = x3.rotate_right(7);
    x1 = x1.rotate_right(1);
    x3 ^= x2 ^ (x0 << 3);
    x1 ^= x0 ^ x2;
    x2 = x2.rotate_right(3);
    x0 = x0.rotate_right(13);
    *x = [x0, x1, x2, x3];
}

/// XORs a subkey into the state.
#[inline]
pub fn xor_words(x: &mut Words, k: &Words) {
    x.iter_mut().zip(k.iter()).for_each(|(a, b)| *a ^= b);
}

/// Expands a key of 1 to 32 bytes into the 33 subkeys.
///
/// Shorter keys are padded with a single 1 bit followed by zeros.
pub fn expand_key(key: &[u8]) -> Subkeys {
    debug_assert!(!key.is_empty() && key.len() <= 32);
    let mut padded = [0u8; 32];
    padded[..key.len()].copy_from_slice(key);
    if key.len() < 32 {
        padded[key.len()] = 0x01;
    }

    let mut w = [0u32; 140];
    LittleEndian::read_u32_into(&padded, &mut w[..8]);
    for i in 8..140 {
        let t = w[i - 8] ^ w[i - 5] ^ w[i - 3] ^ w[i - 1] ^ PHI ^ (i as u32 - 8);
        w[i] = t.rotate_left(11);
    }

    let mut subkeys = [[0u32; 4]; 33];
    for (i, k) in subkeys.iter_mut().enumerate() {
        k.copy_from_slice(&w[8 + 4 * i..12 + 4 * i]);
        sbox((35 - i) % 8, k);
    }
    subkeys
}
