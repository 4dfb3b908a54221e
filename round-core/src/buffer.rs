//! Incremental block buffering with Merkle–Damgård and sponge padding.

use crate::words::Endian;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Partial-block buffer of a byte-stream primitive with block size `N`.
///
/// Full blocks are handed to the transform as soon as they are complete,
/// straight from the caller's input when possible. Between calls the
/// buffer holds strictly fewer than `N` bytes.
#[derive(Clone, Debug)]
pub struct BlockBuffer<const N: usize> {
    buf: [u8; N],
    pos: usize,
    total: u64,
}

impl<const N: usize> Default for BlockBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BlockBuffer<N> {
    /// Block size in bytes.
    pub const BLOCK_SIZE: usize = N;

    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            pos: 0,
            total: 0,
        }
    }

    /// Number of buffered bytes, always `< N`.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Returns `true` if no partial block is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Number of bytes submitted since creation or the last reset.
    #[inline]
    pub fn total_len(&self) -> u64 {
        self.total
    }

    /// Forgets the buffered bytes and the byte counter.
    pub fn reset(&mut self) {
        self.buf = [0; N];
        self.pos = 0;
        self.total = 0;
    }

    /// Absorbs `input`, calling `compress` with every completed block.
    ///
    /// `compress` always receives exactly `N` bytes.
    pub fn update(&mut self, mut input: &[u8], mut compress: impl FnMut(&[u8])) {
        self.total = self.total.wrapping_add(input.len() as u64);

        if self.pos != 0 {
            let take = (N - self.pos).min(input.len());
            self.buf[self.pos..self.pos + take].copy_from_slice(&input[..take]);
            self.pos += take;
            input = &input[take..];
            if self.pos < N {
                return;
            }
            compress(&self.buf);
            self.pos = 0;
        }

        let mut blocks = input.chunks_exact(N);
        for block in &mut blocks {
            compress(block);
        }
        let tail = blocks.remainder();
        self.buf[..tail.len()].copy_from_slice(tail);
        self.pos = tail.len();
    }

    /// Applies the Merkle–Damgård length suffix and compresses the last
    /// one or two blocks.
    ///
    /// A 0x80 byte follows the message; the final 8 bytes of the last block
    /// carry the message length in bits, as a `u64` in `order`. If fewer than
    /// 8 bytes remain after the 0x80 byte an extra all-zero block is started.
    pub fn md_finalize(&mut self, order: Endian, mut compress: impl FnMut(&[u8])) {
        let bit_len = self.total.wrapping_mul(8);
        let pos = self.pos;
        self.buf[pos] = 0x80;
        for b in self.buf[pos + 1..].iter_mut() {
            *b = 0;
        }
        if pos + 1 > N - 8 {
            compress(&self.buf);
            self.buf = [0; N];
        }
        match order {
            Endian::Little => LittleEndian::write_u64(&mut self.buf[N - 8..], bit_len),
            Endian::Big => BigEndian::write_u64(&mut self.buf[N - 8..], bit_len),
        }
        compress(&self.buf);
        self.pos = 0;
    }

    /// Applies multi-rate sponge padding and absorbs the last block.
    ///
    /// `domain` is XORed at the current offset and 0x80 into the last byte
    /// of the rate; both land in the same byte when only one byte is free.
    pub fn sponge_finalize(&mut self, domain: u8, mut absorb: impl FnMut(&[u8])) {
        let pos = self.pos;
        for b in self.buf[pos..].iter_mut() {
            *b = 0;
        }
        self.buf[pos] ^= domain;
        self.buf[N - 1] ^= 0x80;
        absorb(&self.buf);
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn blocks_of(chunks: &[&[u8]]) -> (Vec<Vec<u8>>, usize) {
        let mut buf = BlockBuffer::<8>::new();
        let mut seen = Vec::new();
        for chunk in chunks {
            buf.update(chunk, |b| seen.push(b.to_vec()));
            assert!(buf.len() < 8);
        }
        (seen, buf.len())
    }

    #[test]
    fn chunking_does_not_change_blocks() {
        let data: Vec<u8> = (0u8..29).collect();
        let whole = blocks_of(&[&data]);
        let bytes: Vec<&[u8]> = data.chunks(1).collect();
        let single = blocks_of(&bytes);
        let mixed = blocks_of(&[&[], &data[..3], &[], &data[3..17], &data[17..]]);
        assert_eq!(whole, single);
        assert_eq!(whole, mixed);
        assert_eq!(whole.0.len(), 3);
        assert_eq!(whole.1, 5);
    }

    #[test]
    fn exact_block_is_not_kept() {
        let mut buf = BlockBuffer::<8>::new();
        let mut n = 0;
        buf.update(&[7; 16], |_| n += 1);
        assert_eq!(n, 2);
        assert!(buf.is_empty());
        assert_eq!(buf.total_len(), 16);
    }

    fn md_blocks(len: usize, order: Endian) -> Vec<Vec<u8>> {
        let mut buf = BlockBuffer::<64>::new();
        let mut seen = Vec::new();
        buf.update(&alloc::vec![0x61; len], |b| seen.push(b.to_vec()));
        buf.md_finalize(order, |b| seen.push(b.to_vec()));
        seen
    }

    #[test]
    fn md_padding_boundaries() {
        // 8 bytes free after the 0x80 byte: one block
        let b = md_blocks(55, Endian::Big);
        assert_eq!(b.len(), 1);
        assert_eq!(b[0][55], 0x80);
        assert_eq!(&b[0][56..], &[0, 0, 0, 0, 0, 0, 0x01, 0xb8]);

        // 7 bytes free: flush and append a length block
        let b = md_blocks(56, Endian::Little);
        assert_eq!(b.len(), 2);
        assert_eq!(b[0][56], 0x80);
        assert!(b[0][57..].iter().all(|&x| x == 0));
        assert!(b[1][..56].iter().all(|&x| x == 0));
        assert_eq!(&b[1][56..], &[0xc0, 0x01, 0, 0, 0, 0, 0, 0]);

        let b = md_blocks(0, Endian::Big);
        assert_eq!(b.len(), 1);
        assert_eq!(b[0][0], 0x80);
        assert!(b[0][1..].iter().all(|&x| x == 0));

        assert_eq!(md_blocks(63, Endian::Big).len(), 2);
        assert_eq!(md_blocks(64, Endian::Big).len(), 2);
        assert_eq!(md_blocks(65, Endian::Big).len(), 2);
    }

    #[test]
    fn sponge_padding() {
        let mut buf = BlockBuffer::<8>::new();
        let mut last = Vec::new();
        buf.update(&[1, 2, 3], |_| unreachable!());
        buf.sponge_finalize(0x06, |b| last = b.to_vec());
        assert_eq!(last, [1, 2, 3, 0x06, 0, 0, 0, 0x80]);

        let mut buf = BlockBuffer::<8>::new();
        buf.update(&[9; 7], |_| unreachable!());
        buf.sponge_finalize(0x1f, |b| last = b.to_vec());
        assert_eq!(last, [9, 9, 9, 9, 9, 9, 9, 0x9f]);
    }
}
