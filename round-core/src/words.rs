//! Packing of bytes into 32- and 64-bit words in an explicit byte order.
//!
//! Every primitive names the byte order its standard uses; the host's
//! native order only matters for the zero-copy path of [`with_u32_words`]
//! and [`with_u64_words`], which borrow a block in place when it is already
//! word-aligned and in native order, and copy-and-convert otherwise.
//!
//! Out-of-bounds offsets and output buffers larger than the supplied words
//! are caller bugs and panic.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order of words inside a primitive's blocks and outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

cfg_if::cfg_if! {
    if #[cfg(target_endian = "little")] {
        const NATIVE: Endian = Endian::Little;
    } else {
        const NATIVE: Endian = Endian::Big;
    }
}

impl Endian {
    /// Byte order of the host.
    pub const fn native() -> Self {
        NATIVE
    }

    /// Returns `true` if words in this order can be read without swapping.
    pub fn is_native(self) -> bool {
        self == NATIVE
    }
}

macro_rules! define_word_ops {
    (
        $word:ty,
        $size:expr,
        $pack:ident,
        $unpack:ident,
        $read_into:ident,
        $write_into:ident,
        $read:ident,
        $write:ident
    ) => {
        #[doc = concat!(
            "Packs `dst.len()` `", stringify!($word), "` words from `src[offset..]`.\n\n",
            "Bytes past the end of `src` read as zero, so a trailing partial word is ",
            "zero-extended in the requested byte order."
        )]
        pub fn $pack(order: Endian, src: &[u8], offset: usize, dst: &mut [$word]) {
            let src = &src[offset..];
            for (i, w) in dst.iter_mut().enumerate() {
                let start = (i * $size).min(src.len());
                let end = (i * $size + $size).min(src.len());
                let mut buf = [0u8; $size];
                buf[..end - start].copy_from_slice(&src[start..end]);
                *w = match order {
                    Endian::Little => LittleEndian::$read(&buf),
                    Endian::Big => BigEndian::$read(&buf),
                };
            }
        }

        #[doc = concat!(
            "Unpacks `", stringify!($word), "` words into `dst`, truncating the last ",
            "word when `dst` ends inside it."
        )]
        pub fn $unpack(order: Endian, src: &[$word], dst: &mut [u8]) {
            assert!(dst.len() <= src.len() * $size, "output longer than the word input");
            for (chunk, w) in dst.chunks_mut($size).zip(src.iter()) {
                let mut buf = [0u8; $size];
                match order {
                    Endian::Little => LittleEndian::$write(&mut buf, *w),
                    Endian::Big => BigEndian::$write(&mut buf, *w),
                }
                let n = chunk.len();
                chunk.copy_from_slice(&buf[..n]);
            }
        }

        #[doc = concat!(
            "Reads exactly `dst.len()` words; `src` must be `", stringify!($size),
            " * dst.len()` bytes long."
        )]
        #[inline]
        pub fn $read_into(order: Endian, src: &[u8], dst: &mut [$word]) {
            match order {
                Endian::Little => LittleEndian::$read_into(src, dst),
                Endian::Big => BigEndian::$read_into(src, dst),
            }
        }

        #[doc = concat!(
            "Writes every word of `src`; `dst` must be `", stringify!($size),
            " * src.len()` bytes long."
        )]
        #[inline]
        pub fn $write_into(order: Endian, src: &[$word], dst: &mut [u8]) {
            match order {
                Endian::Little => LittleEndian::$write_into(src, dst),
                Endian::Big => BigEndian::$write_into(src, dst),
            }
        }
    };
}

define_word_ops!(
    u32,
    4,
    pack_u32,
    unpack_u32,
    read_u32_into,
    write_u32_into,
    read_u32,
    write_u32
);

define_word_ops!(
    u64,
    8,
    pack_u64,
    unpack_u64,
    read_u64_into,
    write_u64_into,
    read_u64,
    write_u64
);

cfg_if::cfg_if! {
    if #[cfg(feature = "force-copy")] {
        fn borrow_u32(_: Endian, _: &[u8]) -> Option<&[u32]> {
            None
        }

        fn borrow_u64(_: Endian, _: &[u8]) -> Option<&[u64]> {
            None
        }
    } else {
        #[allow(unsafe_code)]
        fn borrow_u32(order: Endian, block: &[u8]) -> Option<&[u32]> {
            if !order.is_native() {
                return None;
            }
            // SAFETY: every bit pattern is a valid `u32` and `align_to`
            // only hands out the correctly aligned middle part.
            let (head, words, tail) = unsafe { block.align_to::<u32>() };
            if head.is_empty() && tail.is_empty() {
                Some(words)
            } else {
                None
            }
        }

        #[allow(unsafe_code)]
        fn borrow_u64(order: Endian, block: &[u8]) -> Option<&[u64]> {
            if !order.is_native() {
                return None;
            }
            // SAFETY: as for `borrow_u32`.
            let (head, words, tail) = unsafe { block.align_to::<u64>() };
            if head.is_empty() && tail.is_empty() {
                Some(words)
            } else {
                None
            }
        }
    }
}

/// Calls `f` with `block` viewed as `scratch.len()` words in `order`.
///
/// The block is borrowed in place when it is already aligned and in native
/// order; otherwise it is converted into `scratch`. Both paths hand `f` the
/// same word values.
#[inline]
pub fn with_u32_words<R>(
    order: Endian,
    block: &[u8],
    scratch: &mut [u32],
    f: impl FnOnce(&[u32]) -> R,
) -> R {
    match borrow_u32(order, block) {
        Some(words) if words.len() == scratch.len() => f(words),
        _ => {
            read_u32_into(order, block, scratch);
            f(scratch)
        }
    }
}

/// 64-bit counterpart of [`with_u32_words`].
#[inline]
pub fn with_u64_words<R>(
    order: Endian,
    block: &[u8],
    scratch: &mut [u64],
    f: impl FnOnce(&[u64]) -> R,
) -> R {
    match borrow_u64(order, block) {
        Some(words) if words.len() == scratch.len() => f(words),
        _ => {
            read_u64_into(order, block, scratch);
            f(scratch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(align(8))]
    struct Aligned([u8; 72]);

    #[test]
    fn pack_partial_words_zero_extend() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut le = [0u32; 2];
        pack_u32(Endian::Little, &bytes, 0, &mut le);
        assert_eq!(le, [0x0403_0201, 0x0000_0605]);

        let mut be = [0u32; 2];
        pack_u32(Endian::Big, &bytes, 0, &mut be);
        assert_eq!(be, [0x0102_0304, 0x0506_0000]);

        let mut off = [0u32; 1];
        pack_u32(Endian::Little, &bytes, 3, &mut off);
        assert_eq!(off, [0x0006_0504]);
    }

    #[test]
    fn pack_past_end_is_zero() {
        let mut words = [0xffff_ffffu32; 3];
        pack_u32(Endian::Big, &[0xaa], 0, &mut words);
        assert_eq!(words, [0xaa00_0000, 0, 0]);
    }

    #[test]
    fn unpack_truncates() {
        let words = [0x0403_0201u32, 0x0807_0605];
        let mut out = [0u8; 6];
        unpack_u32(Endian::Little, &words, &mut out);
        assert_eq!(out, [1, 2, 3, 4, 5, 6]);

        let mut out = [0u8; 3];
        unpack_u64(Endian::Big, &[0x0102_0304_0506_0708], &mut out);
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    #[should_panic]
    fn unpack_rejects_long_output() {
        let mut out = [0u8; 9];
        unpack_u32(Endian::Little, &[1, 2], &mut out);
    }

    #[test]
    fn borrowed_and_copied_paths_agree() {
        let mut buf = Aligned([0u8; 72]);
        for (i, b) in buf.0.iter_mut().enumerate() {
            *b = (i * 7 + 3) as u8;
        }
        for order in [Endian::Little, Endian::Big].iter().copied() {
            let mut expected = [0u32; 16];
            read_u32_into(order, &buf.0[..64], &mut expected);

            let mut scratch = [0u32; 16];
            let aligned = with_u32_words(order, &buf.0[..64], &mut scratch, |w| {
                let mut out = [0u32; 16];
                out.copy_from_slice(w);
                out
            });
            assert_eq!(aligned, expected);

            let mut shifted = [0u32; 16];
            read_u32_into(order, &buf.0[1..65], &mut shifted);
            let unaligned = with_u32_words(order, &buf.0[1..65], &mut scratch, |w| {
                let mut out = [0u32; 16];
                out.copy_from_slice(w);
                out
            });
            assert_eq!(unaligned, shifted);

            let mut wide = [0u64; 8];
            read_u64_into(order, &buf.0[8..72], &mut wide);
            let mut scratch64 = [0u64; 8];
            let sum = with_u64_words(order, &buf.0[8..72], &mut scratch64, |w| {
                w.iter().fold(0u64, |acc, x| acc ^ x)
            });
            assert_eq!(sum, wide.iter().fold(0u64, |acc, x| acc ^ x));
        }
    }
}
