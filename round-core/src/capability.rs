//! Capability interfaces: hashing, block encryption and their object-safe
//! faces used by the registry.

use crate::{rounds::RoundLimit, Error};
use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, BlockSizeUser};
use core::ops::BitOr;

static CAPABILITY_NAMES: [(Capabilities, &str); 3] = [
    (Capabilities::HASHABLE, "Hashable"),
    (Capabilities::BLOCK_CIPHER, "BlockCipherLike"),
    (Capabilities::STREAM_CIPHER, "StreamCipherLike"),
];

/// Set of capability interfaces an algorithm implements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    /// Empty set.
    pub const NONE: Self = Capabilities(0);
    /// [`Hashable`].
    pub const HASHABLE: Self = Capabilities(1);
    /// [`BlockCipherLike`].
    pub const BLOCK_CIPHER: Self = Capabilities(1 << 1);
    /// [`StreamCipherLike`](crate::StreamCipherLike).
    pub const STREAM_CIPHER: Self = Capabilities(1 << 2);

    /// Union of two sets.
    pub const fn union(self, other: Self) -> Self {
        Capabilities(self.0 | other.0)
    }

    /// Returns `true` if every capability of `other` is in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the capabilities in the set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        CAPABILITY_NAMES
            .iter()
            .filter(move |(c, _)| self.contains(*c))
            .map(|(_, name)| *name)
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Direction of a cipher operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// Enumeration of supported sizes in bits: `base + i * step` while `<= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizeRange {
    /// Smallest size.
    pub base: usize,
    /// Distance between consecutive sizes; zero for a single size.
    pub step: usize,
    /// Largest size.
    pub max: usize,
}

impl SizeRange {
    /// Enumeration holding one size.
    pub const fn single(bits: usize) -> Self {
        SizeRange {
            base: bits,
            step: 0,
            max: bits,
        }
    }

    /// `i`-th size of the enumeration.
    pub fn nth(&self, i: usize) -> Option<usize> {
        if self.step == 0 {
            return if i == 0 { Some(self.base) } else { None };
        }
        let size = i.checked_mul(self.step)?.checked_add(self.base)?;
        if size <= self.max {
            Some(size)
        } else {
            None
        }
    }

    /// Returns `true` if `bits` is one of the enumerated sizes.
    pub fn contains(&self, bits: usize) -> bool {
        if bits < self.base || bits > self.max {
            return false;
        }
        match self.step {
            0 => bits == self.base,
            step => (bits - self.base) % step == 0,
        }
    }

    /// Every enumerated size, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..).map_while(move |i| self.nth(i))
    }
}

/// Round-limited hash compression core with its buffering state.
///
/// Implemented by every hash primitive; [`HashContext`] adds the sequencing
/// checks and the object-safe [`Hashable`] face on top.
pub trait HashCore: Sized {
    /// Registry name.
    const NAME: &'static str;
    /// Block (or sponge rate) size in bytes.
    const BLOCK_SIZE: usize;
    /// Default output size in bytes.
    const OUTPUT_SIZE: usize;
    /// Length of the full round schedule.
    const MAX_ROUNDS: usize;

    /// Creates a core running `limit` schedule steps per block.
    ///
    /// Processing panics if `limit` was checked against a schedule whose
    /// length is not `MAX_ROUNDS`.
    fn with_rounds(limit: RoundLimit) -> Self;

    /// Creates a full-round core.
    fn new() -> Self {
        Self::with_rounds(RoundLimit::full(Self::MAX_ROUNDS))
    }

    /// Creates a core running `rounds` steps, rejecting limits past the
    /// full schedule.
    fn new_reduced(rounds: usize) -> Result<Self, Error> {
        Ok(Self::with_rounds(RoundLimit::new(
            Self::NAME,
            rounds,
            Self::MAX_ROUNDS,
        )?))
    }

    /// Absorbs `data`.
    fn update(&mut self, data: &[u8]);

    /// Pads, processes the last block(s) and writes the digest.
    ///
    /// `out` must be `OUTPUT_SIZE` bytes long for fixed-output hashes; an
    /// extendable-output function fills `out` whatever its length.
    fn finalize_into(self, out: &mut [u8]);

    /// Bytes waiting for a full block.
    fn buffered_len(&self) -> usize;
}

/// Object-safe incremental hashing interface.
pub trait Hashable: Send {
    /// Registry name.
    fn name(&self) -> &'static str;
    /// Block size in bytes.
    fn block_size(&self) -> usize;
    /// Output size in bytes.
    fn output_size(&self) -> usize;
    /// Configured round limit.
    fn round_limit(&self) -> usize;
    /// Restarts the computation, discarding any absorbed input.
    fn init(&mut self);
    /// Absorbs `data`; fails once the context has been finalized.
    fn update(&mut self, data: &[u8]) -> Result<(), Error>;
    /// Writes the digest into `out`, which must be `output_size()` bytes.
    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), Error>;
    /// Bytes waiting for a full block; zero after finalization.
    fn buffered_len(&self) -> usize;
}

/// Sequencing wrapper turning a [`HashCore`] into a [`Hashable`].
#[derive(Clone, Debug)]
pub struct HashContext<H> {
    core: Option<H>,
    limit: RoundLimit,
    output_size: usize,
}

impl<H: HashCore> HashContext<H> {
    /// Creates a context running `rounds` schedule steps.
    pub fn new(rounds: usize) -> Result<Self, Error> {
        let limit = RoundLimit::new(H::NAME, rounds, H::MAX_ROUNDS)?;
        Ok(Self {
            core: Some(H::with_rounds(limit)),
            limit,
            output_size: H::OUTPUT_SIZE,
        })
    }

    /// Overrides the output size of an extendable-output function.
    pub fn with_output_size(mut self, output_size: usize) -> Self {
        self.output_size = output_size;
        self
    }
}

impl<H: HashCore + Send> Hashable for HashContext<H> {
    fn name(&self) -> &'static str {
        H::NAME
    }

    fn block_size(&self) -> usize {
        H::BLOCK_SIZE
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn round_limit(&self) -> usize {
        self.limit.get()
    }

    fn init(&mut self) {
        self.core = Some(H::with_rounds(self.limit));
    }

    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        match self.core.as_mut() {
            Some(core) => {
                core.update(data);
                Ok(())
            }
            None => {
                log::warn!("{}: update after final", H::NAME);
                Err(Error::AlreadyFinalized)
            }
        }
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.core.is_none() {
            log::warn!("{}: final called twice", H::NAME);
            return Err(Error::AlreadyFinalized);
        }
        if out.len() != self.output_size {
            return Err(Error::InvalidLength {
                expected: self.output_size,
                actual: out.len(),
            });
        }
        if let Some(core) = self.core.take() {
            core.finalize_into(out);
        }
        Ok(())
    }

    fn buffered_len(&self) -> usize {
        self.core.as_ref().map_or(0, H::buffered_len)
    }
}

/// Object-safe single-block encryption interface.
pub trait BlockCipherLike {
    /// Block size in bytes.
    fn block_size(&self) -> usize;
    /// Encrypts one block from `input` into `output`.
    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), Error>;
    /// Decrypts one block from `input` into `output`.
    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), Error>;
}

fn check_block(expected: usize, input: &[u8], output: &[u8]) -> Result<(), Error> {
    for actual in [input.len(), output.len()].iter().copied() {
        if actual != expected {
            return Err(Error::InvalidLength { expected, actual });
        }
    }
    Ok(())
}

impl<C: BlockEncrypt + BlockDecrypt> BlockCipherLike for C {
    fn block_size(&self) -> usize {
        <C as BlockSizeUser>::block_size()
    }

    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        check_block(<C as BlockSizeUser>::block_size(), input, output)?;
        self.encrypt_block_b2b(
            GenericArray::from_slice(input),
            GenericArray::from_mut_slice(output),
        );
        Ok(())
    }

    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        check_block(<C as BlockSizeUser>::block_size(), input, output)?;
        self.decrypt_block_b2b(
            GenericArray::from_slice(input),
            GenericArray::from_mut_slice(output),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn size_ranges() {
        let fubuki = SizeRange {
            base: 128,
            step: 32,
            max: 2048,
        };
        assert!(fubuki.contains(128));
        assert!(fubuki.contains(2048));
        assert!(!fubuki.contains(99999));
        assert!(!fubuki.contains(130));
        assert!(!fubuki.contains(96));
        assert_eq!(fubuki.nth(2), Some(192));
        assert_eq!(fubuki.iter().count(), 61);

        let magma = SizeRange::single(256);
        assert_eq!(magma.iter().collect::<Vec<_>>(), [256]);
        assert!(!magma.contains(128));
    }

    #[test]
    fn capability_sets() {
        let aes = Capabilities::BLOCK_CIPHER | Capabilities::STREAM_CIPHER;
        assert!(aes.contains(Capabilities::STREAM_CIPHER));
        assert!(!aes.contains(Capabilities::HASHABLE));
        assert_eq!(
            aes.names().collect::<Vec<_>>(),
            ["BlockCipherLike", "StreamCipherLike"]
        );
    }

    struct Counter {
        limit: RoundLimit,
        seen: usize,
    }

    impl HashCore for Counter {
        const NAME: &'static str = "COUNTER";
        const BLOCK_SIZE: usize = 4;
        const OUTPUT_SIZE: usize = 1;
        const MAX_ROUNDS: usize = 3;

        fn with_rounds(limit: RoundLimit) -> Self {
            Counter { limit, seen: 0 }
        }

        fn update(&mut self, data: &[u8]) {
            self.seen += data.len();
        }

        fn finalize_into(self, out: &mut [u8]) {
            out[0] = (self.seen + self.limit.get()) as u8;
        }

        fn buffered_len(&self) -> usize {
            self.seen % 4
        }
    }

    #[test]
    fn hash_context_sequencing() {
        assert!(HashContext::<Counter>::new(4).is_err());
        let mut ctx = HashContext::<Counter>::new(2).unwrap();
        ctx.update(b"hello").unwrap();
        assert_eq!(ctx.buffered_len(), 1);

        let mut short = [0u8; 0];
        assert_eq!(
            ctx.finalize_into(&mut short),
            Err(Error::InvalidLength {
                expected: 1,
                actual: 0
            })
        );

        let mut out = [0u8; 1];
        ctx.finalize_into(&mut out).unwrap();
        assert_eq!(out, [7]);
        assert_eq!(ctx.update(b"x"), Err(Error::AlreadyFinalized));
        assert_eq!(ctx.finalize_into(&mut out), Err(Error::AlreadyFinalized));
        assert_eq!(ctx.finalize_into(&mut short), Err(Error::AlreadyFinalized));

        ctx.init();
        ctx.update(b"x").unwrap();
        ctx.finalize_into(&mut out).unwrap();
        assert_eq!(out, [3]);
    }
}
