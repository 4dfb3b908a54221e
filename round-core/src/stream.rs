//! Stream cipher sessions: key setup, IV setup and message sequencing.

use crate::{
    capability::{Action, SizeRange},
    rounds::RoundLimit,
    Error,
};
use cipher::{generic_array::GenericArray, StreamCipherCore};

/// Largest keystream block of any supported primitive.
pub const MAX_STREAM_BLOCK: usize = 128;

/// Per-message keystream generator produced by IV setup.
pub trait StreamEngine: Send {
    /// Keystream block length in bytes.
    fn block_len(&self) -> usize;

    /// Writes the next keystream block; `out` is exactly `block_len()` bytes.
    fn keystream_block(&mut self, out: &mut [u8]);

    /// Transforms one whole block in place.
    ///
    /// Additive ciphers XOR the next keystream block whatever the action;
    /// ciphers with a per-block nonlinear layer override this.
    fn process_block(&mut self, _action: Action, data: &mut [u8]) {
        let mut ks = [0u8; MAX_STREAM_BLOCK];
        let ks = &mut ks[..data.len()];
        self.keystream_block(ks);
        xor_in_place(data, ks);
    }
}

pub(crate) fn xor_in_place(data: &mut [u8], ks: &[u8]) {
    for (d, k) in data.iter_mut().zip(ks) {
        *d ^= *k;
    }
}

/// Runs any [`StreamCipherCore`] as a [`StreamEngine`].
#[derive(Clone)]
pub struct CoreEngine<C>(C);

impl<C: StreamCipherCore> CoreEngine<C> {
    /// Wraps a keyed and IV-initialized core.
    pub fn new(core: C) -> Self {
        CoreEngine(core)
    }
}

impl<C: StreamCipherCore + Send> StreamEngine for CoreEngine<C> {
    fn block_len(&self) -> usize {
        C::block_size()
    }

    fn keystream_block(&mut self, out: &mut [u8]) {
        self.0.write_keystream_block(GenericArray::from_mut_slice(out));
    }
}

/// Key schedule of a stream cipher, from which each IV setup derives a
/// fresh [`StreamEngine`].
pub trait StreamKeySetup: Sized + Send {
    /// Engine produced by IV setup.
    type Engine: StreamEngine;

    /// Registry name.
    const NAME: &'static str;
    /// Keystream block length in bytes.
    const BLOCK_LEN: usize;
    /// Supported key sizes in bits.
    const KEY_SIZES: SizeRange;
    /// Supported IV sizes in bits.
    const IV_SIZES: SizeRange;
    /// Length of the full round schedule.
    const MAX_ROUNDS: usize;

    /// Expands `key`; sizes are already checked against `KEY_SIZES`.
    fn key_setup(key: &[u8], limit: RoundLimit) -> Result<Self, Error>;

    /// Starts a message; sizes are already checked against `IV_SIZES`.
    fn iv_setup(&self, iv: &[u8]) -> Result<Self::Engine, Error>;
}

/// Object-safe stream cipher session.
///
/// Whole-block calls keep the message open. A `process` or `keystream`
/// call whose length is not a multiple of the block length closes it, and
/// every further processing call fails with [`Error::MessageClosed`] until
/// the next `iv_setup`.
pub trait StreamCipherLike: Send {
    /// Registry name.
    fn name(&self) -> &'static str;
    /// Keystream block length in bytes.
    fn block_len(&self) -> usize;
    /// Configured round limit.
    fn round_limit(&self) -> usize;
    /// Expands `key`, whose declared size is `key_bits`.
    fn key_setup(&mut self, key: &[u8], key_bits: usize) -> Result<(), Error>;
    /// Starts a new message under the current key.
    fn iv_setup(&mut self, iv: &[u8]) -> Result<(), Error>;
    /// Processes a whole number of blocks.
    fn process_blocks(&mut self, action: Action, input: &[u8], output: &mut [u8])
        -> Result<(), Error>;
    /// Processes input of any length.
    fn process(&mut self, action: Action, input: &[u8], output: &mut [u8]) -> Result<(), Error>;
    /// Writes raw keystream.
    fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error>;
}

/// Generic [`StreamCipherLike`] session over a [`StreamKeySetup`].
pub struct StreamContext<K: StreamKeySetup> {
    limit: RoundLimit,
    key_bits: Option<usize>,
    key: Option<K>,
    engine: Option<K::Engine>,
    closed: bool,
}

impl<K: StreamKeySetup> StreamContext<K> {
    /// Creates an unkeyed session running `rounds` schedule steps.
    pub fn new(rounds: usize) -> Result<Self, Error> {
        Ok(Self {
            limit: RoundLimit::new(K::NAME, rounds, K::MAX_ROUNDS)?,
            key_bits: None,
            key: None,
            engine: None,
            closed: false,
        })
    }

    /// Restricts key setup to keys of exactly `key_bits`.
    pub fn with_key_bits(mut self, key_bits: usize) -> Result<Self, Error> {
        if !K::KEY_SIZES.contains(key_bits) {
            return Err(Error::InvalidKeySize(key_bits));
        }
        self.key_bits = Some(key_bits);
        Ok(self)
    }

    fn engine(&mut self) -> Result<&mut K::Engine, Error> {
        let err = if self.key.is_none() {
            Error::KeyNotSet
        } else if self.closed {
            Error::MessageClosed
        } else {
            match self.engine.as_mut() {
                Some(engine) => return Ok(engine),
                None => Error::IvNotSet,
            }
        };
        log::warn!("{}: {}", K::NAME, err);
        Err(err)
    }
}

fn check_io(input: &[u8], output: &[u8]) -> Result<(), Error> {
    if input.len() != output.len() {
        return Err(Error::InvalidLength {
            expected: input.len(),
            actual: output.len(),
        });
    }
    Ok(())
}

impl<K: StreamKeySetup> StreamCipherLike for StreamContext<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn block_len(&self) -> usize {
        K::BLOCK_LEN
    }

    fn round_limit(&self) -> usize {
        self.limit.get()
    }

    fn key_setup(&mut self, key: &[u8], key_bits: usize) -> Result<(), Error> {
        if key_bits != key.len() * 8
            || !K::KEY_SIZES.contains(key_bits)
            || self.key_bits.map_or(false, |pinned| pinned != key_bits)
        {
            return Err(Error::InvalidKeySize(key_bits));
        }
        log::trace!("{}: key setup, {} bits", K::NAME, key_bits);
        self.engine = None;
        self.key = None;
        self.closed = false;
        self.key = Some(K::key_setup(key, self.limit)?);
        Ok(())
    }

    fn iv_setup(&mut self, iv: &[u8]) -> Result<(), Error> {
        let key = self.key.as_ref().ok_or(Error::KeyNotSet)?;
        if !K::IV_SIZES.contains(iv.len() * 8) {
            return Err(Error::InvalidIvSize(iv.len() * 8));
        }
        log::trace!("{}: IV setup, {} bits", K::NAME, iv.len() * 8);
        self.engine = Some(key.iv_setup(iv)?);
        self.closed = false;
        Ok(())
    }

    fn process_blocks(
        &mut self,
        action: Action,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), Error> {
        check_io(input, output)?;
        let rem = input.len() % K::BLOCK_LEN;
        if rem != 0 {
            return Err(Error::InvalidLength {
                expected: input.len() - rem,
                actual: input.len(),
            });
        }
        let engine = self.engine()?;
        output.copy_from_slice(input);
        for block in output.chunks_exact_mut(K::BLOCK_LEN) {
            engine.process_block(action, block);
        }
        Ok(())
    }

    fn process(&mut self, action: Action, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        check_io(input, output)?;
        let engine = self.engine()?;
        output.copy_from_slice(input);
        let mut blocks = output.chunks_exact_mut(K::BLOCK_LEN);
        for block in &mut blocks {
            engine.process_block(action, block);
        }
        let tail = blocks.into_remainder();
        if !tail.is_empty() {
            let mut ks = [0u8; MAX_STREAM_BLOCK];
            engine.keystream_block(&mut ks[..K::BLOCK_LEN]);
            xor_in_place(tail, &ks);
            self.closed = true;
        }
        Ok(())
    }

    fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let engine = self.engine()?;
        let mut blocks = out.chunks_exact_mut(K::BLOCK_LEN);
        for block in &mut blocks {
            engine.keystream_block(block);
        }
        let tail = blocks.into_remainder();
        if !tail.is_empty() {
            let mut ks = [0u8; MAX_STREAM_BLOCK];
            engine.keystream_block(&mut ks[..K::BLOCK_LEN]);
            let n = tail.len();
            tail.copy_from_slice(&ks[..n]);
            self.closed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Toy;

    struct ToyEngine(u8);

    impl StreamEngine for ToyEngine {
        fn block_len(&self) -> usize {
            4
        }

        fn keystream_block(&mut self, out: &mut [u8]) {
            for b in out.iter_mut() {
                *b = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }
    }

    impl StreamKeySetup for Toy {
        type Engine = ToyEngine;
        const NAME: &'static str = "TOY";
        const BLOCK_LEN: usize = 4;
        const KEY_SIZES: SizeRange = SizeRange::single(8);
        const IV_SIZES: SizeRange = SizeRange::single(8);
        const MAX_ROUNDS: usize = 1;

        fn key_setup(_key: &[u8], _limit: RoundLimit) -> Result<Self, Error> {
            Ok(Toy)
        }

        fn iv_setup(&self, iv: &[u8]) -> Result<ToyEngine, Error> {
            Ok(ToyEngine(iv[0]))
        }
    }

    #[test]
    fn sequencing() {
        let mut ctx = StreamContext::<Toy>::new(1).unwrap();
        let mut out = [0u8; 4];
        assert_eq!(ctx.keystream(&mut out), Err(Error::KeyNotSet));
        assert_eq!(ctx.iv_setup(&[0]), Err(Error::KeyNotSet));
        assert_eq!(ctx.key_setup(&[1, 2], 16), Err(Error::InvalidKeySize(16)));
        assert_eq!(ctx.key_setup(&[1], 16), Err(Error::InvalidKeySize(16)));
        ctx.key_setup(&[1], 8).unwrap();
        assert_eq!(ctx.keystream(&mut out), Err(Error::IvNotSet));
        assert_eq!(ctx.iv_setup(&[0, 0]), Err(Error::InvalidIvSize(16)));
        ctx.iv_setup(&[10]).unwrap();

        ctx.process_blocks(Action::Encrypt, &[0; 4], &mut out).unwrap();
        assert_eq!(out, [10, 11, 12, 13]);
        assert_eq!(
            ctx.process_blocks(Action::Encrypt, &[0; 3], &mut out[..3]),
            Err(Error::InvalidLength {
                expected: 0,
                actual: 3
            })
        );

        let mut tail = [0u8; 6];
        ctx.process(Action::Encrypt, &[0; 6], &mut tail).unwrap();
        assert_eq!(tail, [14, 15, 16, 17, 18, 19]);
        assert_eq!(ctx.keystream(&mut out), Err(Error::MessageClosed));
        assert_eq!(
            ctx.process(Action::Decrypt, &[0; 4], &mut out),
            Err(Error::MessageClosed)
        );

        ctx.iv_setup(&[0]).unwrap();
        ctx.keystream(&mut out).unwrap();
        assert_eq!(out, [0, 1, 2, 3]);
    }

    #[test]
    fn aligned_calls_keep_message_open() {
        let mut ctx = StreamContext::<Toy>::new(0).unwrap();
        ctx.key_setup(&[1], 8).unwrap();
        ctx.iv_setup(&[0]).unwrap();
        let mut out = [0u8; 8];
        ctx.process(Action::Encrypt, &[0; 8], &mut out).unwrap();
        ctx.keystream(&mut out).unwrap();
        assert_eq!(out, [8, 9, 10, 11, 12, 13, 14, 15]);
        assert!(StreamContext::<Toy>::new(2).is_err());
    }
}
