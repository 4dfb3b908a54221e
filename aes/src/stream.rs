//! Counter mode over the round-reduced cipher.

use crate::{Aes128, Aes192, Aes256};
use cipher::{generic_array::GenericArray, InnerIvInit};
use ctr::{flavors::Ctr128BE, CtrCore};
use round_core::{
    CoreEngine, Error, RoundLimit, SizeRange, StreamContext, StreamEngine, StreamKeySetup,
};

/// Stream session running CTR mode over reduced AES.
pub type AesCtr = StreamContext<AesCtrKey>;

/// Expanded key of any AES size.
#[derive(Clone, Debug)]
pub enum AesCtrKey {
    /// 128-bit key.
    Aes128(Aes128),
    /// 192-bit key.
    Aes192(Aes192),
    /// 256-bit key.
    Aes256(Aes256),
}

/// Keystream generator of one message.
pub enum AesCtrEngine {
    /// Counter mode over AES-128.
    Aes128(CoreEngine<CtrCore<Aes128, Ctr128BE>>),
    /// Counter mode over AES-192.
    Aes192(CoreEngine<CtrCore<Aes192, Ctr128BE>>),
    /// Counter mode over AES-256.
    Aes256(CoreEngine<CtrCore<Aes256, Ctr128BE>>),
}

impl StreamEngine for AesCtrEngine {
    fn block_len(&self) -> usize {
        16
    }

    fn keystream_block(&mut self, out: &mut [u8]) {
        match self {
            AesCtrEngine::Aes128(e) => e.keystream_block(out),
            AesCtrEngine::Aes192(e) => e.keystream_block(out),
            AesCtrEngine::Aes256(e) => e.keystream_block(out),
        }
    }
}

impl StreamKeySetup for AesCtrKey {
    type Engine = AesCtrEngine;

    const NAME: &'static str = "AES";
    const BLOCK_LEN: usize = 16;
    const KEY_SIZES: SizeRange = SizeRange {
        base: 128,
        step: 64,
        max: 256,
    };
    const IV_SIZES: SizeRange = SizeRange::single(128);
    const MAX_ROUNDS: usize = 14;

    fn key_setup(key: &[u8], limit: RoundLimit) -> Result<Self, Error> {
        let rounds = limit.get();
        match key.len() {
            16 => Aes128::with_rounds(key, rounds).map(AesCtrKey::Aes128),
            24 => Aes192::with_rounds(key, rounds).map(AesCtrKey::Aes192),
            32 => Aes256::with_rounds(key, rounds).map(AesCtrKey::Aes256),
            n => Err(Error::InvalidKeySize(n * 8)),
        }
    }

    fn iv_setup(&self, iv: &[u8]) -> Result<AesCtrEngine, Error> {
        if iv.len() != 16 {
            return Err(Error::InvalidIvSize(iv.len() * 8));
        }
        let iv = GenericArray::from_slice(iv);
        Ok(match self {
            AesCtrKey::Aes128(c) => {
                AesCtrEngine::Aes128(CoreEngine::new(CtrCore::inner_iv_init(c.clone(), iv)))
            }
            AesCtrKey::Aes192(c) => {
                AesCtrEngine::Aes192(CoreEngine::new(CtrCore::inner_iv_init(c.clone(), iv)))
            }
            AesCtrKey::Aes256(c) => {
                AesCtrEngine::Aes256(CoreEngine::new(CtrCore::inner_iv_init(c.clone(), iv)))
            }
        })
    }
}
