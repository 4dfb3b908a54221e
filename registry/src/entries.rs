//! The static algorithm table and the constructors it points to.

use alloc::boxed::Box;
use round_core::{
    BlockCipherLike, Capabilities, Error, HashContext, HashCore, Hashable, SizeRange,
    StreamCipherLike, StreamContext, StreamKeySetup,
};

/// Keyed block cipher behind the registry boundary.
pub type BoxedBlockCipher = Box<dyn BlockCipherLike + Send + Sync>;

pub(crate) type HashCtor = fn(usize, Option<usize>) -> Result<Box<dyn Hashable>, Error>;
pub(crate) type BlockCtor = fn(&[u8], usize) -> Result<BoxedBlockCipher, Error>;
pub(crate) type StreamCtor = fn(usize, Option<usize>) -> Result<Box<dyn StreamCipherLike>, Error>;

/// Immutable description of one registered algorithm.
pub struct RegistryEntry {
    /// Exact-match lookup name.
    pub name: &'static str,
    /// Capability interfaces a context of this entry offers.
    pub capabilities: Capabilities,
    /// Block size in bytes (keystream block for stream ciphers).
    pub block_size: usize,
    /// Default output size in bytes; zero for stream ciphers.
    pub output_size: usize,
    /// Size enumeration a variant tag must belong to, in bits.
    pub variants: Option<SizeRange>,
    pub(crate) max_rounds: fn(Option<usize>) -> usize,
    pub(crate) hash: Option<HashCtor>,
    pub(crate) block: Option<BlockCtor>,
    pub(crate) stream: Option<StreamCtor>,
}

impl RegistryEntry {
    /// Full round count for `variant`, or for the largest variant.
    pub fn max_rounds(&self, variant: Option<usize>) -> usize {
        (self.max_rounds)(variant)
    }
}

impl core::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("block_size", &self.block_size)
            .field("output_size", &self.output_size)
            .field("variants", &self.variants)
            .finish()
    }
}

fn hash<H: HashCore + Send + 'static>(
    rounds: usize,
    _variant: Option<usize>,
) -> Result<Box<dyn Hashable>, Error> {
    Ok(Box::new(HashContext::<H>::new(rounds)?))
}

fn xof<H: HashCore + Send + 'static>(
    rounds: usize,
    variant: Option<usize>,
) -> Result<Box<dyn Hashable>, Error> {
    let ctx = HashContext::<H>::new(rounds)?;
    Ok(Box::new(match variant {
        Some(bits) => ctx.with_output_size(bits / 8),
        None => ctx,
    }))
}

fn stream<K: StreamKeySetup + 'static>(
    rounds: usize,
    variant: Option<usize>,
) -> Result<Box<dyn StreamCipherLike>, Error> {
    let ctx = StreamContext::<K>::new(rounds)?;
    Ok(Box::new(match variant {
        Some(bits) => ctx.with_key_bits(bits)?,
        None => ctx,
    }))
}

fn aes_block(key: &[u8], rounds: usize) -> Result<BoxedBlockCipher, Error> {
    let cipher: BoxedBlockCipher = match key.len() {
        16 => Box::new(aes::Aes128::with_rounds(key, rounds)?),
        24 => Box::new(aes::Aes192::with_rounds(key, rounds)?),
        32 => Box::new(aes::Aes256::with_rounds(key, rounds)?),
        n => return Err(Error::InvalidKeySize(n * 8)),
    };
    Ok(cipher)
}

fn serpent_block(key: &[u8], rounds: usize) -> Result<BoxedBlockCipher, Error> {
    Ok(Box::new(serpent::Serpent::with_rounds(key, rounds)?))
}

fn magma_block(key: &[u8], rounds: usize) -> Result<BoxedBlockCipher, Error> {
    Ok(Box::new(magma::Magma::with_rounds(key, rounds)?))
}

fn aes_rounds(variant: Option<usize>) -> usize {
    variant.and_then(aes::max_rounds).unwrap_or(14)
}

macro_rules! max_rounds {
    ($n:expr) => {{
        fn max(_: Option<usize>) -> usize {
            $n
        }
        max
    }};
}

macro_rules! hash_entry {
    ($name:expr, $core:ty, $ctor:ident, $variants:expr) => {
        RegistryEntry {
            name: $name,
            capabilities: Capabilities::HASHABLE,
            block_size: <$core as HashCore>::BLOCK_SIZE,
            output_size: <$core as HashCore>::OUTPUT_SIZE,
            variants: $variants,
            max_rounds: max_rounds!(<$core as HashCore>::MAX_ROUNDS),
            hash: Some($ctor::<$core>),
            block: None,
            stream: None,
        }
    };
}

macro_rules! stream_entry {
    ($key:ty) => {
        RegistryEntry {
            name: <$key as StreamKeySetup>::NAME,
            capabilities: Capabilities::STREAM_CIPHER,
            block_size: <$key as StreamKeySetup>::BLOCK_LEN,
            output_size: 0,
            variants: Some(<$key as StreamKeySetup>::KEY_SIZES),
            max_rounds: max_rounds!(<$key as StreamKeySetup>::MAX_ROUNDS),
            hash: None,
            block: None,
            stream: Some(stream::<$key>),
        }
    };
}

const XOF_BITS: Option<SizeRange> = Some(SizeRange {
    base: 8,
    step: 8,
    max: 8192,
});

const GOST_KEYS: Option<SizeRange> = Some(SizeRange::single(256));

pub(crate) static ENTRIES: &[RegistryEntry] = &[
    hash_entry!("RIPEMD160", ripemd160::Ripemd160, hash, None),
    hash_entry!("SHA256", sha256::Sha256, hash, None),
    hash_entry!("SHA3-224", sha3::Sha3_224, hash, None),
    hash_entry!("SHA3-256", sha3::Sha3_256, hash, None),
    hash_entry!("SHA3-384", sha3::Sha3_384, hash, None),
    hash_entry!("SHA3-512", sha3::Sha3_512, hash, None),
    hash_entry!("KECCAK-224", sha3::Keccak224, hash, None),
    hash_entry!("KECCAK-256", sha3::Keccak256, hash, None),
    hash_entry!("KECCAK-384", sha3::Keccak384, hash, None),
    hash_entry!("KECCAK-512", sha3::Keccak512, hash, None),
    hash_entry!("SHAKE128", sha3::Shake128, xof, XOF_BITS),
    hash_entry!("SHAKE256", sha3::Shake256, xof, XOF_BITS),
    RegistryEntry {
        name: "AES",
        capabilities: Capabilities::BLOCK_CIPHER.union(Capabilities::STREAM_CIPHER),
        block_size: 16,
        output_size: 16,
        variants: Some(<aes::AesCtrKey as StreamKeySetup>::KEY_SIZES),
        max_rounds: aes_rounds,
        hash: None,
        block: Some(aes_block),
        stream: Some(stream::<aes::AesCtrKey>),
    },
    RegistryEntry {
        name: "SERPENT",
        capabilities: Capabilities::BLOCK_CIPHER,
        block_size: 16,
        output_size: 16,
        variants: Some(SizeRange {
            base: 8,
            step: 8,
            max: 256,
        }),
        max_rounds: max_rounds!(serpent::SERPENT_SPEC.max_rounds()),
        hash: None,
        block: Some(serpent_block),
        stream: None,
    },
    RegistryEntry {
        name: "GOST",
        capabilities: Capabilities::BLOCK_CIPHER,
        block_size: 8,
        output_size: 8,
        variants: GOST_KEYS,
        max_rounds: max_rounds!(magma::MAGMA_SPEC.max_rounds()),
        hash: None,
        block: Some(magma_block),
        stream: None,
    },
    stream_entry!(salsa20::Salsa20Key),
    stream_entry!(sosemanuk::SosemanukKey),
    stream_entry!(fubuki::FubukiKey),
];

pub(crate) static ALIASES: [(&str, &str); 1] = [("MAGMA", "GOST")];
