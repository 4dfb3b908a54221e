use crate::entries::{BoxedBlockCipher, RegistryEntry};
use alloc::boxed::Box;
use round_core::{Capabilities, Error, Hashable, StreamCipherLike};

/// A registry entry together with the variant it was resolved for.
#[derive(Clone, Copy, Debug)]
pub struct Resolved {
    pub(crate) entry: &'static RegistryEntry,
    pub(crate) variant: Option<usize>,
}

impl Resolved {
    /// The matched entry.
    pub fn entry(&self) -> &'static RegistryEntry {
        self.entry
    }

    /// Variant tag, already checked against the entry's enumeration.
    pub fn variant(&self) -> Option<usize> {
        self.variant
    }

    /// Full round count of this variant.
    pub fn max_rounds(&self) -> usize {
        self.entry.max_rounds(self.variant)
    }
}

/// A ready-to-drive session created by [`create_context`](crate::create_context).
///
/// Hash and stream sessions are built eagerly; block ciphers need a key
/// and are built by [`Context::block_cipher`].
pub struct Context {
    resolved: Resolved,
    round_limit: usize,
    hash: Option<Box<dyn Hashable>>,
    stream: Option<Box<dyn StreamCipherLike>>,
}

impl Context {
    pub(crate) fn new(resolved: Resolved, round_limit: usize) -> Result<Self, Error> {
        let entry = resolved.entry;
        let hash = match entry.hash {
            Some(ctor) => Some(ctor(round_limit, resolved.variant)?),
            None => None,
        };
        let stream = match entry.stream {
            Some(ctor) => Some(ctor(round_limit, resolved.variant)?),
            None => None,
        };
        Ok(Self {
            resolved,
            round_limit,
            hash,
            stream,
        })
    }

    /// Registry name of the algorithm.
    pub fn name(&self) -> &'static str {
        self.resolved.entry.name
    }

    /// Capability set declared by the entry.
    pub fn capabilities(&self) -> Capabilities {
        self.resolved.entry.capabilities
    }

    /// Validated round limit.
    pub fn round_limit(&self) -> usize {
        self.round_limit
    }

    /// Variant the context was created for.
    pub fn variant(&self) -> Option<usize> {
        self.resolved.variant
    }

    fn missing(&self, capability: &'static str) -> Error {
        Error::MissingCapability {
            name: self.name(),
            capability,
        }
    }

    /// The hashing session.
    pub fn hashable(&mut self) -> Result<&mut dyn Hashable, Error> {
        let name = self.name();
        match self.hash.as_mut() {
            Some(h) => Ok(h.as_mut()),
            None => Err(Error::MissingCapability {
                name,
                capability: "Hashable",
            }),
        }
    }

    /// The stream cipher session.
    pub fn stream_cipher(&mut self) -> Result<&mut dyn StreamCipherLike, Error> {
        let name = self.name();
        match self.stream.as_mut() {
            Some(s) => Ok(s.as_mut()),
            None => Err(Error::MissingCapability {
                name,
                capability: "StreamCipherLike",
            }),
        }
    }

    /// Expands `key` into a block cipher running the context's round limit.
    ///
    /// When the context was resolved with a variant, the key must have
    /// exactly that many bits.
    pub fn block_cipher(&self, key: &[u8]) -> Result<BoxedBlockCipher, Error> {
        let ctor = self
            .resolved
            .entry
            .block
            .ok_or_else(|| self.missing("BlockCipherLike"))?;
        let bits = key.len() * 8;
        let allowed = match (self.resolved.variant, self.resolved.entry.variants) {
            (Some(variant), _) => bits == variant,
            (None, Some(sizes)) => sizes.contains(bits),
            (None, None) => true,
        };
        if !allowed {
            return Err(Error::InvalidKeySize(bits));
        }
        ctor(key, self.round_limit)
    }
}

impl core::fmt::Debug for Context {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Context")
            .field("name", &self.name())
            .field("variant", &self.resolved.variant)
            .field("round_limit", &self.round_limit)
            .finish()
    }
}
