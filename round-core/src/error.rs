//! Error type shared by every primitive crate and the registry.

use alloc::string::String;
use thiserror::Error;

/// Failures reported by contexts, primitives and the registry.
///
/// Configuration errors are raised when a context is built, sequencing
/// errors when a caller drives a context out of order. Neither kind is
/// ever corrected silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No registry entry carries this name.
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
    /// The variant tag is outside the entry's declared size enumeration.
    #[error("algorithm `{name}` does not support variant {variant}")]
    UnsupportedVariant {
        /// Registry name of the algorithm.
        name: &'static str,
        /// Rejected variant tag.
        variant: usize,
    },
    /// Requested round limit is above the primitive's schedule length.
    #[error("`{name}` has {max} rounds, {requested} requested")]
    RoundLimitExceeded {
        /// Name of the round schedule.
        name: &'static str,
        /// Requested round limit.
        requested: usize,
        /// Length of the full schedule.
        max: usize,
    },
    /// Key size (in bits) is not in the primitive's key size enumeration.
    #[error("unsupported key size of {0} bits")]
    InvalidKeySize(usize),
    /// IV size (in bits) is not in the primitive's IV size enumeration.
    #[error("unsupported IV size of {0} bits")]
    InvalidIvSize(usize),
    /// A block or output buffer has the wrong length.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Length the primitive requires.
        expected: usize,
        /// Length the caller supplied.
        actual: usize,
    },
    /// The entry does not declare the requested capability.
    #[error("`{name}` does not implement {capability}")]
    MissingCapability {
        /// Registry name of the algorithm.
        name: &'static str,
        /// Name of the missing capability.
        capability: &'static str,
    },
    /// `update` or `final` was called on an already finalized hash context.
    #[error("hash context already finalized")]
    AlreadyFinalized,
    /// A stream message was closed by an unaligned call; `iv_setup` must
    /// start a new one.
    #[error("message closed by an unaligned call, IV setup required")]
    MessageClosed,
    /// Stream processing requested before key setup.
    #[error("key setup required")]
    KeyNotSet,
    /// Stream processing requested before IV setup.
    #[error("IV setup required")]
    IvNotSet,
}

impl Error {
    /// Returns `true` for errors raised while building a context.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownAlgorithm(_)
                | Error::UnsupportedVariant { .. }
                | Error::RoundLimitExceeded { .. }
                | Error::InvalidKeySize(_)
                | Error::InvalidIvSize(_)
        )
    }

    /// Returns `true` for errors caused by calling operations out of order.
    pub fn is_sequencing(&self) -> bool {
        matches!(
            self,
            Error::AlreadyFinalized | Error::MessageClosed | Error::KeyNotSet | Error::IvNotSet
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_round_limit() {
        let err = Error::RoundLimitExceeded {
            name: "RIPEMD160",
            requested: 81,
            max: 80,
        };
        assert_eq!(err.to_string(), "`RIPEMD160` has 80 rounds, 81 requested");
        assert!(err.is_configuration());
        assert!(!err.is_sequencing());
    }

    #[test]
    fn display_unknown() {
        let err = Error::UnknownAlgorithm("NOPE".into());
        assert_eq!(err.to_string(), "unknown algorithm `NOPE`");
    }

    #[test]
    fn sequencing_kinds() {
        assert!(Error::MessageClosed.is_sequencing());
        assert!(Error::AlreadyFinalized.is_sequencing());
        assert!(!Error::InvalidKeySize(7).is_sequencing());
    }
}
