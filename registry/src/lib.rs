//! Registry mapping an algorithm name, an optional variant tag and a round
//! limit to a ready-to-drive context.
//!
//! Variant tags are sizes in bits: the key size for ciphers and the output
//! size for extendable-output functions. A tag must belong to the entry's
//! size enumeration `base + i * step <= max`.
//!
//! # Examples
//! ```
//! use round_registry::{create_context, resolve};
//!
//! let entry = resolve("SHA3-256", None).unwrap();
//! let mut ctx = create_context(&entry, 2).unwrap();
//! let hash = ctx.hashable().unwrap();
//! hash.update(b"abc").unwrap();
//! let mut digest = [0u8; 32];
//! hash.finalize_into(&mut digest).unwrap();
//!
//! assert!(resolve("NOPE", None).is_err());
//! assert!(resolve("FUBUKI", Some(99999)).is_err());
//! ```
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

extern crate alloc;

pub use round_core;

mod context;
mod entries;

pub use context::{Context, Resolved};
pub use entries::{BoxedBlockCipher, RegistryEntry};

use alloc::string::ToString;
use entries::{ALIASES, ENTRIES};
use round_core::Error;

/// Every registered entry, in table order.
pub fn entries() -> impl Iterator<Item = &'static RegistryEntry> {
    ENTRIES.iter()
}

/// Every registered name, aliases included.
pub fn names() -> impl Iterator<Item = &'static str> {
    ENTRIES
        .iter()
        .map(|e| e.name)
        .chain(ALIASES.iter().map(|(alias, _)| *alias))
}

fn lookup(name: &str) -> Option<&'static RegistryEntry> {
    let target = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, target)| *target);
    ENTRIES.iter().find(|e| e.name == target)
}

/// Finds the entry called `name` and checks `variant` against its size
/// enumeration.
pub fn resolve(name: &str, variant: Option<usize>) -> Result<Resolved, Error> {
    let entry = lookup(name).ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))?;
    if let Some(v) = variant {
        if !entry.variants.map_or(false, |sizes| sizes.contains(v)) {
            return Err(Error::UnsupportedVariant {
                name: entry.name,
                variant: v,
            });
        }
    }
    log::debug!("resolved {} (variant {:?})", entry.name, variant);
    Ok(Resolved { entry, variant })
}

/// Creates a context running `round_limit` schedule steps.
///
/// The limit is checked against the full round count of the resolved
/// variant and is never clamped.
pub fn create_context(resolved: &Resolved, round_limit: usize) -> Result<Context, Error> {
    let max = resolved.max_rounds();
    if round_limit > max {
        return Err(Error::RoundLimitExceeded {
            name: resolved.entry.name,
            requested: round_limit,
            max,
        });
    }
    log::debug!(
        "creating {} context, {} of {} rounds",
        resolved.entry.name,
        round_limit,
        max
    );
    Context::new(*resolved, round_limit)
}
