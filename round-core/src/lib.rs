//! Shared machinery for round-reduced cryptographic primitives.
//!
//! Every hash function, block cipher and stream cipher of the workspace is
//! built from the same pieces:
//!
//! - [`words`]: byte/word packing in an explicit byte order;
//! - [`BlockBuffer`]: incremental buffering with Merkle–Damgård and sponge
//!   padding;
//! - [`RoundSpec`] and [`RoundLimit`]: the round schedule as immutable data
//!   and a validated prefix length into it;
//! - the capability interfaces [`Hashable`], [`BlockCipherLike`] and
//!   [`StreamCipherLike`] through which the registry drives a primitive.
//!
//! A transform runs only the first `round_limit` steps of its schedule and
//! then always applies its family's combination step, so reduced outputs
//! are well defined and reproducible. With the full limit every primitive
//! matches its reference vectors.
//!
//! # Examples
//! ```
//! use round_core::{BlockBuffer, Endian};
//!
//! let mut buf = BlockBuffer::<64>::new();
//! let mut blocks = 0;
//! buf.update(b"abc", |_| blocks += 1);
//! buf.md_finalize(Endian::Big, |_| blocks += 1);
//! assert_eq!(blocks, 1);
//! ```
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

extern crate alloc;

pub use cipher;

mod buffer;
mod capability;
mod error;
mod rounds;
mod stream;
pub mod words;

pub use crate::{
    buffer::BlockBuffer,
    capability::{
        Action, BlockCipherLike, Capabilities, HashContext, HashCore, Hashable, SizeRange,
    },
    error::Error,
    rounds::{RoundLimit, RoundSpec},
    stream::{
        CoreEngine, StreamCipherLike, StreamContext, StreamEngine, StreamKeySetup,
        MAX_STREAM_BLOCK,
    },
    words::Endian,
};
