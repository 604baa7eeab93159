#![deny(missing_docs)]
//! Token estimation and prompt compression for `reagent`.
//!
//! Unlike a message-oriented sliding window over a typed conversation
//! buffer, the driver's context budget is enforced on the *rendered prompt
//! text* — the composer has already flattened messages, tools, and
//! exemplars into one string by the time compression runs. So the
//! compressor here operates line-by-line over that string rather than over
//! a `Vec<Message>`.

pub mod compressor;
pub mod tokens;

pub use compressor::ContextCompressor;
pub use tokens::{estimate_tokens, CHARS_PER_TOKEN};
