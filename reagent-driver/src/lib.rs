#![deny(missing_docs)]
//! Bounded reason-act-observe iteration over a pluggable model backend and
//! tool dispatcher: the part of `reagent` that actually runs a session.
//!
//! Everything else in the workspace is a pure function; this crate is
//! where the async loop, retries, caching, and context compaction happen.

pub mod cache;
pub mod capability;
pub mod config;
pub mod driver;
pub mod error;
pub mod hash;
pub mod outcome;
pub mod retry;

pub use cache::BoundedCache;
pub use capability::{Backend, GenerateResponse, ResponseCache, ToolDispatcher};
pub use config::{derive_max_iterations, DriverConfig};
pub use driver::Driver;
pub use error::DriverError;
pub use hash::cache_key;
pub use outcome::{DriverOutcome, FinishReason};
