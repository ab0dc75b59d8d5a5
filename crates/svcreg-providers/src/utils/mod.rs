//! Provider Utilities
//!
//! Shared utilities used by provider implementations.

mod path;

pub use path::decode_path;
