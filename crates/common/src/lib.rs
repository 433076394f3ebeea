//! Shared helpers for the joke catalog crates: logging setup and small
//! transport-neutral types.

pub mod types;
pub mod utils;
