//! Shared types, error definitions, and host-facing seams used across all dsba crates.

pub mod env;
pub mod error;
pub mod hooks;
pub mod log;

pub use error::{Error, Result};
