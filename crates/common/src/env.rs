//! Session environment store.
//!
//! The host owns the session environment. This module only describes how the
//! resolver reads from and writes to it, plus an in-memory store for tests and
//! dry runs. Values are raw bytes: the host makes no encoding promise, and a
//! value read here must be writable back unchanged.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

// ── EnvStore trait ──────────────────────────────────────────────────────────

/// Key-value view of a session environment.
pub trait EnvStore {
    /// Returns the current value of `name`, or `None` when it is unset.
    fn get(&self, name: &str) -> Option<Vec<u8>>;

    /// Inserts or overwrites a whole `NAME=value` entry.
    fn put(&mut self, entry: &[u8]) -> Result<()>;
}

// ── MemoryEnvStore ──────────────────────────────────────────────────────────

/// In-memory [`EnvStore`] with optional write-failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvStore {
    vars: BTreeMap<String, Vec<u8>>,
    /// When set, every `put` fails with this description.
    write_failure: Option<String>,
    writes: usize,
}

impl MemoryEnvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Self::set`].
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.set(name, value);
        self
    }

    /// Make every subsequent write fail with `description`.
    pub fn with_failing_writes(mut self, description: impl Into<String>) -> Self {
        self.write_failure = Some(description.into());
        self
    }

    /// Seed a variable without counting it as a write.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Number of successful `put` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn vars(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.vars
    }
}

impl EnvStore for MemoryEnvStore {
    fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.vars.get(name).cloned()
    }

    fn put(&mut self, entry: &[u8]) -> Result<()> {
        if let Some(description) = &self.write_failure {
            return Err(Error::store(description.clone()));
        }
        let malformed = || Error::malformed_entry(String::from_utf8_lossy(entry));
        let split = entry.iter().position(|&b| b == b'=').ok_or_else(malformed)?;
        let (name, value) = (&entry[..split], &entry[split + 1..]);
        let name = std::str::from_utf8(name).map_err(|_| malformed())?;
        if name.is_empty() {
            return Err(malformed());
        }
        self.vars.insert(name.to_owned(), value.to_vec());
        self.writes += 1;
        Ok(())
    }
}
