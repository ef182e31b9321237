//! Candidate address construction.
//!
//! The derived entry is always `DBUS_SESSION_BUS_ADDRESS=unix:path=<dir>/bus`.
//! The runtime directory is copied verbatim, byte for byte; the only checks
//! are that it is present and absolute, and that the result stays under the
//! path-length ceiling. Length is checked before anything is built, so an
//! oversized input never produces a shortened address.

use std::fmt;

use tracing::debug;

use crate::error::{ResolveError, Result};

/// Variable holding the per-user runtime directory.
pub const RUNTIME_DIR_VAR: &str = "XDG_RUNTIME_DIR";
/// Variable this module publishes.
pub const BUS_ADDRESS_VAR: &str = "DBUS_SESSION_BUS_ADDRESS";
pub const SCHEME_PREFIX: &str = "unix:path=";
/// Socket file name, with its leading separator.
pub const SOCKET_SUFFIX: &str = "/bus";
/// Platform path-length ceiling, including the terminating NUL.
pub const PATH_MAX: usize = 4096;

/// Offset of the value within the entry (`NAME=`).
const VALUE_OFFSET: usize = BUS_ADDRESS_VAR.len() + 1;
/// Offset of the socket path within the entry (`NAME=unix:path=`).
const PATH_OFFSET: usize = VALUE_OFFSET + SCHEME_PREFIX.len();
/// Entries of this length or longer are rejected.
pub const MAX_ENTRY_LEN: usize = PATH_OFFSET + PATH_MAX;

/// A fully built `NAME=value` entry for the session bus address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAddress {
    entry: Vec<u8>,
}

impl CandidateAddress {
    /// Build the candidate from the runtime directory read out of the session.
    ///
    /// Fails with [`ResolveError::InvalidRuntimeDir`] when the directory is
    /// missing or does not start with `/`, and with [`ResolveError::TooLong`]
    /// when the socket path would not fit in [`PATH_MAX`].
    pub fn from_runtime_dir(runtime_dir: Option<&[u8]>) -> Result<Self> {
        let dir = match runtime_dir {
            Some(dir) if dir.first() == Some(&b'/') => dir,
            _ => return Err(ResolveError::InvalidRuntimeDir),
        };

        let entry_len = PATH_OFFSET
            .saturating_add(dir.len())
            .saturating_add(SOCKET_SUFFIX.len());
        if entry_len >= MAX_ENTRY_LEN {
            debug!(entry_len, max = MAX_ENTRY_LEN, "candidate address too long");
            return Err(ResolveError::too_long(PATH_MAX));
        }

        let mut entry = Vec::with_capacity(entry_len);
        entry.extend_from_slice(BUS_ADDRESS_VAR.as_bytes());
        entry.push(b'=');
        entry.extend_from_slice(SCHEME_PREFIX.as_bytes());
        entry.extend_from_slice(dir);
        entry.extend_from_slice(SOCKET_SUFFIX.as_bytes());

        Ok(Self { entry })
    }

    /// The whole `DBUS_SESSION_BUS_ADDRESS=unix:path=<dir>/bus` entry.
    pub fn entry(&self) -> &[u8] {
        &self.entry
    }

    /// The value part, `unix:path=<dir>/bus`.
    pub fn value(&self) -> &[u8] {
        &self.entry[VALUE_OFFSET..]
    }

    /// Exact byte comparison against a value already present in the session.
    pub fn matches(&self, existing: &[u8]) -> bool {
        self.value() == existing
    }

    pub fn into_entry(self) -> Vec<u8> {
        self.entry
    }
}

/// Shows the entry, lossily decoded, for log lines.
impl fmt::Display for CandidateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.entry))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[test]
    fn offsets_match_layout() {
        assert_eq!(VALUE_OFFSET, 25);
        assert_eq!(PATH_OFFSET, 35);
        assert_eq!(MAX_ENTRY_LEN, 35 + 4096);
    }

    #[test]
    fn builds_standard_address() {
        let candidate =
            CandidateAddress::from_runtime_dir(Some(b"/run/user/1000".as_slice())).unwrap();
        assert_eq!(
            candidate.entry(),
            b"DBUS_SESSION_BUS_ADDRESS=unix:path=/run/user/1000/bus"
        );
        assert_eq!(candidate.value(), b"unix:path=/run/user/1000/bus");
        assert_eq!(
            candidate.to_string(),
            "DBUS_SESSION_BUS_ADDRESS=unix:path=/run/user/1000/bus"
        );
    }

    #[rstest]
    #[case(b"/tmp/a b,c=d;e/".as_slice(), b"unix:path=/tmp/a b,c=d;e//bus".as_slice())]
    #[case(b"/run/user/\xff\xfe".as_slice(), b"unix:path=/run/user/\xff\xfe/bus".as_slice())]
    #[case("/run/user/\u{FFFD}".as_bytes(), "unix:path=/run/user/\u{FFFD}/bus".as_bytes())]
    fn runtime_dir_is_copied_verbatim(#[case] dir: &[u8], #[case] value: &[u8]) {
        let candidate = CandidateAddress::from_runtime_dir(Some(dir)).unwrap();
        assert_eq!(candidate.value(), value);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(b"".as_slice()))]
    #[case(Some(b"run/user/1000".as_slice()))]
    #[case(Some(b"./run".as_slice()))]
    #[case(Some(b" /run/user/1000".as_slice()))]
    fn rejects_missing_or_relative_runtime_dir(#[case] dir: Option<&[u8]>) {
        assert_eq!(
            CandidateAddress::from_runtime_dir(dir),
            Err(ResolveError::InvalidRuntimeDir)
        );
    }

    #[test]
    fn longest_accepted_socket_path_leaves_room_for_nul() {
        // "<dir>/bus" of PATH_MAX - 1 bytes is the longest that fits.
        let dir = format!("/{}", "a".repeat(PATH_MAX - 1 - SOCKET_SUFFIX.len() - 1));
        let candidate = CandidateAddress::from_runtime_dir(Some(dir.as_bytes())).unwrap();
        assert_eq!(candidate.entry().len(), MAX_ENTRY_LEN - 1);
        assert_eq!(candidate.entry().len() - PATH_OFFSET, PATH_MAX - 1);
    }

    #[rstest]
    #[case(PATH_MAX - SOCKET_SUFFIX.len())]
    #[case(PATH_MAX)]
    #[case(PATH_MAX * 4)]
    fn rejects_overlong_runtime_dir(#[case] dir_len: usize) {
        let dir = format!("/{}", "a".repeat(dir_len - 1));
        assert_eq!(
            CandidateAddress::from_runtime_dir(Some(dir.as_bytes())),
            Err(ResolveError::too_long(PATH_MAX))
        );
    }

    #[test]
    fn matches_is_exact() {
        let candidate =
            CandidateAddress::from_runtime_dir(Some(b"/run/user/1000".as_slice())).unwrap();
        assert!(candidate.matches(b"unix:path=/run/user/1000/bus"));
        assert!(!candidate.matches(b"unix:path=/run/user/1000/bus "));
        assert!(!candidate.matches(b"unix:path=/run/user/1000/bu"));
        assert!(!candidate.matches(b"/run/user/1000/bus"));
    }
}
