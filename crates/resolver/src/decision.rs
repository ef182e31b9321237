//! Terminal decisions of one open-session evaluation.

use std::fmt;

use {dsba_common::hooks::HookStatus, serde::Serialize};

use crate::error::ResolveError;

/// Exactly one decision is reached per invocation. It determines the audit
/// line and the status reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The session already carries the derived value.
    NoopAlreadyCorrect,
    /// The derived value is (to be) written into the session.
    Assign,
    /// A different value is present and override was not requested.
    RejectConflict,
    /// The runtime directory is missing or not absolute.
    FailInput,
    /// The derived value would exceed the path-length ceiling.
    FailLength,
    /// The environment store refused the write.
    FailWrite,
}

impl Decision {
    pub fn status(&self) -> HookStatus {
        match self {
            Self::NoopAlreadyCorrect | Self::Assign => HookStatus::Success,
            Self::RejectConflict | Self::FailInput | Self::FailLength | Self::FailWrite => {
                HookStatus::SessionError
            },
        }
    }
}

impl From<&ResolveError> for Decision {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::InvalidRuntimeDir => Self::FailInput,
            ResolveError::TooLong { .. } => Self::FailLength,
            ResolveError::Conflict { .. } => Self::RejectConflict,
            ResolveError::StoreWrite { .. } => Self::FailWrite,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoopAlreadyCorrect => "noop-already-correct",
            Self::Assign => "assign",
            Self::RejectConflict => "reject-conflict",
            Self::FailInput => "fail-input",
            Self::FailLength => "fail-length",
            Self::FailWrite => "fail-write",
        };
        f.write_str(name)
    }
}
