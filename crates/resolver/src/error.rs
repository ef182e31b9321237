use thiserror::Error;

/// Every way a resolution can fail. The display text of each variant is the
/// exact audit line logged for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Failed to get value of XDG_RUNTIME_DIR or is invalid")]
    InvalidRuntimeDir,

    #[error("Generated path exceeds PATH_MAX ({limit})")]
    TooLong { limit: usize },

    #[error("DBUS_SESSION_BUS_ADDRESS is already set to a different value: {existing}")]
    Conflict { existing: String },

    #[error("Failed to define DBUS_SESSION_BUS_ADDRESS in env: {description}")]
    StoreWrite { description: String },
}

impl ResolveError {
    #[must_use]
    pub fn too_long(limit: usize) -> Self {
        Self::TooLong { limit }
    }

    #[must_use]
    pub fn conflict(existing: impl Into<String>) -> Self {
        Self::Conflict {
            existing: existing.into(),
        }
    }

    #[must_use]
    pub fn store_write(source: &dsba_common::Error) -> Self {
        Self::StoreWrite {
            description: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
