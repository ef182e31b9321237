use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The environment store refused a mutation. The text is the store's own
    /// description of the failure.
    #[error("{description}")]
    Store { description: String },

    #[error("malformed environment entry '{entry}': expected NAME=value")]
    MalformedEntry { entry: String },
}

impl Error {
    #[must_use]
    pub fn store(description: impl Into<String>) -> Self {
        Self::Store {
            description: description.into(),
        }
    }

    #[must_use]
    pub fn malformed_entry(entry: impl Into<String>) -> Self {
        Self::MalformedEntry {
            entry: entry.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
