//! Error types

use thiserror::Error;

/// Failure to apply one queued request to the tree.
///
/// Requests are validated only when the render entry point applies them, so
/// these never come back from `add`/`remove`/`modify` directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A removal named a path that is not in the tree.
    #[error("cannot find the given path `{path}`")]
    NotFound {
        /// The path as it was queued.
        path: String,
    },

    /// An addition could not be placed in the tree.
    #[error("failed to add the given path `{path}`")]
    InsertionConflict {
        /// The path as it was queued.
        path: String,
    },

    /// The path was empty or contained an empty segment.
    #[error("malformed path `{path}`")]
    Malformed {
        /// The path as it was queued.
        path: String,
    },
}

impl PathError {
    /// The path the failed request was queued with.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path } | Self::InsertionConflict { path } | Self::Malformed { path } => path,
        }
    }
}

/// Errors surfaced by [`StatefulMenu`](crate::StatefulMenu) calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// One or more queued requests failed while applying a batch.
    ///
    /// The rest of the batch was still applied and both queues were cleared.
    #[error("{} queued menu request(s) failed: {}", .failures.len(), summarize(.failures))]
    Mutation {
        /// Every failure in the batch, removals first.
        failures: Vec<PathError>,
    },

    /// The path separator cannot be empty.
    #[error("path separator cannot be empty")]
    EmptySeparator,
}

impl MenuError {
    /// Per-path failures carried by this error, if any.
    pub fn failures(&self) -> &[PathError] {
        match self {
            Self::Mutation { failures } => failures,
            Self::EmptySeparator => &[],
        }
    }
}

/// Errors loading a [`MenuConfig`](crate::MenuConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid configuration JSON.
    #[error("invalid menu config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured separator was empty.
    #[error(transparent)]
    Menu(#[from] MenuError),
}

fn summarize(failures: &[PathError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
