//! Path splitting.
//!
//! A path like `"File/Recent/notes.txt"` names one node per segment: every
//! segment but the last is a container, the last one is the leaf command.

use crate::error::{MenuError, PathError};

/// Default path separator.
pub const DEFAULT_SEPARATOR: &str = "/";

/// Split `path` into its segments.
///
/// The separator is matched as a whole string. Empty paths and paths with an
/// empty segment (`"a//b"`, `"/a"`, `"a/"`) are malformed.
pub fn split<'a>(path: &'a str, separator: &str) -> Result<Vec<&'a str>, PathError> {
    if path.is_empty() || separator.is_empty() {
        return Err(malformed(path));
    }

    let segments: Vec<&str> = path.split(separator).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(malformed(path));
    }
    Ok(segments)
}

/// Join segments back into a path.
pub fn join<S: AsRef<str>>(segments: &[S], separator: &str) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Check that `separator` can be used to split paths.
pub fn validate_separator(separator: &str) -> Result<(), MenuError> {
    if separator.is_empty() {
        Err(MenuError::EmptySeparator)
    } else {
        Ok(())
    }
}

fn malformed(path: &str) -> PathError {
    PathError::Malformed {
        path: path.to_string(),
    }
}
