//! Safe path value object
//!
//! Every path segment that reaches the storage root goes through this type
//! first: tenant ids, site names, subdomain labels, uploaded file names, and
//! untrusted request paths. A `SafePath` is always relative, non-empty, and
//! free of `..` components, so joining it under the storage root can never
//! escape the root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Error when path validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path contains traversal components (..)
    #[error("path contains traversal components (..)")]
    ContainsTraversal,
    /// Path is absolute when relative is required
    #[error("absolute paths are not allowed")]
    AbsoluteNotAllowed,
    /// Path is empty
    #[error("path is empty")]
    Empty,
    /// A single segment was required but the path has several components
    #[error("'{0}' is not a single path segment")]
    NotASegment(String),
}

/// A validated relative path that cannot escape the directory it is joined
/// under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validate a relative path. Rejects empty, absolute, and traversal
    /// inputs. `.` components are dropped during normalization.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(PathError::Empty);
        }

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => return Err(PathError::ContainsTraversal),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PathError::AbsoluteNotAllowed)
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(PathError::Empty);
        }

        Ok(Self(normalized))
    }

    /// Validate a single path segment (one directory or file name). Used for
    /// tenant ids, site names, and subdomain labels, which must never span
    /// directories.
    pub fn segment(segment: &str) -> Result<Self, PathError> {
        let safe = Self::new(segment)?;
        if safe.0.components().count() != 1 {
            return Err(PathError::NotASegment(segment.to_string()));
        }
        Ok(safe)
    }

    /// True if `candidate` stays under `root` after lexical normalization.
    /// This is a re-validation guard for paths that were assembled earlier;
    /// it never touches the filesystem.
    pub fn is_within(candidate: &Path, root: &Path) -> bool {
        let mut depth: i64 = 0;
        let Ok(relative) = candidate.strip_prefix(root) else {
            return false;
        };
        for component in relative.components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::ParentDir => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => return false,
            }
        }
        true
    }

    /// Get the inner path
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to PathBuf
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for SafePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for SafePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
