use std::fmt;

/// the separator between path segments in a repository
pub const DELIMITER: &str = "/";

/// a path inside a repository.
///
/// this is a value type, not a filesystem path: absolute paths start with
/// `/`, relative paths do not, and two paths with the same textual form
/// are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoPath {
    path: String,
}

impl RepoPath {
    /// create a path at the given location, relative or absolute
    pub fn at(relative_or_absolute: impl Into<String>) -> Self {
        Self {
            path: relative_or_absolute.into(),
        }
    }

    /// create a path at the repository root
    pub fn at_root() -> Self {
        Self::at(DELIMITER)
    }

    /// the textual form of this path
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// true if this path starts at the root
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with(DELIMITER)
    }

    /// resolve another path against this one.
    ///
    /// an absolute input replaces this path entirely; a relative input is
    /// appended with a single delimiter between the two.
    pub fn resolve(&self, relative_or_absolute: &str) -> Self {
        if relative_or_absolute.starts_with(DELIMITER) {
            return Self::at(relative_or_absolute);
        }
        if self.path.ends_with(DELIMITER) {
            Self::at(format!("{}{}", self.path, relative_or_absolute))
        } else {
            Self::at(format!("{}{}{}", self.path, DELIMITER, relative_or_absolute))
        }
    }

    /// return this path with a trailing delimiter
    pub fn ensure_ends_with_delimiter(&self) -> Self {
        if self.path.ends_with(DELIMITER) {
            self.clone()
        } else {
            Self::at(format!("{}{}", self.path, DELIMITER))
        }
    }

    /// return this path as an absolute path, prepending `/` if needed
    pub fn to_absolute(&self) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            Self::at(format!("{}{}", DELIMITER, self.path))
        }
    }

    /// split into segments, dropping empty tokens.
    ///
    /// the root path `/` splits into no segments at all.
    pub fn split_into_parts(&self) -> Vec<&str> {
        self.path
            .split(DELIMITER)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}
