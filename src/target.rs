//! Enumeration of the files generated during one materialization run.

use std::path::{Path, PathBuf};

/// Finite, restartable sequence of target paths in insertion order.
///
/// Iterating does not consume the sequence, so the same targets can be
/// walked again for every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    paths: Vec<PathBuf>,
}

impl Targets {
    /// Wraps a fixed array of paths.
    pub fn from_slice<S: AsRef<Path>>(paths: &[S]) -> Self {
        Self {
            paths: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }

    /// Wraps a single path.
    pub fn single<S: AsRef<Path>>(path: S) -> Self {
        Self {
            paths: vec![path.as_ref().to_path_buf()],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<'a> IntoIterator for &'a Targets {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for Targets {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}
