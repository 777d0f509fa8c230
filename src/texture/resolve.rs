use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{LuxelError, LuxelResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Ordered directory list used to resolve texture sources on disk.
///
/// This is the session's search-path configuration; serialized form is a bare
/// JSON array of directory strings, so a renderer config file can carry it
/// verbatim.
pub struct SearchPaths {
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    /// Build from any iterable of directories, keeping the given order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse from a JSON array of directory strings.
    pub fn from_json_str(json: &str) -> LuxelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| LuxelError::validation(format!("invalid search path config: {e}")))
    }

    /// Append a directory to the end of the search order.
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    /// Directories in search order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Resolve a source string to an existing file.
    ///
    /// A source that already names a readable file wins outright; otherwise
    /// the first `dir/source` that exists is returned. `None` means no
    /// candidate exists on disk.
    pub fn resolve(&self, source: &str) -> Option<PathBuf> {
        let direct = Path::new(source);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        for dir in &self.dirs {
            let candidate = dir.join(source);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    /// Directories rendered for error payloads and log lines.
    pub(crate) fn display_list(&self) -> Vec<String> {
        self.dirs.iter().map(|d| d.display().to_string()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/resolve.rs"]
mod tests;
