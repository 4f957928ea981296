//! Maven coordinate (GAV) derivation from on-disk repository layout.
//!
//! An M2 repository encodes coordinates as nested folders:
//! `<groupId-as-path>/<artifactId>/<version>/<files>`. The resolver splits a
//! directory path relative to the scan root into the three coordinate parts:
//! the last two segments are artifactId and version, everything above them is
//! the groupId joined with dots. A layout too shallow to carry all three
//! parts is a hard error, never a silent misparse.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while deriving coordinates or scanning a repository tree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Fewer than three path segments between the root and the artifact
    /// files, so no groupId/artifactId/version split exists.
    #[error("layout too shallow at '{path}': expected <group..>/<artifact>/<version> below the root")]
    ShallowLayout { path: String },

    #[error("repository root '{root}' is not a readable directory")]
    RootUnreadable {
        root: String,
        #[source]
        source: std::io::Error,
    },

    #[error("walking repository tree under '{root}' failed")]
    Walk {
        root: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("listing directory '{path}' failed")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// groupId, artifactId, version: the three-part coordinate identifying one
/// artifact version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gav {
    /// Dot-separated group, e.g. `com.example.tools`.
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Gav {
    /// Derives coordinates from an artifact directory, given the scan root
    /// it was found under.
    pub fn from_dir(root: &Path, dir: &Path) -> Result<Self, ScanError> {
        let rel = dir.strip_prefix(root).map_err(|_| ScanError::ShallowLayout {
            path: dir.display().to_string(),
        })?;
        Self::from_relative_dir(rel)
    }

    /// Derives coordinates from a directory path relative to the scan root.
    pub fn from_relative_dir(rel: &Path) -> Result<Self, ScanError> {
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .collect();
        if parts.len() < 3 {
            return Err(ScanError::ShallowLayout {
                path: rel.display().to_string(),
            });
        }
        let version = parts[parts.len() - 1].clone();
        let artifact_id = parts[parts.len() - 2].clone();
        let group_id = parts[..parts.len() - 2].join(".");
        Ok(Self {
            group_id,
            artifact_id,
            version,
        })
    }

    /// Remote directory for this GAV: dots in the groupId become slashes.
    pub fn remote_dir(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version
        )
    }

    /// Full remote coordinate path for one file of this artifact version,
    /// used both for existence probes and operator reporting.
    pub fn remote_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.remote_dir(), file_name)
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
