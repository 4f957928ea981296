//! # uploader contract: interface between the pipeline and a remote server
//!
//! This module defines a single trait (`Uploader`) and the supporting types
//! for probing and uploading Maven artifacts (POMs, JARs, sources, javadocs)
//! on a remote binary-artifact repository via an external API or a mock/test
//! implementation.
//!
//! ## Interface & Extensibility
//! - Implement the [`Uploader`] trait to create new upload clients (e.g. a
//!   different server product, or a dry-run recorder).
//! - Both methods are async; upload errors are boxed trait objects carrying
//!   the server's diagnostics, so callers can log and continue.
//! - Existence probes are deliberately infallible: every ambiguous outcome
//!   collapses into [`Existence::Unknown`], which gates like `Present`.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.

use std::path::Path;

use async_trait::async_trait;

use mockall::automock;

use crate::coords::Gav;

/// Result of one existence probe against the remote repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// The asset is absent remotely and may be uploaded.
    Absent,
    /// The asset is already stored remotely.
    Present,
    /// The server answered with anything else, or the probe failed in
    /// transport. Gated like `Present`, so an ambiguous server state never
    /// causes a duplicate or overwriting upload.
    Unknown,
}

/// One multipart upload against the component-creation endpoint.
#[derive(Debug)]
pub enum UploadRequest<'a> {
    /// The POM descriptor plus, when present, the main JAR and its
    /// classifier. Coordinates travel inside the POM itself.
    Primary {
        pom: &'a Path,
        jar: Option<&'a Path>,
        classifier: Option<&'a str>,
    },
    /// A single attached asset identified by explicit GAV form fields:
    /// `sources`, `javadoc`, or an orphaned JAR with no classifier.
    Attached {
        gav: &'a Gav,
        file: &'a Path,
        classifier: Option<&'a str>,
    },
}

impl UploadRequest<'_> {
    /// File name reported to the operator for this upload.
    pub fn file_name(&self) -> String {
        let path = match self {
            Self::Primary { pom, .. } => pom,
            Self::Attached { file, .. } => file,
        };
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Error type for upload attempts (boxed, carries server diagnostics).
pub type UploadError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for probing and uploading artifacts on a remote repository.
/// The implementor is responsible for connecting to the backing server.
///
/// The trait is implemented by the real HTTP client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Probe whether `coordinate_path` already exists in the target
    /// repository. See [`Existence`] for the conservative mapping of
    /// ambiguous outcomes.
    async fn artifact_exists(&self, coordinate_path: &str) -> Existence;

    /// Perform one multipart upload. Server-side rejections surface as
    /// errors carrying the status code, response body and file name.
    async fn upload<'a>(&self, req: UploadRequest<'a>) -> Result<(), UploadError>;
}
