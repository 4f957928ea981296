//! High-level pipeline: orchestrates scan → filter → gate → upload per root.
//!
//! This module provides the top-level orchestration logic for mirroring one
//! local repository root onto the remote server. It implements a coordinated
//! pipeline that:
//!   - Scans the root for artifact records (one per POM descriptor)
//!   - Applies the include filters from [`MirrorFilter`]
//!   - Uploads the primary component and each attached asset, each gated by
//!     its own existence probe unless the force flag is set
//!   - Runs the orphan pass for JARs without a descriptor
//!   - Aggregates and returns a report of what was uploaded, skipped, failed.
//!
//! # Error Handling
//! A failed upload is logged and recorded; the run proceeds to the next
//! asset/record. Only scan-level failures (missing root, shallow layout)
//! abort a root.
//!
//! # Callable From
//! - Used by both the CLI crate and integration tests
//! - Expects a concrete (async) [`Uploader`] implementation for uploads

use std::path::Path;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::MirrorFilter;
use crate::contract::{Existence, UploadRequest, Uploader};
use crate::coords::ScanError;
use crate::scan::{scan_artifacts, scan_orphans, MavenArtifact};

/// Aggregated per-file outcomes of mirroring one root. Per-file lines are
/// remote coordinate file names, in processing order.
#[derive(Debug, Default, Serialize)]
pub struct MirrorReport {
    /// Files stored remotely during this run.
    pub uploaded: Vec<String>,
    /// Files skipped because they already exist remotely, or because their
    /// existence could not be determined.
    pub skipped: Vec<String>,
    /// Files the server rejected; diagnostics are in the log.
    pub failed: Vec<String>,
}

impl MirrorReport {
    pub fn total(&self) -> usize {
        self.uploaded.len() + self.skipped.len() + self.failed.len()
    }
}

/// Mirrors one root: descriptor pass with filters, then the orphan pass.
pub async fn mirror<U>(
    root: &Path,
    filter: &MirrorFilter,
    uploader: &U,
) -> Result<MirrorReport, ScanError>
where
    U: Uploader,
{
    info!(root = %root.display(), "[MIRROR] Scanning repository tree");
    let records = scan_artifacts(root)?;
    info!(records = records.len(), "[MIRROR] Descriptor scan complete");

    let mut report = MirrorReport::default();

    for record in &records {
        if !filter.matches(&record.gav) {
            debug!(gav = %record.gav, "[MIRROR] Excluded by include filters");
            continue;
        }
        upload_record(uploader, filter.force, record, &mut report).await;
    }

    // Second pass: jars whose POM is missing are invisible to the descriptor
    // scan. Always existence-gated, so jars already mirrored above are
    // skipped, not duplicated.
    info!(root = %root.display(), "[MIRROR] Checking for orphaned jars");
    for orphan in scan_orphans(root)? {
        let coordinate_path = orphan.gav.remote_path(&orphan.jar);
        let file = orphan.jar_path();
        let req = UploadRequest::Attached {
            gav: &orphan.gav,
            file: &file,
            classifier: None,
        };
        upload_gated(uploader, &mut report, false, &coordinate_path, req).await;
    }

    match serde_json::to_string_pretty(&report) {
        Ok(json) => debug!(json = %json, "[MIRROR] Mirror report"),
        Err(e) => error!(error = ?e, "[MIRROR] Failed to serialise mirror report"),
    }
    Ok(report)
}

/// Uploads one artifact record: the primary component (POM + main JAR),
/// then the sources and javadoc attachments, each gated independently.
async fn upload_record<U>(uploader: &U, force: bool, record: &MavenArtifact, report: &mut MirrorReport)
where
    U: Uploader,
{
    debug!(gav = %record.gav, pom = %record.pom, "[MIRROR] Processing artifact record");

    // The primary component is gated on the POM's remote path.
    let pom_path = record.pom_path();
    let jar_path = record.jar_path();
    let req = UploadRequest::Primary {
        pom: &pom_path,
        jar: jar_path.as_deref(),
        classifier: record.classifier.as_deref(),
    };
    upload_gated(
        uploader,
        report,
        force,
        &record.gav.remote_path(&record.pom),
        req,
    )
    .await;

    if let (Some(name), Some(file)) = (&record.sources, record.sources_path()) {
        let req = UploadRequest::Attached {
            gav: &record.gav,
            file: &file,
            classifier: Some("sources"),
        };
        upload_gated(uploader, report, force, &record.gav.remote_path(name), req).await;
    }

    if let (Some(name), Some(file)) = (&record.javadoc, record.javadoc_path()) {
        let req = UploadRequest::Attached {
            gav: &record.gav,
            file: &file,
            classifier: Some("javadoc"),
        };
        upload_gated(uploader, report, force, &record.gav.remote_path(name), req).await;
    }
}

/// One existence-gated upload attempt. `Present` and `Unknown` both skip:
/// when the server state is ambiguous, not uploading is the safe side.
async fn upload_gated<U>(
    uploader: &U,
    report: &mut MirrorReport,
    force: bool,
    coordinate_path: &str,
    req: UploadRequest<'_>,
) where
    U: Uploader,
{
    let file = req.file_name();
    if !force {
        match uploader.artifact_exists(coordinate_path).await {
            Existence::Absent => {}
            Existence::Present => {
                debug!(path = coordinate_path, "[MIRROR] Already present remotely, skipping");
                report.skipped.push(file);
                return;
            }
            Existence::Unknown => {
                warn!(
                    path = coordinate_path,
                    "[MIRROR] Existence check inconclusive; skipping to avoid a duplicate upload"
                );
                report.skipped.push(file);
                return;
            }
        }
    }

    match uploader.upload(req).await {
        Ok(()) => {
            info!(file = %file, "[MIRROR] Successfully uploaded");
            report.uploaded.push(file);
        }
        Err(e) => {
            error!(file = %file, error = %e, "[MIRROR] Upload rejected");
            report.failed.push(file);
        }
    }
}
