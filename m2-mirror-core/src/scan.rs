//! Filesystem scanner for local M2 repository trees.
//!
//! Two passes over the same root:
//! - [`scan_artifacts`]: one record per `.pom` descriptor found anywhere
//!   under the root, with the main JAR, its inferred classifier, and any
//!   `-sources.jar` / `-javadoc.jar` siblings.
//! - [`scan_orphans`]: every plain JAR under the root, so that artifacts
//!   whose POM is missing entirely still get mirrored. The pass also
//!   revisits JARs that do have a POM; the per-file existence check on the
//!   remote keeps that idempotent.
//!
//! Walks are sorted by file name, so record order is stable across runs and
//! filesystems.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::coords::{Gav, ScanError};

/// One artifact version discovered via its POM descriptor. Immutable once
/// scanned; consumed by the mirror pipeline one record at a time.
#[derive(Debug, Clone)]
pub struct MavenArtifact {
    pub gav: Gav,
    /// Directory holding all files of this artifact version.
    pub dir: PathBuf,
    /// POM file name.
    pub pom: String,
    /// Main JAR file name, when one sits next to the POM.
    pub jar: Option<String>,
    /// Classifier inferred from the main JAR name, e.g. `client`.
    pub classifier: Option<String>,
    /// `-sources.jar` sibling of the main JAR, when present.
    pub sources: Option<String>,
    /// `-javadoc.jar` sibling of the main JAR, when present.
    pub javadoc: Option<String>,
}

impl MavenArtifact {
    pub fn pom_path(&self) -> PathBuf {
        self.dir.join(&self.pom)
    }

    pub fn jar_path(&self) -> Option<PathBuf> {
        self.jar.as_ref().map(|name| self.dir.join(name))
    }

    pub fn sources_path(&self) -> Option<PathBuf> {
        self.sources.as_ref().map(|name| self.dir.join(name))
    }

    pub fn javadoc_path(&self) -> Option<PathBuf> {
        self.javadoc.as_ref().map(|name| self.dir.join(name))
    }
}

/// A JAR found without needing a descriptor; coordinates come purely from
/// its parent directory. No classifier can be inferred without a POM.
#[derive(Debug, Clone)]
pub struct OrphanJar {
    pub gav: Gav,
    pub dir: PathBuf,
    pub jar: String,
}

impl OrphanJar {
    pub fn jar_path(&self) -> PathBuf {
        self.dir.join(&self.jar)
    }
}

/// A JAR that is neither a sources nor a javadoc attachment.
fn is_plain_jar(name: &str) -> bool {
    name.ends_with(".jar") && !name.ends_with("-sources.jar") && !name.ends_with("-javadoc.jar")
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::RootUnreadable {
            root: root.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        }),
        Err(source) => Err(ScanError::RootUnreadable {
            root: root.display().to_string(),
            source,
        }),
    }
}

/// Plain JARs in one directory, sorted lexically for a stable pick order.
fn plain_jars_in(dir: &Path) -> Result<Vec<String>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.display().to_string(),
        source,
    })?;
    let mut jars: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .filter(|name| is_plain_jar(name))
        .collect();
    jars.sort();
    Ok(jars)
}

/// Picks the main JAR among the candidates in an artifact directory.
///
/// Tie-break is deterministic: a JAR named exactly like the POM with the
/// extension swapped wins, otherwise the lexically first candidate.
fn select_main_jar(jars: &[String], pom_base: &str) -> Option<String> {
    let exact = format!("{pom_base}.jar");
    if jars.iter().any(|name| name == &exact) {
        return Some(exact);
    }
    jars.first().cloned()
}

/// Classifier encoded in the main JAR name: the name minus the POM base,
/// minus `.jar`, minus a leading hyphen. Empty means no classifier.
fn infer_classifier(jar: &str, pom_base: &str) -> Option<String> {
    let stem = jar.strip_suffix(".jar")?;
    if stem == pom_base {
        return None;
    }
    let classifier = stem.replace(pom_base, "");
    let classifier = classifier.trim_start_matches('-');
    if classifier.is_empty() {
        None
    } else {
        Some(classifier.to_string())
    }
}

/// Walks an on-disk M2 repository, yielding one record per POM file.
pub fn scan_artifacts(root: &Path) -> Result<Vec<MavenArtifact>, ScanError> {
    check_root(root)?;
    let mut records = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.display().to_string(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !name.ends_with(".pom") {
            continue;
        }
        let Some(dir) = entry.path().parent() else {
            continue;
        };

        let gav = Gav::from_dir(root, dir)?;
        let pom_base = name.strip_suffix(".pom").unwrap_or(name);

        let jars = plain_jars_in(dir)?;
        if jars.len() > 1 {
            // Known limitation of descriptor-less layouts: one POM cannot
            // disambiguate several co-located JARs.
            warn!(
                dir = %dir.display(),
                candidates = jars.len(),
                "Multiple candidate jars next to one POM; picking deterministically"
            );
        }
        let jar = select_main_jar(&jars, pom_base);
        let classifier = jar.as_deref().and_then(|j| infer_classifier(j, pom_base));

        let (sources, javadoc) = match jar.as_deref().and_then(|j| j.strip_suffix(".jar")) {
            Some(stem) => {
                let sources_name = format!("{stem}-sources.jar");
                let javadoc_name = format!("{stem}-javadoc.jar");
                (
                    dir.join(&sources_name).is_file().then_some(sources_name),
                    dir.join(&javadoc_name).is_file().then_some(javadoc_name),
                )
            }
            None => (None, None),
        };

        let record = MavenArtifact {
            gav,
            dir: dir.to_path_buf(),
            pom: name.to_string(),
            jar,
            classifier,
            sources,
            javadoc,
        };
        debug!(
            gav = %record.gav,
            pom = %record.pom,
            jar = ?record.jar,
            classifier = ?record.classifier,
            "Discovered artifact record"
        );
        records.push(record);
    }

    Ok(records)
}

/// Walks the same root for plain JARs, deriving coordinates from each JAR's
/// parent directory alone. Catches artifacts with no accompanying POM.
pub fn scan_orphans(root: &Path) -> Result<Vec<OrphanJar>, ScanError> {
    check_root(root)?;
    let mut orphans = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.display().to_string(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_plain_jar(name) {
            continue;
        }
        let Some(dir) = entry.path().parent() else {
            continue;
        };

        let gav = Gav::from_dir(root, dir)?;
        debug!(gav = %gav, jar = name, "Discovered jar in orphan pass");
        orphans.push(OrphanJar {
            gav,
            dir: dir.to_path_buf(),
            jar: name.to_string(),
        });
    }

    Ok(orphans)
}
