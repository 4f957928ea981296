use regex::Regex;
use tracing::{debug, info};

use crate::coords::Gav;

/// Include filters and upload policy for one mirror run.
///
/// Regexes use search semantics: a record qualifies when the pattern matches
/// anywhere inside the groupId / artifactId, not only on a full match.
#[derive(Debug, Clone, Default)]
pub struct MirrorFilter {
    pub include_group: Option<Regex>,
    pub include_artifact: Option<Regex>,
    /// Skip existence checks and upload unconditionally.
    pub force: bool,
}

impl MirrorFilter {
    /// Whether a record with these coordinates qualifies for upload. With no
    /// regexes configured every record qualifies.
    pub fn matches(&self, gav: &Gav) -> bool {
        if let Some(pattern) = &self.include_group {
            if !pattern.is_match(&gav.group_id) {
                return false;
            }
        }
        if let Some(pattern) = &self.include_artifact {
            if !pattern.is_match(&gav.artifact_id) {
                return false;
            }
        }
        true
    }

    pub fn trace_loaded(&self) {
        info!(
            include_group = self.include_group.as_ref().map(Regex::as_str),
            include_artifact = self.include_artifact.as_ref().map(Regex::as_str),
            force = self.force,
            "Loaded mirror filter"
        );
        debug!(?self, "Mirror filter (full debug)");
    }
}
