/// This module implements the full CLI interface for m2-mirror—handling
/// argument parsing, credential resolution, and the user-visible invocation.
///
/// All core business logic (scanning, coordinate resolution, upload gating)
/// lives in the `m2-mirror-core` crate. This module is strictly for CLI
/// glue, ergonomic argument exposure, and orchestration across roots.
///
/// ## Features
/// - Entry struct [`Cli`] defines all user-facing options (see below).
/// - Async entrypoint ([`run`]) for programmatic invocation and integration
///   testing.
/// - Logging, tracing, and structured error output at CLI level.
///
/// A run that completes exits 0 even when individual uploads were rejected:
/// per-file failures are operator information, visible in the log lines and
/// the per-root summary. Only argument errors, client construction failures
/// and unreadable roots abort the run.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use m2_mirror_core::config::MirrorFilter;
use m2_mirror_core::synchronise::mirror;
use regex::Regex;
use tracing::{error, info};

use crate::client::{Credentials, NexusClient, NexusClientConfig};

/// Environment fallback for the basic-auth pair when `--auth` is not given.
pub const AUTH_ENV_VAR: &str = "M2_MIRROR_AUTH";

/// CLI for m2-mirror: upload multiple local artifacts to a remote Nexus repository.
#[derive(Debug, Parser)]
#[clap(
    name = "m2-mirror",
    version,
    about = "Mirror local M2 repository trees onto a remote Nexus server, uploading what is missing"
)]
pub struct Cli {
    /// Local repository roots to scan.
    #[clap(required = true, value_name = "REPODIRS")]
    pub repodirs: Vec<PathBuf>,

    /// Repository ID (in Nexus) to upload to.
    #[clap(long)]
    pub repo_id: String,

    /// Nexus repo URL (e.g. http://localhost:8081).
    #[clap(long)]
    pub repo_url: String,

    /// Basic-auth credentials in the form username:password.
    /// Falls back to the M2_MIRROR_AUTH environment variable.
    #[clap(long)]
    pub auth: Option<String>,

    /// Regex applied to artifactIds; only matching records are uploaded.
    #[clap(long, short = 'a', alias = "ia", value_name = "REGEX")]
    pub include_artifact: Option<String>,

    /// Regex applied to groupIds; only matching records are uploaded.
    #[clap(long, short = 'g', alias = "ig", value_name = "REGEX")]
    pub include_group: Option<String>,

    /// Force upload to Nexus even if the artifact exists.
    #[clap(long, short = 'F')]
    pub force_upload: bool,

    /// Skip TLS certificate verification (for self-signed internal servers).
    #[clap(long)]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = 20, value_name = "SECS")]
    pub timeout: u64,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let filter = build_filter(&cli)?;
    filter.trace_loaded();

    let auth = resolve_auth(cli.auth.as_deref())?;
    let client = NexusClient::new(NexusClientConfig {
        repo_url: cli.repo_url.clone(),
        repo_id: cli.repo_id.clone(),
        auth,
        insecure: cli.insecure,
        timeout: Duration::from_secs(cli.timeout),
    })
    .context("failed to construct the Nexus client")?;

    for root in &cli.repodirs {
        info!(
            root = %root.display(),
            repo_id = %cli.repo_id,
            repo_url = %cli.repo_url,
            "Uploading content from local repository to remote repo"
        );
        let report = mirror(root, &filter, &client)
            .await
            .with_context(|| format!("mirroring '{}' failed", root.display()))?;
        if !report.failed.is_empty() {
            error!(
                root = %root.display(),
                failed = report.failed.len(),
                "Some uploads were rejected; see the log lines above"
            );
        }
        info!(
            root = %root.display(),
            processed = report.total(),
            uploaded = report.uploaded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Finished mirroring root"
        );
    }
    Ok(())
}

fn build_filter(cli: &Cli) -> Result<MirrorFilter> {
    let include_group = cli
        .include_group
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --include-group regex")?;
    let include_artifact = cli
        .include_artifact
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("invalid --include-artifact regex")?;
    Ok(MirrorFilter {
        include_group,
        include_artifact,
        force: cli.force_upload,
    })
}

/// Resolves the basic-auth pair: the `--auth` flag wins, then the
/// `M2_MIRROR_AUTH` environment variable; no credentials is allowed.
pub fn resolve_auth(flag: Option<&str>) -> Result<Option<Credentials>> {
    let raw = match flag {
        Some(raw) => Some(raw.to_string()),
        None => std::env::var(AUTH_ENV_VAR).ok(),
    };
    raw.as_deref().map(parse_credentials).transpose()
}

fn parse_credentials(raw: &str) -> Result<Credentials> {
    match raw.split_once(':') {
        Some((username, password)) if !username.is_empty() => Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }),
        _ => bail!("credentials must be in the form username:password"),
    }
}
