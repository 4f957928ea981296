#![doc = "Nexus client for the CLI: bridges the core uploader trait to the real REST API."]
//
//! # Nexus Client (CLI <-> Core)
//!
//! This module provides the bridge between the CLI workflow and the upload
//! abstraction in `m2-mirror-core::contract`. It wires up the `Uploader`
//! trait for real use against a remote Nexus server: a HEAD probe against
//! the repository content path decides existence, and component creation is
//! one multipart POST to the components endpoint per upload.
//!
//! ## Transport policy
//! - Redirects disabled, so a misconfigured URL fails loudly instead of
//!   uploading to a redirect target.
//! - Bounded per-request timeout (`--timeout`, default 20 s).
//! - TLS verification is on unless the operator passes `--insecure`; the
//!   opt-out is logged at warn level at construction time.

use std::path::Path;

use async_trait::async_trait;
use m2_mirror_core::contract::{Existence, UploadError, UploadRequest, Uploader};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Basic-auth credential pair passed at invocation.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Construction parameters for [`NexusClient`].
#[derive(Debug, Clone)]
pub struct NexusClientConfig {
    pub repo_url: String,
    pub repo_id: String,
    pub auth: Option<Credentials>,
    /// Accept invalid TLS certificates. Explicit opt-in for self-signed
    /// internal servers, never a default.
    pub insecure: bool,
    pub timeout: std::time::Duration,
}

pub struct NexusClient {
    http: Client,
    repo_url: String,
    repo_id: String,
    auth: Option<Credentials>,
}

impl NexusClient {
    pub fn new(config: NexusClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none());
        if config.insecure {
            warn!(
                "TLS certificate verification disabled (--insecure); only use against trusted internal servers"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;
        info!(
            repo_url = %config.repo_url,
            repo_id = %config.repo_id,
            auth_configured = config.auth.is_some(),
            insecure = config.insecure,
            "Initialised Nexus client"
        );
        Ok(Self {
            http,
            repo_url: config.repo_url.trim_end_matches('/').to_string(),
            repo_id: config.repo_id,
            auth: config.auth,
        })
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(credentials) => req.basic_auth(&credentials.username, Some(&credentials.password)),
            None => req,
        }
    }

    fn components_url(&self) -> String {
        format!("{}/service/rest/v1/components", self.repo_url)
    }

    async fn file_part(path: &Path) -> Result<Part, UploadError> {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Err(format!("asset path '{}' has no file name", path.display()).into());
        };
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| format!("reading '{}' failed: {e}", path.display()))?;
        Ok(Part::bytes(bytes).file_name(name))
    }

    /// Multipart form per the components API: the primary role carries the
    /// POM as asset1 and the main JAR as asset2 with its classifier field;
    /// attached roles carry explicit GAV fields plus a single jar asset.
    async fn build_form(req: &UploadRequest<'_>) -> Result<Form, UploadError> {
        match req {
            UploadRequest::Primary {
                pom,
                jar,
                classifier,
            } => {
                let mut form = Form::new()
                    .part("maven2.asset1", Self::file_part(pom).await?)
                    .text("maven2.asset1.extension", "pom");
                if let Some(jar) = jar {
                    form = form
                        .part("maven2.asset2", Self::file_part(jar).await?)
                        .text("maven2.asset2.extension", "jar")
                        .text(
                            "maven2.asset2.classifier",
                            classifier.unwrap_or("").to_string(),
                        );
                }
                Ok(form)
            }
            UploadRequest::Attached {
                gav,
                file,
                classifier,
            } => {
                let mut form = Form::new()
                    .text("maven2.groupId", gav.group_id.clone())
                    .text("maven2.artifactId", gav.artifact_id.clone())
                    .text("maven2.version", gav.version.clone())
                    .part("maven2.asset1", Self::file_part(file).await?)
                    .text("maven2.asset1.extension", "jar");
                if let Some(classifier) = classifier {
                    form = form.text("maven2.asset1.classifier", classifier.to_string());
                }
                Ok(form)
            }
        }
    }
}

#[async_trait]
impl Uploader for NexusClient {
    async fn artifact_exists(&self, coordinate_path: &str) -> Existence {
        let url = format!(
            "{}/repository/{}/{}",
            self.repo_url, self.repo_id, coordinate_path
        );
        debug!(url = %url, "Checking remote existence");
        match self.with_auth(self.http.head(&url)).send().await {
            Ok(response) => match response.status() {
                StatusCode::NOT_FOUND => Existence::Absent,
                StatusCode::OK => Existence::Present,
                status => {
                    warn!(
                        status = %status,
                        path = coordinate_path,
                        "Unexpected status checking artifact existence; assuming it exists"
                    );
                    Existence::Unknown
                }
            },
            Err(e) => {
                warn!(
                    error = %e,
                    path = coordinate_path,
                    "Existence check failed; assuming the artifact exists"
                );
                Existence::Unknown
            }
        }
    }

    async fn upload<'a>(&self, req: UploadRequest<'a>) -> Result<(), UploadError> {
        let file_name = req.file_name();
        let form = Self::build_form(&req).await?;
        debug!(file = %file_name, "Posting component to Nexus");

        let response = self
            .with_auth(self.http.post(self.components_url()))
            .query(&[("repository", self.repo_id.as_str()), ("hasPom", "true")])
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("error communicating with Nexus: {e}"))?;

        let status = response.status();
        if status.as_u16() > 299 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            return Err(format!(
                "code={}, msg=[{}], resource={}",
                status.as_u16(),
                body,
                file_name
            )
            .into());
        }
        Ok(())
    }
}
