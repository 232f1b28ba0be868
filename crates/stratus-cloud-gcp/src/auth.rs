//! OAuth2 access tokens for the Compute API

use crate::error::{GcpError, Result};
use crate::metadata::MetadataClient;
use std::process::Stdio;
use tokio::process::Command;

/// Where the bearer token comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Token handed in through configuration
    Static(String),
    /// Default service account of the instance we run on
    Metadata,
    /// `gcloud auth print-access-token` for a named configuration
    Gcloud { configuration: Option<String> },
}

impl TokenSource {
    pub fn select(access_token: Option<&str>, in_cloud: bool, profile: &str) -> Self {
        match access_token {
            Some(token) if !token.is_empty() => TokenSource::Static(token.to_string()),
            _ if in_cloud => TokenSource::Metadata,
            _ => TokenSource::Gcloud {
                configuration: Some(profile.to_string()).filter(|p| !p.is_empty()),
            },
        }
    }

    pub async fn fetch(&self, metadata: &MetadataClient) -> Result<String> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Metadata => metadata.access_token().await,
            TokenSource::Gcloud { configuration } => {
                print_access_token(configuration.as_deref()).await
            }
        }
    }
}

async fn print_access_token(configuration: Option<&str>) -> Result<String> {
    let mut cmd = Command::new("gcloud");
    cmd.args(["auth", "print-access-token"]);
    if let Some(configuration) = configuration {
        cmd.arg("--configuration").arg(configuration);
    }
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!(
        "Running: gcloud auth print-access-token{}",
        configuration
            .map(|c| format!(" --configuration {}", c))
            .unwrap_or_default()
    );

    let output = match cmd.output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(GcpError::GcloudNotFound);
        }
        Err(e) => return Err(e.into()),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GcpError::CommandFailed(stderr.trim().to_string()));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(GcpError::CommandFailed(
            "gcloud returned an empty access token".to_string(),
        ));
    }
    Ok(token)
}
