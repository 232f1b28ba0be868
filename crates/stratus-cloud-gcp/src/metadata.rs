//! GCE metadata server client
//!
//! The metadata server only answers inside Google Cloud. Lookups are bounded
//! by a short timeout and any failure reads as "not available", so probing
//! from a laptop costs at most one timeout.

use crate::error::{GcpError, Result};
use serde::Deserialize;
use std::time::Duration;
use stratus_cloud::naming::region_from_zone;
use stratus_cloud::{Setting, SettingSource, Settings};

const FLAVOR_HEADER: &str = "Metadata-Flavor";
const FLAVOR: &str = "Google";

/// Metadata server client
pub struct MetadataClient {
    client: reqwest::Client,
    base_url: String,
}

impl MetadataClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a metadata value. `None` when unreachable, non-200 or empty.
    pub async fn get(&self, path: &str) -> Option<String> {
        let url = format!("{}/{}", self.base_url, path);
        let response = match self
            .client
            .get(&url)
            .header(FLAVOR_HEADER, FLAVOR)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Metadata lookup {} failed: {}", path, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Metadata lookup {} returned {}", path, response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        let body = body.trim();
        if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        }
    }

    /// Probe the project, default service account and zone
    pub async fn probe(&self) -> MetadataSnapshot {
        let Some(project) = self.get("project/project-id").await else {
            tracing::debug!("Metadata server not available, assuming not running in GCP");
            return MetadataSnapshot::default();
        };

        MetadataSnapshot {
            project: Some(project),
            identity: self.get("instance/service-accounts/default/email").await,
            zone: self.get("instance/zone").await,
        }
    }

    /// OAuth2 access token of the default service account
    pub async fn access_token(&self) -> Result<String> {
        let url = format!(
            "{}/instance/service-accounts/default/token",
            self.base_url
        );
        let response = self
            .client
            .get(&url)
            .header(FLAVOR_HEADER, FLAVOR)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GcpError::Metadata(format!(
                "token request returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// What the metadata server reported. All `None` outside Google Cloud.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSnapshot {
    pub project: Option<String>,
    pub identity: Option<String>,

    /// Zone path, e.g. `projects/123456/zones/us-west1-a`
    pub zone: Option<String>,
}

impl MetadataSnapshot {
    pub fn in_cloud(&self) -> bool {
        self.project.is_some()
    }

    pub fn region(&self) -> Option<&str> {
        self.zone.as_deref().and_then(region_from_zone)
    }
}

impl SettingSource for MetadataSnapshot {
    fn name(&self) -> &str {
        "metadata"
    }

    fn lookup(&self, setting: Setting, _resolved: &Settings) -> stratus_cloud::Result<Option<String>> {
        Ok(match setting {
            Setting::Profile => None,
            Setting::Account => self.project.clone(),
            Setting::Identity => self.identity.clone(),
            Setting::Region => self.region().map(str::to_string),
        })
    }
}
