//! Endpoints, paths and timeouts used by the Google Cloud provider

use std::path::PathBuf;
use std::time::Duration;

pub const METADATA_BASE: &str = "http://metadata.google.internal/computeMetadata/v1";
pub const COMPUTE_API_BASE: &str = "https://compute.googleapis.com/compute/v1";

/// Host override for the metadata server, as honoured by the Google SDKs
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";
/// gcloud's own override for its configuration directory
pub const CONFIG_DIR_ENV: &str = "CLOUDSDK_CONFIG";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

const METADATA_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Cloud provider configuration
#[derive(Debug, Clone)]
pub struct GcpSettings {
    pub metadata_url: String,
    pub compute_url: String,

    /// gcloud configuration directory (holds `active_config` and `configurations/`)
    pub config_dir: PathBuf,

    /// Pre-issued OAuth2 access token; skips metadata and gcloud token lookups
    pub access_token: Option<String>,

    pub metadata_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GcpSettings {
    fn default() -> Self {
        Self {
            metadata_url: METADATA_BASE.to_string(),
            compute_url: COMPUTE_API_BASE.to_string(),
            config_dir: default_config_dir(),
            access_token: None,
            metadata_timeout: METADATA_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl GcpSettings {
    /// Defaults adjusted by `GCE_METADATA_HOST`, `CLOUDSDK_CONFIG` and
    /// `GOOGLE_OAUTH_ACCESS_TOKEN`
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(host) = env_value(METADATA_HOST_ENV) {
            settings.metadata_url = format!("http://{}/computeMetadata/v1", host);
        }
        if let Some(dir) = env_value(CONFIG_DIR_ENV) {
            settings.config_dir = PathBuf::from(dir);
        }
        settings.access_token = env_value(ACCESS_TOKEN_ENV);
        settings
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("gcloud")
}
