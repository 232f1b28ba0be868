//! gcloud configuration files
//!
//! ```text
//! ~/.config/gcloud/
//! ├── active_config                 # name of the active configuration
//! └── configurations/
//!     └── config_<profile>          # INI: [core] project/account, [compute] region
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use stratus_cloud::{CloudError, Setting, SettingSource, Settings};

pub const DEFAULT_PROFILE: &str = "default";

/// Reads gcloud named configurations
#[derive(Debug, Clone)]
pub struct GcloudConfig {
    dir: PathBuf,
}

impl GcloudConfig {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Name stored in `active_config`, if any
    pub fn active_profile(&self) -> Option<String> {
        let content = fs::read_to_string(self.dir.join("active_config")).ok()?;
        let name = content.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    pub fn profile_path(&self, profile: &str) -> PathBuf {
        self.dir
            .join("configurations")
            .join(format!("config_{}", profile))
    }

    /// Parse a named configuration
    pub fn load(&self, profile: &str) -> stratus_cloud::Result<config::Config> {
        let path = self.profile_path(profile);
        if !path.is_file() {
            return Err(CloudError::UnknownProfile(profile.to_string()));
        }

        tracing::debug!("Reading gcloud configuration {}", path.display());
        config::Config::builder()
            .add_source(config::File::new(
                &path.to_string_lossy(),
                config::FileFormat::Ini,
            ))
            .build()
            .map_err(|e| CloudError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }
}

fn config_key(setting: Setting) -> Option<&'static str> {
    match setting {
        Setting::Profile => None,
        Setting::Account => Some("core.project"),
        Setting::Identity => Some("core.account"),
        Setting::Region => Some("compute.region"),
    }
}

impl SettingSource for GcloudConfig {
    fn name(&self) -> &str {
        "gcloud config"
    }

    fn lookup(&self, setting: Setting, resolved: &Settings) -> stratus_cloud::Result<Option<String>> {
        let Some(key) = config_key(setting) else {
            return Ok(self.active_profile());
        };

        let profile = match resolved.get(Setting::Profile) {
            "" => DEFAULT_PROFILE,
            profile => profile,
        };
        let config = self.load(profile)?;
        Ok(config.get_string(key).ok().filter(|v| !v.is_empty()))
    }
}
