//! Connection bootstrap: resolving profile, account, identity and region
//!
//! Backends describe where each setting may come from as an ordered list of
//! [`SettingSource`]s. The first source that yields a non-empty value wins.
//! Settings are resolved one at a time in [`Setting::ALL`] order, so sources
//! consulted for the account can see which profile was picked.

use crate::error::{CloudError, Result};
use crate::naming::non_empty;
use std::collections::HashMap;
use std::fmt;

/// A single bootstrap attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Profile,
    Account,
    Identity,
    Region,
}

impl Setting {
    /// Resolution order
    pub const ALL: [Setting; 4] = [
        Setting::Profile,
        Setting::Account,
        Setting::Identity,
        Setting::Region,
    ];
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Profile => write!(f, "profile"),
            Setting::Account => write!(f, "account"),
            Setting::Identity => write!(f, "identity"),
            Setting::Region => write!(f, "region"),
        }
    }
}

/// Resolved (or partially resolved) bootstrap attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub profile: Option<String>,
    pub account: Option<String>,
    pub identity: Option<String>,
    pub region: Option<String>,
}

impl Settings {
    fn slot(&mut self, setting: Setting) -> &mut Option<String> {
        match setting {
            Setting::Profile => &mut self.profile,
            Setting::Account => &mut self.account,
            Setting::Identity => &mut self.identity,
            Setting::Region => &mut self.region,
        }
    }

    /// Value of a setting, or `""` when unresolved
    pub fn get(&self, setting: Setting) -> &str {
        let value = match setting {
            Setting::Profile => &self.profile,
            Setting::Account => &self.account,
            Setting::Identity => &self.identity,
            Setting::Region => &self.region,
        };
        value.as_deref().unwrap_or("")
    }

    pub fn set(&mut self, setting: Setting, value: impl Into<String>) {
        *self.slot(setting) = non_empty(&value.into());
    }

    pub fn with(mut self, setting: Setting, value: impl Into<String>) -> Self {
        self.set(setting, value);
        self
    }

    /// Fails with [`CloudError::MissingSetting`] when `setting` is unresolved
    pub fn require(&self, setting: Setting) -> Result<&str> {
        match self.get(setting) {
            "" => Err(CloudError::MissingSetting {
                setting,
                profile: self.get(Setting::Profile).to_string(),
            }),
            value => Ok(value),
        }
    }
}

/// Parameters a caller passes when connecting to a provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    pub profile: String,
    pub region: String,
}

impl ConnectOptions {
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
        }
    }
}

/// One precedence level of the resolver chain
pub trait SettingSource: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// Look up `setting`. `resolved` holds what earlier settings resolved to.
    fn lookup(&self, setting: Setting, resolved: &Settings) -> Result<Option<String>>;
}

/// Ordered list of setting sources, highest precedence first
#[derive(Default)]
pub struct ResolverChain {
    sources: Vec<Box<dyn SettingSource>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl SettingSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn push(&mut self, source: impl SettingSource + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        for setting in Setting::ALL {
            for source in &self.sources {
                let Some(value) = source.lookup(setting, &settings)? else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                tracing::debug!("{} resolved from {}: {}", setting, source.name(), value);
                settings.set(setting, value);
                break;
            }
        }
        Ok(settings)
    }
}

/// Values passed explicitly by the caller
#[derive(Debug, Clone, Default)]
pub struct Explicit(pub Settings);

impl From<&ConnectOptions> for Explicit {
    fn from(options: &ConnectOptions) -> Self {
        Explicit(
            Settings::default()
                .with(Setting::Profile, options.profile.as_str())
                .with(Setting::Region, options.region.as_str()),
        )
    }
}

impl SettingSource for Explicit {
    fn name(&self) -> &str {
        "parameter"
    }

    fn lookup(&self, setting: Setting, _resolved: &Settings) -> Result<Option<String>> {
        Ok(non_empty(self.0.get(setting)))
    }
}

/// Environment variables, captured once so lookups are repeatable
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: Vec<(Setting, &'static str)>,
    values: HashMap<String, String>,
}

impl Environment {
    /// Read the bound variables from the process environment
    pub fn capture(bindings: &[(Setting, &'static str)]) -> Self {
        let values = bindings
            .iter()
            .filter_map(|(_, var)| std::env::var(var).ok().map(|v| (var.to_string(), v)))
            .collect();
        Self {
            bindings: bindings.to_vec(),
            values,
        }
    }

    /// Use the given values instead of the process environment
    pub fn with_values(
        bindings: &[(Setting, &'static str)],
        values: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> Self {
        Self {
            bindings: bindings.to_vec(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SettingSource for Environment {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, setting: Setting, _resolved: &Settings) -> Result<Option<String>> {
        // Several variables may bind the same setting; the first one set wins.
        Ok(self
            .bindings
            .iter()
            .filter(|(s, _)| *s == setting)
            .find_map(|(_, var)| self.values.get(*var).and_then(|v| non_empty(v))))
    }
}

/// Hardcoded fallbacks, consulted last
#[derive(Debug, Clone, Default)]
pub struct Defaults(pub Settings);

impl SettingSource for Defaults {
    fn name(&self) -> &str {
        "default"
    }

    fn lookup(&self, setting: Setting, _resolved: &Settings) -> Result<Option<String>> {
        Ok(non_empty(self.0.get(setting)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINDINGS: &[(Setting, &str)] = &[
        (Setting::Profile, "TEST_PROFILE"),
        (Setting::Region, "TEST_REGION"),
        (Setting::Account, "TEST_PROJECT"),
        (Setting::Account, "TEST_PROJECT_LEGACY"),
    ];

    /// Looks values up per profile, like a profile config file
    struct ProfileTable(HashMap<&'static str, Settings>);

    impl SettingSource for ProfileTable {
        fn name(&self) -> &str {
            "table"
        }

        fn lookup(&self, setting: Setting, resolved: &Settings) -> Result<Option<String>> {
            if setting == Setting::Profile {
                return Ok(None);
            }
            let profile = resolved.get(Setting::Profile);
            match self.0.get(profile) {
                Some(settings) => Ok(non_empty(settings.get(setting))),
                None => Err(CloudError::UnknownProfile(profile.to_string())),
            }
        }
    }

    #[test]
    fn test_explicit_beats_environment() {
        let chain = ResolverChain::new()
            .with(Explicit::from(&ConnectOptions::new("", "us-east1")))
            .with(Environment::with_values(
                BINDINGS,
                [("TEST_REGION", "asia-east1"), ("TEST_PROFILE", "ci")],
            ));

        let settings = chain.resolve().unwrap();
        assert_eq!(settings.region.as_deref(), Some("us-east1"));
        assert_eq!(settings.profile.as_deref(), Some("ci"));
        assert_eq!(settings.identity, None);
    }

    #[test]
    fn test_empty_values_fall_through() {
        let chain = ResolverChain::new()
            .with(Environment::with_values(BINDINGS, [("TEST_PROFILE", "")]))
            .with(Defaults(Settings::default().with(Setting::Profile, "default")));

        let settings = chain.resolve().unwrap();
        assert_eq!(settings.profile.as_deref(), Some("default"));
    }

    #[test]
    fn test_first_bound_variable_wins() {
        let env = Environment::with_values(
            BINDINGS,
            [("TEST_PROJECT", "primary"), ("TEST_PROJECT_LEGACY", "legacy")],
        );
        let settings = ResolverChain::new().with(env).resolve().unwrap();
        assert_eq!(settings.account.as_deref(), Some("primary"));

        let env = Environment::with_values(BINDINGS, [("TEST_PROJECT_LEGACY", "legacy")]);
        let settings = ResolverChain::new().with(env).resolve().unwrap();
        assert_eq!(settings.account.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_later_settings_see_resolved_profile() {
        let table = ProfileTable(HashMap::from([
            (
                "dev",
                Settings::default()
                    .with(Setting::Account, "dev-project")
                    .with(Setting::Region, "us-west1"),
            ),
            ("prod", Settings::default().with(Setting::Account, "prod-project")),
        ]));

        let chain = ResolverChain::new()
            .with(Explicit::from(&ConnectOptions::new("dev", "")))
            .with(table);

        let settings = chain.resolve().unwrap();
        assert_eq!(settings.account.as_deref(), Some("dev-project"));
        assert_eq!(settings.region.as_deref(), Some("us-west1"));
    }

    #[test]
    fn test_source_error_aborts_resolution() {
        let chain = ResolverChain::new()
            .with(Explicit::from(&ConnectOptions::new("missing", "")))
            .with(ProfileTable(HashMap::new()));

        let err = chain.resolve().unwrap_err();
        assert!(matches!(err, CloudError::UnknownProfile(p) if p == "missing"));
    }

    #[test]
    fn test_require() {
        let settings = Settings::default().with(Setting::Profile, "dev");
        let err = settings.require(Setting::Account).unwrap_err();
        assert!(matches!(
            err,
            CloudError::MissingSetting { setting: Setting::Account, ref profile } if profile == "dev"
        ));
        assert_eq!(settings.require(Setting::Profile).unwrap(), "dev");
    }
}
