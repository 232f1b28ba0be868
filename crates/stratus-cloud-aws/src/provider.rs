//! AWS provider implementation

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use stratus_cloud::{
    CloudError, ConnectOptions, Connector, Defaults, Environment, Explicit, NetworkTemplate,
    Provider, ResolverChain, Result, Setting, Settings, SubnetTemplate,
};

pub const PROVIDER_NAME: &str = "aws";
pub const DEFAULT_PROFILE: &str = "default";

/// Region is left to aws-config, which reads `AWS_REGION` and the shared config itself.
pub const ENV_BINDINGS: &[(Setting, &str)] = &[(Setting::Profile, "AWS_PROFILE")];

/// A connection to one AWS account in one region
pub struct AwsProvider {
    settings: Settings,
}

impl AwsProvider {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Provider for AwsProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn profile(&self) -> &str {
        self.settings.get(Setting::Profile)
    }

    fn identity(&self) -> &str {
        self.settings.get(Setting::Identity)
    }

    fn account(&self) -> &str {
        self.settings.get(Setting::Account)
    }

    fn region(&self) -> &str {
        self.settings.get(Setting::Region)
    }

    async fn list_networks(&self) -> Result<Vec<NetworkTemplate>> {
        Err(CloudError::not_implemented(PROVIDER_NAME, "list_networks"))
    }

    async fn describe_network(&self, _name: &str) -> Result<NetworkTemplate> {
        Err(CloudError::not_implemented(PROVIDER_NAME, "describe_network"))
    }

    async fn describe_subnet(&self, _name: &str) -> Result<SubnetTemplate> {
        self.require_region("describe_subnet")?;
        Err(CloudError::not_implemented(PROVIDER_NAME, "describe_subnet"))
    }
}

/// Builds [`AwsProvider`]s
#[derive(Debug, Clone, Default)]
pub struct AwsConnector;

impl AwsConnector {
    pub fn new() -> Self {
        Self
    }

    /// Precedence: parameter > `AWS_PROFILE` > `default`
    pub fn resolver_chain(&self, options: &ConnectOptions, environment: Environment) -> ResolverChain {
        ResolverChain::new()
            .with(Explicit::from(options))
            .with(environment)
            .with(Defaults(
                Settings::default().with(Setting::Profile, DEFAULT_PROFILE),
            ))
    }
}

#[async_trait]
impl Connector for AwsConnector {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Provider>> {
        let mut settings = self
            .resolver_chain(options, Environment::capture(ENV_BINDINGS))
            .resolve()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(settings.get(Setting::Profile));
        if let Some(region) = settings.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let sdk = loader.load().await;

        if settings.region.is_none() {
            if let Some(region) = sdk.region() {
                settings.set(Setting::Region, region.to_string());
            }
        }

        tracing::info!(
            "Connected to aws profile {} (region: {})",
            settings.get(Setting::Profile),
            match settings.get(Setting::Region) {
                "" => "-",
                region => region,
            }
        );
        Ok(Box::new(AwsProvider::new(settings)))
    }
}
