//! Google Cloud provider implementation

use crate::auth::TokenSource;
use crate::compute::ComputeClient;
use crate::error::GcpError;
use crate::metadata::{MetadataClient, MetadataSnapshot};
use crate::profile::{DEFAULT_PROFILE, GcloudConfig};
use crate::repr::{network_template, subnet_template};
use crate::settings::GcpSettings;
use async_trait::async_trait;
use stratus_cloud::{
    ConnectOptions, Connector, Defaults, Environment, Explicit, NetworkTemplate,
    Provider, ResolverChain, Setting, Settings, SubnetTemplate,
};

pub const PROVIDER_NAME: &str = "gcp";

/// Environment variables consulted after the gcloud configuration
pub const ENV_BINDINGS: &[(Setting, &str)] = &[
    (Setting::Profile, "GCP_PROFILE"),
    (Setting::Account, "GOOGLE_CLOUD_PROJECT"),
    (Setting::Account, "GCLOUD_PROJECT"),
    (Setting::Region, "GCP_REGION"),
];

/// A connection to one GCP project in one region
pub struct GcpProvider {
    settings: Settings,
    compute: ComputeClient,
}

impl GcpProvider {
    pub fn new(settings: Settings, compute: ComputeClient) -> Self {
        Self { settings, compute }
    }
}

#[async_trait]
impl Provider for GcpProvider {
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

    async fn list_networks(&self) -> stratus_cloud::Result<Vec<NetworkTemplate>> {
        let networks = self.compute.list_networks().await?;
        Ok(networks.iter().map(network_template).collect())
    }

    async fn describe_network(&self, name: &str) -> stratus_cloud::Result<NetworkTemplate> {
        let network = self.compute.get_network(name).await?;
        Ok(network_template(&network))
    }

    async fn describe_subnet(&self, name: &str) -> stratus_cloud::Result<SubnetTemplate> {
        let region = self.require_region("describe_subnet")?;
        let subnet = self.compute.get_subnetwork(region, name).await?;
        Ok(subnet_template(&subnet))
    }
}

/// Builds [`GcpProvider`]s
pub struct GcpConnector {
    settings: GcpSettings,
}

impl GcpConnector {
    pub fn new(settings: GcpSettings) -> Self {
        Self { settings }
    }

    pub fn from_env() -> Self {
        Self::new(GcpSettings::from_env())
    }

    fn metadata_client(&self) -> crate::Result<MetadataClient> {
        MetadataClient::new(&self.settings.metadata_url, self.settings.metadata_timeout)
    }

    /// Precedence: parameter > metadata (inside GCP) or gcloud config
    /// (elsewhere) > environment > default profile.
    pub fn resolver_chain(
        &self,
        options: &ConnectOptions,
        snapshot: &MetadataSnapshot,
        environment: Environment,
    ) -> ResolverChain {
        let mut chain = ResolverChain::new().with(Explicit::from(options));
        if snapshot.in_cloud() {
            chain.push(snapshot.clone());
            chain.push(environment);
        } else {
            chain.push(GcloudConfig::new(&self.settings.config_dir));
            chain.push(environment);
            chain.push(Defaults(
                Settings::default().with(Setting::Profile, DEFAULT_PROFILE),
            ));
        }
        chain
    }

    /// Resolve bootstrap settings. The project is required.
    pub async fn resolve(
        &self,
        options: &ConnectOptions,
    ) -> stratus_cloud::Result<(Settings, MetadataSnapshot)> {
        let snapshot = self.metadata_client()?.probe().await;
        let chain = self.resolver_chain(options, &snapshot, Environment::capture(ENV_BINDINGS));
        let settings = chain.resolve()?;
        settings.require(Setting::Account)?;
        Ok((settings, snapshot))
    }
}

#[async_trait]
impl Connector for GcpConnector {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn connect(&self, options: &ConnectOptions) -> stratus_cloud::Result<Box<dyn Provider>> {
        let (settings, snapshot) = self.resolve(options).await?;

        let token = TokenSource::select(
            self.settings.access_token.as_deref(),
            snapshot.in_cloud(),
            settings.get(Setting::Profile),
        )
        .fetch(&self.metadata_client()?)
        .await?;

        let client = reqwest::Client::builder()
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(GcpError::from)?;
        let compute = ComputeClient::new(
            client,
            &self.settings.compute_url,
            token,
            settings.get(Setting::Account),
        );

        tracing::info!(
            "Connected to gcp project {} (region: {})",
            compute.project(),
            match settings.get(Setting::Region) {
                "" => "-",
                region => region,
            }
        );
        Ok(Box::new(GcpProvider::new(settings, compute)))
    }
}
