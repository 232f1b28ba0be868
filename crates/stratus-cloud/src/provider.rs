//! Cloud provider trait definition

use crate::bootstrap::ConnectOptions;
use crate::error::{CloudError, Result};
use crate::naming::non_empty;
use crate::template::{CloudTemplate, NetworkTemplate, SubnetTemplate, Target, Template};
use async_trait::async_trait;

/// Cloud provider abstraction trait
///
/// One value of this trait is one authenticated connection, scoped to a
/// single account/project and a single region. Instances are built per call
/// by a [`Connector`] and are not shared.
///
/// Backends implement the identity accessors and the network helpers; the
/// generic verbs have default implementations built on top of them.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the provider name (e.g., "gcp", "aws")
    fn name(&self) -> &str;

    /// Profile used to bootstrap, or `""`
    fn profile(&self) -> &str;

    /// Account / service principal the connection acts as, or `""`
    fn identity(&self) -> &str;

    /// Project or tenant id, or `""`
    fn account(&self) -> &str;

    /// Region the connection is scoped to, or `""`
    fn region(&self) -> &str;

    /// Resolve a possibly vacant template into a fully populated one.
    ///
    /// Network and subnet templates must carry a non-empty `name`; anything
    /// less fails with [`CloudError::NotEnoughInfo`] before the backend is called.
    async fn describe(&self, template: &Template) -> Result<Template> {
        match template {
            Template::Cloud(_) => Ok(Template::Cloud(self.describe_cloud().await?)),
            Template::Network(net) => {
                let name = net
                    .name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| not_enough_info(template))?;
                Ok(Template::Network(self.describe_network(name).await?))
            }
            Template::Subnet(subnet) => {
                let name = subnet
                    .name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| not_enough_info(template))?;
                Ok(Template::Subnet(self.describe_subnet(name).await?))
            }
        }
    }

    /// Compute the change set that would realize `template`, without applying it
    async fn plan(&self, _template: &Template) -> Result<Template> {
        Err(CloudError::not_implemented(self.name(), "plan"))
    }

    /// Realize `template` against the backend
    async fn apply(&self, _template: &Template) -> Result<Template> {
        Err(CloudError::not_implemented(self.name(), "apply"))
    }

    /// Remove the addressed resource, returning its last known state
    async fn destroy(&self, _target: &Target) -> Result<Template> {
        Err(CloudError::not_implemented(self.name(), "destroy"))
    }

    /// Identity summary plus every network visible to the account
    async fn describe_cloud(&self) -> Result<CloudTemplate> {
        let networks = self.list_networks().await?;
        Ok(self.summary().with_networks(networks))
    }

    /// Identity summary without touching the backend. Empty attributes are omitted.
    fn summary(&self) -> CloudTemplate {
        CloudTemplate {
            provider: non_empty(self.name()),
            profile: non_empty(self.profile()),
            identity: non_empty(self.identity()),
            account: non_empty(self.account()),
            region: non_empty(self.region()),
            networks: None,
        }
    }

    /// The resolved region, or [`CloudError::MissingRegion`] for `operation`
    fn require_region(&self, operation: &'static str) -> Result<&str> {
        match self.region() {
            "" => Err(CloudError::MissingRegion {
                provider: self.name().to_string(),
                operation,
            }),
            region => Ok(region),
        }
    }

    /// All networks, each with subnet placeholders
    async fn list_networks(&self) -> Result<Vec<NetworkTemplate>>;

    async fn create_network(
        &self,
        _name: &str,
        _cidr: &str,
        _zones: &[String],
    ) -> Result<NetworkTemplate> {
        Err(CloudError::not_implemented(self.name(), "create_network"))
    }

    async fn destroy_network(&self, _name: &str) -> Result<()> {
        Err(CloudError::not_implemented(self.name(), "destroy_network"))
    }

    async fn describe_network(&self, name: &str) -> Result<NetworkTemplate>;

    /// Subnets are region-scoped; implementations call [`Provider::require_region`] first.
    async fn describe_subnet(&self, name: &str) -> Result<SubnetTemplate>;
}

fn not_enough_info(template: &Template) -> CloudError {
    CloudError::NotEnoughInfo(template.to_string())
}

/// Builds connected providers of one kind
#[async_trait]
pub trait Connector: Send + Sync {
    /// Provider name this connector answers to
    fn name(&self) -> &str;

    /// Resolve credentials and open a connection
    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Provider>>;
}
