use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use stratus_cloud::{
    CloudError, ConnectOptions, Connector, NetworkTemplate, Provider, Result, SubnetTemplate,
};

/// Counters shared between a fake connector and the providers it builds
#[derive(Debug, Default)]
pub struct Calls {
    pub connects: AtomicUsize,
    pub backend: AtomicUsize,
}

impl Calls {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn backend(&self) -> usize {
        self.backend.load(Ordering::SeqCst)
    }
}

/// In-memory connector. Networks are served as given.
pub struct FakeConnector {
    pub name: String,
    pub account: String,
    pub networks: Vec<NetworkTemplate>,
    pub subnets: Vec<(String, SubnetTemplate)>,
    pub fail_with: Option<fn() -> CloudError>,
    pub calls: Arc<Calls>,
}

impl FakeConnector {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            account: "demo-project".to_string(),
            networks: Vec::new(),
            subnets: Vec::new(),
            fail_with: None,
            calls: Arc::new(Calls::default()),
        }
    }

    #[allow(dead_code)]
    pub fn with_network(mut self, network: NetworkTemplate) -> Self {
        self.networks.push(network);
        self
    }

    #[allow(dead_code)]
    pub fn with_subnet(mut self, region: &str, subnet: SubnetTemplate) -> Self {
        self.subnets.push((region.to_string(), subnet));
        self
    }

    #[allow(dead_code)]
    pub fn failing(mut self, fail_with: fn() -> CloudError) -> Self {
        self.fail_with = Some(fail_with);
        self
    }
}

#[async_trait]
impl Connector for FakeConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Provider>> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        if let Some(fail_with) = self.fail_with {
            return Err(fail_with());
        }
        let profile = match options.profile.as_str() {
            "" => "default".to_string(),
            profile => profile.to_string(),
        };
        Ok(Box::new(FakeProvider {
            name: self.name.clone(),
            profile,
            account: self.account.clone(),
            region: options.region.clone(),
            networks: self.networks.clone(),
            subnets: self.subnets.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

pub struct FakeProvider {
    name: String,
    profile: String,
    account: String,
    region: String,
    networks: Vec<NetworkTemplate>,
    subnets: Vec<(String, SubnetTemplate)>,
    calls: Arc<Calls>,
}

#[async_trait]
impl Provider for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn profile(&self) -> &str {
        &self.profile
    }

    fn identity(&self) -> &str {
        ""
    }

    fn account(&self) -> &str {
        &self.account
    }

    fn region(&self) -> &str {
        &self.region
    }

    async fn list_networks(&self) -> Result<Vec<NetworkTemplate>> {
        self.calls.backend.fetch_add(1, Ordering::SeqCst);
        Ok(self.networks.clone())
    }

    async fn describe_network(&self, name: &str) -> Result<NetworkTemplate> {
        self.calls.backend.fetch_add(1, Ordering::SeqCst);
        self.networks
            .iter()
            .find(|n| n.name.as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| CloudError::NotFound(format!("network '{}'", name)))
    }

    async fn describe_subnet(&self, name: &str) -> Result<SubnetTemplate> {
        let region = self.require_region("describe_subnet")?;
        self.calls.backend.fetch_add(1, Ordering::SeqCst);
        self.subnets
            .iter()
            .find(|(r, s)| r == region && s.name.as_deref() == Some(name))
            .map(|(_, s)| s.clone())
            .ok_or_else(|| CloudError::NotFound(format!("subnet '{}' in '{}'", name, region)))
    }
}
