//! Provider registry

use std::collections::BTreeMap;
use std::sync::Arc;
use stratus_cloud::Connector;
use stratus_cloud_aws::AwsConnector;
use stratus_cloud_gcp::GcpConnector;

/// Maps provider names to the connectors that build them
#[derive(Clone, Default)]
pub struct Registry {
    connectors: BTreeMap<String, Arc<dyn Connector>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connector under its own name, replacing any previous one
    pub fn with(mut self, connector: impl Connector + 'static) -> Self {
        self.register(connector);
        self
    }

    pub fn register(&mut self, connector: impl Connector + 'static) {
        self.connectors
            .insert(connector.name().to_string(), Arc::new(connector));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Connector>> {
        self.connectors.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.connectors.keys().map(String::as_str)
    }
}

/// Every built-in provider, configured from the environment
pub fn default_registry() -> Registry {
    Registry::new()
        .with(GcpConnector::from_env())
        .with(AwsConnector::new())
}
