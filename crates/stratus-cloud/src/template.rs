//! Resource templates
//!
//! A template is both the query a caller sends and the answer a provider
//! returns. Query templates may be vacant: any field can be absent, and an
//! absent field means "not known" rather than "empty".

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of resource a template describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Cloud,
    Network,
    Subnet,
}

impl ResourceKind {
    /// Tag form used by the host environment (`<cloud>`, `<network>`, `<subnet>`)
    pub fn tag(&self) -> &'static str {
        match self {
            ResourceKind::Cloud => "<cloud>",
            ResourceKind::Network => "<network>",
            ResourceKind::Subnet => "<subnet>",
        }
    }

    /// An empty template of this kind
    pub fn vacant(&self) -> Template {
        match self {
            ResourceKind::Cloud => Template::Cloud(CloudTemplate::default()),
            ResourceKind::Network => Template::Network(NetworkTemplate::default()),
            ResourceKind::Subnet => Template::Subnet(SubnetTemplate::default()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ResourceKind {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().trim_start_matches('<').trim_end_matches('>');
        match name.to_ascii_lowercase().as_str() {
            "cloud" => Ok(ResourceKind::Cloud),
            "network" => Ok(ResourceKind::Network),
            "subnet" => Ok(ResourceKind::Subnet),
            _ => Err(CloudError::InvalidTemplate(format!(
                "unknown resource type '{}'",
                s
            ))),
        }
    }
}

/// A typed resource template
///
/// Serialized as a JSON object with a `type` field. On input the type may
/// also be given in tag form (`"<network>"`). Fields that do not belong to the
/// declared type are ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Template {
    #[serde(alias = "<cloud>")]
    Cloud(CloudTemplate),
    #[serde(alias = "<network>")]
    Network(NetworkTemplate),
    #[serde(alias = "<subnet>")]
    Subnet(SubnetTemplate),
}

impl Template {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Template::Cloud(_) => ResourceKind::Cloud,
            Template::Network(_) => ResourceKind::Network,
            Template::Subnet(_) => ResourceKind::Subnet,
        }
    }

    /// The `name` field, for kinds that carry one
    pub fn name(&self) -> Option<&str> {
        match self {
            Template::Cloud(_) => None,
            Template::Network(net) => net.name.as_deref(),
            Template::Subnet(subnet) => subnet.name.as_deref(),
        }
    }

    /// Build a template from a loosely-typed JSON object
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| CloudError::InvalidTemplate(e.to_string()))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{} {}", self.kind(), json)
    }
}

/// Parses either a JSON object (`{"type": "network", "name": "prod"}`) or the
/// shorthand `kind[:name]` (`network:prod`, `<subnet>`).
impl FromStr for Template {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('{') {
            let value: serde_json::Value = serde_json::from_str(s)?;
            return Template::from_value(value);
        }

        let (kind, name) = match s.split_once(':') {
            Some((kind, name)) => (kind, Some(name.trim())),
            None => (s, None),
        };
        let mut template = kind.parse::<ResourceKind>()?.vacant();
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            match &mut template {
                Template::Network(net) => net.name = Some(name.to_string()),
                Template::Subnet(subnet) => subnet.name = Some(name.to_string()),
                Template::Cloud(_) => {
                    return Err(CloudError::InvalidTemplate(format!(
                        "{} templates do not take a name",
                        ResourceKind::Cloud
                    )));
                }
            }
        }
        Ok(template)
    }
}

/// Self-description of a connected provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<NetworkTemplate>>,
}

impl CloudTemplate {
    pub fn with_networks(mut self, networks: Vec<NetworkTemplate>) -> Self {
        self.networks = Some(networks);
        self
    }
}

/// A virtual network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Placeholders carrying only `name` until described on their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<SubnetTemplate>>,
}

impl NetworkTemplate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A region-scoped subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl SubnetTemplate {
    /// Forward reference to a subnet that has not been described yet
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// What a destroy request addresses: a bare name or a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Name(String),
    Template(Template),
}

impl From<Template> for Target {
    fn from(template: Template) -> Self {
        Target::Template(template)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

/// Template syntax is tried first; anything else is taken as a name.
impl FromStr for Target {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CloudError::NotEnoughInfo("empty destroy target".into()));
        }
        if s.starts_with('{') || s.contains(':') || s.starts_with('<') {
            return s.parse::<Template>().map(Target::Template);
        }
        Ok(Target::Name(s.to_string()))
    }
}
