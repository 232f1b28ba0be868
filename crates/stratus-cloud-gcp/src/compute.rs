//! Compute Engine REST client
//!
//! Covers the read side of VPC networking: networks (global) and
//! subnetworks (regional).

use crate::error::{GcpError, Result};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use stratus_cloud::CloudError;

/// Compute API client bound to one project
pub struct ComputeClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    project: String,
}

impl ComputeClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            project: project.into(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// List every network in the project, following `nextPageToken`
    pub async fn list_networks(&self) -> Result<Vec<ApiNetwork>> {
        let url = self.url(&["projects", self.project.as_str(), "global", "networks"])?;
        let mut networks = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(url.clone()).bearer_auth(&self.token);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let page: ApiList<ApiNetwork> = self
                .send("networks.list", &format!("project '{}'", self.project), request)
                .await?;
            networks.extend(page.items);

            match page.next_page_token {
                Some(token) if !token.is_empty() && page_token.as_ref() != Some(&token) => {
                    page_token = Some(token)
                }
                Some(token) if !token.is_empty() => {
                    tracing::warn!("networks.list repeated page token {}; stopping", token);
                    break;
                }
                _ => break,
            }
        }

        tracing::debug!("Listed {} networks in {}", networks.len(), self.project);
        Ok(networks)
    }

    pub async fn get_network(&self, name: &str) -> Result<ApiNetwork> {
        let url = self.url(&[
            "projects",
            self.project.as_str(),
            "global",
            "networks",
            resource_name("network", name)?,
        ])?;
        let request = self.client.get(url).bearer_auth(&self.token);
        self.send(
            "networks.get",
            &format!("gcp network '{}' in project '{}'", name, self.project),
            request,
        )
        .await
    }

    pub async fn get_subnetwork(&self, region: &str, name: &str) -> Result<ApiSubnetwork> {
        let url = self.url(&[
            "projects",
            self.project.as_str(),
            "regions",
            resource_name("region", region)?,
            "subnetworks",
            resource_name("subnet", name)?,
        ])?;
        let request = self.client.get(url).bearer_auth(&self.token);
        self.send(
            "subnetworks.get",
            &format!(
                "gcp subnet '{}' in project '{}' region '{}'",
                name, self.project, region
            ),
            request,
        )
        .await
    }

    /// Append `segments` to the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GcpError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| GcpError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &str,
        resource: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!("Compute API {} ({})", operation, resource);
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GcpError::NotFound(resource.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GcpError::Api {
                operation: operation.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// One path segment naming a resource. Separators and dot segments are refused.
fn resource_name<'a>(kind: &str, name: &'a str) -> Result<&'a str> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        let message = format!("invalid {} name '{}'", kind, name);
        return Err(CloudError::InvalidTemplate(message).into());
    }
    Ok(name)
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// `compute#network`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNetwork {
    #[serde(default, deserialize_with = "stringify_id")]
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub creation_timestamp: Option<String>,

    /// Only set on legacy (non-VPC) networks
    #[serde(rename = "IPv4Range")]
    pub ipv4_range: Option<String>,

    /// Fully-qualified subnetwork URLs
    #[serde(default)]
    pub subnetworks: Vec<String>,
}

/// `compute#subnetwork`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSubnetwork {
    #[serde(default, deserialize_with = "stringify_id")]
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub ip_cidr_range: Option<String>,
    pub gateway_address: Option<String>,
    pub creation_timestamp: Option<String>,
    pub network: Option<String>,
    pub region: Option<String>,
}

/// Ids are uint64 and usually arrive as JSON strings; accept numbers too.
fn stringify_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    }))
}
