//! Google Cloud provider for Stratus
//!
//! This crate implements the `Provider` trait for Google Cloud, describing
//! VPC networks and subnetworks through the Compute Engine REST API.
//!
//! # Bootstrap
//!
//! - Inside GCP, the project, service account and region come from the
//!   metadata server.
//! - Elsewhere, they come from the gcloud configuration named by the profile
//!   (`~/.config/gcloud/configurations/config_<profile>`), then from
//!   `GOOGLE_CLOUD_PROJECT` / `GCP_REGION`.
//! - The access token is taken from `GOOGLE_OAUTH_ACCESS_TOKEN`, the metadata
//!   server, or `gcloud auth print-access-token`, in that order.
//!
//! # Example
//!
//! ```ignore
//! use stratus_cloud::{ConnectOptions, Connector, Template};
//! use stratus_cloud_gcp::GcpConnector;
//!
//! let connector = GcpConnector::from_env();
//! let gcp = connector.connect(&ConnectOptions::new("dev", "us-west1")).await?;
//!
//! let network = gcp.describe(&"network:prod".parse::<Template>()?).await?;
//! ```

pub mod auth;
pub mod compute;
pub mod error;
pub mod metadata;
pub mod profile;
pub mod provider;
pub mod repr;
pub mod settings;

pub use compute::{ApiNetwork, ApiSubnetwork, ComputeClient};
pub use error::{GcpError, Result};
pub use metadata::{MetadataClient, MetadataSnapshot};
pub use profile::GcloudConfig;
pub use provider::{GcpConnector, GcpProvider};
pub use settings::GcpSettings;
