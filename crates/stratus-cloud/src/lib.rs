//! Stratus Cloud Abstraction
//!
//! This crate defines the provider-neutral half of Stratus: the resource
//! templates exchanged with callers, the [`Provider`] trait every cloud
//! backend implements, and the settings resolver chain backends use to
//! bootstrap a connection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 stratus (facade)                 │
//! │        registry + describe/plan/apply/destroy    │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 stratus-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait Provider / trait Connector         │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐    │
//! │  │  Templates   │  │  Resolver chain      │    │
//! │  └──────────────┘  └──────────────────────┘    │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │      gcp      │ │      aws      │
//! │   provider    │ │   provider    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod bootstrap;
pub mod error;
pub mod naming;
pub mod provider;
pub mod template;

// Re-exports
pub use bootstrap::{
    ConnectOptions, Defaults, Environment, Explicit, ResolverChain, Setting, SettingSource,
    Settings,
};
pub use error::{CloudError, Result};
pub use provider::{Connector, Provider};
pub use template::{
    CloudTemplate, NetworkTemplate, ResourceKind, SubnetTemplate, Target, Template,
};
