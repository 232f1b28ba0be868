//! AWS provider for Stratus
//!
//! Connects through the standard AWS configuration chain (`aws-config`):
//! the profile comes from the caller, `AWS_PROFILE` or `default`, and the
//! region from the caller or from aws-config's own region chain.
//!
//! Only the connection and its identity summary are available; network and
//! subnet operations report `NotImplemented`.

pub mod provider;

pub use provider::{AwsConnector, AwsProvider};
