//! Stratus
//!
//! One verb set over many clouds: pick a provider by name, connect with a
//! profile and region, then describe, plan, apply or destroy a resource
//! template.
//!
//! ```ignore
//! use stratus::{Request, dispatch, default_registry};
//!
//! let outcome = dispatch(
//!     &default_registry(),
//!     Request::new("gcp").region("us-west1").describe("network:prod".parse()?),
//! )
//! .await?;
//! println!("{}", outcome.into_template());
//! ```

pub mod dispatch;
pub mod registry;

pub use dispatch::{DEFAULT_PROVIDER, Outcome, Request, Verb, cloud, dispatch};
pub use registry::{Registry, default_registry};
