//! Building blocks for the registry operator.
//!
//! The central type is [`crd::DeploymentOverride`], the `deployment` section of the registry
//! custom resource. It lets users override parts of the generated Deployment (replicas, host,
//! scheduling, metadata, image and pull secrets). The reconciliation itself lives in the
//! operator, this crate only provides the data model and helpers around it.

pub mod change;
pub mod crd;
pub mod logging;
pub mod yaml;

// External re-exports
pub use k8s_openapi;
pub use schemars;
