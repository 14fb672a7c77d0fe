//! Custom resource sections managed by the registry operator.
pub mod deployment;
pub mod metadata;

pub use deployment::{DeploymentOverride, DeploymentOverrideBuilder};
pub use metadata::{DeploymentMetadata, DeploymentMetadataBuilder};
