use std::hash::{Hash, Hasher};

use k8s_openapi::api::core::v1::{Affinity, LocalObjectReference, Toleration};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::crd::metadata::DeploymentMetadata;

/// Overrides for the Deployment generated for a registry instance.
///
/// Every field is optional. [`None`] means "no override, use whatever the operator would
/// generate", while a present but empty sequence is an explicit (empty) override. Unset fields
/// are omitted when serialized, so the distinction survives a round trip through the API server.
///
/// Nothing is validated here, values are handed to the platform as they are.
///
/// Instances are plain values: two overrides are equal (and hash equally) if and only if all of
/// their fields are equal. Controllers use this to skip updates when the last applied overrides
/// match the observed ones, see [`crate::change::requires_update`].
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOverride {
    /// Number of desired registry Pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    replicas: Option<i32>,

    /// Hostname under which the registry is exposed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    host: Option<String>,

    /// Scheduling constraints applied to the registry Pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    affinity: Option<Affinity>,

    /// Tolerations applied to the registry Pods, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tolerations: Option<Vec<Toleration>>,

    /// Labels and annotations added to the Deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<DeploymentMetadata>,

    /// Container image used instead of the operator default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    /// Secrets used to pull the container image from a private registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_pull_secrets: Option<Vec<LocalObjectReference>>,
}

// The k8s-openapi types only implement `PartialEq`, but none of them contain floating point
// values, so equality is reflexive.
impl Eq for DeploymentOverride {}

impl Hash for DeploymentOverride {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.replicas.hash(state);
        self.host.hash(state);
        hash_as_json(self.affinity.as_ref(), state);
        hash_as_json(self.tolerations.as_ref(), state);
        self.metadata.hash(state);
        self.image.hash(state);
        hash_as_json(self.image_pull_secrets.as_ref(), state);
    }
}

/// Hashes platform types which don't implement [`Hash`] through their JSON encoding.
///
/// Structs serialize their fields in declaration order and maps are [`BTreeMap`]s, so equal
/// values always produce equal bytes.
///
/// [`BTreeMap`]: std::collections::BTreeMap
fn hash_as_json<T: Serialize, H: Hasher>(value: Option<&T>, state: &mut H) {
    value.is_some().hash(state);

    if let Some(bytes) = value.and_then(|value| serde_json::to_vec(value).ok()) {
        bytes.hash(state);
    }
}

impl DeploymentOverride {
    pub fn builder() -> DeploymentOverrideBuilder {
        DeploymentOverrideBuilder::new()
    }

    pub fn replicas(&self) -> Option<i32> {
        self.replicas
    }

    pub fn set_replicas(&mut self, replicas: impl Into<Option<i32>>) {
        self.replicas = replicas.into();
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn set_host(&mut self, host: impl Into<Option<String>>) {
        self.host = host.into();
    }

    pub fn affinity(&self) -> Option<&Affinity> {
        self.affinity.as_ref()
    }

    pub fn set_affinity(&mut self, affinity: impl Into<Option<Affinity>>) {
        self.affinity = affinity.into();
    }

    pub fn tolerations(&self) -> Option<&[Toleration]> {
        self.tolerations.as_deref()
    }

    pub fn set_tolerations(&mut self, tolerations: impl Into<Option<Vec<Toleration>>>) {
        self.tolerations = tolerations.into();
    }

    pub fn metadata(&self) -> Option<&DeploymentMetadata> {
        self.metadata.as_ref()
    }

    pub fn set_metadata(&mut self, metadata: impl Into<Option<DeploymentMetadata>>) {
        self.metadata = metadata.into();
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: impl Into<Option<String>>) {
        self.image = image.into();
    }

    pub fn image_pull_secrets(&self) -> Option<&[LocalObjectReference]> {
        self.image_pull_secrets.as_deref()
    }

    pub fn set_image_pull_secrets(
        &mut self,
        image_pull_secrets: impl Into<Option<Vec<LocalObjectReference>>>,
    ) {
        self.image_pull_secrets = image_pull_secrets.into();
    }

    /// Returns `true` if no override is set at all.
    ///
    /// An explicitly empty sequence or metadata object still counts as an override.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A builder to build [`DeploymentOverride`] objects.
///
/// Every setter replaces the previous value of its field, so the last write wins. The only
/// exceptions are [`Self::with_toleration`] and [`Self::with_image_pull_secret`], which append
/// to the current sequence.
///
/// [`Self::build`] does not consume the builder, calling it twice returns two equal but
/// independent instances.
#[derive(Clone, Debug, Default)]
pub struct DeploymentOverrideBuilder {
    replicas: Option<i32>,
    host: Option<String>,
    affinity: Option<Affinity>,
    tolerations: Option<Vec<Toleration>>,
    metadata: Option<DeploymentMetadata>,
    image: Option<String>,
    image_pull_secrets: Option<Vec<LocalObjectReference>>,
}

impl DeploymentOverrideBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replicas(&mut self, replicas: i32) -> &mut Self {
        self.replicas = Some(replicas);
        self
    }

    pub fn replicas_opt(&mut self, replicas: impl Into<Option<i32>>) -> &mut Self {
        self.replicas = replicas.into();
        self
    }

    pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = Some(host.into());
        self
    }

    pub fn host_opt(&mut self, host: impl Into<Option<String>>) -> &mut Self {
        self.host = host.into();
        self
    }

    pub fn affinity(&mut self, affinity: Affinity) -> &mut Self {
        self.affinity = Some(affinity);
        self
    }

    pub fn affinity_opt(&mut self, affinity: impl Into<Option<Affinity>>) -> &mut Self {
        self.affinity = affinity.into();
        self
    }

    /// This will replace all existing tolerations
    pub fn tolerations(&mut self, tolerations: Vec<Toleration>) -> &mut Self {
        self.tolerations = Some(tolerations);
        self
    }

    pub fn tolerations_opt(&mut self, tolerations: impl Into<Option<Vec<Toleration>>>) -> &mut Self {
        self.tolerations = tolerations.into();
        self
    }

    /// This appends a single toleration to the existing tolerations.
    pub fn with_toleration(&mut self, toleration: Toleration) -> &mut Self {
        self.tolerations
            .get_or_insert_with(Vec::new)
            .push(toleration);
        self
    }

    pub fn metadata(&mut self, metadata: DeploymentMetadata) -> &mut Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn metadata_opt(&mut self, metadata: impl Into<Option<DeploymentMetadata>>) -> &mut Self {
        self.metadata = metadata.into();
        self
    }

    pub fn image(&mut self, image: impl Into<String>) -> &mut Self {
        self.image = Some(image.into());
        self
    }

    pub fn image_opt(&mut self, image: impl Into<Option<String>>) -> &mut Self {
        self.image = image.into();
        self
    }

    /// This will replace all existing image pull secrets
    pub fn image_pull_secrets(&mut self, image_pull_secrets: Vec<LocalObjectReference>) -> &mut Self {
        self.image_pull_secrets = Some(image_pull_secrets);
        self
    }

    pub fn image_pull_secrets_opt(
        &mut self,
        image_pull_secrets: impl Into<Option<Vec<LocalObjectReference>>>,
    ) -> &mut Self {
        self.image_pull_secrets = image_pull_secrets.into();
        self
    }

    /// This appends a single image pull secret to the existing ones.
    pub fn with_image_pull_secret(&mut self, image_pull_secret: LocalObjectReference) -> &mut Self {
        self.image_pull_secrets
            .get_or_insert_with(Vec::new)
            .push(image_pull_secret);
        self
    }

    pub fn build(&self) -> DeploymentOverride {
        DeploymentOverride {
            replicas: self.replicas,
            host: self.host.clone(),
            affinity: self.affinity.clone(),
            tolerations: self.tolerations.clone(),
            metadata: self.metadata.clone(),
            image: self.image.clone(),
            image_pull_secrets: self.image_pull_secrets.clone(),
        }
    }
}

impl From<DeploymentOverride> for DeploymentOverrideBuilder {
    fn from(deployment: DeploymentOverride) -> Self {
        Self {
            replicas: deployment.replicas,
            host: deployment.host,
            affinity: deployment.affinity,
            tolerations: deployment.tolerations,
            metadata: deployment.metadata,
            image: deployment.image,
            image_pull_secrets: deployment.image_pull_secrets,
        }
    }
}
