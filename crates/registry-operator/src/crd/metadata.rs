use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Labels and annotations which are injected into the generated Deployment.
///
/// Both maps are optional. An unset map means "no override", an empty map is an explicit
/// override with no entries. Keys and values are passed through as-is, validating them is up to
/// the API server.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotations: Option<BTreeMap<String, String>>,
}

impl DeploymentMetadata {
    pub fn builder() -> DeploymentMetadataBuilder {
        DeploymentMetadataBuilder::new()
    }

    pub fn labels(&self) -> Option<&BTreeMap<String, String>> {
        self.labels.as_ref()
    }

    pub fn set_labels(&mut self, labels: impl Into<Option<BTreeMap<String, String>>>) {
        self.labels = labels.into();
    }

    pub fn annotations(&self) -> Option<&BTreeMap<String, String>> {
        self.annotations.as_ref()
    }

    pub fn set_annotations(&mut self, annotations: impl Into<Option<BTreeMap<String, String>>>) {
        self.annotations = annotations.into();
    }

    /// Returns `true` if neither labels nor annotations are set.
    pub fn is_empty(&self) -> bool {
        self.labels.is_none() && self.annotations.is_none()
    }
}

/// A builder to build [`DeploymentMetadata`] objects.
#[derive(Clone, Debug, Default)]
pub struct DeploymentMetadataBuilder {
    labels: Option<BTreeMap<String, String>>,
    annotations: Option<BTreeMap<String, String>>,
}

impl DeploymentMetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// This adds a single label to the existing labels.
    /// It'll override a label with the same key.
    pub fn with_label(
        &mut self,
        label_key: impl Into<String>,
        label_value: impl Into<String>,
    ) -> &mut Self {
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(label_key.into(), label_value.into());
        self
    }

    /// This will replace all existing labels
    pub fn labels(&mut self, labels: BTreeMap<String, String>) -> &mut Self {
        self.labels = Some(labels);
        self
    }

    pub fn labels_opt(&mut self, labels: impl Into<Option<BTreeMap<String, String>>>) -> &mut Self {
        self.labels = labels.into();
        self
    }

    /// This adds a single annotation to the existing annotations.
    /// It'll override an annotation with the same key.
    pub fn with_annotation(
        &mut self,
        annotation_key: impl Into<String>,
        annotation_value: impl Into<String>,
    ) -> &mut Self {
        self.annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(annotation_key.into(), annotation_value.into());
        self
    }

    /// This will replace all existing annotations
    pub fn annotations(&mut self, annotations: BTreeMap<String, String>) -> &mut Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn annotations_opt(
        &mut self,
        annotations: impl Into<Option<BTreeMap<String, String>>>,
    ) -> &mut Self {
        self.annotations = annotations.into();
        self
    }

    pub fn build(&self) -> DeploymentMetadata {
        DeploymentMetadata {
            labels: self.labels.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

impl From<DeploymentMetadata> for DeploymentMetadataBuilder {
    fn from(metadata: DeploymentMetadata) -> Self {
        Self {
            labels: metadata.labels,
            annotations: metadata.annotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn builder_accumulates_labels_and_annotations() {
        let metadata = DeploymentMetadata::builder()
            .with_label("app", "registry")
            .with_label("tier", "backend")
            .with_annotation("prometheus.io/scrape", "true")
            .build();

        assert_eq!(
            metadata.labels(),
            Some(&BTreeMap::from([
                ("app".to_owned(), "registry".to_owned()),
                ("tier".to_owned(), "backend".to_owned()),
            ]))
        );
        assert_eq!(
            metadata.annotations(),
            Some(&BTreeMap::from([(
                "prometheus.io/scrape".to_owned(),
                "true".to_owned()
            )]))
        );
    }

    #[test]
    fn replacing_labels_drops_previous_entries() {
        let metadata = DeploymentMetadata::builder()
            .with_label("app", "registry")
            .labels(BTreeMap::from([("team".to_owned(), "storage".to_owned())]))
            .build();

        assert_eq!(metadata.labels().map(BTreeMap::len), Some(1));
        assert!(metadata.annotations().is_none());
    }

    #[test]
    fn empty_map_is_not_unset() {
        let unset = DeploymentMetadata::default();
        let empty = DeploymentMetadata::builder().labels(BTreeMap::new()).build();

        assert!(unset.is_empty());
        assert!(!empty.is_empty());
        assert_ne!(unset, empty);
    }

    #[test]
    fn setters_replace_and_clear() {
        let mut metadata = DeploymentMetadata::builder()
            .with_annotation("a", "1")
            .build();

        metadata.set_annotations(None);
        metadata.set_labels(BTreeMap::from([("b".to_owned(), "2".to_owned())]));

        assert!(metadata.annotations().is_none());
        assert_eq!(
            metadata.labels().and_then(|labels| labels.get("b")),
            Some(&"2".to_owned())
        );
    }

    #[test]
    fn unset_maps_are_omitted() {
        let metadata = DeploymentMetadata::builder()
            .with_label("app", "registry")
            .build();

        let yaml = serde_yaml::to_string(&metadata).expect("metadata must serialize");
        assert_eq!(yaml, "labels:\n  app: registry\n");

        let parsed: DeploymentMetadata = serde_yaml::from_str(indoc! {"
            labels:
              app: registry
            annotations: {}
        "})
        .expect("metadata must deserialize");
        assert_eq!(parsed.annotations(), Some(&BTreeMap::new()));
    }
}
