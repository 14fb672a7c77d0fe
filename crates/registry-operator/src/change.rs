//! Helpers for deciding whether changed overrides need to be rolled out.
//!
//! Controllers keep the [`DeploymentOverride`] they applied last and compare it against the one
//! observed in the current custom resource. Only if the two differ the Deployment has to be
//! updated.
use tracing::debug;

use crate::crd::deployment::DeploymentOverride;

impl DeploymentOverride {
    /// Returns the (serialized) names of all fields which differ between `self` and `other`.
    ///
    /// Fields are returned in declaration order. The result is empty if and only if both
    /// overrides are equal.
    pub fn changed_fields(&self, other: &Self) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if self.replicas() != other.replicas() {
            changed.push("replicas");
        }
        if self.host() != other.host() {
            changed.push("host");
        }
        if self.affinity() != other.affinity() {
            changed.push("affinity");
        }
        if self.tolerations() != other.tolerations() {
            changed.push("tolerations");
        }
        if self.metadata() != other.metadata() {
            changed.push("metadata");
        }
        if self.image() != other.image() {
            changed.push("image");
        }
        if self.image_pull_secrets() != other.image_pull_secrets() {
            changed.push("imagePullSecrets");
        }

        changed
    }
}

/// Returns `true` if the `observed` overrides have to be rolled out.
///
/// This is the case if nothing was applied yet or if `observed` is not equal to `last_applied`.
pub fn requires_update(
    last_applied: Option<&DeploymentOverride>,
    observed: &DeploymentOverride,
) -> bool {
    let Some(last_applied) = last_applied else {
        debug!("no deployment overrides applied yet, update required");
        return true;
    };

    if last_applied == observed {
        debug!("deployment overrides unchanged, skipping update");
        return false;
    }

    let changed_fields = last_applied.changed_fields(observed);
    debug!(
        changed_fields = ?changed_fields,
        "deployment overrides changed, update required"
    );
    true
}
