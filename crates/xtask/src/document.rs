use std::{
    fs::File,
    path::{Path, PathBuf},
};

use registry_operator::{
    change::requires_update,
    crd::DeploymentOverride,
    yaml::{self, SerializeOptions},
};
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to open override document at {}", path.display()))]
    OpenDocument {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to parse override document at {}", path.display()))]
    ParseDocument {
        source: yaml::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to serialize override document"))]
    SerializeDocument { source: yaml::Error },
}

fn read(path: &Path) -> Result<DeploymentOverride, Error> {
    let file = File::open(path).with_context(|_| OpenDocumentSnafu { path })?;
    yaml::from_yaml_reader(file).with_context(|_| ParseDocumentSnafu { path })
}

/// Parses the document at `path` and returns it re-serialized, with unset fields dropped.
pub fn check(path: &Path) -> Result<String, Error> {
    let deployment = read(path)?;

    if deployment.is_empty() {
        tracing::info!(path = %path.display(), "document contains no overrides");
    }

    yaml::to_yaml_string(&deployment, SerializeOptions::default()).context(SerializeDocumentSnafu)
}

/// Returns the names of all fields which differ between the two documents.
pub fn diff(last_applied: &Path, observed: &Path) -> Result<Vec<&'static str>, Error> {
    let last_applied = read(last_applied)?;
    let observed = read(observed)?;

    if requires_update(Some(&last_applied), &observed) {
        Ok(last_applied.changed_fields(&observed))
    } else {
        Ok(Vec::new())
    }
}
