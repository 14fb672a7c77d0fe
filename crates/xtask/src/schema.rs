use std::path::PathBuf;

use registry_operator::{
    crd::DeploymentOverride,
    yaml::{self, SerializeOptions, YamlSchema},
};
use snafu::{OptionExt, ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to get manifest directory"))]
    GetManifestDirectory { source: std::env::VarError },

    #[snafu(display("failed to get parent directory of {path}", path = path.display()))]
    GetParentDirectory { path: PathBuf },

    #[snafu(display("failed to create schema directory at {path}", path = path.display()))]
    CreateSchemaDirectory {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to write schema to file at {path}", path = path.display()))]
    WriteSchema { source: yaml::Error, path: PathBuf },

    #[snafu(display("failed to print schema"))]
    PrintSchema { source: yaml::Error },
}

pub fn generate_preview() -> Result<(), Error> {
    let path = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .context(GetManifestDirectorySnafu)?;

    let path = path
        .parent()
        .with_context(|| GetParentDirectorySnafu { path: path.clone() })?
        .join("registry-operator/schemas");

    std::fs::create_dir_all(&path).with_context(|_| CreateSchemaDirectorySnafu { path: path.clone() })?;

    let path = path.join("deployment-override.yaml");
    DeploymentOverride::write_yaml_schema(&path, SerializeOptions::default())
        .with_context(|_| WriteSchemaSnafu { path: path.clone() })?;

    tracing::info!(path = %path.display(), "wrote schema preview");
    Ok(())
}

pub fn print() -> Result<(), Error> {
    DeploymentOverride::print_yaml_schema(SerializeOptions::default()).context(PrintSchemaSnafu)
}
