use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snafu::{ResultExt, Snafu};

mod document;
mod schema;

const LOG_ENV: &str = "REGISTRY_OPERATOR_LOG";
const APP_NAME: &str = "xtask";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to initialize logging"))]
    Logging {
        source: registry_operator::logging::Error,
    },

    #[snafu(display("failed to generate schema preview"))]
    Schema { source: schema::Error },

    #[snafu(display("failed to process override document"))]
    Document { source: document::Error },
}

#[derive(Debug, Parser)]
enum Command {
    /// Work with the JSON schema of the deployment overrides.
    #[command(subcommand)]
    Schema(SchemaCommand),

    /// Parse an override document and print it in its normalized form.
    Check {
        /// Path to a YAML document containing the `deployment` section.
        file: PathBuf,
    },

    /// Decide whether the observed overrides require a Deployment update.
    Diff {
        /// Overrides which were applied last.
        last_applied: PathBuf,

        /// Overrides observed in the current custom resource.
        observed: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum SchemaCommand {
    /// Write the schema next to the registry-operator crate.
    Preview,

    /// Print the schema to stdout.
    Print,
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let command = Command::parse();
    registry_operator::logging::initialize_logging(LOG_ENV, APP_NAME).context(LoggingSnafu)?;

    match command {
        Command::Schema(schema_command) => match schema_command {
            SchemaCommand::Preview => schema::generate_preview().context(SchemaSnafu),
            SchemaCommand::Print => schema::print().context(SchemaSnafu),
        },
        Command::Check { file } => {
            let normalized = document::check(&file).context(DocumentSnafu)?;
            print!("{normalized}");
            Ok(())
        }
        Command::Diff {
            last_applied,
            observed,
        } => {
            let changed_fields = document::diff(&last_applied, &observed).context(DocumentSnafu)?;
            if changed_fields.is_empty() {
                println!("unchanged");
            } else {
                println!("update required: {}", changed_fields.join(", "));
            }
            Ok(())
        }
    }
}
