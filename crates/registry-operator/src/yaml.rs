//! Utility functions for processing override documents in the YAML file format
use std::{
    io::{Read, Write},
    path::Path,
};

use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use snafu::{ResultExt, Snafu};

type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents every error which can be encountered during YAML (de)serialization.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize YAML"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to deserialize YAML"))]
    DeserializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to convert JSON schema to YAML"))]
    ConvertSchema { source: serde_json::Error },

    #[snafu(display("failed to write YAML document separator"))]
    WriteDocumentSeparator { source: std::io::Error },

    #[snafu(display("failed to write YAML to file"))]
    WriteToFile { source: std::io::Error },

    #[snafu(display("failed to write YAML to stdout"))]
    WriteToStdout { source: std::io::Error },

    #[snafu(display("failed to parse bytes as valid UTF-8 string"))]
    ParseUtf8Bytes { source: std::string::FromUtf8Error },
}

/// Provides configurable options during YAML serialization.
///
/// For most people the default implementation [`SerializeOptions::default()`] is sufficient as it
/// enables explicit document and singleton map serialization.
pub struct SerializeOptions {
    /// Adds leading triple dashes (`---`) to the output string.
    pub explicit_document: bool,

    /// Serialize enum variants as YAML maps using the variant name as the key.
    pub singleton_map: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            explicit_document: true,
            singleton_map: true,
        }
    }
}

/// Serializes the given data structure and writes it to a [`Writer`](Write).
pub fn serialize<T, W>(value: &T, mut writer: W, options: SerializeOptions) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    if options.explicit_document {
        writer
            .write_all(b"---\n")
            .context(WriteDocumentSeparatorSnafu)?;
    }

    let mut serializer = serde_yaml::Serializer::new(writer);

    if options.singleton_map {
        serde_yaml::with::singleton_map_recursive::serialize(value, &mut serializer)
            .context(SerializeYamlSnafu)?;
    } else {
        value
            .serialize(&mut serializer)
            .context(SerializeYamlSnafu)?;
    }

    Ok(())
}

/// Serializes the given data structure into a [`String`].
pub fn to_yaml_string<T: Serialize>(value: &T, options: SerializeOptions) -> Result<String> {
    let mut buffer = Vec::new();
    serialize(value, &mut buffer, options)?;

    String::from_utf8(buffer).context(ParseUtf8BytesSnafu)
}

/// Deserializes a single YAML document.
pub fn from_yaml_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    serde_yaml::from_str(input).context(DeserializeYamlSnafu)
}

/// Deserializes a single YAML document read from `reader`.
pub fn from_yaml_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    serde_yaml::from_reader(reader).context(DeserializeYamlSnafu)
}

/// Generates the JSON schema of a type and renders it as YAML, ready to be embedded into a
/// `CustomResourceDefinition`.
pub trait YamlSchema: JsonSchema + Sized {
    /// Generates the YAML schema of `Self` using the provided [`SerializeOptions`].
    fn generate_yaml_schema(options: SerializeOptions) -> Result<String> {
        let schema = schemars::schema_for!(Self);
        let schema = serde_json::to_value(schema).context(ConvertSchemaSnafu)?;

        to_yaml_string(&schema, options)
    }

    /// Generates and writes the YAML schema of `Self` to a file at `path` using the provided
    /// [`SerializeOptions`].
    fn write_yaml_schema<P: AsRef<Path>>(path: P, options: SerializeOptions) -> Result<()> {
        let schema = Self::generate_yaml_schema(options)?;
        std::fs::write(path, schema).context(WriteToFileSnafu)
    }

    /// Generates and prints the YAML schema of `Self` to stdout using the provided
    /// [`SerializeOptions`].
    fn print_yaml_schema(options: SerializeOptions) -> Result<()> {
        let schema = Self::generate_yaml_schema(options)?;

        let mut writer = std::io::stdout();
        writer
            .write_all(schema.as_bytes())
            .context(WriteToStdoutSnafu)
    }
}

impl<T> YamlSchema for T where T: JsonSchema {}
