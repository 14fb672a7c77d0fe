use std::path::PathBuf;

use snafu::{ResultExt, Snafu};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Registry, fmt::writer::MakeWriterExt as _, layer::SubscriberExt,
    util::SubscriberInitExt,
};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to parse default log filter"))]
    ParseDefaultFilter {
        source: tracing_subscriber::filter::ParseError,
    },

    #[snafu(display("failed to initialize rolling file appender in {}", directory.display()))]
    InitializeFileAppender {
        source: tracing_appender::rolling::InitError,
        directory: PathBuf,
    },

    #[snafu(display("failed to install global tracing subscriber"))]
    InstallSubscriber {
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Initializes `tracing` logging with options from the environment variable
/// given in the `env` parameter.
///
/// If the variable is not set (or cannot be parsed) the maximum log level is INFO.
///
/// Log output can be copied to a file by setting `{env}_DIRECTORY` (e.g. `REGISTRY_OPERATOR_LOG_DIRECTORY`)
/// to a directory path. This file will be rotated regularly.
pub fn initialize_logging(env: &str, app_name: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env(env)
        .or_else(|_| EnvFilter::try_new(tracing::Level::INFO.to_string()))
        .context(ParseDefaultFilterSnafu)?;

    let file_appender_directory = std::env::var_os(format!("{env}_DIRECTORY")).map(PathBuf::from);
    let file_appender = file_appender_directory
        .as_deref()
        .map(|directory| {
            RollingFileAppender::builder()
                .filename_suffix(format!("{app_name}.log"))
                .max_log_files(6)
                .build(directory)
                .with_context(|_| InitializeFileAppenderSnafu {
                    directory: directory.to_path_buf(),
                })
        })
        .transpose()?;

    // Log to stderr, so that command output on stdout stays machine readable
    let registry = Registry::default().with(filter);
    match file_appender {
        Some(file_appender) => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr.and(file_appender)))
            .try_init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
    .context(InstallSubscriberSnafu)?;

    // need to delay logging until after tracing is initialized
    match file_appender_directory {
        Some(dir) => tracing::info!(directory = %dir.display(), "file logging enabled"),
        None => tracing::debug!("file logging disabled, because no log directory set"),
    }

    Ok(())
}
