use std::path::PathBuf;

use thiserror::Error;

/// Terminal errors reported by the generation pipeline.
///
/// Every variant aborts the run: the CLI prints the message (plus a
/// corrective hint where one exists) and exits non-zero. The deriver and
/// renderer themselves are infallible once their typed inputs exist.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path passed on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or has the wrong shape.
    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        /// Path passed on the command line.
        path: PathBuf,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// Neither the config file nor the command line supplied an endpoint.
    #[error("no Hasura endpoint configured")]
    MissingEndpoint,

    /// An authorization library target other than `casbin` was requested.
    #[error("unsupported authorization library target '{0}'")]
    UnsupportedLibraryTarget(String),

    /// An access-control model other than `RBAC` was requested.
    #[error("unsupported access-control model '{0}'")]
    UnsupportedAccessControlModel(String),

    /// The output file name would escape the output directory.
    #[error("invalid output file name '{name}': {reason}")]
    InvalidFileName {
        /// The rejected name.
        name: String,
        /// Which validation rule it broke.
        reason: &'static str,
    },

    /// The metadata request could not be sent or the transport failed.
    #[error("metadata request to {url} failed: {source}")]
    MetadataRequest {
        /// Full metadata endpoint URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The metadata endpoint answered with a non-success status.
    #[error("metadata endpoint {url} returned {status}")]
    MetadataStatus {
        /// Full metadata endpoint URL.
        url: String,
        /// HTTP status of the response.
        status: reqwest::StatusCode,
    },

    /// The metadata response body did not decode into the expected document.
    #[error("malformed metadata from {url}: {source}")]
    MetadataDecode {
        /// Full metadata endpoint URL.
        url: String,
        /// Underlying decode error.
        source: reqwest::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The policy module could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteArtifact {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl Error {
    /// Corrective hint printed under the error message, when one exists.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::ConfigRead { .. } => {
                Some("create a hasura2casbin.json config file or pass its path as the first argument")
            }
            Error::MissingEndpoint => {
                Some("set hasura.endpoint in the config file or pass --endpoint")
            }
            Error::UnsupportedLibraryTarget(_) => Some("available targets: casbin"),
            Error::UnsupportedAccessControlModel(_) => Some("available models: RBAC"),
            Error::MetadataRequest { .. } | Error::MetadataStatus { .. } => {
                Some("verify the Hasura endpoint and admin secret")
            }
            _ => None,
        }
    }
}
