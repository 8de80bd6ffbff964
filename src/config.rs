//! Configuration file loading and command-line override resolution.
//!
//! The tool is driven by a JSON config file (camelCase keys, matching the
//! `hasura2casbin.json` documented shape); every value can be overridden by
//! a command-line flag. Resolution merges the two, fills defaults, and
//! validates the constrained literals before any network or filesystem work
//! happens.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::generator::policy_deriver::ADMIN_ROLE;

/// The only supported authorization library target.
pub const LIBRARY_TARGET: &str = "casbin";
/// The only supported access-control model.
pub const ACCESS_CONTROL_MODEL: &str = "RBAC";
/// Output directory used when neither config nor flags name one.
pub const DEFAULT_OUTPUT_DIR: &str = "hasura2casbin-output";

/// On-disk JSON configuration, all fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Hasura connection section.
    #[serde(default)]
    pub hasura: HasuraSection,
    /// Authorization library target; must be `casbin` when present.
    pub library_target: Option<String>,
    /// Access-control model; must be `RBAC` when present.
    pub access_control_model: Option<String>,
    /// Roles to derive policies for, in output order.
    pub roles: Option<Vec<String>>,
    /// Directory the module is written into.
    pub output_dir: Option<PathBuf>,
    /// Output file name; defaults from the typescript mode when absent.
    pub file_name: Option<String>,
    /// Emit a TypeScript module instead of JavaScript.
    pub typescript: Option<bool>,
}

/// Hasura connection settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasuraSection {
    /// Base endpoint of the Hasura instance.
    pub endpoint: Option<String>,
    /// Admin secret sent with the metadata request.
    pub admin_secret: Option<String>,
}

/// Command-line overrides; every set field beats the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--endpoint`.
    pub endpoint: Option<String>,
    /// `--admin-secret`.
    pub admin_secret: Option<String>,
    /// `--library-target`.
    pub library_target: Option<String>,
    /// `--access-control-model`.
    pub access_control_model: Option<String>,
    /// `--roles`, comma-separated on the command line.
    pub roles: Option<Vec<String>>,
    /// `--output-dir`.
    pub output_dir: Option<PathBuf>,
    /// `--file-name`.
    pub file_name: Option<String>,
    /// `--typescript`.
    pub typescript: bool,
}

/// Fully resolved generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base endpoint of the Hasura instance.
    pub endpoint: String,
    /// Admin secret sent with the metadata request.
    pub admin_secret: Option<String>,
    /// Roles to derive policies for, in output order.
    pub roles: Vec<String>,
    /// Directory the module is written into.
    pub output_dir: PathBuf,
    /// Output file name.
    pub file_name: String,
    /// Whether the module is declared as TypeScript.
    pub typescript: bool,
}

impl Config {
    /// Merge the config file with command-line overrides and validate.
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self, Error> {
        let endpoint = overrides
            .endpoint
            .or(file.hasura.endpoint)
            .ok_or(Error::MissingEndpoint)?;

        let library_target = overrides
            .library_target
            .or(file.library_target)
            .unwrap_or_else(|| LIBRARY_TARGET.to_string());
        if library_target != LIBRARY_TARGET {
            return Err(Error::UnsupportedLibraryTarget(library_target));
        }

        let access_control_model = overrides
            .access_control_model
            .or(file.access_control_model)
            .unwrap_or_else(|| ACCESS_CONTROL_MODEL.to_string());
        if access_control_model != ACCESS_CONTROL_MODEL {
            return Err(Error::UnsupportedAccessControlModel(access_control_model));
        }

        let typescript = overrides.typescript || file.typescript.unwrap_or(false);

        Ok(Config {
            endpoint,
            admin_secret: overrides.admin_secret.or(file.hasura.admin_secret),
            roles: overrides
                .roles
                .or(file.roles)
                .unwrap_or_else(|| vec![ADMIN_ROLE.to_string()]),
            output_dir: overrides
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            file_name: overrides
                .file_name
                .or(file.file_name)
                .unwrap_or_else(|| default_file_name(typescript)),
            typescript,
        })
    }
}

/// Load and decode the JSON config file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, Error> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Default output file name for the selected source-language mode.
pub fn default_file_name(typescript: bool) -> String {
    let name = if typescript { "index.ts" } else { "index.js" };
    name.to_string()
}
