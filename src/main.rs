//! CLI entry point for `hasura2casbin`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use hasura2casbin::config::{self, Config, Overrides};
use hasura2casbin::error::Error;
use hasura2casbin::generator::policy_deriver;
use hasura2casbin::metadata::fetch;
use hasura2casbin::output::{formatter, renderer};
use hasura2casbin::version_check;

#[derive(Parser)]
#[command(
    name = "hasura2casbin",
    version,
    about = "Translate Hasura GraphQL-engine metadata permissions into Casbin RBAC policy modules"
)]
struct Cli {
    /// Path to the JSON configuration file
    config: PathBuf,

    /// Hasura endpoint, overriding the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// Hasura admin secret, overriding the config file
    #[arg(long)]
    admin_secret: Option<String>,

    /// Authorization library target (available: casbin)
    #[arg(long)]
    library_target: Option<String>,

    /// Access-control model (available: RBAC)
    #[arg(long)]
    access_control_model: Option<String>,

    /// Comma-separated role list, overriding the config file
    #[arg(long, value_delimiter = ',')]
    roles: Option<Vec<String>>,

    /// Output directory, overriding the config file
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output file name, overriding the config file
    #[arg(long)]
    file_name: Option<String>,

    /// Emit a TypeScript module instead of JavaScript
    #[arg(long)]
    typescript: bool,

    /// Print additional logs
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    // Stage 1: refuse to run behind the latest published release.
    if let Some(latest) = version_check::check_latest_version() {
        eprintln!(
            "You are running `hasura2casbin` {}, which is behind the latest release ({latest}).\n\
             We recommend always using the latest version of hasura2casbin if possible.",
            env!("CARGO_PKG_VERSION")
        );
        process::exit(1);
    }

    // Stage 2: resolve configuration.
    let file = match config::load_config_file(&cli.config) {
        Ok(file) => file,
        Err(e) => exit_with(&e),
    };
    let overrides = Overrides {
        endpoint: cli.endpoint,
        admin_secret: cli.admin_secret,
        library_target: cli.library_target,
        access_control_model: cli.access_control_model,
        roles: cli.roles,
        output_dir: cli.output_dir,
        file_name: cli.file_name,
        typescript: cli.typescript,
    };
    let config = match Config::resolve(file, overrides) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    log::debug!("Deriving policies for roles: {}", config.roles.join(", "));

    // Stage 3: fetch metadata.
    let metadata = match fetch::fetch_metadata(&config.endpoint, config.admin_secret.as_deref()) {
        Ok(metadata) => metadata,
        Err(e) => exit_with(&e),
    };
    log::debug!(
        "Hasura metadata retrieved: {} sources, {} actions",
        metadata.sources.len(),
        metadata.actions.len()
    );

    // Stage 4: derive policy statements.
    let statements = policy_deriver::derive_policies(&metadata, &config.roles);
    log::debug!("Derived {} policy statements", statements.len());

    // Stage 5: render and write the module.
    let module = renderer::render_module(&statements);
    let written = match formatter::write_output(&config.output_dir, &config.file_name, &module) {
        Ok(path) => path,
        Err(e) => exit_with(&e),
    };

    println!("Permissions generated in {}", written.display());
}

fn exit_with(error: &Error) -> ! {
    eprintln!("error: {error}");
    if let Some(hint) = error.hint() {
        eprintln!("{hint}");
    }
    process::exit(1);
}
