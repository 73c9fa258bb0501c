use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cognito_attrs_config::DEFAULT_CONFIG_FILE;
use url::Url;

#[derive(Parser)]
#[command(name = "cognito-attrs")]
#[command(about = "Add missing Cognito custom attributes and client grants after a deploy")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service definition file (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true, env = "COGNITO_ATTRS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "COGNITO_ATTRS_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the user pool and client against the service definition
    Reconcile(ReconcileArgs),
    /// Inspect the service definition
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct ReconcileArgs {
    /// Deployment stage (overrides provider.stage)
    #[arg(short, long, env = "COGNITO_ATTRS_STAGE")]
    pub stage: Option<String>,

    /// AWS region (overrides provider.region and the SDK's region chain)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Named AWS profile for credentials and region (the SDK also reads AWS_PROFILE)
    #[arg(long)]
    pub profile: Option<String>,

    /// Stack to read outputs from (defaults to <service>-<stage>)
    #[arg(long)]
    pub stack_name: Option<String>,

    /// Read stack outputs from this JSON file instead of describing the stack
    #[arg(long)]
    pub outputs: Option<PathBuf>,

    /// Send every AWS request to this endpoint (e.g. a local emulator)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<Url>,

    /// Per-operation timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Exit non-zero when reconciliation fails instead of only logging it
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the validated settings
    Show(ConfigShowArgs),
}

#[derive(clap::Args)]
pub struct ConfigShowArgs {
    /// Deployment stage (overrides provider.stage)
    #[arg(short, long, env = "COGNITO_ATTRS_STAGE")]
    pub stage: Option<String>,
}
