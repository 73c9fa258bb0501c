mod cli;
mod commands;
mod observability;
mod output;
mod stack_outputs;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};
use output::print_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    observability::init_tracing(&cli.log_level);

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Reconcile(args) => {
            commands::reconcile::reconcile(&cli.config, args).await?;
        }
        Commands::Config(args) => match &args.command {
            ConfigCommands::Show(show_args) => {
                commands::config::show(&cli.config, show_args)?;
            }
        },
    }

    Ok(())
}
