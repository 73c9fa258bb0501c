use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ConfigShowArgs;
use crate::output::print_settings;

pub fn show(config_path: &Path, args: &ConfigShowArgs) -> Result<()> {
    let settings = cognito_attrs_config::load(config_path)
        .with_context(|| format!("Invalid service definition {}", config_path.display()))?
        .with_stage(args.stage.clone());
    let stack_name = settings.stack_name(None).ok();
    print_settings(&settings, stack_name.as_deref());
    Ok(())
}
