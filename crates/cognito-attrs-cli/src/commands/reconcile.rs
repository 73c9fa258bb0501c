use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cognito_attrs_aws::{AwsClientConfig, AwsControlPlane};
use cognito_attrs_core::{OutputSource, ReconcileError, ReconcileReport, log_failure};
use tracing::info;

use crate::cli::ReconcileArgs;
use crate::output::print_report;
use crate::stack_outputs;

/// Post-deploy entry point.
///
/// An invalid service definition always fails the command. Reconciliation
/// failures are logged and swallowed unless `--strict` is given.
pub async fn reconcile(config_path: &Path, args: &ReconcileArgs) -> Result<()> {
    let settings = cognito_attrs_config::load(config_path)
        .with_context(|| format!("Invalid service definition {}", config_path.display()))?
        .with_stage(args.stage.clone())
        .with_region(args.region.clone());

    let mut client_config = AwsClientConfig::new().with_timeout(Duration::from_secs(args.timeout));
    if let Some(region) = &settings.region {
        client_config = client_config.with_region(region.clone());
    }
    if let Some(profile) = &args.profile {
        client_config = client_config.with_profile(profile.clone());
    }
    if let Some(url) = &args.endpoint_url {
        client_config = client_config.with_endpoint_url(url.clone());
    }
    let plane = AwsControlPlane::from_config(&client_config).await.context(
        "Failed to set up AWS client. Use --region, set provider.region, or set AWS_REGION",
    )?;

    let outputs = match &args.outputs {
        Some(path) => Some(stack_outputs::load(path)?),
        None => None,
    };
    let stack_name;
    let source = match &outputs {
        Some(outputs) => OutputSource::Outputs(outputs.as_deref()),
        None => {
            stack_name = settings.stack_name(args.stack_name.as_deref())?;
            info!(stack_name = %stack_name, "Reading outputs of deployed stack");
            OutputSource::Stack(&stack_name)
        }
    };

    let outcome = cognito_attrs_core::reconcile(&plane, &settings.reconcile, source).await;
    conclude(outcome, args.strict)
}

/// Prints the summary of a successful run. A failure is always logged, and
/// only fails the command in strict mode.
fn conclude(outcome: Result<ReconcileReport, ReconcileError>, strict: bool) -> Result<()> {
    match outcome {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(err) => {
            log_failure(&err);
            if strict {
                Err(err).context("Reconciliation failed")
            } else {
                Ok(())
            }
        }
    }
}
