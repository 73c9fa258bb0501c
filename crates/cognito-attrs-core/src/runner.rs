//! Sequencing of the reconciliation phases.
//!
//! [`reconcile`] runs the phases in dependency order and returns the first
//! failure. [`run`] is the post-deploy entry point: it logs that failure and
//! swallows it, so a reconciliation problem never fails the deployment that
//! triggered it.

use std::error::Error as _;

use tracing::{error, info, warn};

use crate::error::ReconcileError;
use crate::grants::{GrantChanges, describe_client, reconcile_client_grants};
use crate::model::{DesiredAttribute, StackDescription, StackOutput};
use crate::outputs::resolve_output;
use crate::plane::ControlPlane;
use crate::schema::reconcile_schema;

/// Validated inputs of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileSettings {
    /// Output holding the user pool id. Required.
    pub user_pool_id_output_key: String,

    /// Output holding the client id. When unset the client phase is skipped.
    pub user_pool_client_id_output_key: Option<String>,

    pub custom_attributes: Vec<DesiredAttribute>,
}

/// Where the deployment outputs come from.
#[derive(Debug, Clone, Copy)]
pub enum OutputSource<'a> {
    /// Describe the named stack and read its outputs.
    Stack(&'a str),
    /// Outputs the caller already has. `None` means the stack does not exist.
    Outputs(Option<&'a [StackOutput]>),
}

/// What a successful run changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub user_pool_id: String,
    /// `None` when the client phase was skipped.
    pub user_pool_client_id: Option<String>,
    pub added_attributes: Vec<DesiredAttribute>,
    pub grants: GrantChanges,
}

impl ReconcileReport {
    /// True when no mutation was issued.
    pub fn is_noop(&self) -> bool {
        self.added_attributes.is_empty() && self.grants.is_empty()
    }
}

/// Runs every phase and reports the first failure.
///
/// Order: resolve pool id, reconcile schema, resolve client id, reconcile
/// client grants. The client id is resolved only once the schema phase has
/// committed, so a bad client output key never blocks the schema extension.
/// Nothing is rolled back when a later phase fails.
pub async fn reconcile(
    plane: &dyn ControlPlane,
    settings: &ReconcileSettings,
    source: OutputSource<'_>,
) -> Result<ReconcileReport, ReconcileError> {
    info!("Start");

    let report = match source {
        OutputSource::Stack(stack_name) => {
            let stack = plane.describe_stack(stack_name).await.map_err(|source| {
                ReconcileError::DescribeStack {
                    stack_name: stack_name.to_string(),
                    source,
                }
            })?;
            if stack.is_none() {
                warn!(stack_name, "Stack not found");
            }
            let outputs = stack.as_ref().map(StackDescription::outputs);
            reconcile_outputs(plane, settings, outputs).await?
        }
        OutputSource::Outputs(outputs) => reconcile_outputs(plane, settings, outputs).await?,
    };

    info!("End");
    Ok(report)
}

async fn reconcile_outputs(
    plane: &dyn ControlPlane,
    settings: &ReconcileSettings,
    outputs: Option<&[StackOutput]>,
) -> Result<ReconcileReport, ReconcileError> {
    let pool_key = settings.user_pool_id_output_key.as_str();
    let user_pool_id = resolve_output(outputs, pool_key)?
        .ok_or_else(|| ReconcileError::missing_identifier(pool_key))?;
    info!("Found userPoolId: {user_pool_id}");

    let added_attributes =
        reconcile_schema(plane, &user_pool_id, &settings.custom_attributes).await?;
    let mut report = ReconcileReport {
        user_pool_id,
        added_attributes,
        ..ReconcileReport::default()
    };

    let client_id = match settings.user_pool_client_id_output_key.as_deref() {
        Some(key) => resolve_output(outputs, key)?,
        None => None,
    };
    let Some(client_id) = client_id else {
        info!("No userPoolClientId configured, skipping client update");
        return Ok(report);
    };
    info!("Found userPoolClientId: {client_id}");

    let client = describe_client(plane, &report.user_pool_id, &client_id).await?;
    report.grants = reconcile_client_grants(plane, &client, &settings.custom_attributes).await?;
    report.user_pool_client_id = Some(client_id);
    Ok(report)
}

/// Logs a failed run with its classification and underlying cause.
pub fn log_failure(err: &ReconcileError) {
    let kind = err.kind();
    match err.source() {
        Some(cause) => error!(kind, "{err}. {cause}"),
        None => error!(kind, "{err}"),
    }
    if err.is_client_phase() {
        warn!("Pool schema changes made earlier in this run were kept");
    }
}

/// Post-deploy entry point: reconcile, log any failure, never propagate it.
pub async fn run(plane: &dyn ControlPlane, settings: &ReconcileSettings, source: OutputSource<'_>) {
    if let Err(err) = reconcile(plane, settings, source).await {
        log_failure(&err);
    }
}
