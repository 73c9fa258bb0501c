//! Pool schema phase: add the custom attributes the pool does not have yet.

use tracing::info;

use crate::diff::missing;
use crate::error::ReconcileError;
use crate::model::DesiredAttribute;
use crate::plane::ControlPlane;

/// Adds every desired attribute missing from the pool schema in one call.
///
/// Returns the attributes that were added, empty when nothing was missing.
///
/// # Errors
///
/// [`ReconcileError::DescribeUserPool`] if the schema cannot be read, and
/// [`ReconcileError::AddAttributes`] if the mutation fails. Either way the run
/// must stop: the client phase depends on the schema being known.
pub async fn reconcile_schema(
    plane: &dyn ControlPlane,
    user_pool_id: &str,
    desired: &[DesiredAttribute],
) -> Result<Vec<DesiredAttribute>, ReconcileError> {
    let pool = plane
        .describe_user_pool(user_pool_id)
        .await
        .map_err(|source| ReconcileError::DescribeUserPool { source })?;

    let additions = missing(desired, &pool.attribute_names());
    if additions.is_empty() {
        info!(user_pool_id, "Supplied attributes already exist in pool");
        return Ok(additions);
    }

    let names = additions
        .iter()
        .map(|attr| attr.name.as_str())
        .collect::<Vec<_>>()
        .join(",");
    info!(
        user_pool_id,
        "Adding {} attribute(s) to pool: {names}",
        additions.len()
    );

    plane
        .add_custom_attributes(user_pool_id, &additions)
        .await
        .map_err(|source| ReconcileError::AddAttributes { source })?;

    info!(user_pool_id, "Successfully added attributes to pool");
    Ok(additions)
}
