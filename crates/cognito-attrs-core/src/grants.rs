//! Client phase: grant the pool client read and write access to the desired
//! attributes.

use tracing::info;

use crate::diff::missing;
use crate::error::ReconcileError;
use crate::model::{DesiredAttribute, UpdateUserPoolClientRequest, UserPoolClient};
use crate::names::normalize;
use crate::plane::ControlPlane;

/// Normalized names newly granted to a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantChanges {
    pub read: Vec<String>,
    pub write: Vec<String>,
}

impl GrantChanges {
    pub fn is_empty(&self) -> bool {
        self.read.is_empty() && self.write.is_empty()
    }
}

/// Fetches the current client description.
pub async fn describe_client(
    plane: &dyn ControlPlane,
    user_pool_id: &str,
    client_id: &str,
) -> Result<UserPoolClient, ReconcileError> {
    plane
        .describe_user_pool_client(user_pool_id, client_id)
        .await
        .map_err(|source| ReconcileError::DescribeClient { source })
}

/// Builds the client update for the desired attributes, if one is needed.
///
/// Read and write lists are diffed independently. New names are appended in
/// diff order after the existing entries, which are kept as they are. Returns
/// `None` when both lists already cover every desired attribute.
pub fn merge_grants(
    client: &UserPoolClient,
    desired: &[DesiredAttribute],
) -> Option<(UpdateUserPoolClientRequest, GrantChanges)> {
    let changes = GrantChanges {
        read: normalized_names(&missing(desired, &client.read_attributes)),
        write: normalized_names(&missing(desired, &client.write_attributes)),
    };
    if changes.is_empty() {
        return None;
    }

    let request = UpdateUserPoolClientRequest {
        client_id: client.client_id.clone(),
        user_pool_id: client.user_pool_id.clone(),
        read_attributes: appended(&client.read_attributes, &changes.read),
        write_attributes: appended(&client.write_attributes, &changes.write),
    };
    Some((request, changes))
}

/// Extends the client's grant lists with the desired attributes it lacks.
///
/// Issues at most one `UpdateUserPoolClient` call carrying both full lists.
///
/// # Errors
///
/// [`ReconcileError::UpdateClient`] if the mutation fails, and
/// [`ReconcileError::EmptyGrantUpdate`] if the update would clear both lists.
pub async fn reconcile_client_grants(
    plane: &dyn ControlPlane,
    client: &UserPoolClient,
    desired: &[DesiredAttribute],
) -> Result<GrantChanges, ReconcileError> {
    let client_id = client.client_id.as_str();
    let Some((request, changes)) = merge_grants(client, desired) else {
        info!(client_id, "No update required to UserPoolClient");
        return Ok(GrantChanges::default());
    };
    ensure_grants_present(&request)?;

    if !changes.read.is_empty() {
        info!(
            client_id,
            "Enabling client to read from {} new attribute(s): {}",
            changes.read.len(),
            changes.read.join(",")
        );
    }
    if !changes.write.is_empty() {
        info!(
            client_id,
            "Enabling client to write to {} new attribute(s): {}",
            changes.write.len(),
            changes.write.join(",")
        );
    }

    plane
        .update_user_pool_client(&request)
        .await
        .map_err(|source| ReconcileError::UpdateClient { source })?;

    info!(client_id, "Successfully updated client");
    Ok(changes)
}

// An update with both lists empty would strip every grant from the client.
fn ensure_grants_present(request: &UpdateUserPoolClientRequest) -> Result<(), ReconcileError> {
    if request.read_attributes.is_empty() && request.write_attributes.is_empty() {
        return Err(ReconcileError::EmptyGrantUpdate {
            client_id: request.client_id.clone(),
        });
    }
    Ok(())
}

fn normalized_names(attributes: &[DesiredAttribute]) -> Vec<String> {
    attributes.iter().map(|attr| normalize(&attr.name)).collect()
}

fn appended(existing: &[String], additions: &[String]) -> Vec<String> {
    existing.iter().chain(additions).cloned().collect()
}
