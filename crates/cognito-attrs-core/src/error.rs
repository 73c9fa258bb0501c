//! Classified reconciliation failures.

use crate::plane::ControlPlaneError;

/// Errors that stop a reconciliation run.
///
/// The display text names the phase that failed; the control-plane failure,
/// when there is one, is available through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// A configured output key is not among the outputs of an existing stack.
    #[error("Could not find {key} in Outputs for stack")]
    OutputNotFound { key: String },

    /// The user pool id could not be resolved at all.
    #[error("Could not resolve user pool id from output {key}")]
    MissingIdentifier { key: String },

    #[error("Error occurred when fetching stack {stack_name}")]
    DescribeStack {
        stack_name: String,
        #[source]
        source: ControlPlaneError,
    },

    #[error("Error occurred when fetching UserPool")]
    DescribeUserPool {
        #[source]
        source: ControlPlaneError,
    },

    #[error("Error occurred when fetching UserPoolClient")]
    DescribeClient {
        #[source]
        source: ControlPlaneError,
    },

    #[error("Error occurred when adding attributes to pool")]
    AddAttributes {
        #[source]
        source: ControlPlaneError,
    },

    #[error("Error occurred when updating client")]
    UpdateClient {
        #[source]
        source: ControlPlaneError,
    },

    /// A client update would have cleared both grant lists.
    #[error("Refusing to update client {client_id} with empty read and write attribute lists")]
    EmptyGrantUpdate { client_id: String },
}

impl ReconcileError {
    #[must_use]
    pub fn output_not_found(key: impl Into<String>) -> Self {
        Self::OutputNotFound { key: key.into() }
    }

    #[must_use]
    pub fn missing_identifier(key: impl Into<String>) -> Self {
        Self::MissingIdentifier { key: key.into() }
    }

    /// Classification name used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutputNotFound { .. } => "OutputNotFoundError",
            Self::MissingIdentifier { .. } => "MissingIdentifierError",
            Self::DescribeStack { .. } => "DescribeStackError",
            Self::DescribeUserPool { .. } => "DescribeUserPoolError",
            Self::DescribeClient { .. } => "DescribeClientError",
            Self::AddAttributes { .. } => "AddAttributesError",
            Self::UpdateClient { .. } => "UpdateClientError",
            Self::EmptyGrantUpdate { .. } => "EmptyGrantUpdateError",
        }
    }

    /// The underlying control-plane failure, if the error came from one.
    pub fn control_plane_error(&self) -> Option<&ControlPlaneError> {
        match self {
            Self::DescribeStack { source, .. }
            | Self::DescribeUserPool { source }
            | Self::DescribeClient { source }
            | Self::AddAttributes { source }
            | Self::UpdateClient { source } => Some(source),
            Self::OutputNotFound { .. }
            | Self::MissingIdentifier { .. }
            | Self::EmptyGrantUpdate { .. } => None,
        }
    }

    /// Whether the failure happened after the pool schema may have changed.
    pub fn is_client_phase(&self) -> bool {
        matches!(
            self,
            Self::DescribeClient { .. } | Self::UpdateClient { .. } | Self::EmptyGrantUpdate { .. }
        )
    }
}
