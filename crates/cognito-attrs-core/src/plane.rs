//! The control-plane capability the reconcilers run against.

use async_trait::async_trait;

use crate::model::{
    DesiredAttribute, StackDescription, UpdateUserPoolClientRequest, UserPool, UserPoolClient,
};

/// Failures reported by a [`ControlPlane`] implementation.
///
/// Reconcilers wrap these as the source of their own errors and never branch
/// on the variant.
#[derive(Debug, thiserror::Error)]
pub enum ControlPlaneError {
    /// The request never produced a response.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The service answered with an error document.
    #[error("{code}: {message} (HTTP {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// A request could not be built, or a response lacked what was asked for.
    #[error("Invalid {operation} payload: {message}")]
    Decode { operation: String, message: String },

    /// The client itself could not be set up (no region, bad profile, ...).
    #[error("Client configuration error: {message}")]
    Configuration { message: String },
}

impl ControlPlaneError {
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn decode(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            operation: operation.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Typed access to the five control-plane operations reconciliation needs.
///
/// Implementations must be thread-safe (`Send + Sync`). Every method issues
/// exactly one request; retries are left to the caller, and the reconcilers
/// never retry.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Describes a stack by name.
    ///
    /// Returns `None` when no such stack exists.
    async fn describe_stack(
        &self,
        stack_name: &str,
    ) -> Result<Option<StackDescription>, ControlPlaneError>;

    async fn describe_user_pool(&self, user_pool_id: &str) -> Result<UserPool, ControlPlaneError>;

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> Result<UserPoolClient, ControlPlaneError>;

    /// Adds custom attributes to a pool schema.
    ///
    /// Fails if any attribute already exists; the service offers no upsert.
    async fn add_custom_attributes(
        &self,
        user_pool_id: &str,
        attributes: &[DesiredAttribute],
    ) -> Result<(), ControlPlaneError>;

    /// Replaces the client's read and write attribute lists.
    async fn update_user_pool_client(
        &self,
        request: &UpdateUserPoolClientRequest,
    ) -> Result<(), ControlPlaneError>;
}
