//! Additive reconciliation of Cognito user pool custom attributes.
//!
//! After a deployment completes, this crate compares a declared list of custom
//! attributes against the live user pool schema and the read/write grants of
//! one pool client, then applies only what is missing:
//!
//! ```text
//!   stack outputs ──► resolve pool id ──► reconcile schema ──► resolve client id ──► reconcile grants
//!                         │                   │                                         │
//!                         │            DescribeUserPool                        DescribeUserPoolClient
//!                         │            AddCustomAttributes                     UpdateUserPoolClient
//!                         ▼
//!                MissingIdentifier (fatal)
//! ```
//!
//! Custom attributes can never be removed or redefined once created, so every
//! step only ever appends. Each run re-reads live state before mutating it.
//!
//! The control plane is reached through the [`ControlPlane`] trait. Use
//! [`memory::InMemoryControlPlane`] for tests and the `cognito-attrs-aws` crate
//! against real AWS accounts.

pub mod diff;
pub mod error;
pub mod grants;
pub mod memory;
pub mod model;
pub mod names;
pub mod outputs;
pub mod plane;
pub mod runner;
pub mod schema;

pub use diff::missing;
pub use error::ReconcileError;
pub use grants::{GrantChanges, describe_client, merge_grants, reconcile_client_grants};
pub use memory::InMemoryControlPlane;
pub use model::{
    DesiredAttribute, SchemaAttribute, StackDescription, StackOutput, UpdateUserPoolClientRequest,
    UserPool, UserPoolClient,
};
pub use names::{CUSTOM_ATTRIBUTE_PREFIX, normalize};
pub use outputs::resolve_output;
pub use plane::{ControlPlane, ControlPlaneError};
pub use runner::{OutputSource, ReconcileReport, ReconcileSettings, log_failure, reconcile, run};
pub use schema::reconcile_schema;
