//! AWS implementation of the cognito-attrs control plane.
//!
//! Wraps the Cognito (`cognito-idp`) and CloudFormation SDK clients behind
//! [`cognito_attrs_core::ControlPlane`]. Region and credentials come from the
//! SDK's default chains, so profiles, SSO, and container or instance roles
//! work the same as for the AWS CLI.
//!
//! # Example
//!
//! ```ignore
//! use cognito_attrs_aws::{AwsClientConfig, AwsControlPlane};
//!
//! let config = AwsClientConfig::new().with_region("eu-west-1");
//! let plane = AwsControlPlane::from_config(&config).await?;
//! let pool = plane.describe_user_pool("eu-west-1_abc").await?;
//! ```

mod client;
mod convert;

pub use client::{AwsClientConfig, AwsControlPlane, DEFAULT_TIMEOUT};
