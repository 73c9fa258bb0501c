//! Service definition loading for cognito-attrs.
//!
//! A service definition names the deployed service and stage (which together
//! give the stack name) and carries the `CognitoAddCustomAttributes` block:
//!
//! ```toml
//! service = "orders"
//!
//! [provider]
//! stage = "dev"
//! region = "eu-west-1"
//!
//! [custom.CognitoAddCustomAttributes]
//! CognitoUserPoolIdOutputKey = "UserPoolId"
//! CognitoUserPoolClientIdOutputKey = "UserPoolClientId"
//!
//! [[custom.CognitoAddCustomAttributes.CustomAttributes]]
//! Name = "shoeSize"
//! AttributeDataType = "Number"
//! ```
//!
//! Files ending in `.json` are read as JSON with the same structure; anything
//! else is read as TOML.

pub mod definition;
pub mod settings;
pub mod source;

use std::path::PathBuf;

pub use definition::{AttributesBlock, CustomSection, ProviderSection, ServiceDefinition};
pub use settings::{DEFAULT_STAGE, ServiceSettings};
pub use source::{DEFAULT_CONFIG_FILE, Format, load, parse};

/// Error types for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),
}

impl ConfigError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
