//! Request and response shapes shared with the control plane.
//!
//! Field names follow the Cognito and CloudFormation APIs (PascalCase), so
//! service definitions and saved `describe-stacks` documents deserialize
//! into these types directly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A custom attribute the user pool should carry.
///
/// Only `Name` is interpreted here. Every other schema field
/// (`AttributeDataType`, `Mutable`, `StringAttributeConstraints`, ...) is kept
/// as-is and handed to the control plane for `AddCustomAttributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesiredAttribute {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(flatten)]
    pub schema: Map<String, Value>,
}

impl DesiredAttribute {
    /// Creates an attribute with no schema fields besides its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Map::new(),
        }
    }

    /// Adds an opaque schema field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.schema.insert(key.into(), value.into());
        self
    }
}

/// One named output of a deployed stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackOutput {
    pub output_key: String,
    pub output_value: String,
}

impl StackOutput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            output_key: key.into(),
            output_value: value.into(),
        }
    }
}

/// The subset of a stack description this crate reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackDescription {
    pub stack_name: String,

    /// `null` for stacks that declare no outputs.
    #[serde(default)]
    pub outputs: Option<Vec<StackOutput>>,
}

impl StackDescription {
    pub fn outputs(&self) -> &[StackOutput] {
        self.outputs.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaAttribute {
    #[serde(default)]
    pub name: String,
}

/// A user pool as returned by `DescribeUserPool`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPool {
    pub id: String,

    #[serde(default)]
    pub schema_attributes: Vec<SchemaAttribute>,
}

impl UserPool {
    /// Names of every attribute in the pool schema, standard ones included.
    pub fn attribute_names(&self) -> Vec<String> {
        self.schema_attributes
            .iter()
            .map(|attr| attr.name.clone())
            .collect()
    }
}

/// A user pool client as returned by `DescribeUserPoolClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolClient {
    pub client_id: String,
    pub user_pool_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(default)]
    pub read_attributes: Vec<String>,

    #[serde(default)]
    pub write_attributes: Vec<String>,
}

/// Body of `UpdateUserPoolClient`.
///
/// The service replaces the read and write lists wholesale, so both are always
/// sent in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserPoolClientRequest {
    pub client_id: String,
    pub user_pool_id: String,
    pub read_attributes: Vec<String>,
    pub write_attributes: Vec<String>,
}
