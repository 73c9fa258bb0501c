//! Raw, unvalidated shape of a service definition file.

use cognito_attrs_core::DesiredAttribute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub service: Option<String>,

    #[serde(default)]
    pub provider: ProviderSection,

    #[serde(default)]
    pub custom: CustomSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub stage: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomSection {
    #[serde(rename = "CognitoAddCustomAttributes")]
    pub cognito_add_custom_attributes: Option<AttributesBlock>,
}

/// The `CognitoAddCustomAttributes` block, keyed the way deployment
/// frameworks spell it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributesBlock {
    pub cognito_user_pool_id_output_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognito_user_pool_client_id_output_key: Option<String>,

    pub custom_attributes: Option<Vec<DesiredAttribute>>,
}
