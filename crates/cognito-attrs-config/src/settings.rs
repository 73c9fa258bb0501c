//! Validated settings derived from a [`ServiceDefinition`].

use cognito_attrs_core::ReconcileSettings;
use tracing::debug;

use crate::definition::ServiceDefinition;
use crate::{ConfigError, Result};

/// Stage assumed when neither the file nor the command line names one.
pub const DEFAULT_STAGE: &str = "dev";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub service: Option<String>,
    pub stage: String,
    pub region: Option<String>,
    pub reconcile: ReconcileSettings,
}

impl ServiceSettings {
    /// Overrides the stage, e.g. from a command-line flag.
    #[must_use]
    pub fn with_stage(mut self, stage: Option<String>) -> Self {
        if let Some(stage) = stage {
            self.stage = stage;
        }
        self
    }

    /// Overrides the region.
    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        if region.is_some() {
            self.region = region;
        }
        self
    }

    /// Name of the deployed stack, `{service}-{stage}` unless overridden.
    pub fn stack_name(&self, stack_override: Option<&str>) -> Result<String> {
        if let Some(name) = stack_override {
            return Ok(name.to_string());
        }
        let service = self.service.as_deref().ok_or_else(|| {
            ConfigError::validation("service is required to derive the stack name.")
        })?;
        Ok(format!("{service}-{}", self.stage))
    }
}

impl TryFrom<ServiceDefinition> for ServiceSettings {
    type Error = ConfigError;

    fn try_from(definition: ServiceDefinition) -> Result<Self> {
        let block = definition
            .custom
            .cognito_add_custom_attributes
            .ok_or_else(|| ConfigError::validation("Missing required fields."))?;

        let user_pool_id_output_key = non_empty(block.cognito_user_pool_id_output_key)
            .ok_or_else(|| ConfigError::validation("CognitoUserPoolIdOutputKey is required."))?;

        let custom_attributes = block
            .custom_attributes
            .ok_or_else(|| ConfigError::validation("CustomAttributes array is required."))?;

        if let Some(index) = custom_attributes.iter().position(|a| a.name.is_empty()) {
            return Err(ConfigError::validation(format!(
                "CustomAttributes[{index}] must have a non-empty Name."
            )));
        }
        if custom_attributes.is_empty() {
            debug!("CustomAttributes is empty; reconciliation will be a no-op");
        }

        Ok(Self {
            service: non_empty(definition.service),
            stage: non_empty(definition.provider.stage).unwrap_or_else(|| DEFAULT_STAGE.into()),
            region: non_empty(definition.provider.region),
            reconcile: ReconcileSettings {
                user_pool_id_output_key,
                user_pool_client_id_output_key: non_empty(
                    block.cognito_user_pool_client_id_output_key,
                ),
                custom_attributes,
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
