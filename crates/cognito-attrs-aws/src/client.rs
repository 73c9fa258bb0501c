use std::time::Duration;

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig};
use cognito_attrs_core::{
    ControlPlane, ControlPlaneError, DesiredAttribute, StackDescription,
    UpdateUserPoolClientRequest, UserPool, UserPoolClient,
};
use tracing::debug;
use url::Url;

use crate::convert::{
    ADD_CUSTOM_ATTRIBUTES, is_missing_stack, schema_attribute, sdk_error, stack_description,
    user_pool, user_pool_client,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Overrides applied on top of the SDK's default configuration chain.
#[derive(Debug, Clone)]
pub struct AwsClientConfig {
    /// Wins over `AWS_REGION`, the profile region and instance metadata.
    pub region: Option<String>,
    /// Named profile from the shared config and credentials files.
    pub profile: Option<String>,
    /// Sends every service to this URL instead of the regional endpoint.
    pub endpoint_url: Option<Url>,
    /// Limit for one operation, retries included.
    pub timeout: Duration,
}

impl Default for AwsClientConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AwsClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: Url) -> Self {
        self.endpoint_url = Some(endpoint_url);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// SDK config loader with these overrides applied.
    ///
    /// Credentials are left to the default chain: environment, shared files
    /// and profiles, SSO, web identity, container and instance roles.
    pub fn loader(&self) -> ConfigLoader {
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(self.timeout)
            .build();
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeouts);
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(url) = &self.endpoint_url {
            loader = loader.endpoint_url(url.as_str().trim_end_matches('/'));
        }
        loader
    }
}

/// [`ControlPlane`] over the Cognito and CloudFormation SDK clients.
#[derive(Debug, Clone)]
pub struct AwsControlPlane {
    cognito: aws_sdk_cognitoidentityprovider::Client,
    cloudformation: aws_sdk_cloudformation::Client,
}

impl AwsControlPlane {
    /// Builds both service clients from one shared SDK config.
    pub fn new(sdk_config: &SdkConfig) -> Result<Self, ControlPlaneError> {
        let Some(region) = sdk_config.region() else {
            return Err(ControlPlaneError::configuration("No AWS region configured"));
        };
        debug!(%region, "Building AWS clients");
        Ok(Self {
            cognito: aws_sdk_cognitoidentityprovider::Client::new(sdk_config),
            cloudformation: aws_sdk_cloudformation::Client::new(sdk_config),
        })
    }

    /// Resolves the SDK config (region, credentials, endpoint) and builds the
    /// clients.
    pub async fn from_config(config: &AwsClientConfig) -> Result<Self, ControlPlaneError> {
        Self::new(&config.loader().load().await)
    }
}

#[async_trait]
impl ControlPlane for AwsControlPlane {
    async fn describe_stack(
        &self,
        stack_name: &str,
    ) -> Result<Option<StackDescription>, ControlPlaneError> {
        debug!(stack_name, "DescribeStacks");
        let output = match self
            .cloudformation
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let err = sdk_error("DescribeStacks", err);
                return if is_missing_stack(&err) { Ok(None) } else { Err(err) };
            }
        };
        Ok(output
            .stacks
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|stack| stack_description(stack_name, stack)))
    }

    async fn describe_user_pool(&self, user_pool_id: &str) -> Result<UserPool, ControlPlaneError> {
        debug!(user_pool_id, "DescribeUserPool");
        let output = self
            .cognito
            .describe_user_pool()
            .user_pool_id(user_pool_id)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeUserPool", e))?;
        let pool = output
            .user_pool
            .ok_or_else(|| ControlPlaneError::decode("DescribeUserPool", "response has no UserPool"))?;
        Ok(user_pool(pool))
    }

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> Result<UserPoolClient, ControlPlaneError> {
        debug!(user_pool_id, client_id, "DescribeUserPoolClient");
        let output = self
            .cognito
            .describe_user_pool_client()
            .user_pool_id(user_pool_id)
            .client_id(client_id)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeUserPoolClient", e))?;
        let client = output.user_pool_client.ok_or_else(|| {
            ControlPlaneError::decode("DescribeUserPoolClient", "response has no UserPoolClient")
        })?;
        Ok(user_pool_client(client))
    }

    async fn add_custom_attributes(
        &self,
        user_pool_id: &str,
        attributes: &[DesiredAttribute],
    ) -> Result<(), ControlPlaneError> {
        let schema = attributes
            .iter()
            .map(schema_attribute)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(user_pool_id, count = schema.len(), "AddCustomAttributes");
        self.cognito
            .add_custom_attributes()
            .user_pool_id(user_pool_id)
            .set_custom_attributes(Some(schema))
            .send()
            .await
            .map_err(|e| sdk_error(ADD_CUSTOM_ATTRIBUTES, e))?;
        Ok(())
    }

    async fn update_user_pool_client(
        &self,
        request: &UpdateUserPoolClientRequest,
    ) -> Result<(), ControlPlaneError> {
        debug!(
            user_pool_id = %request.user_pool_id,
            client_id = %request.client_id,
            "UpdateUserPoolClient"
        );
        self.cognito
            .update_user_pool_client()
            .user_pool_id(&request.user_pool_id)
            .client_id(&request.client_id)
            .set_read_attributes(Some(request.read_attributes.clone()))
            .set_write_attributes(Some(request.write_attributes.clone()))
            .send()
            .await
            .map_err(|e| sdk_error("UpdateUserPoolClient", e))?;
        Ok(())
    }
}
