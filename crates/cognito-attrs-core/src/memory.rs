//! In-memory control plane.
//!
//! Holds stacks, pools and clients in process and mimics the service rules
//! reconciliation depends on: an attribute can be added only once, and a
//! client can only be granted attributes the pool schema has. Used by tests
//! and for local runs without an AWS account.
//!
//! # Example
//!
//! ```ignore
//! use cognito_attrs_core::memory::InMemoryControlPlane;
//! use cognito_attrs_core::StackOutput;
//!
//! let plane = InMemoryControlPlane::new()
//!     .with_stack("orders-dev", [StackOutput::new("UserPoolId", "pool")])
//!     .with_user_pool("pool", ["email"]);
//! ```

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::{
    DesiredAttribute, SchemaAttribute, StackDescription, StackOutput, UpdateUserPoolClientRequest,
    UserPool, UserPoolClient,
};
use crate::names::normalize;
use crate::plane::{ControlPlane, ControlPlaneError};

/// Control-plane operations, used to inject failures and inspect calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    DescribeStack,
    DescribeUserPool,
    DescribeUserPoolClient,
    AddCustomAttributes,
    UpdateUserPoolClient,
}

impl Operation {
    pub fn is_write(self) -> bool {
        matches!(self, Self::AddCustomAttributes | Self::UpdateUserPoolClient)
    }
}

/// A mutation that was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddCustomAttributes {
        user_pool_id: String,
        attributes: Vec<DesiredAttribute>,
    },
    UpdateUserPoolClient(UpdateUserPoolClientRequest),
}

#[derive(Debug, Default)]
struct State {
    stacks: HashMap<String, StackDescription>,
    pools: HashMap<String, UserPool>,
    clients: HashMap<(String, String), UserPoolClient>,
    failures: HashSet<Operation>,
    calls: Vec<Operation>,
    mutations: Vec<Mutation>,
}

impl State {
    fn enter(&mut self, operation: Operation) -> Result<(), ControlPlaneError> {
        self.calls.push(operation);
        if self.failures.contains(&operation) {
            return Err(ControlPlaneError::api(
                500,
                "InternalErrorException",
                format!("injected failure for {operation:?}"),
            ));
        }
        Ok(())
    }

    fn pool(&self, user_pool_id: &str) -> Result<&UserPool, ControlPlaneError> {
        self.pools.get(user_pool_id).ok_or_else(|| {
            ControlPlaneError::api(
                400,
                "ResourceNotFoundException",
                format!("User pool {user_pool_id} does not exist."),
            )
        })
    }
}

/// A [`ControlPlane`] backed by in-process state.
#[derive(Debug, Default)]
pub struct InMemoryControlPlane {
    state: Mutex<State>,
}

impl InMemoryControlPlane {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a stack with the given outputs.
    #[must_use]
    pub fn with_stack(
        mut self,
        stack_name: impl Into<String>,
        outputs: impl IntoIterator<Item = StackOutput>,
    ) -> Self {
        let stack_name = stack_name.into();
        self.state.get_mut().stacks.insert(
            stack_name.clone(),
            StackDescription {
                stack_name,
                outputs: Some(outputs.into_iter().collect()),
            },
        );
        self
    }

    /// Seeds a user pool whose schema has the given attribute names.
    #[must_use]
    pub fn with_user_pool<S: Into<String>>(
        mut self,
        user_pool_id: impl Into<String>,
        attribute_names: impl IntoIterator<Item = S>,
    ) -> Self {
        let id = user_pool_id.into();
        let schema_attributes = attribute_names
            .into_iter()
            .map(|name| SchemaAttribute { name: name.into() })
            .collect();
        self.state.get_mut().pools.insert(
            id.clone(),
            UserPool {
                id,
                schema_attributes,
            },
        );
        self
    }

    /// Seeds a client with the given read and write grants.
    #[must_use]
    pub fn with_client<R: Into<String>, W: Into<String>>(
        mut self,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
        read_attributes: impl IntoIterator<Item = R>,
        write_attributes: impl IntoIterator<Item = W>,
    ) -> Self {
        let client = UserPoolClient {
            client_id: client_id.into(),
            user_pool_id: user_pool_id.into(),
            client_name: None,
            read_attributes: read_attributes.into_iter().map(Into::into).collect(),
            write_attributes: write_attributes.into_iter().map(Into::into).collect(),
        };
        self.state.get_mut().clients.insert(
            (client.user_pool_id.clone(), client.client_id.clone()),
            client,
        );
        self
    }

    /// Makes every call to `operation` fail.
    #[must_use]
    pub fn fail_on(mut self, operation: Operation) -> Self {
        self.state.get_mut().failures.insert(operation);
        self
    }

    /// Every operation invoked so far, in order, including failed ones.
    pub async fn calls(&self) -> Vec<Operation> {
        self.state.lock().await.calls.clone()
    }

    /// Number of write operations invoked so far.
    pub async fn write_calls(&self) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|op| op.is_write())
            .count()
    }

    /// Mutations that were applied successfully, in order.
    pub async fn mutations(&self) -> Vec<Mutation> {
        self.state.lock().await.mutations.clone()
    }

    pub async fn user_pool(&self, user_pool_id: &str) -> Option<UserPool> {
        self.state.lock().await.pools.get(user_pool_id).cloned()
    }

    pub async fn client(&self, user_pool_id: &str, client_id: &str) -> Option<UserPoolClient> {
        self.state
            .lock()
            .await
            .clients
            .get(&(user_pool_id.to_string(), client_id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl ControlPlane for InMemoryControlPlane {
    async fn describe_stack(
        &self,
        stack_name: &str,
    ) -> Result<Option<StackDescription>, ControlPlaneError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::DescribeStack)?;
        Ok(state.stacks.get(stack_name).cloned())
    }

    async fn describe_user_pool(&self, user_pool_id: &str) -> Result<UserPool, ControlPlaneError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::DescribeUserPool)?;
        state.pool(user_pool_id).cloned()
    }

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> Result<UserPoolClient, ControlPlaneError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::DescribeUserPoolClient)?;
        state
            .clients
            .get(&(user_pool_id.to_string(), client_id.to_string()))
            .cloned()
            .ok_or_else(|| {
                ControlPlaneError::api(
                    400,
                    "ResourceNotFoundException",
                    format!("User pool client {client_id} does not exist."),
                )
            })
    }

    async fn add_custom_attributes(
        &self,
        user_pool_id: &str,
        attributes: &[DesiredAttribute],
    ) -> Result<(), ControlPlaneError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::AddCustomAttributes)?;

        let mut names = state.pool(user_pool_id)?.attribute_names();
        for attr in attributes {
            let name = normalize(&attr.name);
            if names.contains(&name) {
                return Err(ControlPlaneError::api(
                    400,
                    "InvalidParameterException",
                    format!("Existing attribute already has name {name}."),
                ));
            }
            names.push(name);
        }

        if let Some(pool) = state.pools.get_mut(user_pool_id) {
            pool.schema_attributes = names
                .into_iter()
                .map(|name| SchemaAttribute { name })
                .collect();
        }
        state.mutations.push(Mutation::AddCustomAttributes {
            user_pool_id: user_pool_id.to_string(),
            attributes: attributes.to_vec(),
        });
        Ok(())
    }

    async fn update_user_pool_client(
        &self,
        request: &UpdateUserPoolClientRequest,
    ) -> Result<(), ControlPlaneError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::UpdateUserPoolClient)?;

        let schema = state.pool(&request.user_pool_id)?.attribute_names();
        for (kind, granted) in [
            ("read", &request.read_attributes),
            ("write", &request.write_attributes),
        ] {
            if granted.iter().any(|name| !schema.contains(name)) {
                return Err(ControlPlaneError::api(
                    400,
                    "InvalidParameterException",
                    format!("Invalid {kind} attributes specified while updating a client"),
                ));
            }
        }

        let key = (request.user_pool_id.clone(), request.client_id.clone());
        let Some(client) = state.clients.get_mut(&key) else {
            return Err(ControlPlaneError::api(
                400,
                "ResourceNotFoundException",
                format!("User pool client {} does not exist.", request.client_id),
            ));
        };
        client.read_attributes = request.read_attributes.clone();
        client.write_attributes = request.write_attributes.clone();

        state
            .mutations
            .push(Mutation::UpdateUserPoolClient(request.clone()));
        Ok(())
    }
}
