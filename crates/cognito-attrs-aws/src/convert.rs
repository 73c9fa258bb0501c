//! Conversions between the SDK shapes and the core model.

use aws_sdk_cloudformation::types::{Output, Stack};
use aws_sdk_cognitoidentityprovider::error::{
    DisplayErrorContext, ProvideErrorMetadata, SdkError,
};
use aws_sdk_cognitoidentityprovider::types::{
    AttributeDataType, NumberAttributeConstraintsType, SchemaAttributeType,
    StringAttributeConstraintsType, UserPoolClientType, UserPoolType,
};
use cognito_attrs_core::{
    ControlPlaneError, DesiredAttribute, SchemaAttribute, StackDescription, StackOutput, UserPool,
    UserPoolClient,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) const ADD_CUSTOM_ATTRIBUTES: &str = "AddCustomAttributes";

/// Schema fields accepted next to `Name`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct SchemaFields {
    attribute_data_type: Option<String>,
    developer_only_attribute: Option<bool>,
    mutable: Option<bool>,
    required: Option<bool>,
    number_attribute_constraints: Option<NumberConstraints>,
    string_attribute_constraints: Option<StringConstraints>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct NumberConstraints {
    #[serde(default, deserialize_with = "scalar_string")]
    min_value: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    max_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct StringConstraints {
    #[serde(default, deserialize_with = "scalar_string")]
    min_length: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    max_length: Option<String>,
}

/// The API takes constraint bounds as strings; config files often carry numbers.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// Builds the SDK schema entry for a desired attribute.
///
/// The name is sent as given; the service adds the `custom:` prefix itself.
pub(crate) fn schema_attribute(
    attr: &DesiredAttribute,
) -> Result<SchemaAttributeType, ControlPlaneError> {
    let fields: SchemaFields = serde_json::from_value(Value::Object(attr.schema.clone()))
        .map_err(|e| ControlPlaneError::decode(ADD_CUSTOM_ATTRIBUTES, format!("{}: {e}", attr.name)))?;

    let number = fields.number_attribute_constraints.map(|c| {
        NumberAttributeConstraintsType::builder()
            .set_min_value(c.min_value)
            .set_max_value(c.max_value)
            .build()
    });
    let string = fields.string_attribute_constraints.map(|c| {
        StringAttributeConstraintsType::builder()
            .set_min_length(c.min_length)
            .set_max_length(c.max_length)
            .build()
    });

    Ok(SchemaAttributeType::builder()
        .name(&attr.name)
        .set_attribute_data_type(fields.attribute_data_type.as_deref().map(AttributeDataType::from))
        .set_developer_only_attribute(fields.developer_only_attribute)
        .set_mutable(fields.mutable)
        .set_required(fields.required)
        .set_number_attribute_constraints(number)
        .set_string_attribute_constraints(string)
        .build())
}

pub(crate) fn user_pool(pool: UserPoolType) -> UserPool {
    UserPool {
        id: pool.id.unwrap_or_default(),
        schema_attributes: pool
            .schema_attributes
            .unwrap_or_default()
            .into_iter()
            .map(|attr| SchemaAttribute {
                name: attr.name.unwrap_or_default(),
            })
            .collect(),
    }
}

pub(crate) fn user_pool_client(client: UserPoolClientType) -> UserPoolClient {
    UserPoolClient {
        client_id: client.client_id.unwrap_or_default(),
        user_pool_id: client.user_pool_id.unwrap_or_default(),
        client_name: client.client_name,
        read_attributes: client.read_attributes.unwrap_or_default(),
        write_attributes: client.write_attributes.unwrap_or_default(),
    }
}

/// Keeps the distinction between a stack with no outputs (`None`) and one
/// with an empty list.
pub(crate) fn stack_description(stack_name: &str, stack: Stack) -> StackDescription {
    StackDescription {
        stack_name: stack_name.to_string(),
        outputs: stack
            .outputs
            .map(|outputs| outputs.into_iter().filter_map(stack_output).collect()),
    }
}

fn stack_output(output: Output) -> Option<StackOutput> {
    Some(StackOutput {
        output_key: output.output_key?,
        output_value: output.output_value.unwrap_or_default(),
    })
}

/// Maps an SDK failure onto the control-plane error classes.
///
/// Service responses keep their HTTP status, code and message. Dispatch,
/// timeout and construction failures become transport errors.
pub(crate) fn sdk_error<E>(operation: &str, err: SdkError<E>) -> ControlPlaneError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err.as_service_error() {
        Some(service) => ControlPlaneError::api(
            err.raw_response().map_or(0, |raw| raw.status().as_u16()),
            service.code().unwrap_or("Unknown"),
            service.message().unwrap_or_default(),
        ),
        None => ControlPlaneError::transport(format!("{operation}: {}", DisplayErrorContext(&err))),
    }
}

/// CloudFormation reports an unknown stack as a `ValidationError`.
pub(crate) fn is_missing_stack(err: &ControlPlaneError) -> bool {
    matches!(
        err,
        ControlPlaneError::Api { code, message, .. }
            if code == "ValidationError" && message.contains("does not exist")
    )
}
