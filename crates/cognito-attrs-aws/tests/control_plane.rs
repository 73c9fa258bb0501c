//! AwsControlPlane against a mock AWS endpoint.

use std::fs;

use aws_config::SdkConfig;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::retry::RetryConfig;
use aws_sdk_cognitoidentityprovider::config::Credentials;
use cognito_attrs_aws::{AwsClientConfig, AwsControlPlane};
use cognito_attrs_core::{
    ControlPlane, ControlPlaneError, DesiredAttribute, OutputSource, ReconcileSettings,
    UpdateUserPoolClientRequest, reconcile,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, header, header_exists, header_regex, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STACK_XMLNS: &str = "http://cloudformation.amazonaws.com/doc/2010-05-15/";

fn target(operation: &str) -> String {
    format!("AWSCognitoIdentityProviderService.{operation}")
}

fn client_config(server: &MockServer) -> AwsClientConfig {
    AwsClientConfig::new()
        .with_region("eu-west-1")
        .with_endpoint_url(Url::parse(&server.uri()).unwrap())
}

async fn sdk_config(server: &MockServer) -> SdkConfig {
    client_config(server)
        .loader()
        .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .load()
        .await
}

async fn plane(server: &MockServer) -> AwsControlPlane {
    AwsControlPlane::new(&sdk_config(server).await).unwrap()
}

fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/x-amz-json-1.1")
}

fn xml_response(status: u16, body: String) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "text/xml")
}

fn describe_stacks_xml(outputs: &[(&str, &str)]) -> String {
    let members: String = outputs
        .iter()
        .map(|(key, value)| {
            format!("<member><OutputKey>{key}</OutputKey><OutputValue>{value}</OutputValue></member>")
        })
        .collect();
    format!(
        "<DescribeStacksResponse xmlns=\"{STACK_XMLNS}\"><DescribeStacksResult><Stacks><member>\
         <StackName>orders-dev</StackName>\
         <CreationTime>2024-01-01T00:00:00Z</CreationTime>\
         <StackStatus>CREATE_COMPLETE</StackStatus>\
         <Outputs>{members}</Outputs>\
         </member></Stacks></DescribeStacksResult>\
         <ResponseMetadata><RequestId>req</RequestId></ResponseMetadata></DescribeStacksResponse>"
    )
}

fn stack_error_xml(code: &str, message: &str) -> String {
    format!(
        "<ErrorResponse xmlns=\"{STACK_XMLNS}\"><Error><Type>Sender</Type>\
         <Code>{code}</Code><Message>{message}</Message></Error>\
         <RequestId>req</RequestId></ErrorResponse>"
    )
}

async fn mount_cognito(server: &MockServer, operation: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(header("x-amz-target", target(operation).as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn describe_user_pool_is_signed_json_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("DescribeUserPool").as_str()))
        .and(header("content-type", "application/x-amz-json-1.1"))
        .and(header_regex("authorization", "Credential=AKIDEXAMPLE/"))
        .and(header_exists("x-amz-date"))
        .and(body_json(json!({"UserPoolId": "eu-west-1_abc"})))
        .respond_with(json_response(
            200,
            json!({
                "UserPool": {
                    "Id": "eu-west-1_abc",
                    "Name": "orders",
                    "SchemaAttributes": [
                        {"Name": "email", "AttributeDataType": "String"},
                        {"Name": "custom:age", "AttributeDataType": "Number"}
                    ]
                }
            }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let pool = plane(&server)
        .await
        .describe_user_pool("eu-west-1_abc")
        .await
        .unwrap();

    assert_eq!(pool.attribute_names(), ["email", "custom:age"]);
}

#[tokio::test]
async fn credentials_come_from_a_named_profile() {
    let dir = TempDir::new().unwrap();
    let credentials = dir.path().join("credentials");
    fs::write(
        &credentials,
        "[deploy]\naws_access_key_id = AKIDPROFILE\naws_secret_access_key = profile-secret\n",
    )
    .unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("DescribeUserPool").as_str()))
        .and(header_regex("authorization", "Credential=AKIDPROFILE/"))
        .respond_with(json_response(200, json!({"UserPool": {"Id": "pool"}})))
        .expect(1)
        .mount(&server)
        .await;

    let files = ProfileFiles::builder()
        .with_file(ProfileFileKind::Credentials, credentials.clone())
        .build();
    let sdk_config = client_config(&server)
        .with_profile("deploy")
        .loader()
        .profile_files(files)
        .retry_config(RetryConfig::disabled())
        .load()
        .await;

    let pool = AwsControlPlane::new(&sdk_config)
        .unwrap()
        .describe_user_pool("pool")
        .await
        .unwrap();

    assert_eq!(pool.id, "pool");
}

#[tokio::test]
async fn add_custom_attributes_forwards_schema_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("AddCustomAttributes").as_str()))
        .and(body_json(json!({
            "UserPoolId": "pool",
            "CustomAttributes": [
                {"Name": "shoeSize", "AttributeDataType": "Number", "Mutable": true}
            ]
        })))
        .respond_with(json_response(200, json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let attr = DesiredAttribute::new("shoeSize")
        .with_field("AttributeDataType", "Number")
        .with_field("Mutable", true);

    plane(&server)
        .await
        .add_custom_attributes("pool", &[attr])
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_schema_field_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(json_response(200, json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let attr = DesiredAttribute::new("shoeSize").with_field("Mutable", "yes");

    let err = plane(&server)
        .await
        .add_custom_attributes("pool", &[attr])
        .await
        .unwrap_err();

    assert!(matches!(err, ControlPlaneError::Decode { .. }));
}

#[tokio::test]
async fn update_client_sends_full_lists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("UpdateUserPoolClient").as_str()))
        .and(body_json(json!({
            "UserPoolId": "pool",
            "ClientId": "client",
            "ReadAttributes": ["email", "custom:age"],
            "WriteAttributes": []
        })))
        .respond_with(json_response(200, json!({"UserPoolClient": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateUserPoolClientRequest {
        client_id: "client".into(),
        user_pool_id: "pool".into(),
        read_attributes: vec!["email".into(), "custom:age".into()],
        write_attributes: vec![],
    };
    plane(&server)
        .await
        .update_user_pool_client(&request)
        .await
        .unwrap();
}

#[tokio::test]
async fn cognito_errors_surface_code_and_message() {
    let server = MockServer::start().await;
    mount_cognito(
        &server,
        "DescribeUserPoolClient",
        json_response(
            400,
            json!({
                "__type": "ResourceNotFoundException",
                "message": "User pool client client does not exist."
            }),
        ),
    )
    .await;

    let err = plane(&server)
        .await
        .describe_user_pool_client("pool", "client")
        .await
        .unwrap_err();

    match err {
        ControlPlaneError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, "ResourceNotFoundException");
            assert_eq!(message, "User pool client client does not exist.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn describe_stack_reads_outputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("Action=DescribeStacks"))
        .and(body_string_contains("StackName=orders-dev"))
        .respond_with(xml_response(
            200,
            describe_stacks_xml(&[("UserPoolId", "pool"), ("UserPoolClientId", "client")]),
        ))
        .mount(&server)
        .await;

    let stack = plane(&server)
        .await
        .describe_stack("orders-dev")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(stack.stack_name, "orders-dev");
    assert_eq!(stack.outputs().len(), 2);
    assert_eq!(stack.outputs()[1].output_value, "client");
}

#[tokio::test]
async fn missing_stack_describes_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("Action=DescribeStacks"))
        .respond_with(xml_response(
            400,
            stack_error_xml("ValidationError", "Stack with id orders-dev does not exist"),
        ))
        .mount(&server)
        .await;

    let stack = plane(&server).await.describe_stack("orders-dev").await.unwrap();

    assert!(stack.is_none());
}

#[tokio::test]
async fn other_stack_errors_propagate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(xml_response(403, stack_error_xml("AccessDenied", "not allowed")))
        .mount(&server)
        .await;

    let err = plane(&server)
        .await
        .describe_stack("orders-dev")
        .await
        .unwrap_err();

    assert!(matches!(err, ControlPlaneError::Api { status: 403, .. }));
    assert!(err.to_string().contains("AccessDenied"));
}

#[tokio::test]
async fn full_run_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("Action=DescribeStacks"))
        .respond_with(xml_response(
            200,
            describe_stacks_xml(&[("UserPoolId", "pool"), ("UserPoolClientId", "client")]),
        ))
        .mount(&server)
        .await;
    mount_cognito(
        &server,
        "DescribeUserPool",
        json_response(
            200,
            json!({"UserPool": {"Id": "pool", "SchemaAttributes": [{"Name": "email"}]}}),
        ),
    )
    .await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("AddCustomAttributes").as_str()))
        .respond_with(json_response(200, json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_cognito(
        &server,
        "DescribeUserPoolClient",
        json_response(
            200,
            json!({
                "UserPoolClient": {
                    "ClientId": "client",
                    "UserPoolId": "pool",
                    "ReadAttributes": ["email"],
                    "WriteAttributes": []
                }
            }),
        ),
    )
    .await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("UpdateUserPoolClient").as_str()))
        .and(body_json(json!({
            "UserPoolId": "pool",
            "ClientId": "client",
            "ReadAttributes": ["email", "custom:age"],
            "WriteAttributes": ["custom:age"]
        })))
        .respond_with(json_response(200, json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ReconcileSettings {
        user_pool_id_output_key: "UserPoolId".into(),
        user_pool_client_id_output_key: Some("UserPoolClientId".into()),
        custom_attributes: vec![DesiredAttribute::new("age")],
    };
    let plane = plane(&server).await;
    let report = reconcile(&plane, &settings, OutputSource::Stack("orders-dev"))
        .await
        .unwrap();

    assert_eq!(report.user_pool_id, "pool");
    assert_eq!(report.grants.read, ["custom:age"]);
    assert_eq!(report.grants.write, ["custom:age"]);
}
