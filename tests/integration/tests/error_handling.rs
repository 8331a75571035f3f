//! Error classification across real responses.

use ic_client::notice::{GENERIC_FAILURE, REAUTHENTICATE};
use ic_client::{api, classify, AlertLevel, ApiClient, ClientError, ConsoleContext, Operation};
use ic_model::CreateRoleRequest;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestEnv, ROLES, USERS};

#[tokio::test]
async fn test_server_detail_is_surfaced_verbatim() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("POST"))
        .and(path(ROLES))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "detail": "Role name: auditor already exists in the system.",
            "status": "409"
        })))
        .mount(&env.server)
        .await;

    let client = env.client();
    let err = api::roles::create(&client, &CreateRoleRequest::new("auditor"))
        .await
        .expect_err("conflict");

    assert_eq!(err.status(), Some(409));
    let notice = classify(&err, Operation::CreateRole);
    assert_eq!(notice.level, AlertLevel::Error);
    assert_eq!(notice.message, "Error while creating the role");
    assert_eq!(notice.description, "Role name: auditor already exists in the system.");
    Ok(())
}

#[tokio::test]
async fn test_management_api_description_is_surfaced() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("DELETE"))
        .and(path("/api/server/v1/identity-providers/idp-9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "IDP-60002",
            "message": "Resource not found.",
            "description": "Unable to find a resource matching the provided identity provider identifier idp-9."
        })))
        .mount(&env.server)
        .await;

    let client = env.client();
    let err = api::idp::delete(&client, "idp-9").await.expect_err("missing");
    let notice = classify(&err, Operation::ManageIdentityProvider);
    assert!(notice.description.starts_with("Unable to find a resource"));
    Ok(())
}

#[tokio::test]
async fn test_unexplained_failure_is_generic() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&env.server)
        .await;

    let client = env.client();
    let err = api::users::list(&client, 11, 1, None, None, None)
        .await
        .expect_err("server error");

    assert!(matches!(err, ClientError::Api { status: 500, body: None }));
    assert_eq!(classify(&err, Operation::FetchUsers).description, GENERIC_FAILURE);
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_asks_to_sign_in_again() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(ROLES))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Authorization failure" })))
        .mount(&env.server)
        .await;

    let client = env.client();
    let err = api::roles::list(&client, None).await.expect_err("unauthorized");
    assert_eq!(classify(&err, Operation::FetchRoles).description, REAUTHENTICATE);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_asks_to_sign_in_again() -> anyhow::Result<()> {
    let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let uri = format!("http://127.0.0.1:{port}");

    let client = ApiClient::new(ConsoleContext::new(&uri, "carbon.super"))?;
    let err = api::groups::list(&client, None).await.expect_err("no server");

    assert!(err.is_transport());
    assert_eq!(classify(&err, Operation::FetchGroups).description, REAUTHENTICATE);
    Ok(())
}

#[tokio::test]
async fn test_wrong_success_status_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{USERS}/u-1")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&env.server)
        .await;

    let client = env.client();
    let err = api::users::delete(&client, "u-1").await.expect_err("200 instead of 204");
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus {
            status: 200,
            expected: 204
        }
    ));
    Ok(())
}
