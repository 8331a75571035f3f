//! Identity provider management tests.

use ic_client::{api, ClientError};
use ic_model::idp::{
    ClaimConfig, ClaimMapping, ClaimRef, FederatedAuthenticator, JitProvisioning, OutboundConnector, Property,
    RoleMapping, RoleMappings,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestEnv, IDPS};

fn google() -> serde_json::Value {
    json!({
        "id": "idp-1",
        "name": "Google",
        "description": "Social login",
        "isEnabled": true,
        "image": "google.png"
    })
}

#[tokio::test]
async fn test_list_forwards_paging_and_filter() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(IDPS))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "10"))
        .and(query_param("filter", "name sw Goo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResults": 11,
            "startIndex": 11,
            "count": 1,
            "identityProviders": [google()]
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let list = api::idp::list(&client, Some(5), Some(10), Some("name sw Goo"), None).await?;

    assert_eq!(list.total_results, 11);
    assert_eq!(list.identity_providers.len(), 1);
    assert_eq!(list.identity_providers[0].name, "Google");
    Ok(())
}

#[tokio::test]
async fn test_update_replaces_every_attribute_but_id() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{IDPS}/idp-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(google()))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let updated = api::idp::update(&client, &google()).await?;
    assert_eq!(updated.id, "idp-1");

    let bodies = env.bodies("PATCH", &format!("{IDPS}/idp-1")).await;
    let operations = bodies[0].as_array().expect("operation list");
    assert_eq!(operations.len(), 4);
    assert!(operations.iter().all(|op| op["operation"] == "REPLACE"));
    assert!(operations.iter().all(|op| op["path"] != "/id"));
    let name = operations
        .iter()
        .find(|op| op["path"] == "/name")
        .expect("name operation");
    assert_eq!(name["value"], "Google");
    Ok(())
}

#[tokio::test]
async fn test_update_without_id_is_rejected_locally() {
    let env = TestEnv::new().await;
    let client = env.client();

    let err = api::idp::update(&client, &json!({ "name": "Google" }))
        .await
        .expect_err("no id");
    assert!(matches!(err, ClientError::InvalidRequest(_)));

    let err = api::idp::update(&client, &json!(["idp-1"])).await.expect_err("not an object");
    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert!(env.bodies("PATCH", IDPS).await.is_empty());
}

#[tokio::test]
async fn test_create_and_delete() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("POST"))
        .and(path(IDPS))
        .respond_with(ResponseTemplate::new(201).set_body_json(google()))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{IDPS}/idp-1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let created = api::idp::create(&client, &json!({ "name": "Google" })).await?;
    assert_eq!(created.id, "idp-1");
    api::idp::delete(&client, "idp-1").await?;
    Ok(())
}

#[tokio::test]
async fn test_authenticator_update_moves_id_into_path() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let route = format!("{IDPS}/idp-1/federated-authenticators/R29vZ2xl");
    Mock::given(method("PUT"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authenticatorId": "R29vZ2xl",
            "name": "GoogleOIDCAuthenticator",
            "isEnabled": true,
            "isDefault": true,
            "properties": [{ "key": "ClientId", "value": "abc" }]
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let authenticator = FederatedAuthenticator {
        authenticator_id: "R29vZ2xl".to_string(),
        name: "GoogleOIDCAuthenticator".to_string(),
        is_enabled: true,
        is_default: true,
        properties: vec![Property {
            key: "ClientId".to_string(),
            value: "abc".to_string(),
        }],
    };

    let client = env.client();
    let updated = api::idp::update_federated_authenticator(&client, "idp-1", &authenticator).await?;
    assert_eq!(updated.properties.len(), 1);

    let bodies = env.bodies("PUT", &route).await;
    assert!(bodies[0].get("authenticatorId").is_none());
    assert_eq!(bodies[0]["properties"][0]["key"], "ClientId");
    Ok(())
}

#[tokio::test]
async fn test_role_mappings_are_replaced() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let route = format!("{IDPS}/idp-1/roles");
    let mappings = RoleMappings {
        mappings: vec![RoleMapping {
            idp_role: "google-admin".to_string(),
            local_role: "admin".to_string(),
        }],
        outbound_provisioning_roles: None,
    };
    Mock::given(method("PUT"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mappings": [{ "idpRole": "google-admin", "localRole": "admin" }]
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let saved = api::idp::update_role_mappings(&client, "idp-1", &mappings).await?;
    assert_eq!(saved.mappings, mappings.mappings);
    Ok(())
}

#[tokio::test]
async fn test_authenticator_and_connector_metadata() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.mock_get(
        &format!("{IDPS}/meta/federated-authenticators"),
        json!([
            { "authenticatorId": "R29vZ2xl", "name": "GoogleOIDCAuthenticator", "displayName": "Google" },
            { "authenticatorId": "U0FNTA", "name": "SAMLSSOAuthenticator", "displayName": "SAML" }
        ]),
    )
    .await;
    env.mock_get(
        &format!("{IDPS}/meta/federated-authenticators/R29vZ2xl"),
        json!({
            "authenticatorId": "R29vZ2xl",
            "name": "GoogleOIDCAuthenticator",
            "displayName": "Google",
            "properties": [
                { "key": "ClientId", "displayName": "Client Id", "type": "STRING", "isMandatory": true },
                { "key": "ClientSecret", "displayName": "Client Secret", "type": "STRING", "isConfidential": true }
            ]
        }),
    )
    .await;
    env.mock_get(
        &format!("{IDPS}/meta/outbound-provisioning-connectors"),
        json!([{ "connectorId": "c2NpbQ", "name": "scim", "displayName": "SCIM" }]),
    )
    .await;
    env.mock_get(
        &format!("{IDPS}/meta/outbound-provisioning-connectors/c2NpbQ"),
        json!({
            "connectorId": "c2NpbQ",
            "name": "scim",
            "displayName": "SCIM",
            "properties": [{ "key": "scim-user-ep", "displayName": "User Endpoint", "isMandatory": true }]
        }),
    )
    .await;

    let client = env.client();
    let authenticators = api::idp::list_federated_authenticator_meta(&client).await?;
    assert_eq!(authenticators.len(), 2);
    assert!(authenticators.iter().all(|a| a.properties.is_empty()));

    let google = api::idp::get_federated_authenticator_meta(&client, "R29vZ2xl").await?;
    let secret = google
        .properties
        .iter()
        .find(|p| p.key == "ClientSecret")
        .expect("secret property");
    assert!(secret.is_confidential);
    assert!(!secret.is_mandatory);

    let connectors = api::idp::list_outbound_connector_meta(&client).await?;
    assert_eq!(connectors[0].display_name, "SCIM");
    let scim = api::idp::get_outbound_connector_meta(&client, "c2NpbQ").await?;
    assert_eq!(scim.properties[0].key, "scim-user-ep");
    Ok(())
}

#[tokio::test]
async fn test_metadata_for_unknown_authenticator_is_an_api_error() {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .and(path(format!("{IDPS}/meta/federated-authenticators/bm9wZQ")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "code": "IDP-60002" })))
        .mount(&env.server)
        .await;

    let client = env.client();
    let err = api::idp::get_federated_authenticator_meta(&client, "bm9wZQ")
        .await
        .expect_err("unknown authenticator");
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_connector_update_moves_id_into_path() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let route = format!("{IDPS}/idp-1/provisioning/outbound-connectors/c2NpbQ");
    let stored = json!({
        "connectorId": "c2NpbQ",
        "name": "scim",
        "isEnabled": true,
        "isDefault": false,
        "blockingEnabled": true,
        "rulesEnabled": false,
        "properties": [{ "key": "scim-user-ep", "value": "https://hr.example.com/scim2/Users" }]
    });
    env.mock_get(&route, stored.clone()).await;
    Mock::given(method("PUT"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let mut connector: OutboundConnector = api::idp::get_outbound_connector(&client, "idp-1", "c2NpbQ").await?;
    assert!(connector.blocking_enabled);
    connector.is_default = true;
    let updated = api::idp::update_outbound_connector(&client, "idp-1", &connector).await?;
    assert_eq!(updated.connector_id, "c2NpbQ");

    let bodies = env.bodies("PUT", &route).await;
    assert!(bodies[0].get("connectorId").is_none());
    assert_eq!(bodies[0]["isDefault"], true);
    assert_eq!(bodies[0]["properties"][0]["key"], "scim-user-ep");
    Ok(())
}

#[tokio::test]
async fn test_jit_provisioning_is_replaced() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let route = format!("{IDPS}/idp-1/provisioning/jit");
    let jit = JitProvisioning {
        is_enabled: true,
        scheme: "PROVISION_SILENTLY".to_string(),
        userstore: "PRIMARY".to_string(),
        associate_local_user: None,
    };
    Mock::given(method("PUT"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&jit))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let saved = api::idp::update_jit_provisioning(&client, "idp-1", &jit).await?;
    assert_eq!(saved, jit);

    let bodies = env.bodies("PUT", &route).await;
    assert_eq!(
        bodies[0],
        json!({ "isEnabled": true, "scheme": "PROVISION_SILENTLY", "userstore": "PRIMARY" })
    );
    Ok(())
}

#[tokio::test]
async fn test_claims_are_replaced() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let route = format!("{IDPS}/idp-1/claims");
    let claims = ClaimConfig {
        user_id_claim: Some(ClaimRef {
            uri: "sub".to_string(),
            ..ClaimRef::default()
        }),
        role_claim: None,
        mappings: vec![ClaimMapping {
            idp_claim: "email".to_string(),
            local_claim: ClaimRef {
                uri: "http://wso2.org/claims/emailaddress".to_string(),
                ..ClaimRef::default()
            },
        }],
        provisioning_claims: Vec::new(),
    };
    Mock::given(method("PUT"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&claims))
        .expect(1)
        .mount(&env.server)
        .await;

    let client = env.client();
    let saved = api::idp::update_claims(&client, "idp-1", &claims).await?;
    assert_eq!(saved, claims);

    let bodies = env.bodies("PUT", &route).await;
    assert_eq!(bodies[0]["userIdClaim"]["uri"], "sub");
    assert!(bodies[0].get("roleClaim").is_none());
    assert_eq!(bodies[0]["mappings"][0]["localClaim"]["uri"], "http://wso2.org/claims/emailaddress");
    Ok(())
}

#[tokio::test]
async fn test_claims_update_rejects_unexpected_status() {
    let env = TestEnv::new().await;
    Mock::given(method("PUT"))
        .and(path(format!("{IDPS}/idp-1/claims")))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .mount(&env.server)
        .await;

    let client = env.client();
    let err = api::idp::update_claims(&client, "idp-1", &ClaimConfig::default())
        .await
        .expect_err("202 is not 200");
    assert!(matches!(err, ClientError::UnexpectedStatus { .. }));
}
