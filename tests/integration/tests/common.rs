//! Common test utilities and fixtures.

#![allow(dead_code)]

use ic_client::{ApiClient, ConsoleContext, Credentials};
use ic_sheet::reader::{read_bytes, SourceFormat};
use ic_sheet::SheetRow;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERS: &str = "/scim2/Users";
pub const GROUPS: &str = "/scim2/Groups";
pub const ROLES: &str = "/scim2/Roles";
pub const IDPS: &str = "/api/server/v1/identity-providers";

/// Mock identity server for the super tenant.
pub struct TestEnv {
    pub server: MockServer,
}

impl TestEnv {
    /// Starts an empty mock server.
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client configured with basic credentials against the mock server.
    pub fn client(&self) -> ApiClient {
        let ctx = ConsoleContext::new(&self.server.uri(), "carbon.super").with_credentials(Credentials::Basic {
            username: "admin".to_string(),
            password: "admin".to_string(),
        });
        ApiClient::new(ctx).expect("client")
    }

    /// Mounts `GET path` answering 200 with `body`.
    pub async fn mock_get(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every request received on `route` with `verb`.
    pub async fn bodies(&self, verb: &str, route: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == route)
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }
}

/// SCIM list envelope around `resources`.
pub fn list_response(resources: Vec<Value>) -> Value {
    json!({
        "totalResults": resources.len(),
        "startIndex": 1,
        "itemsPerPage": resources.len(),
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
        "Resources": resources,
    })
}

/// A user with an object-shaped email.
pub fn user(id: &str, user_name: &str) -> Value {
    json!({
        "id": id,
        "userName": user_name,
        "name": { "givenName": "Given", "familyName": "Family" },
        "emails": [{ "value": format!("{id}@example.com"), "primary": true }],
        "meta": {
            "created": "2024-03-01T08:30:00.000Z",
            "lastModified": "2024-03-02T10:00:00.000Z",
            "resourceType": "User"
        }
    })
}

pub fn users(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|n| user(&format!("u-{n}"), &format!("user{n}")))
        .collect()
}

pub fn role(id: &str, display_name: &str) -> Value {
    json!({ "id": id, "displayName": display_name })
}

pub fn group(id: &str, display_name: &str) -> Value {
    json!({ "id": id, "displayName": display_name })
}

/// Parses CSV text into sheet rows.
pub fn csv_rows(text: &str) -> Vec<SheetRow> {
    read_bytes(text.as_bytes(), SourceFormat::Csv).expect("csv rows")
}
