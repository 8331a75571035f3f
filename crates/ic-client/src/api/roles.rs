//! SCIM roles endpoint.

use ic_model::{CreateRoleRequest, ListResponse, PatchRequest, Role, SearchRequest};
use reqwest::StatusCode;

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Lists every role, optionally restricted to a userstore.
pub async fn list(client: &ApiClient, domain: Option<&str>) -> ClientResult<ListResponse<Role>> {
    client
        .get(
            &client.context().endpoints.roles,
            &[("domain", domain.map(str::to_string))],
        )
        .await
}

/// Searches roles with a SCIM filter.
pub async fn search(client: &ApiClient, request: &SearchRequest) -> ClientResult<ListResponse<Role>> {
    let url = format!("{}/.search", client.context().endpoints.roles);
    client.post(&url, request).await
}

/// Gets a role by id, including its users, groups and permissions.
pub async fn get(client: &ApiClient, id: &str) -> ClientResult<Role> {
    let url = format!("{}/{}", client.context().endpoints.roles, id);
    client.get(&url, &[]).await
}

/// Creates a role.
pub async fn create(client: &ApiClient, request: &CreateRoleRequest) -> ClientResult<Role> {
    client.create(&client.context().endpoints.roles, request).await
}

/// Applies a patch to a role, e.g. [`PatchRequest::add_group`].
pub async fn patch(client: &ApiClient, id: &str, request: &PatchRequest) -> ClientResult<()> {
    let url = format!("{}/{}", client.context().endpoints.roles, id);
    client.patch_no_response(&url, request).await
}

/// Deletes a role.
pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
    let url = format!("{}/{}", client.context().endpoints.roles, id);
    client.delete(&url, Some(StatusCode::NO_CONTENT)).await
}
