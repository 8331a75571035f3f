//! SCIM groups endpoint.

use ic_model::{CreateGroupRequest, Group, ListResponse, PatchRequest, SearchRequest};
use reqwest::StatusCode;

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Lists every group, optionally restricted to a userstore.
pub async fn list(client: &ApiClient, domain: Option<&str>) -> ClientResult<ListResponse<Group>> {
    client
        .get(
            &client.context().endpoints.groups,
            &[("domain", domain.map(str::to_string))],
        )
        .await
}

/// Searches groups with a SCIM filter.
pub async fn search(client: &ApiClient, request: &SearchRequest) -> ClientResult<ListResponse<Group>> {
    let url = format!("{}/.search", client.context().endpoints.groups);
    client.post(&url, request).await
}

/// Gets a group by id.
pub async fn get(client: &ApiClient, id: &str) -> ClientResult<Group> {
    let url = format!("{}/{}", client.context().endpoints.groups, id);
    client.get(&url, &[]).await
}

/// Creates a group.
pub async fn create(client: &ApiClient, request: &CreateGroupRequest) -> ClientResult<Group> {
    client.create(&client.context().endpoints.groups, request).await
}

/// Applies a patch to a group.
pub async fn patch(client: &ApiClient, id: &str, request: &PatchRequest) -> ClientResult<()> {
    let url = format!("{}/{}", client.context().endpoints.groups, id);
    client.patch_no_response(&url, request).await
}

/// Deletes a group.
pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
    let url = format!("{}/{}", client.context().endpoints.groups, id);
    client.delete(&url, Some(StatusCode::NO_CONTENT)).await
}
