//! SCIM users endpoint.

use ic_model::{CreateUserRequest, ListResponse, SearchRequest, User};
use reqwest::StatusCode;

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Lists users.
///
/// `count` and `start_index` are passed through as-is; callers doing
/// over-fetch pagination compute them with [`crate::PageRequest`].
pub async fn list(
    client: &ApiClient,
    count: usize,
    start_index: usize,
    filter: Option<&str>,
    attributes: Option<&str>,
    domain: Option<&str>,
) -> ClientResult<ListResponse<User>> {
    let url = &client.context().endpoints.users;
    client
        .get(
            url,
            &[
                ("count", Some(count.to_string())),
                ("startIndex", Some(start_index.to_string())),
                ("filter", filter.map(str::to_string)),
                ("attributes", attributes.map(str::to_string)),
                ("domain", domain.map(str::to_string)),
            ],
        )
        .await
}

/// Searches users with a SCIM filter.
pub async fn search(client: &ApiClient, request: &SearchRequest) -> ClientResult<ListResponse<User>> {
    let url = format!("{}/.search", client.context().endpoints.users);
    client.post(&url, request).await
}

/// Gets a user by id.
pub async fn get(client: &ApiClient, id: &str) -> ClientResult<User> {
    let url = format!("{}/{}", client.context().endpoints.users, id);
    client.get(&url, &[]).await
}

/// Creates a user.
pub async fn create(client: &ApiClient, request: &CreateUserRequest) -> ClientResult<User> {
    client.create(&client.context().endpoints.users, request).await
}

/// Deletes a user.
pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
    let url = format!("{}/{}", client.context().endpoints.users, id);
    client.delete(&url, Some(StatusCode::NO_CONTENT)).await
}
