//! Userstore management endpoint.

use ic_model::{UserstoreDetail, UserstoreSummary};

use crate::client::ApiClient;
use crate::error::ClientResult;

/// Lists the configured secondary userstores.
pub async fn list(client: &ApiClient) -> ClientResult<Vec<UserstoreSummary>> {
    client.get(&client.context().endpoints.userstores, &[]).await
}

/// Gets a userstore with its configuration properties.
pub async fn get(client: &ApiClient, id: &str) -> ClientResult<UserstoreDetail> {
    let url = format!("{}/{}", client.context().endpoints.userstores, id);
    client.get(&url, &[]).await
}
