//! HTTP client for the identity server.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::context::{ConsoleContext, Credentials};
use crate::error::{ApiErrorBody, ClientError, ClientResult};

/// API client for making requests to the identity server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    context: ConsoleContext,
}

impl ApiClient {
    /// Creates a new API client for a context.
    pub fn new(context: ConsoleContext) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(context.timeout)
            .user_agent(concat!("identity-console/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, context })
    }

    /// Returns the context this client was built from.
    #[must_use]
    pub fn context(&self) -> &ConsoleContext {
        &self.context
    }

    /// Makes a GET request with query parameters, expecting `200 OK`.
    ///
    /// Parameters with a `None` value are left out.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, Option<String>)],
    ) -> ClientResult<T> {
        let url = with_query(url, query);
        let response = self.request(Method::GET, &url).send().await?;
        handle_response(response, Some(StatusCode::OK)).await
    }

    /// Makes a POST request and decodes the body.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, url).json(body).send().await?;
        handle_response(response, None).await
    }

    /// Makes a POST request that must answer `201 Created`.
    pub async fn create<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, url).json(body).send().await?;
        handle_response(response, Some(StatusCode::CREATED)).await
    }

    /// Makes a PATCH request and decodes the body.
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PATCH, url).json(body).send().await?;
        handle_response(response, Some(StatusCode::OK)).await
    }

    /// Makes a PATCH request, ignoring the body.
    pub async fn patch_no_response<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<()> {
        let response = self.request(Method::PATCH, url).json(body).send().await?;
        handle_empty_response(response, None).await
    }

    /// Makes a PUT request and decodes the body.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, url).json(body).send().await?;
        handle_response(response, Some(StatusCode::OK)).await
    }

    /// Makes a DELETE request.
    ///
    /// `expected` pins the success status when the endpoint documents one.
    pub async fn delete(&self, url: &str, expected: Option<StatusCode>) -> ClientResult<()> {
        let response = self.request(Method::DELETE, url).send().await?;
        handle_empty_response(response, expected).await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "sending request");
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.context.credentials {
            Credentials::None => builder,
            Credentials::Basic { username, password } => builder.basic_auth(username, Some(password)),
            Credentials::Bearer(token) => builder.bearer_auth(token),
        }
    }
}

/// Appends URL-encoded query parameters, skipping absent ones.
fn with_query(url: &str, query: &[(&str, Option<String>)]) -> String {
    let params: Vec<String> = query
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();
    if params.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, params.join("&"))
    }
}

/// Handles a response with a body.
async fn handle_response<T: DeserializeOwned>(
    response: Response,
    expected: Option<StatusCode>,
) -> ClientResult<T> {
    let response = check_status(response, expected).await?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Handles a response without a body.
async fn handle_empty_response(response: Response, expected: Option<StatusCode>) -> ClientResult<()> {
    check_status(response, expected).await.map(|_| ())
}

async fn check_status(response: Response, expected: Option<StatusCode>) -> ClientResult<Response> {
    let status = response.status();
    debug!(status = status.as_u16(), url = %response.url(), "received response");

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            body: ApiErrorBody::parse(&text),
        });
    }
    match expected {
        Some(expected) if expected != status => Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            expected: expected.as_u16(),
        }),
        _ => Ok(response),
    }
}
