//! Remote client facade for the Aha! GraphQL and REST APIs.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Credentials for a REST call, resolved per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestAuth<'a> {
    pub domain: &'a str,
    pub api_token: &'a str,
}

impl RestAuth<'_> {
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("https://{}.aha.io{path}", self.domain)
    }
}

/// Operations the tool handlers need from the remote service.
#[async_trait]
pub trait AhaApi: Send + Sync + 'static {
    /// Runs a GraphQL document and returns its `data` object.
    async fn graphql(&self, query: &str, variables: Value) -> ClientResult<Value>;

    /// Issues a `GET` against a REST path. Only the given pairs are sent.
    async fn rest_get(
        &self,
        auth: RestAuth<'_>,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<Value>;

    /// Issues a `POST` with a JSON body against a REST path.
    async fn rest_post(&self, auth: RestAuth<'_>, path: &str, body: &Value) -> ClientResult<Value>;
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphQlResponse {
    /// A non-empty `errors` array wins over any partial `data`.
    fn into_data(self) -> ClientResult<Value> {
        if !self.errors.is_empty() {
            return Err(ClientError::GraphQl(
                self.errors.into_iter().map(|err| err.message).collect(),
            ));
        }
        self.data.ok_or(ClientError::MissingData)
    }
}

/// reqwest-backed [`AhaApi`] bound to one Aha! account.
#[derive(Debug, Clone)]
pub struct AhaClient {
    http: reqwest::Client,
    graphql_url: String,
    api_token: String,
}

impl AhaClient {
    /// Builds a client for `https://{domain}.aha.io`.
    ///
    /// # Errors
    /// Returns `ClientError` if the HTTP client cannot be constructed.
    pub fn new(domain: &str, api_token: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("aha-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            graphql_url: format!("https://{domain}.aha.io/api/v2/graphql"),
            api_token: api_token.into(),
        })
    }

    #[must_use]
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    async fn read_json(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ClientError::Status { status, body });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AhaApi for AhaClient {
    async fn graphql(&self, query: &str, variables: Value) -> ClientResult<Value> {
        debug!(url = %self.graphql_url, "sending GraphQL request");
        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(&self.api_token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;
        let body: GraphQlResponse = serde_json::from_value(Self::read_json(response).await?)?;
        body.into_data()
    }

    async fn rest_get(
        &self,
        auth: RestAuth<'_>,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<Value> {
        let url = auth.url(path);
        debug!(%url, params = query.len(), "sending REST GET");
        let response = self
            .http
            .get(url)
            .bearer_auth(auth.api_token)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .query(query)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn rest_post(&self, auth: RestAuth<'_>, path: &str, body: &Value) -> ClientResult<Value> {
        let url = auth.url(path);
        debug!(%url, "sending REST POST");
        let response = self
            .http
            .post(url)
            .bearer_auth(auth.api_token)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
