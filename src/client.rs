mod credentials;

pub use self::credentials::Credentials;

use crate::{config::Config, error::Error as TenableError};
use anyhow::{Context, anyhow, bail};
use reqwest::{
    Method, Request,
    header::{CONTENT_TYPE, HeaderValue},
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

/// Name of the header that carries API credentials.
pub const API_KEYS_HEADER: &str = "X-ApiKeys";

/// Builds and executes authenticated requests against the fixed API origin. The client holds no
/// mutable state and can be shared between concurrent callers.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    credentials: Credentials,
    http_client: ClientWithMiddleware,
}

impl Client {
    /// Creates a client with the pre-configured HTTP client.
    pub fn new(base_url: Url, credentials: Credentials, http_client: ClientWithMiddleware) -> Self {
        Self {
            base_url,
            credentials,
            http_client,
        }
    }

    /// Creates a client with the HTTP client built from the config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http.client.timeout)
            .pool_idle_timeout(config.http.client.pool_idle_timeout)
            .connection_verbose(config.http.client.verbose)
            .build()
            .context("Cannot build HTTP client.")?;

        Ok(Self::new(
            config.api.base_url.clone(),
            config.credentials.clone(),
            ClientBuilder::new(http_client)
                .with(TracingMiddleware::default())
                .build(),
        ))
    }

    /// Returns the absolute URL for the path relative to the API origin.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Builds an authenticated request without a body.
    pub fn build_request(&self, method: Method, path: &str) -> anyhow::Result<Request> {
        self.request_builder(method, path)?
            .build()
            .with_context(|| format!("Cannot build request ({path})."))
    }

    /// Builds an authenticated request with the JSON-serialized body.
    pub fn build_json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> anyhow::Result<Request> {
        self.request_builder(method, path)?
            .json(body)
            .build()
            .with_context(|| format!("Cannot build request ({path})."))
    }

    /// Executes the request and decodes the JSON response body.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> anyhow::Result<T> {
        let body = self.execute_raw(request).await?;
        serde_json::from_str(&body)
            .map_err(|err| TenableError::decode_with_root_cause(anyhow!(err)).into())
    }

    /// Executes the request and discards the response body once the status is checked.
    pub async fn execute_empty(&self, request: Request) -> anyhow::Result<()> {
        self.execute_raw(request).await.map(|_| ())
    }

    async fn execute_raw(&self, request: Request) -> anyhow::Result<String> {
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|err| TenableError::transport_with_root_cause(anyhow!(err)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TenableError::transport_with_root_cause(anyhow!(err)))?;
        if !status.is_success() {
            bail!(TenableError::transport(status, body));
        }

        Ok(body)
    }

    fn request_builder(&self, method: Method, path: &str) -> anyhow::Result<RequestBuilder> {
        let mut api_keys = HeaderValue::from_str(&self.credentials.header_value()).map_err(|_| {
            TenableError::invalid_input("Credentials contain characters not allowed in headers.")
        })?;
        api_keys.set_sensitive(true);

        Ok(self
            .http_client
            .request(method, self.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEYS_HEADER, api_keys))
    }
}

#[cfg(test)]
mod tests {
    use super::API_KEYS_HEADER;
    use crate::{
        error::{Error, ErrorKind},
        tests::{mock_client, mock_client_with_base_url},
    };
    use httpmock::MockServer;
    use reqwest::{Method, StatusCode, header::CONTENT_TYPE};
    use serde_json::{Value, json};
    use url::Url;

    #[test]
    fn joins_endpoint_paths() -> anyhow::Result<()> {
        let client = mock_client_with_base_url(Url::parse("https://cloud.tenable.com")?)?;
        assert_eq!(client.endpoint("users"), "https://cloud.tenable.com/users");
        assert_eq!(client.endpoint("/users/1"), "https://cloud.tenable.com/users/1");
        assert_eq!(
            client.endpoint("//users/1/enabled"),
            "https://cloud.tenable.com/users/1/enabled"
        );

        let client = mock_client_with_base_url(Url::parse("https://localhost:8443/api/")?)?;
        assert_eq!(client.endpoint("/roles"), "https://localhost:8443/api/roles");

        Ok(())
    }

    #[test]
    fn builds_authenticated_requests() -> anyhow::Result<()> {
        let client = mock_client_with_base_url(Url::parse("https://cloud.tenable.com/")?)?;

        let request = client.build_request(Method::GET, "/users")?;
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "https://cloud.tenable.com/users");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            request.headers()[API_KEYS_HEADER],
            "accessKey=some-access; secretKey=some-secret;"
        );
        assert!(request.headers()[API_KEYS_HEADER].is_sensitive());
        assert!(request.body().is_none());

        let request =
            client.build_json_request(Method::PUT, "users/1/enabled", &json!({ "enabled": false }))?;
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(
            request.url().as_str(),
            "https://cloud.tenable.com/users/1/enabled"
        );
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            request.body().and_then(|body| body.as_bytes()),
            Some(br#"{"enabled":false}"#.as_slice())
        );

        Ok(())
    }

    #[tokio::test]
    async fn decodes_successful_responses() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = mock_client(&server)?;

        let roles_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/roles")
                .header("X-ApiKeys", "accessKey=some-access; secretKey=some-secret;")
                .header("Content-Type", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{ "id": 1, "name": "Admins" }]));
        });

        let roles: Value = client
            .execute(client.build_request(Method::GET, "roles")?)
            .await?;
        assert_eq!(roles, json!([{ "id": 1, "name": "Admins" }]));

        roles_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn discards_body_for_empty_responses() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = mock_client(&server)?;

        let delete_mock = server.mock(|when, then| {
            when.method(httpmock::Method::DELETE).path("/users/1");
            then.status(200).body("not a json");
        });

        client
            .execute_empty(client.build_request(Method::DELETE, "users/1")?)
            .await?;

        delete_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn surfaces_non_success_statuses() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = mock_client(&server)?;

        let users_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/users");
            then.status(403)
                .header("Content-Type", "application/json")
                .body(r#"{"error":"Forbidden"}"#);
        });

        let err = client
            .execute::<Value>(client.build_request(Method::GET, "users")?)
            .await
            .unwrap_err();
        assert_eq!(Error::kind_of(&err), ErrorKind::Transport);
        assert_eq!(Error::status_of(&err), Some(StatusCode::FORBIDDEN));
        assert_eq!(
            err.to_string(),
            r#"API error: 403 Forbidden: {"error":"Forbidden"}"#
        );

        let err = client
            .execute_empty(client.build_request(Method::GET, "users")?)
            .await
            .unwrap_err();
        assert_eq!(Error::status_of(&err), Some(StatusCode::FORBIDDEN));

        users_mock.assert_calls(2);

        Ok(())
    }

    #[tokio::test]
    async fn surfaces_malformed_bodies() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = mock_client(&server)?;

        let users_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/users");
            then.status(200).body("[{");
        });

        let err = client
            .execute::<Value>(client.build_request(Method::GET, "users")?)
            .await
            .unwrap_err();
        assert_eq!(Error::kind_of(&err), ErrorKind::Decode);
        assert_eq!(Error::status_of(&err), None);

        users_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn surfaces_network_failures() -> anyhow::Result<()> {
        // Nothing listens on the first privileged port.
        let client = mock_client_with_base_url(Url::parse("http://127.0.0.1:1")?)?;
        let err = client
            .execute::<Value>(client.build_request(Method::GET, "users")?)
            .await
            .unwrap_err();
        assert_eq!(Error::kind_of(&err), ErrorKind::Transport);
        assert_eq!(Error::status_of(&err), None);

        Ok(())
    }
}
