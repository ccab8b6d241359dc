//
//  skyhook-cli
//  api/client.rs
//

//! # Skyhook API Client
//!
//! [`ApiClient`] is the one component that talks to the Skyhook control API.
//! It owns a base server URL and a set of immutable credentials, exposes one
//! typed async method per API operation, and runs every request through the
//! same pipeline: join the base URL with the relative path, attach the WSSE
//! header from the [`RequestSigner`], send, and classify the response into
//! the [`ApiError`] taxonomy.
//!
//! ## Guarantees
//!
//! - One client per command invocation; no state beyond URL and credentials.
//! - No automatic retries, ever: every write is a single non-idempotent
//!   request, and retrying a create/delete could double-apply it. A caller
//!   wanting retry semantics must knowingly re-invoke the whole operation.
//! - Requests block for at most the configured timeout (default 30 s), after
//!   which the failure surfaces as [`ApiError::Transport`].
//! - A 2xx response whose body is missing expected fields is a contract
//!   violation and surfaces as [`ApiError::Client`] with a decoding note,
//!   never silently tolerated.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::auth::{Credentials, RequestSigner, WSSE_HEADER};

use super::error::classify;
use super::types::{AppDetail, Results, SshKey};
use super::ApiError;

/// Default bound on how long a single request may wait for the server.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Signed HTTP client for the Skyhook control API.
///
/// # Example
///
/// ```rust,no_run
/// use skyhook_cli::api::{ApiClient, DEFAULT_TIMEOUT};
/// use skyhook_cli::auth::Credentials;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = ApiClient::new(
///     "https://api.skyhook.dev/",
///     Credentials::new("alice", "s3cret"),
///     DEFAULT_TIMEOUT,
/// )?;
/// client.test_credentials().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    /// Base server URL, normalized to end with a slash.
    base_url: String,
    signer: RequestSigner,
}

impl ApiClient {
    /// Creates a client for the given server with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] for an empty username or
    /// secret key, before any network I/O. HTTP client construction failures
    /// surface as [`ApiError::Transport`].
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let signer = RequestSigner::new(credentials)?;
        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            http,
            base_url,
            signer,
        })
    }

    /// The username requests are signed as.
    pub fn username(&self) -> &str {
        self.signer.username()
    }

    /// Sends one signed request and classifies the response.
    ///
    /// Returns the status and raw body for 2xx responses; every other
    /// outcome is already a typed error.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(u16, String), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let wsse = self.signer.header_value(method.as_str(), path);
        debug!(method = %method, path, "sending request");

        let mut request = self.http.request(method, &url).header(WSSE_HEADER, wsse);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::Transport)?;
        debug!(status, "received response");

        let body = classify(status, body)?;
        Ok((status, body))
    }

    /// Decodes a 2xx body, mapping contract violations to [`ApiError::Client`].
    fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::Client {
            status,
            body: format!("could not decode response body ({e}): {body}"),
        })
    }

    /// Pure authentication probe against `api/test_api_key/`.
    ///
    /// Succeeds silently; a rejected key surfaces as
    /// [`ApiError::Unauthorized`].
    pub async fn test_credentials(&self) -> Result<(), ApiError> {
        self.request(Method::GET, "api/test_api_key/", None).await?;
        Ok(())
    }

    /// Lists the caller's applications, grouped by provider.
    pub async fn list_applications(&self) -> Result<BTreeMap<String, Vec<String>>, ApiError> {
        let (status, body) = self.request(Method::GET, "api/v1/apps/", None).await?;
        Self::decode(status, &body)
    }

    /// Creates a new application with the given id, optionally on a specific
    /// provider. Fails with [`ApiError::Client`] if the id is already taken.
    pub async fn create_application(
        &self,
        app_id: &str,
        provider: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut body = json!({ "id": app_id });
        if let Some(provider) = provider {
            body["provider"] = json!(provider);
        }
        self.request(Method::POST, "api/v1/apps/", Some(body))
            .await?;
        Ok(())
    }

    /// Deletes an application. Fails with [`ApiError::Client`] if it does
    /// not exist.
    pub async fn delete_application(&self, app_id: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, &format!("api/v1/apps/{app_id}/"), None)
            .await?;
        Ok(())
    }

    /// Fetches the application's environment variables.
    pub async fn get_env(&self, app_id: &str) -> Result<BTreeMap<String, String>, ApiError> {
        let (status, body) = self
            .request(Method::GET, &format!("api/v1/apps/{app_id}/env/"), None)
            .await?;
        Self::decode(status, &body)
    }

    /// Sets environment variables. A `None` value unsets the key; other
    /// pre-existing variables are left unchanged by the server.
    pub async fn set_env(
        &self,
        app_id: &str,
        bindings: &BTreeMap<String, Option<String>>,
    ) -> Result<(), ApiError> {
        let body = serde_json::Value::Object(
            bindings
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        Some(value) => serde_json::Value::String(value.clone()),
                        None => serde_json::Value::Null,
                    };
                    (key.clone(), value)
                })
                .collect(),
        );
        self.request(Method::POST, &format!("api/v1/apps/{app_id}/env/"), Some(body))
            .await?;
        Ok(())
    }

    /// Lists the domains attached to an application.
    pub async fn list_domains(&self, app_id: &str) -> Result<Vec<String>, ApiError> {
        let (status, body) = self
            .request(Method::GET, &format!("api/v1/apps/{app_id}/domains/"), None)
            .await?;
        let results: Results<String> = Self::decode(status, &body)?;
        Ok(results.results)
    }

    /// Attaches a domain. Duplicate adds are rejected by the server as
    /// [`ApiError::Client`].
    pub async fn add_domain(&self, app_id: &str, domain: &str) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            &format!("api/v1/apps/{app_id}/domains/"),
            Some(json!({ "domain": domain })),
        )
        .await?;
        Ok(())
    }

    /// Detaches a domain. Removing a domain that is not attached is rejected
    /// by the server as [`ApiError::Client`].
    pub async fn remove_domain(&self, app_id: &str, domain: &str) -> Result<(), ApiError> {
        self.request(
            Method::DELETE,
            &format!("api/v1/apps/{app_id}/domains/{domain}/"),
            None,
        )
        .await?;
        Ok(())
    }

    /// Returns the username of the application owner.
    pub async fn get_owner(&self, app_id: &str) -> Result<String, ApiError> {
        Ok(self.app_detail(app_id).await?.owner)
    }

    /// Transfers ownership to another user. Requires admin privilege on the
    /// application, enforced server-side.
    pub async fn set_owner(&self, app_id: &str, username: &str) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            &format!("api/v1/apps/{app_id}/"),
            Some(json!({ "owner": username })),
        )
        .await?;
        Ok(())
    }

    /// Lists collaborators on an application, excluding the owner.
    pub async fn list_collaborators(&self, app_id: &str) -> Result<Vec<String>, ApiError> {
        let (status, body) = self
            .request(
                Method::GET,
                &format!("api/v1/apps/{app_id}/collaborators/"),
                None,
            )
            .await?;
        let results: Results<String> = Self::decode(status, &body)?;
        Ok(results.results)
    }

    /// Adds a collaborator to an application.
    pub async fn add_collaborator(&self, app_id: &str, username: &str) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            &format!("api/v1/apps/{app_id}/collaborators/"),
            Some(json!({ "username": username })),
        )
        .await?;
        Ok(())
    }

    /// Removes a collaborator from an application.
    pub async fn remove_collaborator(
        &self,
        app_id: &str,
        username: &str,
    ) -> Result<(), ApiError> {
        self.request(
            Method::DELETE,
            &format!("api/v1/apps/{app_id}/collaborators/{username}/"),
            None,
        )
        .await?;
        Ok(())
    }

    /// Returns the git endpoint URL assigned to an application. Used by the
    /// remote-wiring reconciler after app creation.
    pub async fn get_git_remote(&self, app_id: &str) -> Result<String, ApiError> {
        Ok(self.app_detail(app_id).await?.remote)
    }

    async fn app_detail(&self, app_id: &str) -> Result<AppDetail, ApiError> {
        let (status, body) = self
            .request(Method::GET, &format!("api/v1/apps/{app_id}/"), None)
            .await?;
        Self::decode(status, &body)
    }

    /// Lists the caller's public keys, grouped by provider.
    pub async fn list_keys(&self) -> Result<BTreeMap<String, Vec<SshKey>>, ApiError> {
        let (status, body) = self.request(Method::GET, "api/v1/keys/", None).await?;
        Self::decode(status, &body)
    }

    /// Registers a public key under the given label on a provider.
    pub async fn add_key(
        &self,
        key_name: &str,
        key: &str,
        provider: &str,
    ) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            "api/v1/keys/",
            Some(json!({
                "key_name": key_name,
                "key": key,
                "provider": provider,
            })),
        )
        .await?;
        Ok(())
    }

    /// Removes the key registered under the given label on a provider.
    pub async fn remove_key(&self, key_name: &str, provider: &str) -> Result<(), ApiError> {
        self.request(
            Method::DELETE,
            &format!("api/v1/keys/{provider}/{key_name}/"),
            None,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn client(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(
            &server.url(),
            Credentials::new("alice", "topsecret"),
            DEFAULT_TIMEOUT,
        )
        .unwrap()
    }

    fn wsse_matcher() -> Matcher {
        Matcher::Regex(
            "UsernameToken Username=\"alice\", PasswordDigest=\".+\", Nonce=\".+\", Created=\".+\""
                .to_string(),
        )
    }

    #[tokio::test]
    async fn requests_carry_a_wsse_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/test_api_key/")
            .match_header("X-WSSE", wsse_matcher())
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(&server).test_credentials().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_key_surfaces_as_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/test_api_key/")
            .with_status(401)
            .with_body("{\"detail\": \"bad key\"}")
            .create_async()
            .await;

        let err = client(&server).test_credentials().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { status: 401, .. }));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn list_applications_decodes_provider_groups() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/")
            .with_status(200)
            .with_body("{\"aws\": [\"blog\", \"shop\"], \"metal\": []}")
            .create_async()
            .await;

        let apps = client(&server).list_applications().await.unwrap();
        assert_eq!(apps["aws"], vec!["blog", "shop"]);
        assert!(apps["metal"].is_empty());
    }

    #[tokio::test]
    async fn create_application_posts_id_and_provider() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/apps/")
            .match_body(Matcher::Json(json!({"id": "blog", "provider": "aws"})))
            .with_status(201)
            .create_async()
            .await;

        client(&server)
            .create_application("blog", Some("aws"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn duplicate_app_id_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/apps/")
            .with_status(400)
            .with_body("app blog already exists")
            .create_async()
            .await;

        let err = client(&server)
            .create_application("blog", None)
            .await
            .unwrap_err();
        match err {
            ApiError::Client { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "app blog already exists");
            }
            other => panic!("expected Client, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn set_env_serializes_null_for_unset() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/apps/blog/env/")
            .match_body(Matcher::Json(json!({"DEBUG": "1", "SECRET": null})))
            .with_status(200)
            .create_async()
            .await;

        let mut bindings = BTreeMap::new();
        bindings.insert("DEBUG".to_string(), Some("1".to_string()));
        bindings.insert("SECRET".to_string(), None);
        client(&server).set_env("blog", &bindings).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_env_decodes_flat_object() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/blog/env/")
            .with_status(200)
            .with_body("{\"DEBUG\": \"1\"}")
            .create_async()
            .await;

        let env = client(&server).get_env("blog").await.unwrap();
        assert_eq!(env["DEBUG"], "1");
    }

    #[tokio::test]
    async fn domains_unwrap_the_results_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/blog/domains/")
            .with_status(200)
            .with_body("{\"results\": [\"blog.example.com\"]}")
            .create_async()
            .await;

        let domains = client(&server).list_domains("blog").await.unwrap();
        assert_eq!(domains, vec!["blog.example.com"]);
    }

    #[tokio::test]
    async fn remove_missing_domain_is_a_client_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/v1/apps/blog/domains/gone.example.com/")
            .with_status(404)
            .with_body("no such domain")
            .create_async()
            .await;

        let err = client(&server)
            .remove_domain("blog", "gone.example.com")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn app_detail_feeds_owner_and_git_remote() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/blog/")
            .with_status(200)
            .with_body("{\"owner\": \"alice\", \"remote\": \"git@skyhook.dev:blog.git\"}")
            .expect(2)
            .create_async()
            .await;

        let client = client(&server);
        assert_eq!(client.get_owner("blog").await.unwrap(), "alice");
        assert_eq!(
            client.get_git_remote("blog").await.unwrap(),
            "git@skyhook.dev:blog.git"
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_contract_violation() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/blog/")
            .with_status(200)
            .with_body("{\"owner\": \"alice\"}")
            .create_async()
            .await;

        let err = client(&server).get_git_remote("blog").await.unwrap_err();
        match err {
            ApiError::Client { status: 200, body } => {
                assert!(body.contains("could not decode response body"));
            }
            other => panic!("expected Client, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn collaborator_listing_excludes_nothing_client_side() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/blog/collaborators/")
            .with_status(200)
            .with_body("{\"results\": [\"bob\", \"carol\"]}")
            .create_async()
            .await;

        let collaborators = client(&server).list_collaborators("blog").await.unwrap();
        assert_eq!(collaborators, vec!["bob", "carol"]);
    }

    #[tokio::test]
    async fn key_removal_addresses_provider_then_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/v1/keys/aws/laptop/")
            .with_status(204)
            .create_async()
            .await;

        client(&server).remove_key("laptop", "aws").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Nothing listens on this port.
        let client = ApiClient::new(
            "http://127.0.0.1:1",
            Credentials::new("alice", "topsecret"),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.test_credentials().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn empty_credentials_fail_before_any_network_io() {
        let err = ApiClient::new(
            "https://api.skyhook.dev/",
            Credentials::new("", "key"),
            DEFAULT_TIMEOUT,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials(_)));
    }
}
