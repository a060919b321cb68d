//! OAuth token-exchange clients.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Exchanges client credentials for an access token.
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Requests an access token from `issuer`.
    ///
    /// Returns `Ok(None)` when the issuer answers without a token.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or non-success responses.
    async fn access_token(
        &self,
        issuer: &str,
        client_id: &str,
        client_secret: &str,
    ) -> anyhow::Result<Option<String>>;
}

/// Subset of the `OpenID` provider metadata document.
#[derive(Debug, Deserialize)]
struct ProviderMetadata {
    token_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// `client_credentials` grant over HTTP.
///
/// Discovers the token endpoint from
/// `{issuer}/.well-known/openid-configuration`, then posts the grant with
/// HTTP basic authentication.
#[derive(Debug, Clone, Default)]
pub struct HttpOAuthClient {
    http: reqwest::Client,
}

impl HttpOAuthClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured `reqwest` client (timeouts, proxies, TLS roots).
    #[must_use]
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OAuthClient for HttpOAuthClient {
    async fn access_token(
        &self,
        issuer: &str,
        client_id: &str,
        client_secret: &str,
    ) -> anyhow::Result<Option<String>> {
        let discovery_url = format!(
            "{}/.well-known/openid-configuration",
            issuer.trim_end_matches('/')
        );
        let metadata: ProviderMetadata = self
            .http
            .get(&discovery_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(token_endpoint = %metadata.token_endpoint, "Discovered token endpoint");

        let token: TokenResponse = self
            .http
            .post(&metadata.token_endpoint)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(token.access_token.filter(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    /// Serves a discovery document and a token endpoint on an ephemeral port.
    async fn spawn_issuer(token_body: serde_json::Value) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let token_endpoint = format!("{base}/token");

        let app = Router::new()
            .route(
                "/.well-known/openid-configuration",
                get(move || {
                    let token_endpoint = token_endpoint.clone();
                    async move { Json(json!({ "token_endpoint": token_endpoint })) }
                }),
            )
            .route(
                "/token",
                post(move |headers: HeaderMap, body: String| {
                    let token_body = token_body.clone();
                    async move {
                        // "bar:baz" in base64.
                        let authorized = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            == Some("Basic YmFyOmJheg==");
                        if !authorized || body != "grant_type=client_credentials" {
                            return (StatusCode::UNAUTHORIZED, Json(json!({})));
                        }
                        (StatusCode::OK, Json(token_body))
                    }
                }),
            );

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        base
    }

    #[tokio::test]
    async fn exchanges_client_credentials_for_token() {
        let issuer = spawn_issuer(json!({ "access_token": "foo", "token_type": "Bearer" })).await;

        let token = HttpOAuthClient::new()
            .access_token(&issuer, "bar", "baz")
            .await
            .unwrap();
        assert_eq!(token.as_deref(), Some("foo"));
    }

    #[tokio::test]
    async fn response_without_token_is_none() {
        let issuer = spawn_issuer(json!({ "token_type": "Bearer" })).await;

        let token = HttpOAuthClient::new()
            .access_token(&format!("{issuer}/"), "bar", "baz")
            .await
            .unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn rejected_credentials_are_an_error() {
        let issuer = spawn_issuer(json!({ "access_token": "foo" })).await;

        let result = HttpOAuthClient::new()
            .access_token(&issuer, "bar", "wrong")
            .await;
        assert!(result.is_err());
    }
}
