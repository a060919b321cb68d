//! OAuth gateway: normalizes token-exchange outcomes into typed errors.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::OAuthClient;

/// Errors returned by the OAuth gateway.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("no access token available")]
    NoAccessToken,
    #[error("token exchange failed: {0}")]
    Client(#[source] anyhow::Error),
}

/// Obtains access tokens for outbound calls.
#[async_trait]
pub trait OAuthGateway: Send + Sync {
    /// Returns an access token for the given client credentials.
    ///
    /// # Errors
    ///
    /// - `OAuthError::NoAccessToken` if the issuer returned no token
    /// - `OAuthError::Client` if the exchange itself failed
    async fn access_token(
        &self,
        issuer: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, OAuthError>;
}

/// Gateway over an [`OAuthClient`].
pub struct ClientOAuthGateway {
    client: Arc<dyn OAuthClient>,
}

impl ClientOAuthGateway {
    #[must_use]
    pub fn new(client: Arc<dyn OAuthClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OAuthGateway for ClientOAuthGateway {
    async fn access_token(
        &self,
        issuer: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, OAuthError> {
        self.client
            .access_token(issuer, client_id, client_secret)
            .await
            .map_err(OAuthError::Client)?
            .ok_or(OAuthError::NoAccessToken)
    }
}
