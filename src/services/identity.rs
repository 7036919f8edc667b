//! External identity provider collaborator
//!
//! The auth gateway falls back to a backend-managed identity provider when
//! the local credential table cannot resolve a sign-in. The provider is an
//! external collaborator reached over HTTP; only password sign-in is used
//! here.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Identity returned by the provider on a successful password sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderIdentity {
    pub email: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Password-based sign-in. Any failure is an authentication failure as
    /// far as the gateway is concerned.
    async fn sign_in_with_password(&self, login: &str, password: &str) -> AppResult<ProviderIdentity>;
}

/// HTTP implementation against a hosted identity endpoint
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    url: Option<String>,
    api_key: Option<String>,
}

impl HttpIdentityProvider {
    pub fn new(url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in_with_password(&self, login: &str, password: &str) -> AppResult<ProviderIdentity> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::Authentication("Identity provider not configured".to_string()))?;

        let mut request = self
            .client
            .post(url)
            .json(&serde_json::json!({ "email": login, "password": password }));
        if let Some(ref key) = self.api_key {
            request = request.header("apikey", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Identity provider unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Authentication("Identity provider sign-in failed".to_string()));
        }

        response
            .json::<ProviderIdentity>()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid identity provider response: {}", e)))
    }
}
