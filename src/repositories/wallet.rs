use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::credentials::{CredentialProvider, MissingCredentialError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    MissingCredential(#[from] MissingCredentialError),
    #[error("{0}")]
    Network(String),
}

pub fn wallet_path(id: i64) -> String {
    format!("/api/wallets/{}", id)
}

/// HTTP client for the wallet API. One attempt per call, no retries and
/// no timeout configuration.
#[derive(Clone)]
pub struct WalletApi {
    credentials: Arc<dyn CredentialProvider>,
    base_url: String,
    client: reqwest::Client,
}

impl WalletApi {
    pub fn new(credentials: Arc<dyn CredentialProvider>, base_url: String) -> Self {
        Self {
            credentials,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// GET a resource. The token is resolved first, so a missing
    /// credential never reaches the network.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.credentials.token()?;

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Network("Network response was not ok".to_string()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// PUT a full resource body and decode the server's echo.
    pub async fn save<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.credentials.token()?;

        let response = self
            .client
            .put(format!("{}{}", self.base_url, path))
            .bearer_auth(&token)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Network("Network response was not ok".to_string()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}
