//! `reqwest` implementation of [`NotificationApi`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use super::{check_http_response, ApiError, Credential, NotificationApi};
use crate::notifications::RawNotification;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the ticket API notification endpoints.
#[derive(Debug, Clone)]
pub struct HttpNotificationApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpNotificationApi {
    /// Create a client rooted at `base_url` (e.g. `https://helpdesk.example/api`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` for an unparsable base URL and
    /// `ApiError::Request` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn list(&self, credential: &Credential) -> Result<Vec<RawNotification>, ApiError> {
        let url = self.endpoint("notificacoes")?;
        debug!(url = %url, "fetching notifications");

        let response = self
            .client
            .get(url)
            .bearer_auth(credential.token())
            .send()
            .await?;

        let body = check_http_response(response).await?;
        let notifications: Vec<RawNotification> =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        info!(count = notifications.len(), "fetched notifications");
        Ok(notifications)
    }

    async fn mark_read(&self, id: i64, credential: &Credential) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("notificacoes/{id}/lida"))?;
        debug!(url = %url, id, "marking notification as read");

        let response = self
            .client
            .put(url)
            .bearer_auth(credential.token())
            .send()
            .await?;

        check_http_response(response).await?;
        Ok(())
    }
}
