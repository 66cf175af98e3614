//! Boundary to the remote ticket-management API.
//!
//! Only the two notification calls are modelled: list and mark-as-read.
//! Both require a bearer [`Credential`], always passed in by the caller.

use async_trait::async_trait;
use regex::Regex;

use crate::notifications::RawNotification;

pub mod http;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Bearer token for the ticket API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wrap a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Raw token value for the `Authorization` header.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by the ticket API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport failure.
    #[error("ticket API request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Server rejected the credential.
    #[error("ticket API rejected the credential")]
    Unauthorized,
    /// Server responded with a non-success status.
    #[error("ticket API returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitised response body.
        body: String,
    },
    /// Response body did not match the expected schema.
    #[error("ticket API response parse error: {0}")]
    Parse(String),
    /// Base URL could not be joined with an endpoint path.
    #[error("invalid ticket API url: {0}")]
    Url(#[from] url::ParseError),
}

/// Check HTTP response status and return body text or a structured error.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` on 401/403, `ApiError::HttpStatus` on any
/// other non-2xx, `ApiError::Request` on transport failure.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized);
    }
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_http_error_body(&body),
        });
    }
    Ok(body)
}

/// Collapse whitespace, redact token-like values and truncate an error body.
pub fn sanitize_http_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in [
        r"(?i)bearer\s+[A-Za-z0-9_\-\.=]{8,}",
        r"eyJ[A-Za-z0-9_\-]{10,}\.[A-Za-z0-9_\-]{10,}\.[A-Za-z0-9_\-]*",
    ] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Notification endpoints of the ticket API.
///
/// Implementations must be `Send + Sync` so bulk operations can fan
/// calls out across tasks.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Fetch the user's notifications in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network, status, or parse failure.
    async fn list(&self, credential: &Credential) -> Result<Vec<RawNotification>, ApiError>;

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network or status failure.
    async fn mark_read(&self, id: i64, credential: &Credential) -> Result<(), ApiError>;
}
