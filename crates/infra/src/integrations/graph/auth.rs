//! Client-credentials token acquisition for Microsoft Graph
//!
//! Tokens are cached in memory and refreshed once they come within the
//! configured skew of their expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use teamsmeeting_domain::constants::GRAPH_RESOURCE;
use teamsmeeting_domain::{GraphConfig, MeetingError, Result};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::http::HttpClient;

/// Provides bearer tokens for Graph calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a bearer token, fetching a new one if needed.
    async fn access_token(&self) -> Result<String>;

    /// Forget any cached token so the next call fetches a fresh one.
    async fn invalidate(&self) {}
}

/// Access token plus the metadata callers may show.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Still usable `skew_secs` from now.
    ///
    /// A skew outside chrono's range counts as stale.
    pub fn is_fresh(&self, skew_secs: i64) -> bool {
        expiry_after(Utc::now(), skew_secs).is_some_and(|deadline| deadline < self.expires_at)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The v1 token endpoint sends numbers as strings.
#[serde_as]
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    expires_in: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    expires_on: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Client-credentials flow against the Azure AD v1 token endpoint.
pub struct ClientCredentialsAuth {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_skew_secs: i64,
    cache: RwLock<Option<AccessToken>>,
}

impl ClientCredentialsAuth {
    pub fn new(http: HttpClient, config: &GraphConfig) -> Self {
        let token_url = format!(
            "{}/{}/oauth2/token",
            config.login_base_url.trim_end_matches('/'),
            urlencoding::encode(&config.tenant_id)
        );

        Self {
            http,
            token_url,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_skew_secs: config.token_refresh_skew_secs,
            cache: RwLock::new(None),
        }
    }

    /// Current token, from cache when still fresh.
    pub async fn token(&self) -> Result<AccessToken> {
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let mut cache = self.cache.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = cache.as_ref().filter(|t| t.is_fresh(self.refresh_skew_secs)) {
            return Ok(token.clone());
        }

        let token = self.request_token().await?;
        *cache = Some(token.clone());
        Ok(token)
    }

    async fn cached(&self) -> Option<AccessToken> {
        let cache = self.cache.read().await;
        cache.as_ref().filter(|t| t.is_fresh(self.refresh_skew_secs)).cloned()
    }

    async fn request_token(&self) -> Result<AccessToken> {
        debug!(url = %self.token_url, "requesting client-credentials token");

        let request = self
            .http
            .request(Method::POST, &self.token_url)
            .query(&[("api-version", "1.0")])
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("resource", GRAPH_RESOURCE),
                ("grant_type", "client_credentials"),
            ]);

        let response = self.http.send(request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MeetingError::Network(format!("Failed to read token response: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<TokenErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or_else(|| status.to_string());
            warn!(%status, "token request rejected");
            return Err(MeetingError::Auth(format!("Token request failed: {detail}")));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| MeetingError::Auth(format!("Failed to parse token response: {e}")))?;

        let expires_at = match (parsed.expires_on, parsed.expires_in) {
            (Some(on), _) => DateTime::from_timestamp(on, 0),
            (None, Some(secs)) => expiry_after(Utc::now(), secs),
            (None, None) => None,
        }
        .ok_or_else(|| MeetingError::Auth("Token response carries no usable expiry".into()))?;

        info!(expires_at = %expires_at, "client-credentials token acquired");

        Ok(AccessToken {
            secret: parsed.access_token,
            token_type: parsed.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_at,
        })
    }
}

fn expiry_after(now: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(secs).and_then(|delta| now.checked_add_signed(delta))
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsAuth {
    async fn access_token(&self) -> Result<String> {
        self.token().await.map(|t| t.secret)
    }

    async fn invalidate(&self) {
        *self.cache.write().await = None;
        debug!("cached token invalidated");
    }
}
