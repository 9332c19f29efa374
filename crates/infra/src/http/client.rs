use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, Proxy, RequestBuilder, Response};
use teamsmeeting_domain::constants::{
    DEFAULT_HTTP_BACKOFF_MS, DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS,
};
use teamsmeeting_domain::{HttpSettings, MeetingError};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with optional retry and timeout support.
///
/// A single attempt is made unless `max_attempts` is raised; retries only
/// cover server errors and connection failures.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, MeetingError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, MeetingError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                MeetingError::Internal(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                )
            })?;

            let request = cloned_builder.build().map_err(|err| {
                let infra: InfraError = err.into();
                MeetingError::from(infra)
            })?;

            let method = request.method().clone();
            // Query strings can carry mailbox filters; log the path only.
            let path = request.url().path().to_string();
            debug!(attempt = attempt + 1, %method, %path, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %path, %status, "received HTTP response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %path, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    let infra: InfraError = err.into();
                    return Err(MeetingError::from(infra));
                }
            }
        }

        Err(MeetingError::Internal("http client exhausted retries without producing a result".into()))
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
    proxy: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_attempts: DEFAULT_HTTP_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_HTTP_BACKOFF_MS),
            user_agent: None,
            default_headers: None,
            proxy: None,
        }
    }
}

impl HttpClientBuilder {
    /// Apply timeout, attempt count and backoff from loaded settings.
    pub fn settings(self, settings: &HttpSettings) -> Self {
        self.timeout(settings.timeout())
            .max_attempts(settings.max_attempts)
            .base_backoff(settings.base_backoff())
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Route every request through `proxy`. `None` or blank disables proxies,
    /// including the ones named by `HTTP(S)_PROXY`.
    pub fn proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn build(self) -> Result<HttpClient, MeetingError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        builder = match self.proxy {
            Some(proxy) => {
                let proxy = Proxy::all(proxy.as_str()).map_err(|err| {
                    MeetingError::Config(format!("invalid proxy '{proxy}': {err}"))
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            MeetingError::from(infra)
        })?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}
