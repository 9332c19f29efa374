//! Microsoft Graph integration
//!
//! Token acquisition ([`auth`]), wire types ([`models`]) and the
//! `MeetingProvider` implementation ([`client`]).

pub mod auth;
pub mod client;
pub mod models;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
pub use auth::{AccessToken, AccessTokenProvider, ClientCredentialsAuth};
pub use client::GraphMeetingClient;
use teamsmeeting_domain::{Config, Result};

use crate::http::HttpClient;

const USER_AGENT: &str = concat!("teamsmeeting/", env!("CARGO_PKG_VERSION"));

/// Token provider and Graph client sharing one HTTP client.
pub struct GraphConnection {
    pub auth: Arc<ClientCredentialsAuth>,
    pub client: Arc<GraphMeetingClient>,
}

/// HTTP client configured with the proxy and retry settings from `config`.
pub fn http_client(config: &Config) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    HttpClient::builder()
        .settings(&config.http)
        .proxy(config.graph.proxy.clone())
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
}

/// Wire the token provider and the Graph client from loaded configuration.
///
/// # Errors
/// Returns `MeetingError::Config` for an unknown timezone or invalid proxy.
pub fn connect(config: &Config) -> Result<GraphConnection> {
    let http = http_client(config)?;
    let tz = config.meeting.tz()?;

    let auth = Arc::new(ClientCredentialsAuth::new(http.clone(), &config.graph));
    let provider: Arc<dyn AccessTokenProvider> = auth.clone();
    let client = Arc::new(GraphMeetingClient::new(http, provider, &config.graph.graph_base_url, tz));

    Ok(GraphConnection { auth, client })
}
