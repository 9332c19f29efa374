#![allow(dead_code)]

use std::sync::Once;

use serde_json::json;
use teamsmeeting_domain::{Config, GraphConfig, HttpSettings, MeetingSettings};
use teamsmeeting_infra::{connect, GraphConnection};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TENANT: &str = "contoso";
pub const TOKEN: &str = "graph-token-1";

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so it only shows on failure.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("teamsmeeting_infra=debug")
            .with_test_writer()
            .try_init();
    });
}

/// One mock server standing in for both the token endpoint and Graph.
pub struct GraphHarness {
    pub server: MockServer,
    pub config: Config,
}

impl GraphHarness {
    pub async fn start() -> Self {
        Self::with_timezone("UTC").await
    }

    pub async fn with_timezone(timezone: &str) -> Self {
        init_tracing();
        let server = MockServer::start().await;

        let mut graph = GraphConfig::new(TENANT.into(), "app-id".into(), "app-secret".into());
        graph.login_base_url = server.uri();
        graph.graph_base_url = server.uri();

        let config = Config {
            graph,
            meeting: MeetingSettings { timezone: timezone.into(), ..Default::default() },
            http: HttpSettings::default(),
        };

        Self { server, config }
    }

    /// Serve a token valid for an hour, expecting `times` requests.
    pub async fn mount_token(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/{TENANT}/oauth2/token")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "expires_in": "3599",
                "access_token": TOKEN
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub fn connection(&self) -> GraphConnection {
        connect(&self.config).expect("graph connection")
    }
}

pub fn graph_error(code: &str, message: &str) -> serde_json::Value {
    json!({ "error": { "code": code, "message": message } })
}
