use std::time::Duration;

use fangate_core::config::BackendConfig;
use serde::Serialize;

use crate::error::BackendError;

/// How much of an error body is kept in outcome messages.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Serialize)]
struct GraphQlPayload<'a> {
    query: &'a str,
}

/// Result of a schema probe: the collections the backend reports.
#[derive(Debug, Clone)]
pub struct SchemaInfo {
    pub collections: Vec<String>,
}

/// Pooled client for one backend instance.
///
/// Construct once during process startup and share by reference; the inner
/// `reqwest::Client` does its own connection pooling, so per-request
/// construction would defeat keep-alive.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    graphql_url: String,
    api_key: Option<String>,
    call_timeout: Duration,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(20)
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;
        let base_url = config.url.trim_end_matches('/').to_string();
        let graphql_url = format!(
            "{}/v1/graphql?consistency_level={}",
            base_url, config.consistency_level
        );
        Ok(Self {
            http,
            base_url,
            graphql_url,
            api_key: config.api_key.clone(),
            call_timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Backend base URL as configured (for health/selfcheck reporting).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-call timeout applied by [`BackendClient::graphql`].
    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    /// Execute one GraphQL document with the configured call timeout.
    pub async fn graphql(&self, query: &str) -> Result<serde_json::Value, BackendError> {
        self.graphql_with_timeout(query, self.call_timeout).await
    }

    /// Execute one GraphQL document with an explicit timeout.
    ///
    /// A 200 whose body carries an `errors` array is a failure: the
    /// backend answered, the query did not.
    pub async fn graphql_with_timeout(
        &self,
        query: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, BackendError> {
        let request = self
            .authorize(self.http.post(&self.graphql_url))
            .json(&GraphQlPayload { query })
            .timeout(timeout);

        let response = request.send().await.map_err(|e| classify(e, timeout))?;
        let status = response.status().as_u16();

        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body: preview(&body) });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| classify_decode(e, status, timeout))?;

        if let Some(errors) = body.get("errors") {
            return Err(BackendError::GraphQl(errors.to_string()));
        }
        Ok(body)
    }

    /// Probe the schema endpoint and list the collections it reports.
    pub async fn schema(&self, timeout: Duration) -> Result<SchemaInfo, BackendError> {
        let url = format!("{}/v1/schema", self.base_url);
        let response = self
            .authorize(self.http.get(&url))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body: preview(&body) });
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| classify_decode(e, status, timeout))?;

        let collections = body
            .get("classes")
            .and_then(|c| c.as_array())
            .map(|classes| {
                classes
                    .iter()
                    .filter_map(|c| c.get("class").and_then(|n| n.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(SchemaInfo { collections })
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout(timeout)
    } else {
        BackendError::Transport(err.to_string())
    }
}

fn classify_decode(err: reqwest::Error, status: u16, timeout: Duration) -> BackendError {
    // Reading the body can also hit the request deadline.
    if err.is_timeout() {
        BackendError::Timeout(timeout)
    } else {
        BackendError::Decode { status, message: err.to_string() }
    }
}

fn preview(body: &str) -> String {
    let mut end = body.len().min(ERROR_BODY_PREVIEW);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
