use super::{Method, Reply, Request, Session, Transport};
use crate::error::{Error, Result};
use core::time::Duration;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

/// Default request timeout applied to every endpoint.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `user-agent` header, matching the mobile wallet the relayer
/// expects.
pub const DEFAULT_USER_AGENT: &str = "okhttp/4.9.2";

/// Per-endpoint transport settings.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A [`Transport`] backed by a `reqwest` client.
///
/// The client carries the default JSON headers, the configured timeout and
/// the cookie jar of the [`Session`] it was built from.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client for one endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the user agent is not a valid
    /// header value or the TLS backend cannot be initialized.
    pub fn new(config: &TransportConfig, session: &Session) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| Error::InvalidConfig {
                reason: format!("user agent: {e}"),
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .cookie_provider(session.jar())
            .build()
            .map_err(|e| Error::InvalidConfig {
                reason: format!("http client: {e}"),
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, address: &str, request: &Request) -> Result<Reply> {
        let url = format!("{}{}", address.trim_end_matches('/'), request.path);
        let transport_error = |e: reqwest::Error| Error::Transport {
            endpoint: address.to_string(),
            status: e.status().map(|s| s.as_u16()),
            reason: e.to_string(),
        };

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(Reply { status, body })
    }
}
