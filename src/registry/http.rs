use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::LicenseError;

/// Status code and fully buffered body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Issues a single GET request per call. Implementations do not retry.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, LicenseError>;
}

/// [`HttpFetch`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    user_agent: String,
}

impl ReqwestFetcher {
    /// Build a fetcher. Without `timeout` a stalled connection waits forever.
    pub fn new(user_agent: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            user_agent: user_agent.into(),
        })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, LicenseError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url, status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}
