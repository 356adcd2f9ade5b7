use crate::domain::ports::StatusProvider;
use crate::domain::status::StatusReport;
use crate::error::{ConfirmationError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

/// `StatusProvider` backed by the LMS REST backend.
///
/// Issues `GET {api_base}/api/payments/status/{session_id}`. The session id
/// is the capability; no auth header is attached.
#[derive(Debug, Clone)]
pub struct HttpStatusProvider {
    client: Client,
    api_base: String,
}

impl HttpStatusProvider {
    /// Creates a provider for the backend rooted at `api_base`, e.g.
    /// `https://lms.example.com`.
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        Self::with_client(Client::new(), api_base)
    }

    pub fn with_client(client: Client, api_base: impl Into<String>) -> Result<Self> {
        let api_base = api_base.into();
        Url::parse(&api_base)
            .map_err(|e| ConfirmationError::InvalidBaseUrl(format!("{api_base}: {e}")))?;
        Ok(Self { client, api_base })
    }

    fn status_url(&self, session_id: &str) -> String {
        format!(
            "{}/api/payments/status/{}",
            self.api_base.trim_end_matches('/'),
            session_id
        )
    }
}

#[async_trait]
impl StatusProvider for HttpStatusProvider {
    async fn fetch(&self, session_id: &str) -> Result<StatusReport> {
        let resp = self.client.get(self.status_url(session_id)).send().await?;
        if !resp.status().is_success() {
            return Err(ConfirmationError::BadStatus(resp.status().as_u16()));
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
