use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::error::DownloadError;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Verify TLS certificates (off means any certificate is accepted)
    pub verify_tls: bool,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            verify_tls: true,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Response of a successful GET
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Plain GET client, one request at a time
pub struct PdfFetcher {
    client: Client,
}

impl PdfFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url`; connection failures and non-2xx statuses are errors
    pub async fn fetch(&self, url: &str) -> Result<FetchedDocument, DownloadError> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = response.bytes().await?.to_vec();
        debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(FetchedDocument { content_type, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/paper.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
            .mount(&server)
            .await;

        let fetcher = PdfFetcher::new(&FetchSettings::default()).unwrap();
        let document = fetcher
            .fetch(&format!("{}/paper.pdf", server.uri()))
            .await
            .unwrap();

        assert_eq!(document.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(document.body, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_fetch_fails_on_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = PdfFetcher::new(&FetchSettings::default()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing.pdf", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, DownloadError::Transport(_)));
        assert!(err.to_string().starts_with("Download Exception:"));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_connection_error() {
        let fetcher = PdfFetcher::new(&FetchSettings {
            verify_tls: false,
            ..FetchSettings::default()
        })
        .unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/a.pdf").await.unwrap_err();
        assert!(matches!(err, DownloadError::Transport(_)));
    }
}
