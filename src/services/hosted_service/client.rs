use crate::models::{HostedTestRequest, HostedTestResponse};
use log::{error, info};
use reqwest::Client;
use std::time::Duration;

/// Pause between consecutive submissions.
pub const SUBMIT_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum HostedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("hosted API returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for a third-party hosted audit API.
#[derive(Debug, Clone)]
pub struct HostedClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    interval: Duration,
}

impl HostedClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        HostedClient {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
            interval: SUBMIT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn tests_url(&self) -> String {
        format!("{}/tests", self.endpoint.trim_end_matches('/'))
    }

    pub async fn submit(
        &self,
        url: &str,
        regions: &[String],
    ) -> Result<HostedTestResponse, HostedError> {
        let body = HostedTestRequest {
            url: url.to_string(),
            regions: regions.to_vec(),
        };

        let mut request = self
            .client
            .post(self.tests_url())
            .header("Accept", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HostedError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    /// Submits each URL in order, pausing between submissions.
    pub async fn submit_all(
        &self,
        urls: &[String],
        regions: &[String],
    ) -> Vec<(String, Result<HostedTestResponse, HostedError>)> {
        let mut results = Vec::with_capacity(urls.len());

        for (i, url) in urls.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.interval).await;
            }
            let outcome = self.submit(url, regions).await;
            match &outcome {
                Ok(r) => info!("{} submitted as {} ({})", url, r.test_id, r.status),
                Err(e) => error!("hosted test for {} failed: {}", url, e),
            }
            results.push((url.clone(), outcome));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tests_url_ignores_trailing_slash() {
        let client = HostedClient::new("https://api.example.test/v1/", None);
        assert_eq!(client.tests_url(), "https://api.example.test/v1/tests");
    }

    #[tokio::test]
    async fn unreachable_api_reports_every_url() {
        let client = HostedClient::new("http://127.0.0.1:9", None).with_interval(Duration::ZERO);
        let urls = vec!["https://a.test/".to_string(), "https://b.test/".to_string()];

        let results = client.submit_all(&urls, &["us-east".to_string()]).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, r)| matches!(r, Err(HostedError::Http(_)))));
    }
}
