use crate::ports::outbound::RemoteClient;
use crate::shared::Result;
use owo_colors::OwoColorize;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// HttpRemoteClient adapter for the service-desk REST API.
///
/// Implements the RemoteClient port over blocking reqwest with basic-auth
/// (API key as the username, empty password) and a fixed request timeout.
///
/// Rate limiting is a recognized condition, not an error: a 429 response
/// pauses the whole process for the server-specified `Retry-After` duration
/// and retries the request once. A second 429 for the same request is
/// treated as a failed call.
pub struct HttpRemoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpRemoteClient {
    const TIMEOUT_SECONDS: u64 = 30;
    const DEFAULT_RATE_LIMIT_WAIT_SECS: u64 = 60;

    /// Creates a new client against the given API root.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("asset-inventory/{}", version);
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn send(&self, url: &str) -> std::result::Result<reqwest::blocking::Response, reqwest::Error> {
        self.client
            .get(url)
            .basic_auth(&self.api_key, Some(""))
            .send()
    }

    /// Seconds to wait, taken from the Retry-After header when present.
    fn retry_after_secs(response: &reqwest::blocking::Response) -> u64 {
        response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::DEFAULT_RATE_LIMIT_WAIT_SECS)
    }
}

impl RemoteClient for HttpRemoteClient {
    fn get_json(&self, endpoint: &str) -> Option<Value> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));

        let mut retried = false;
        loop {
            let response = match self.send(&url) {
                Ok(response) => response,
                Err(e) => {
                    eprintln!("{}", format!("Warning: request to {url} failed: {e}").yellow());
                    return None;
                }
            };

            if response.status() == StatusCode::TOO_MANY_REQUESTS && !retried {
                let wait = Self::retry_after_secs(&response);
                eprintln!(
                    "{}",
                    format!("Rate limit reached. Waiting {wait} seconds...").yellow()
                );
                std::thread::sleep(Duration::from_secs(wait));
                retried = true;
                continue;
            }

            if !response.status().is_success() {
                eprintln!(
                    "{}",
                    format!("Warning: {} returned status {}", url, response.status()).yellow()
                );
                return None;
            }

            return match response.json() {
                Ok(body) => Some(body),
                Err(e) => {
                    eprintln!(
                        "{}",
                        format!("Warning: could not decode response from {url}: {e}").yellow()
                    );
                    None
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpRemoteClient::new("https://acme.example.com/api/v2/", "key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpRemoteClient::new("https://acme.example.com/api/v2/", "key").unwrap();
        assert_eq!(client.base_url, "https://acme.example.com/api/v2");
    }
}
