use std::fmt;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::configuration::ApiClientSettings;

/// What came back for one endpoint. Nothing here is propagated: the report
/// prints every variant and moves on.
#[derive(Debug)]
pub enum Outcome {
    Success(Body),
    HttpError { status: StatusCode, body: String },
    Failed(reqwest::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(body) => body.fmt(f),
            Self::HttpError { status, body } => write!(
                f,
                "HTTPError {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("<unknown status code>"),
                body
            ),
            Self::Failed(e) => write!(f, "Request failed: {}", e),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiClientSettings, base_url: String) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[tracing::instrument(name = "Fetching endpoint", skip(self))]
    pub async fn fetch(&self, path: &str) -> Outcome {
        let response = match self.http_client.get(self.url(path)).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error.message = %e, "Request did not complete");
                return Outcome::Failed(e);
            }
        };
        let status = response.status();
        tracing::info!(status = status.as_u16(), "Received response");
        // Redirects are already followed; anything else outside 2xx is an error.
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Outcome::HttpError { status, body };
        }
        match response.text().await {
            Ok(text) => Outcome::Success(Body::from_text(text)),
            Err(e) => Outcome::Failed(e),
        }
    }
}
