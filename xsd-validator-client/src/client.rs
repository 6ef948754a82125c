use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;
use xsd_validator_core::dto::{ValidationRequest, ValidationResponse};

use crate::errors::{ClientError, Result};

/// Client for a deployed XSD validation function.
///
/// Sends `{"data", "schema"}` to the function and turns its answer into a
/// verdict or an error. The client is cheap to clone and can be shared.
#[derive(Debug, Clone)]
pub struct ValidationClient {
    url: String,
    content_type: String,
    http: reqwest::Client,
}

impl ValidationClient {
    /// Initializes a new `ValidationClientBuilder` instance.
    pub fn builder() -> ValidationClientBuilder {
        ValidationClientBuilder::default()
    }

    pub fn service_url(&self) -> &str {
        &self.url
    }

    /// Validate `message` (XML) against `schema` (XSD).
    ///
    /// Both are sent as UTF-8 text; invalid sequences are replaced.
    ///
    /// # Returns
    ///
    /// - `Ok(valid)`: the function reached a verdict (HTTP 200).
    /// - `Err(ClientError::BadRequest(info))`: the function refused the request (HTTP 400).
    /// - `Err(ClientError::UnexpectedStatus(code))`: any other status.
    pub async fn validate(&self, message: &[u8], schema: &[u8]) -> Result<bool> {
        let request = ValidationRequest {
            data: String::from_utf8_lossy(message).into_owned(),
            schema: String::from_utf8_lossy(schema).into_owned(),
        };

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, &self.content_type)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), "validator answered");

        match status {
            StatusCode::OK => Ok(decode(&body)?.validation),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(decode(&body)?.info)),
            other => Err(ClientError::UnexpectedStatus(other.as_u16())),
        }
    }
}

fn decode(body: &str) -> Result<ValidationResponse> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// A builder for configuring and creating a `ValidationClient` instance.
#[derive(Debug, Clone)]
pub struct ValidationClientBuilder {
    url: String,
    content_type: String,
    timeout: Option<Duration>,
}

impl Default for ValidationClientBuilder {
    fn default() -> Self {
        Self {
            url: String::new(),
            content_type: "application/json".to_string(),
            timeout: None,
        }
    }
}

impl ValidationClientBuilder {
    /// Full URL of the validation endpoint, including its route.
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Content type sent with each request, `application/json` by default.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ValidationClient> {
        if self.url.is_empty() {
            return Err(ClientError::Config("service url is required".to_string()));
        }

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(ValidationClient {
            url: self.url,
            content_type: self.content_type,
            http: http.build()?,
        })
    }
}
