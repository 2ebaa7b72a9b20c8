use crate::earth_engine::config::ClientConfig;
use crate::earth_engine::encoder::{encode, Expression};
use crate::earth_engine::error::EarthEngineError;
use crate::earth_engine::value::Value;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct ComputeValueRequest<'a> {
    expression: &'a Expression,
}

#[derive(Deserialize)]
struct ComputeValueResponse {
    result: Option<Json>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
}

/// Sends computations to the `value:compute` endpoint.
pub struct ComputeClient {
    config: ClientConfig,
    http_client: Client,
}

impl ComputeClient {
    pub fn new(config: ClientConfig) -> Result<Self, EarthEngineError> {
        config.validate()?;
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(EarthEngineError::ClientBuild)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Evaluates `value` remotely and returns the `result` member of the response.
    ///
    /// A single attempt is made; failures are reported, not retried.
    pub async fn compute(&self, value: &Value) -> Result<Json, EarthEngineError> {
        let expression = encode(value);
        self.compute_expression(&expression).await
    }

    pub async fn compute_expression(&self, expression: &Expression) -> Result<Json, EarthEngineError> {
        let url = self.config.compute_url();
        info!(
            "Requesting computation ({} value nodes) from {}",
            expression.values.len(),
            url
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .header("x-goog-user-project", &self.config.project)
            .json(&ComputeValueRequest { expression })
            .send()
            .await
            .map_err(|e| EarthEngineError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| EarthEngineError::NetworkRequest(url.clone(), e))?;

        if !status.is_success() {
            warn!("HTTP error {} for {}", status, url);
            return Err(match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(ErrorResponse { error }) => EarthEngineError::Api {
                    url,
                    status,
                    code: error.status,
                    message: error.message,
                },
                Err(_) => EarthEngineError::HttpStatus { url, status },
            });
        }

        debug!("Received {} bytes from {}", body.len(), url);
        let decoded: ComputeValueResponse = serde_json::from_slice(&body)
            .map_err(|source| EarthEngineError::ResponseDecode {
                url: url.clone(),
                source,
            })?;
        decoded.result.ok_or(EarthEngineError::MissingResult(url))
    }
}
