use thiserror::Error;

#[derive(Debug, Error)]
pub enum EarthEngineError {
    #[error("No Earth Engine project configured")]
    MissingProject,

    #[error("No Earth Engine access token configured")]
    MissingAccessToken,

    #[error("Invalid API url '{0}'")]
    InvalidApiUrl(String),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    // Decoded from the `{"error": {...}}` body the API sends with non-2xx responses.
    #[error("Earth Engine rejected the request to {url} ({status}): {message}")]
    Api {
        url: String,
        status: reqwest::StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("Failed to decode response from {url}")]
    ResponseDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response from {0} has no 'result' member")]
    MissingResult(String),
}
