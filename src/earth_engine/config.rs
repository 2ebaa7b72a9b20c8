//! Connection settings for the Earth Engine REST API.

use crate::earth_engine::error::EarthEngineError;
use bon::Builder;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://earthengine.googleapis.com";
pub const API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Where and as whom to send compute requests.
///
/// The access token is used as-is in the `Authorization: Bearer` header; obtaining
/// or refreshing it (e.g. `gcloud auth print-access-token`) happens outside this crate.
///
/// # Examples
///
/// ```
/// use water_extent::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .project("my-cloud-project")
///     .access_token("ya29.token")
///     .build();
///
/// assert_eq!(
///     config.compute_url(),
///     "https://earthengine.googleapis.com/v1/projects/my-cloud-project/value:compute"
/// );
/// ```
#[derive(Clone, Builder)]
pub struct ClientConfig {
    #[builder(into)]
    pub project: String,
    #[builder(into)]
    pub access_token: String,
    #[builder(into, default = DEFAULT_API_URL.to_string())]
    pub api_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn compute_url(&self) -> String {
        format!(
            "{}/{}/projects/{}/value:compute",
            self.api_url.trim_end_matches('/'),
            API_VERSION,
            self.project
        )
    }

    pub(crate) fn validate(&self) -> Result<(), EarthEngineError> {
        if self.project.trim().is_empty() {
            return Err(EarthEngineError::MissingProject);
        }
        if self.access_token.trim().is_empty() {
            return Err(EarthEngineError::MissingAccessToken);
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(EarthEngineError::InvalidApiUrl(self.api_url.clone()));
        }
        Ok(())
    }
}

// Keep the token out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("project", &self.project)
            .field("access_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
