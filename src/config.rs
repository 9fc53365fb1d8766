// src/config.rs
// =============================================================================
// Connection settings: which AWS profile and region to talk to.
//
// Values come from (in order of use):
// 1. The environment (AWS_PROFILE / AWS_REGION, optionally loaded from a
//    .env file) or CLI flags, via clap
// 2. The sidebar form in the browser page, when the environment does not
//    name both a profile and a region
//
// Credentials themselves are never read here; the AWS SDK resolves them from
// the chosen profile.
// =============================================================================

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ExplorerError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Custom service endpoint (LocalStack and similar)
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl ConnectionSettings {
    pub fn new(
        profile: Option<String>,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> Self {
        Self {
            profile: non_empty(profile),
            region: non_empty(region),
            endpoint_url: non_empty(endpoint_url),
        }
    }

    /// True when both a profile and a region are known.
    pub fn is_complete(&self) -> bool {
        self.profile.is_some() && self.region.is_some()
    }

    /// Picks the settings for a form submission.
    ///
    /// When the defaults already name a profile and a region the form is
    /// ignored; otherwise the form's values are used. The endpoint always
    /// comes from the defaults, the page has no field for it.
    pub fn resolve(&self, form: &ConnectionSettings) -> ConnectionSettings {
        if self.is_complete() {
            return self.clone();
        }

        ConnectionSettings {
            profile: non_empty(form.profile.clone()),
            region: non_empty(form.region.clone()),
            endpoint_url: self.endpoint_url.clone(),
        }
    }

    /// Checks the endpoint URL, if any, and returns it parsed.
    pub fn validated_endpoint(&self) -> Result<Option<Url>> {
        let Some(raw) = &self.endpoint_url else {
            return Ok(None);
        };

        let parsed = Url::parse(raw).map_err(|e| ExplorerError::InvalidEndpoint {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(Some(parsed)),
            other => Err(ExplorerError::InvalidEndpoint {
                url: raw.clone(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }
}

/// Loads `.env` from the working directory (or a parent), if there is one.
/// Variables already set in the process environment win.
pub fn load_env_file() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "loaded environment file");
    }
}

// Form fields arrive as empty strings when left blank
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
