//! Survey configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::submit::SubmissionPacing;

/// Deployed sink endpoint (accepts urlencoded form posts).
pub const DEFAULT_FORM_ENDPOINT: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSe5QizV-hupWjb6GnBOxOZaMMs9z7b3n-N327oeTp9YblPqOQ/formResponse";

/// The sink's own hosted form, offered as a manual recovery path.
pub const DEFAULT_FALLBACK_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSe5QizV-hupWjb6GnBOxOZaMMs9z7b3n-N327oeTp9YblPqOQ/viewform";

/// Wizard configuration.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Form sink endpoint for both delivery channels.
    pub form_endpoint: String,
    /// Manual fallback link shown on the success screen.
    pub fallback_form_url: String,
    /// Directory receiving CSV exports.
    pub export_dir: PathBuf,
    /// Finalize pacing.
    pub pacing: SubmissionPacing,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            fallback_form_url: DEFAULT_FALLBACK_FORM_URL.to_string(),
            export_dir: PathBuf::from("."),
            pacing: SubmissionPacing::default(),
        }
    }
}

impl SurveyConfig {
    /// Defaults overridden by `SATM_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SATM_FORM_ENDPOINT") {
            config.form_endpoint = url;
        }
        if let Ok(url) = std::env::var("SATM_FALLBACK_FORM_URL") {
            config.fallback_form_url = url;
        }
        if let Ok(dir) = std::env::var("SATM_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        if let Ok(raw) = std::env::var("SATM_LINKING_DELAY_MS") {
            config.pacing.linking_delay = parse_millis("SATM_LINKING_DELAY_MS", &raw)?;
        }
        if let Ok(raw) = std::env::var("SATM_SETTLE_DELAY_MS") {
            config.pacing.settle_delay = parse_millis("SATM_SETTLE_DELAY_MS", &raw)?;
        }
        Ok(config)
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}
