use crate::selection::SampleIndex;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict/";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const SAMPLE_BASE_PATH: &str = "/images";
pub const SAMPLE_COUNT: u8 = 4;
/// Multipart field the classification service reads the image from.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub sample_base_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            sample_base_path: SAMPLE_BASE_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Uses `endpoint` when it is set and non-blank, the local development
    /// default otherwise.
    pub fn from_override(endpoint: Option<&str>) -> Self {
        match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            Some(endpoint) => Self {
                endpoint: endpoint.to_string(),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn sample_path(&self, index: SampleIndex) -> String {
        format!(
            "{}/{}",
            self.sample_base_path.trim_end_matches('/'),
            index.asset_name()
        )
    }
}
