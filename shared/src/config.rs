use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::animator::DEFAULT_DURATION_MS;

pub const DEFAULT_BUTTONS_HEIGHT: i32 = 168;
pub const DEFAULT_MAX_BUTTONS: usize = 5;
pub const DEFAULT_ROUTING_HEADER_HEIGHT: i32 = 168;
pub const DEFAULT_VIEWPORT_MIN_HEIGHT: i32 = 420;
pub const DEFAULT_MARKERS_BASE_URL: &str = "https://busy-pink-tadpole-toga.cyclic.cloud/api/pothole/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max visible buttons must be at least 1")]
    ZeroMaxButtons,

    #[error("{field} cannot be negative: {value}")]
    NegativeDimension { field: &'static str, value: i32 },

    #[error("invalid markers base url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Host-provided dimensions and settings of the place page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub buttons_height: i32,
    pub max_buttons: usize,
    pub routing_header_height: i32,
    pub viewport_min_height: i32,
    pub peek_animation_ms: u64,
    pub markers_base_url: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            buttons_height: DEFAULT_BUTTONS_HEIGHT,
            max_buttons: DEFAULT_MAX_BUTTONS,
            routing_header_height: DEFAULT_ROUTING_HEADER_HEIGHT,
            viewport_min_height: DEFAULT_VIEWPORT_MIN_HEIGHT,
            peek_animation_ms: DEFAULT_DURATION_MS,
            markers_base_url: DEFAULT_MARKERS_BASE_URL.to_string(),
        }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_buttons == 0 {
            return Err(ConfigError::ZeroMaxButtons);
        }
        for (field, value) in [
            ("buttons_height", self.buttons_height),
            ("routing_header_height", self.routing_header_height),
            ("viewport_min_height", self.viewport_min_height),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeDimension { field, value });
            }
        }
        self.markers_base()?;
        Ok(())
    }

    /// Base URL of the marker service. Always ends with `/` so endpoints can be joined.
    pub fn markers_base(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: self.markers_base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.markers_base_url).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}
