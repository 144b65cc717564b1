//! Remote pothole markers.
//!
//! Markers live on a small HTTP service and are mirrored locally as bookmarks in a dedicated
//! category. The service id of each marker is kept on its bookmark so it can be deleted
//! remotely later.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::capabilities::BookmarkInfo;
use crate::config::{ConfigError, PanelConfig};
use crate::model::LatLon;

pub const POTHOLE_CATEGORY: &str = "Potholes";
pub const COORDINATE_TOLERANCE: f64 = 1e-12;

pub const ALREADY_DOWNLOADED_TOAST: &str = "Please delete Pothole List First!";
pub const DOWNLOADED_TOAST: &str = "Pothole List Downloaded!";
pub const FAILURE_TOAST: &str = "An error occurred, please try again!";
pub const REMOVED_TOAST: &str = "Removed pothole from the map!";

const LIST_PATH: &str = "getAllPotholes";
const DELETE_PATH: &str = "deletePothole/";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "_id")]
    pub id: String,
}

impl Marker {
    pub fn location(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MarkerError {
    #[error("network error: {0}")]
    Network(String),

    #[error("marker service returned status {0}")]
    Status(u16),

    #[error("could not decode marker list: {0}")]
    Decode(String),

    #[error("invalid marker url: {0}")]
    InvalidUrl(String),
}

impl From<ConfigError> for MarkerError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerEndpoints {
    base: Url,
}

impl MarkerEndpoints {
    pub fn from_config(config: &PanelConfig) -> Result<Self, MarkerError> {
        Ok(Self {
            base: config.markers_base()?,
        })
    }

    pub fn list_url(&self) -> Result<Url, MarkerError> {
        self.base
            .join(LIST_PATH)
            .map_err(|e| MarkerError::InvalidUrl(e.to_string()))
    }

    pub fn delete_url(&self, id: &str) -> Result<Url, MarkerError> {
        if id.is_empty() || id.contains('/') {
            return Err(MarkerError::InvalidUrl(format!("bad marker id '{id}'")));
        }
        self.base
            .join(DELETE_PATH)
            .and_then(|url| url.join(id))
            .map_err(|e| MarkerError::InvalidUrl(e.to_string()))
    }
}

/// Converts a marker list response into markers.
pub fn from_response(
    result: crux_http::Result<crux_http::Response<Vec<u8>>>,
) -> Result<Vec<Marker>, MarkerError> {
    let mut response = result.map_err(|e| MarkerError::Network(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(MarkerError::Status(status.into()));
    }
    let body = response.take_body().unwrap_or_default();
    decode_markers(&body)
}

/// Converts a delete response into success or failure. The body is ignored.
pub fn delete_result(
    result: crux_http::Result<crux_http::Response<Vec<u8>>>,
) -> Result<(), MarkerError> {
    let response = result.map_err(|e| MarkerError::Network(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(MarkerError::Status(status.into()))
    }
}

pub fn decode_markers(body: &[u8]) -> Result<Vec<Marker>, MarkerError> {
    serde_json::from_slice(body).map_err(|e| MarkerError::Decode(e.to_string()))
}

/// First bookmark whose coordinates match `target` on both axes within the tolerance.
pub fn find_bookmark<'a>(bookmarks: &'a [BookmarkInfo], target: LatLon) -> Option<&'a BookmarkInfo> {
    bookmarks
        .iter()
        .find(|b| b.location.approx_eq(target, COORDINATE_TOLERANCE))
}

/// Bookmarks created from markers carry the marker title.
pub fn is_marker_title(title: &str) -> bool {
    title.eq_ignore_ascii_case("pothole")
}
