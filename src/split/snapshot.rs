use serde::{Deserialize, Serialize};

use crate::constants::SNAPSHOT_VERSION;
use crate::error::SnapshotError;

/// Serializable split ratios: `{"version":1,"rowHeights":[..],"colWidths":[..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLayoutSnapshot {
    pub version: u32,
    #[serde(default)]
    pub row_heights: Vec<f64>,
    #[serde(default)]
    pub col_widths: Vec<f64>,
}

impl SplitLayoutSnapshot {
    pub fn new(row_heights: Vec<f64>, col_widths: Vec<f64>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            row_heights,
            col_widths,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.version == SNAPSHOT_VERSION
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: SplitLayoutSnapshot = serde_json::from_str(text)?;
        if !snapshot.is_supported() {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}
