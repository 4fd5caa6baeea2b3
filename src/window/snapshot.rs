use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::WindowId;
use crate::constants::SNAPSHOT_VERSION;
use crate::error::SnapshotError;
use crate::geometry::Rect;

/// Serializable copy of open window bounds, keyed by window id.
///
/// Wire shape: `{"version":1,"boundsById":{"<id>":{"x":..,"y":..,"width":..,"height":..}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub version: u32,
    pub bounds_by_id: BTreeMap<WindowId, Rect>,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            bounds_by_id: BTreeMap::new(),
        }
    }
}

impl LayoutSnapshot {
    pub fn is_supported(&self) -> bool {
        self.version == SNAPSHOT_VERSION
    }

    pub fn is_empty(&self) -> bool {
        self.bounds_by_id.is_empty()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot, rejecting payloads that do not carry the
    /// supported version.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: LayoutSnapshot = serde_json::from_str(text)?;
        if !snapshot.is_supported() {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut snapshot = LayoutSnapshot::default();
        snapshot
            .bounds_by_id
            .insert("a".into(), Rect::new(1.0, 2.0, 300.0, 200.0));
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"boundsById\""));
        assert!(json.contains("\"version\":1"));
    }

    #[test]
    fn rejects_other_versions() {
        let err = LayoutSnapshot::from_json(r#"{"version":2,"boundsById":{}}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::UnsupportedVersion(2)));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(matches!(
            LayoutSnapshot::from_json(r#"{"version":1}"#),
            Err(SnapshotError::Json(_))
        ));
        assert!(LayoutSnapshot::from_json("not json").is_err());
    }
}
