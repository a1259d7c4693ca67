use crate::error::ConversionError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A step as stored by the funnel editor: every numeric input flattened onto one record,
/// with source-only fields optional.
///
/// Computed fields that saved files may carry (`visitorsIn`, `revenue`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_weights: Option<AHashMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub product_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpa: Option<f64>,
}

/// A named funnel as written by the editor's save action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFunnel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub steps: Vec<StepRecord>,
}

/// Any JSON document a funnel can be loaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunnelDocument {
    Saved(SavedFunnel),
    Steps(Vec<StepRecord>),
}

impl FunnelDocument {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a funnel document from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConversionError::JsonParseError(format!(
                "Could not read file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            FunnelDocument::Saved(saved) => Some(&saved.name),
            FunnelDocument::Steps(_) => None,
        }
    }

    pub fn steps(&self) -> &[StepRecord] {
        match self {
            FunnelDocument::Saved(saved) => &saved.steps,
            FunnelDocument::Steps(steps) => steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAVED: &str = r#"{
        "name": "Launch",
        "date": "2024-05-01T10:00:00Z",
        "steps": [
            { "id": "1", "type": "AD", "name": "Ad", "nextSteps": ["2"],
              "conversionRate": 100, "productPrice": 0, "trafficVolume": 2000, "cpc": 1.5,
              "visitorsIn": 0, "visitorsOut": 2000, "revenue": 0, "cost": 3000 },
            { "id": "2", "type": "SALES", "name": "Sales", "conversionRate": 4, "productPrice": 197 }
        ]
    }"#;

    #[test]
    fn parses_saved_funnel_and_ignores_computed_fields() {
        let doc = FunnelDocument::from_json(SAVED).unwrap();
        assert_eq!(doc.name(), Some("Launch"));
        assert_eq!(doc.steps().len(), 2);
        assert_eq!(doc.steps()[0].traffic_volume, Some(2000.0));
        assert!(doc.steps()[1].next_steps.is_empty());
    }

    #[test]
    fn parses_bare_step_array() {
        let doc = FunnelDocument::from_json(r#"[{ "id": "1", "type": "TRAFFIC" }]"#).unwrap();
        assert_eq!(doc.name(), None);
        assert_eq!(doc.steps()[0].category, "TRAFFIC");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = FunnelDocument::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConversionError::JsonParseError(_)));
    }
}
