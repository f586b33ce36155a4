//! Curated per-champion metadata layered over the feed roster.
//!
//! The overlay is loaded once at startup and handed by reference to search
//! and tag composition. Entries that fail to parse are skipped one by one so a
//! single bad record never hides the rest of the dataset.

use std::collections::HashMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

const EMBEDDED_OVERLAY: &str = include_str!("../data/champions.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Top,
    Jg,
    Mid,
    Bot,
    Sup,
}

impl Lane {
    pub const ALL: [Lane; 5] = [Lane::Top, Lane::Jg, Lane::Mid, Lane::Bot, Lane::Sup];

    pub fn label(self) -> &'static str {
        match self {
            Lane::Top => "TOP",
            Lane::Jg => "JG",
            Lane::Mid => "MID",
            Lane::Bot => "BOT",
            Lane::Sup => "SUP",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Ad,
    Ap,
    Hybrid,
}

impl DamageType {
    pub fn label(self) -> &'static str {
        match self {
            DamageType::Ad => "AD",
            DamageType::Ap => "AP",
            DamageType::Hybrid => "AD・AP",
        }
    }
}

/// One curated record: search aliases, lane roles and damage profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomChampionData {
    #[serde(default)]
    pub nicknames: Vec<String>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub lanes: Vec<Lane>,
}

impl CustomChampionData {
    pub fn plays_any(&self, lanes: &[Lane]) -> bool {
        self.lanes.iter().any(|lane| lanes.contains(lane))
    }
}

/// Read-only index of curated records keyed by champion id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomData {
    entries: HashMap<String, CustomChampionData>,
}

impl CustomData {
    pub fn new(entries: HashMap<String, CustomChampionData>) -> Self {
        Self { entries }
    }

    /// The dataset compiled into the binary.
    pub fn embedded() -> Self {
        match Self::from_json_str("embedded champions.json", EMBEDDED_OVERLAY) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(%err, "embedded overlay unreadable, continuing without it");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&path.display().to_string(), &json)
    }

    /// Parse a `{ id: entry }` document. Only a non-object top level is an
    /// error; individual malformed entries are dropped with a warning.
    pub fn from_json_str(name: &str, json: &str) -> Result<Self, DataError> {
        let raw: HashMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|source| DataError::Parse {
                name: name.to_string(),
                source,
            })?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (id, value) in raw {
            match serde_json::from_value::<CustomChampionData>(value) {
                Ok(entry) => {
                    entries.insert(id, entry);
                }
                Err(err) => {
                    tracing::warn!(%id, %err, "skipping malformed overlay entry");
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, id: &str) -> Option<&CustomChampionData> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_present_and_absent() {
        let data = CustomData::from_json_str(
            "test",
            r#"{"Ashe": {"nicknames": ["弓"], "damageType": "ad", "lanes": ["bot", "sup"]}}"#,
        )
        .unwrap();

        let ashe = data.lookup("Ashe").unwrap();
        assert_eq!(ashe.nicknames, vec!["弓".to_string()]);
        assert_eq!(ashe.damage_type, Some(DamageType::Ad));
        assert_eq!(ashe.lanes, vec![Lane::Bot, Lane::Sup]);
        assert!(data.lookup("Zed").is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let data = CustomData::from_json_str("test", r#"{"Zed": {}}"#).unwrap();
        assert_eq!(data.lookup("Zed"), Some(&CustomChampionData::default()));
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let data = CustomData::from_json_str(
            "test",
            r#"{
                "Ashe": {"nicknames": ["弓"]},
                "Broken": {"nicknames": "not a list"},
                "Odd": {"damageType": "true"},
                "Zed": {"lanes": ["mid"]}
            }"#,
        )
        .unwrap();

        assert_eq!(data.len(), 2);
        assert!(data.lookup("Broken").is_none());
        assert!(data.lookup("Odd").is_none());
        assert!(data.lookup("Zed").is_some());
    }

    #[test]
    fn test_non_object_document_is_error() {
        let err = CustomData::from_json_str("test", "[1, 2]").unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }

    #[test]
    fn test_embedded_dataset_loads() {
        let data = CustomData::embedded();
        assert!(!data.is_empty());
    }

    #[test]
    fn test_plays_any() {
        let entry = CustomChampionData {
            lanes: vec![Lane::Top, Lane::Mid],
            ..Default::default()
        };
        assert!(entry.plays_any(&[Lane::Mid]));
        assert!(!entry.plays_any(&[Lane::Sup, Lane::Bot]));
        assert!(!entry.plays_any(&[]));
    }
}
