//! Curated matchup data and its resolution against the live roster.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::state::Champion;

const EMBEDDED_COUNTERS: &str = include_str!("../data/counters.json");

/// How many favorable/unfavorable opponents the detail view shows.
pub const MATCHUP_DISPLAY_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterMatchup {
    pub champion_id: String,
}

impl CounterMatchup {
    pub fn new(champion_id: impl Into<String>) -> Self {
        Self {
            champion_id: champion_id.into(),
        }
    }
}

/// Favorable and unfavorable opponents for one champion, in curated order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChampionCounterData {
    #[serde(default)]
    pub strong_against: Vec<CounterMatchup>,
    #[serde(default)]
    pub weak_against: Vec<CounterMatchup>,
}

/// Where matchup data comes from. The JSON-backed source is the only one
/// today; consumers hold a `dyn CounterDataSource` so it can be swapped.
#[async_trait]
pub trait CounterDataSource: Send + Sync {
    async fn counter_data(&self, champion_id: &str) -> Option<ChampionCounterData>;
    async fn all_counter_data(&self) -> HashMap<String, ChampionCounterData>;
}

/// Hand-curated matchups read from a static JSON document.
#[derive(Clone, Debug, Default)]
pub struct ManualCounterDataSource {
    data: HashMap<String, ChampionCounterData>,
}

impl ManualCounterDataSource {
    pub fn new(data: HashMap<String, ChampionCounterData>) -> Self {
        Self { data }
    }

    pub fn embedded() -> Self {
        match Self::from_json_str("embedded counters.json", EMBEDDED_COUNTERS) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(%err, "embedded counters unreadable, continuing without them");
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

    pub fn from_json_str(name: &str, json: &str) -> Result<Self, DataError> {
        let raw: HashMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|source| DataError::Parse {
                name: name.to_string(),
                source,
            })?;
        let mut data = HashMap::with_capacity(raw.len());
        for (id, value) in raw {
            match serde_json::from_value::<ChampionCounterData>(value) {
                Ok(entry) => {
                    data.insert(id, entry);
                }
                Err(err) => tracing::warn!(%id, %err, "skipping malformed counter entry"),
            }
        }
        Ok(Self { data })
    }
}

#[async_trait]
impl CounterDataSource for ManualCounterDataSource {
    async fn counter_data(&self, champion_id: &str) -> Option<ChampionCounterData> {
        self.data.get(champion_id).cloned()
    }

    async fn all_counter_data(&self) -> HashMap<String, ChampionCounterData> {
        self.data.clone()
    }
}

/// An opponent id paired with its roster entry, if the roster has one.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMatchup<'a> {
    pub champion_id: &'a str,
    pub champion: Option<&'a Champion>,
}

impl ResolvedMatchup<'_> {
    /// Roster name when resolved, the raw id otherwise.
    pub fn display_name(&self) -> &str {
        self.champion
            .map(|champion| champion.name.as_str())
            .unwrap_or(self.champion_id)
    }
}

/// Resolve opponent ids against the roster, keeping input order. Ids the
/// roster does not know still produce a record, with no champion attached.
pub fn resolve_matchups<'a>(
    records: &'a [CounterMatchup],
    roster: &'a [Champion],
) -> Vec<ResolvedMatchup<'a>> {
    let index: HashMap<&str, &Champion> = roster
        .iter()
        .map(|champion| (champion.id.as_str(), champion))
        .collect();
    records
        .iter()
        .map(|record| {
            let champion = index.get(record.champion_id.as_str()).copied();
            if champion.is_none() {
                tracing::debug!(id = %record.champion_id, "matchup references unknown champion");
            }
            ResolvedMatchup {
                champion_id: &record.champion_id,
                champion,
            }
        })
        .collect()
}

/// Both sides of a champion's matchups, truncated for display.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchupSummary<'a> {
    pub favorable: Vec<ResolvedMatchup<'a>>,
    pub unfavorable: Vec<ResolvedMatchup<'a>>,
}

impl ChampionCounterData {
    /// First `limit` opponents of each list, curated order untouched.
    pub fn summarize<'a>(&'a self, roster: &'a [Champion], limit: usize) -> MatchupSummary<'a> {
        let strong = &self.strong_against[..limit.min(self.strong_against.len())];
        let weak = &self.weak_against[..limit.min(self.weak_against.len())];
        MatchupSummary {
            favorable: resolve_matchups(strong, roster),
            unfavorable: resolve_matchups(weak, roster),
        }
    }
}
