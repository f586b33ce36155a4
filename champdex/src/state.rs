//! Application state - single source of truth

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::counter::ChampionCounterData;
use crate::custom::{CustomData, Lane};
use crate::favorites::Favorites;
use crate::search::{self, FilterState};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChampionImage {
    pub full: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChampionStats {
    #[serde(default)]
    pub attackrange: Option<f64>,
}

/// One roster entry as delivered by the feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Champion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: ChampionImage,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stats: Option<ChampionStats>,
}

impl Champion {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            image: ChampionImage {
                full: format!("{id}.png"),
            },
            id,
            name: name.into(),
            tags: Vec::new(),
            stats: None,
        }
    }

    pub fn attack_range(&self) -> Option<f64> {
        self.stats.as_ref().and_then(|stats| stats.attackrange)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Matchups for the champion currently open in the detail view.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct DetailState {
    pub champion_id: String,
    /// `Loaded(None)` means the curated source has no entry for this champion.
    pub counters: DataResource<Option<ChampionCounterData>>,
}

impl DetailState {
    pub fn loading(champion_id: impl Into<String>) -> Self {
        Self {
            champion_id: champion_id.into(),
            counters: DataResource::Loading,
        }
    }
}

fn default_overlay() -> Arc<CustomData> {
    Arc::new(CustomData::embedded())
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Feed version the roster was (or will be) fetched for
    #[debug(section = "Roster", label = "Version", debug_fmt)]
    pub version: Option<String>,

    /// Roster lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Roster", label = "Champions", debug_fmt)]
    pub roster: DataResource<Vec<Champion>>,

    /// Curated overlay, read-only for the life of the process
    #[debug(skip)]
    #[serde(skip, default = "default_overlay")]
    pub custom: Arc<CustomData>,

    #[debug(section = "Filters", label = "Search", debug_fmt)]
    pub search: SearchState,

    #[debug(section = "Filters", label = "Lanes", debug_fmt)]
    pub lanes: Vec<Lane>,

    #[debug(section = "Filters", label = "Favorites only")]
    pub favorite_only: bool,

    #[debug(section = "Favorites", label = "Ids", debug_fmt)]
    pub favorites: Favorites,

    #[debug(skip)]
    pub favorites_path: String,

    /// Ids of the current result set, in display order
    #[debug(section = "Results", label = "Ids", debug_fmt)]
    pub results: Vec<String>,

    #[debug(section = "Results", label = "Selected")]
    pub selected_index: usize,

    /// Champion whose splash sits behind the list
    #[debug(section = "Results", label = "Background", debug_fmt)]
    pub background: Option<String>,

    #[debug(section = "Detail", label = "Open", debug_fmt)]
    pub detail: Option<DetailState>,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,

    #[debug(skip)]
    pub terminal_size: (u16, u16),

    #[debug(skip)]
    pub rng_seed: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(default_overlay(), Favorites::default())
    }
}

impl AppState {
    pub fn new(custom: Arc<CustomData>, favorites: Favorites) -> Self {
        Self {
            version: None,
            roster: DataResource::Empty,
            custom,
            search: SearchState::default(),
            lanes: Vec::new(),
            favorite_only: false,
            favorites,
            favorites_path: String::new(),
            results: Vec::new(),
            selected_index: 0,
            background: None,
            detail: None,
            message: None,
            terminal_size: (80, 24),
            rng_seed: seed_from_time(),
        }
    }

    pub fn champions(&self) -> &[Champion] {
        self.roster.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn champion(&self, id: &str) -> Option<&Champion> {
        self.champions().iter().find(|champion| champion.id == id)
    }

    /// The one filter value the search engine consumes.
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            query: self.search.query.clone(),
            lanes: self.lanes.clone(),
            favorite_only: self.favorite_only,
        }
    }

    pub fn rebuild_results(&mut self) {
        let filter = self.filter_state();
        self.results = search::search(self.champions(), &self.custom, &filter, &self.favorites)
            .into_iter()
            .map(|champion| champion.id.clone())
            .collect();
        if self.selected_index >= self.results.len() {
            self.selected_index = 0;
        }
    }

    /// Swap in a different overlay; lane filters and aliases depend on it.
    pub fn set_overlay(&mut self, custom: Arc<CustomData>) {
        self.custom = custom;
        self.rebuild_results();
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.results.get(self.selected_index).map(String::as_str)
    }

    pub fn selected_champion(&self) -> Option<&Champion> {
        self.selected_id().and_then(|id| self.champion(id))
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.results.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.results.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn detail_champion(&self) -> Option<&Champion> {
        let detail = self.detail.as_ref()?;
        self.champion(&detail.champion_id)
    }

    pub fn background_champion(&self) -> Option<&Champion> {
        self.background.as_deref().and_then(|id| self.champion(id))
    }
}

fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() << 32) ^ now.subsec_nanos() as u64
}
