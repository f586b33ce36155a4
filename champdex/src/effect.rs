//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Resolve the newest feed version
    FetchVersion,
    /// Fetch the roster snapshot for a version
    FetchRoster { version: String },
    /// Look up curated matchups for one champion
    LoadCounters { champion_id: String },
    /// Replace the persisted favorites with `ids`
    SaveFavorites { path: String, ids: Vec<String> },
}
