//! Roster search: sorting, lane/text/favorite filtering and kana grouping.
//!
//! The pipeline order is fixed: sort by name, lane filter, text match, then
//! favorites. Favorites only narrow what is displayed; [`background_pool`]
//! stops before that step.

use std::cmp::Ordering;

use icu::collator::{options::CollatorOptions, Collator, CollatorBorrowed};
use icu::locale::locale;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::custom::{CustomData, Lane};
use crate::favorites::Favorites;
use crate::kana::{normalize_for_search, KanaRow};
use crate::state::Champion;

/// Everything the user can narrow the roster by, consumed as one value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterState {
    pub query: String,
    pub lanes: Vec<Lane>,
    pub favorite_only: bool,
}

impl FilterState {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// A query or lane filter is active, so the flat list is shown.
    pub fn is_narrowed(&self) -> bool {
        !self.query.is_empty() || !self.lanes.is_empty()
    }
}

/// Name ordering for the Japanese display locale.
///
/// Backed by the ICU `ja` collator, so ヴ sorts alongside ウ. Falls back to
/// code point order on the search form when collation data is unavailable.
pub struct NameCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl NameCollator {
    pub fn japanese() -> Self {
        let collator = Collator::try_new(locale!("ja").into(), CollatorOptions::default())
            .map_err(|err| tracing::warn!(%err, "ja collation unavailable, using code point order"))
            .ok();
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => normalize_for_search(a)
                .cmp(&normalize_for_search(b))
                .then_with(|| a.cmp(b)),
        }
    }
}

/// Compare two display names under Japanese collation.
pub fn collate(a: &str, b: &str) -> Ordering {
    NameCollator::japanese().compare(a, b)
}

/// Stable sort by display name; equal names keep roster order.
pub fn sort_roster(roster: &[Champion]) -> Vec<&Champion> {
    let collator = NameCollator::japanese();
    let mut sorted: Vec<&Champion> = roster.iter().collect();
    sorted.sort_by(|a, b| collator.compare(&a.name, &b.name));
    sorted
}

/// Does `champion` match the query on name, id or any curated alias?
///
/// `normalized` is the query in search form; `lowered` is the raw query
/// lowercased, used for the id since ids are ASCII and never kana-folded.
pub fn matches_query(
    champion: &Champion,
    custom: &CustomData,
    normalized: &str,
    lowered: &str,
) -> bool {
    if normalize_for_search(&champion.name).contains(normalized) {
        return true;
    }
    if champion.id.to_lowercase().contains(lowered) {
        return true;
    }
    custom.lookup(&champion.id).is_some_and(|entry| {
        entry
            .nicknames
            .iter()
            .any(|nickname| normalize_for_search(nickname).contains(normalized))
    })
}

/// Sorted roster after the lane filter and text match, before favorites.
fn candidates<'a>(
    roster: &'a [Champion],
    custom: &CustomData,
    filter: &FilterState,
) -> Vec<&'a Champion> {
    let mut sorted = sort_roster(roster);

    if !filter.lanes.is_empty() {
        sorted.retain(|champion| {
            custom
                .lookup(&champion.id)
                .is_some_and(|entry| entry.plays_any(&filter.lanes))
        });
    }

    if !filter.is_narrowed() {
        return sorted;
    }

    let normalized = normalize_for_search(&filter.query);
    let lowered = filter.query.to_lowercase();
    sorted.retain(|champion| matches_query(champion, custom, &normalized, &lowered));
    sorted
}

/// The ordered result set for one filter state.
pub fn search<'a>(
    roster: &'a [Champion],
    custom: &CustomData,
    filter: &FilterState,
    favorites: &Favorites,
) -> Vec<&'a Champion> {
    let mut result = candidates(roster, custom, filter);
    if filter.favorite_only {
        result.retain(|champion| favorites.contains(&champion.id));
    }
    result
}

/// Champions eligible as the list background. Honors lanes and query but
/// deliberately ignores the favorite-only toggle.
pub fn background_pool<'a>(
    roster: &'a [Champion],
    custom: &CustomData,
    filter: &FilterState,
) -> Vec<&'a Champion> {
    candidates(roster, custom, filter)
}

/// Pick one champion from `pool` using a caller supplied random roll.
pub fn pick_background<'a>(pool: &[&'a Champion], roll: u32) -> Option<&'a Champion> {
    if pool.is_empty() {
        return None;
    }
    pool.get(roll as usize % pool.len()).copied()
}

#[derive(Clone, Debug, PartialEq)]
pub struct KanaGroup<'a> {
    pub row: KanaRow,
    pub champions: Vec<&'a Champion>,
}

/// Split an already sorted list into maximal runs of the same kana row.
pub fn group_by_kana<'a>(sorted: &[&'a Champion]) -> Vec<KanaGroup<'a>> {
    let mut groups: Vec<KanaGroup<'a>> = Vec::new();
    for &champion in sorted {
        let row = KanaRow::of_name(&champion.name);
        match groups.last_mut() {
            Some(group) if group.row == row => group.champions.push(champion),
            _ => groups.push(KanaGroup {
                row,
                champions: vec![champion],
            }),
        }
    }
    groups
}

/// What the list shows: kana groups while nothing narrows the roster, the
/// flat result otherwise. Both hold the same champions for a given filter.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchView<'a> {
    Grouped(Vec<KanaGroup<'a>>),
    Flat(Vec<&'a Champion>),
}

impl<'a> SearchView<'a> {
    pub fn build(
        roster: &'a [Champion],
        custom: &CustomData,
        filter: &FilterState,
        favorites: &Favorites,
    ) -> Self {
        let result = search(roster, custom, filter, favorites);
        Self::from_results(result, filter)
    }

    pub fn from_results(result: Vec<&'a Champion>, filter: &FilterState) -> Self {
        if filter.is_narrowed() {
            SearchView::Flat(result)
        } else {
            SearchView::Grouped(group_by_kana(&result))
        }
    }

    pub fn champions(&self) -> Vec<&'a Champion> {
        match self {
            SearchView::Grouped(groups) => groups
                .iter()
                .flat_map(|group| group.champions.iter().copied())
                .collect(),
            SearchView::Flat(result) => result.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SearchView::Grouped(groups) => groups.is_empty(),
            SearchView::Flat(result) => result.is_empty(),
        }
    }
}
