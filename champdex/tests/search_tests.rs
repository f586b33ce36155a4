//! Search pipeline against the built-in curated datasets

use champdex::{
    counter::{CounterDataSource, ManualCounterDataSource, MATCHUP_DISPLAY_LIMIT},
    custom::{CustomData, Lane},
    favorites::Favorites,
    search::{self, FilterState, SearchView},
    state::Champion,
};
use pretty_assertions::assert_eq;

fn roster() -> Vec<Champion> {
    vec![
        Champion::new("Ashe", "アッシュ"),
        Champion::new("Zed", "ゼド"),
        Champion::new("Nasus", "ナサス"),
        Champion::new("Aatrox", "エイトロックス"),
        Champion::new("Garen", "ガレン"),
        Champion::new("Yasuo", "ヤスオ"),
        Champion::new("Lux", "ラックス"),
    ]
}

fn ids(champions: &[&Champion]) -> Vec<String> {
    champions.iter().map(|champion| champion.id.clone()).collect()
}

#[test]
fn test_kana_query_matches_katakana_name() {
    let roster = vec![Champion::new("ashe", "アッシュ"), Champion::new("zed", "ゼド")];
    let custom = CustomData::default();

    let result = search::search(
        &roster,
        &custom,
        &FilterState::with_query("あ"),
        &Favorites::default(),
    );

    assert_eq!(ids(&result), vec!["ashe"]);
}

#[test]
fn test_embedded_alias_matches_case_insensitively() {
    let roster = roster();
    let custom = CustomData::embedded();

    let result = search::search(
        &roster,
        &custom,
        &FilterState::with_query("DOG"),
        &Favorites::default(),
    );

    assert_eq!(ids(&result), vec!["Nasus"]);
}

#[test]
fn test_favorite_only_never_adds_results() {
    let roster = roster();
    let custom = CustomData::embedded();
    let favorites: Favorites = ["Zed", "Garen", "Lux"]
        .into_iter()
        .map(String::from)
        .collect();

    for query in ["", "ら", "z", "ガ"] {
        for lanes in [vec![], vec![Lane::Mid], vec![Lane::Top, Lane::Bot]] {
            let open = FilterState {
                query: query.to_string(),
                lanes: lanes.clone(),
                favorite_only: false,
            };
            let narrowed = FilterState {
                favorite_only: true,
                ..open.clone()
            };
            let all = ids(&search::search(&roster, &custom, &open, &favorites));
            let only = ids(&search::search(&roster, &custom, &narrowed, &favorites));

            assert!(only.iter().all(|id| all.contains(id)));
            assert!(only.iter().all(|id| favorites.contains(id)));
            assert_eq!(
                ids(&search::background_pool(&roster, &custom, &narrowed)),
                all
            );
        }
    }
}

#[test]
fn test_grouped_view_covers_sorted_roster() {
    let roster = roster();
    let custom = CustomData::embedded();
    let filter = FilterState::default();

    let view = SearchView::build(&roster, &custom, &filter, &Favorites::default());

    assert!(matches!(view, SearchView::Grouped(_)));
    assert_eq!(ids(&view.champions()), ids(&search::sort_roster(&roster)));
}

#[test]
fn test_narrowed_view_is_flat() {
    let roster = roster();
    let custom = CustomData::embedded();
    let filter = FilterState {
        lanes: vec![Lane::Top],
        ..Default::default()
    };

    let view = SearchView::build(&roster, &custom, &filter, &Favorites::default());

    match view {
        SearchView::Flat(result) => {
            assert_eq!(ids(&result), vec!["Aatrox", "Garen", "Nasus", "Yasuo"]);
        }
        SearchView::Grouped(_) => panic!("lane filter should flatten the view"),
    }
}

#[tokio::test]
async fn test_embedded_counters_keep_curated_order() {
    let roster = roster();
    let source = ManualCounterDataSource::embedded();

    let counters = source
        .counter_data("Aatrox")
        .await
        .expect("Aatrox has curated matchups");
    let summary = counters.summarize(&roster, MATCHUP_DISPLAY_LIMIT);

    let favorable: Vec<&str> = summary
        .favorable
        .iter()
        .map(|matchup| matchup.champion_id)
        .collect();
    assert_eq!(favorable, vec!["Garen", "Yasuo", "Yone", "Akali", "Teemo"]);
    assert_eq!(summary.favorable[0].display_name(), "ガレン");
    // not in this roster, so the raw id is shown
    assert_eq!(summary.favorable[2].display_name(), "Yone");
    assert!(summary.favorable[2].champion.is_none());
}

#[tokio::test]
async fn test_embedded_counters_unknown_champion() {
    let source = ManualCounterDataSource::embedded();

    assert!(source.counter_data("Teemo").await.is_none());
    assert!(source.all_counter_data().await.contains_key("Zed"));
}
