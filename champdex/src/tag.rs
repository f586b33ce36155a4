//! One-line classification shown under a champion's name.

use crate::custom::CustomChampionData;
use crate::state::Champion;

/// Attack range below which a champion counts as melee.
pub const MELEE_RANGE_THRESHOLD: f64 = 300.0;

const TAG_SEPARATOR: &str = " / ";

fn translate_role(tag: &str) -> &str {
    match tag {
        "Fighter" => "ファイター",
        "Tank" => "タンク",
        "Mage" => "メイジ",
        "Assassin" => "アサシン",
        "Marksman" => "マークスマン",
        "Support" => "サポート",
        other => other,
    }
}

fn range_label(attack_range: f64) -> &'static str {
    if attack_range < MELEE_RANGE_THRESHOLD {
        "メレー"
    } else {
        "レンジ"
    }
}

/// Compose `role / range / damage`, e.g. `ファイター / メレー / AD`.
///
/// Each segment is dropped when its input is missing or empty. Returns `None` when no
/// segment is left, so callers can skip the tag row entirely.
pub fn compose_tag(champion: &Champion, custom: Option<&CustomChampionData>) -> Option<String> {
    let role = champion.tags.first().map(|tag| translate_role(tag));
    let range = champion.attack_range().map(range_label);
    let damage = custom
        .and_then(|entry| entry.damage_type)
        .map(|damage| damage.label());

    let segments: Vec<&str> = [role, range, damage]
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join(TAG_SEPARATOR))
    }
}
