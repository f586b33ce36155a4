//! Data Dragon client and asset/link URL builders

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::FeedError;
use crate::state::Champion;

const DDRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// How the roster feed is queried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    /// Locale segment of the roster URL, e.g. `ja_JP`
    pub lang: String,
    /// Total attempts per request; 1 means no retry
    pub attempts: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            lang: "ja_JP".to_string(),
            attempts: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChampionListResponse {
    data: BTreeMap<String, Champion>,
}

/// Newest published version; the feed lists them newest first.
pub async fn fetch_latest_version(config: &FeedConfig) -> Result<String, FeedError> {
    let url = versions_url();
    let versions: Vec<String> = fetch_json(&url, config.attempts).await?;
    latest_version(versions)
}

pub fn latest_version(versions: Vec<String>) -> Result<String, FeedError> {
    versions
        .into_iter()
        .next()
        .ok_or(FeedError::EmptyVersionList)
}

/// Full roster for one version, in feed (id) order.
pub async fn fetch_champions(version: &str, config: &FeedConfig) -> Result<Vec<Champion>, FeedError> {
    let url = roster_url(version, &config.lang);
    let response: ChampionListResponse = fetch_json(&url, config.attempts).await?;
    Ok(response.data.into_values().collect())
}

pub fn parse_roster(json: &str) -> Result<Vec<Champion>, FeedError> {
    let response: ChampionListResponse = serde_json::from_str(json)?;
    Ok(response.data.into_values().collect())
}

async fn fetch_json<T: DeserializeOwned>(url: &str, attempts: u32) -> Result<T, FeedError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match fetch_json_once(url).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                tracing::warn!(%url, attempt, %err, "feed request failed, retrying");
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn fetch_json_once<T: DeserializeOwned>(url: &str) -> Result<T, FeedError> {
    let response = http_client().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

pub fn versions_url() -> String {
    format!("{DDRAGON_BASE}/api/versions.json")
}

pub fn roster_url(version: &str, lang: &str) -> String {
    format!("{DDRAGON_BASE}/cdn/{version}/data/{lang}/champion.json")
}

/// Square icon; empty until a version is known.
pub fn champion_image_url(version: Option<&str>, image_full: &str) -> String {
    match version {
        Some(version) => format!("{DDRAGON_BASE}/cdn/{version}/img/champion/{image_full}"),
        None => String::new(),
    }
}

pub fn splash_url(champion_id: &str) -> String {
    format!("{DDRAGON_BASE}/cdn/img/champion/splash/{champion_id}_0.jpg")
}

pub fn opgg_url(champion_id: &str) -> String {
    format!(
        "https://www.op.gg/champions/{}",
        champion_id.to_lowercase()
    )
}

pub fn ugg_url(champion_id: &str) -> String {
    format!(
        "https://u.gg/lol/champions/{}/build",
        champion_id.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_latest_version_is_first() {
        let versions = vec!["14.3.1".to_string(), "14.2.1".to_string()];
        assert_eq!(latest_version(versions).unwrap(), "14.3.1");
        assert!(matches!(
            latest_version(Vec::new()),
            Err(FeedError::EmptyVersionList)
        ));
    }

    #[test]
    fn test_parse_roster() {
        let json = r#"{
            "type": "champion",
            "version": "14.3.1",
            "data": {
                "Zed": {
                    "id": "Zed", "key": "238", "name": "ゼド",
                    "image": {"full": "Zed.png", "sprite": "champion5.png"},
                    "tags": ["Assassin"],
                    "stats": {"hp": 654, "attackrange": 125}
                },
                "Ashe": {
                    "id": "Ashe", "name": "アッシュ",
                    "image": {"full": "Ashe.png"},
                    "tags": ["Marksman", "Support"],
                    "stats": {"attackrange": 600}
                }
            }
        }"#;

        let roster = parse_roster(json).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, "Ashe");
        assert_eq!(roster[1].name, "ゼド");
        assert_eq!(roster[1].attack_range(), Some(125.0));
        assert_eq!(roster[0].tags, vec!["Marksman", "Support"]);
    }

    #[test]
    fn test_parse_roster_without_optional_fields() {
        let roster = parse_roster(r#"{"data": {"X": {"id": "X", "name": "エックス"}}}"#).unwrap();
        assert!(roster[0].tags.is_empty());
        assert_eq!(roster[0].attack_range(), None);
    }

    #[test]
    fn test_asset_urls() {
        assert_eq!(
            champion_image_url(Some("14.3.1"), "Ashe.png"),
            "https://ddragon.leagueoflegends.com/cdn/14.3.1/img/champion/Ashe.png"
        );
        assert_eq!(champion_image_url(None, "Ashe.png"), "");
        assert_eq!(
            splash_url("MissFortune"),
            "https://ddragon.leagueoflegends.com/cdn/img/champion/splash/MissFortune_0.jpg"
        );
        assert_eq!(
            roster_url("14.3.1", "ja_JP"),
            "https://ddragon.leagueoflegends.com/cdn/14.3.1/data/ja_JP/champion.json"
        );
    }

    #[test]
    fn test_external_links_lowercase_id() {
        assert_eq!(opgg_url("LeeSin"), "https://www.op.gg/champions/leesin");
        assert_eq!(ugg_url("LeeSin"), "https://u.gg/lol/champions/leesin/build");
    }
}
