//! Favorite champions, persisted as a JSON array of ids.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<String>);

impl Favorites {
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    /// Flip membership; returns whether `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Favorites {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn default_path() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("champdex").join("favorites.json")
}

/// Read favorites. A missing or unreadable file is an empty set.
pub async fn load(path: &Path) -> Favorites {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Favorites::default(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "favorites unreadable, starting empty");
            return Favorites::default();
        }
    };
    parse(&json).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "favorites malformed, starting empty");
        Favorites::default()
    })
}

pub fn parse(json: &str) -> Result<Favorites, serde_json::Error> {
    serde_json::from_str(json)
}

/// Replace the stored set: write a sibling temp file, then rename over.
pub async fn save(path: &Path, ids: &[String]) -> Result<(), DataError> {
    let io_error = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    let json = serde_json::to_string(ids).map_err(|source| DataError::Parse {
        name: path.display().to_string(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await.map_err(io_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("champdex-test-{}-{name}", std::process::id()))
            .join("favorites.json")
    }

    #[test]
    fn test_toggle() {
        let mut favorites = Favorites::default();
        assert!(favorites.toggle("Ashe"));
        assert!(favorites.contains("Ashe"));
        assert!(!favorites.toggle("Ashe"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_list() {
        assert!(parse(r#"{"Ashe": true}"#).is_err());
        assert!(parse("not json").is_err());
        assert_eq!(parse(r#"["Zed","Ashe","Zed"]"#).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let favorites = load(&scratch_path("missing")).await;
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_empty() {
        let path = scratch_path("malformed");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "{broken").await.unwrap();

        assert!(load(&path).await.is_empty());
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let ids = vec!["Ashe".to_string(), "Zed".to_string()];

        save(&path, &ids).await.unwrap();
        let favorites = load(&path).await;

        assert_eq!(favorites.ids(), ids);
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
