use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::*;
use crate::error::Result;
use crate::sampler::Keyed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub url: String,
    #[serde(default)]
    pub headline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub score: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub link: String,
}

impl Keyed for ResultRecord {
    type Key = (String, String);

    fn key(&self) -> Self::Key {
        (self.score.clone(), self.details.clone())
    }
}

// Stats in the signing documents are stored either as numbers or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{}", v),
            StatValue::Float(v) => write!(f, "{}", v),
            StatValue::Text(v) => f.write_str(v),
        }
    }
}

// `name` is unique and serves as the cooldown key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningRecord {
    pub name: String,
    #[serde(rename = "excludeFromSOTS", default)]
    pub exclude_from_pool: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub wiki: Option<String>,
    #[serde(default)]
    pub year: Option<StatValue>,
    #[serde(default)]
    pub fee: Option<StatValue>,
    #[serde(default)]
    pub apps: Option<StatValue>,
    #[serde(default)]
    pub goals: Option<StatValue>,
    #[serde(default)]
    pub assists: Option<StatValue>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Keyed for SigningRecord {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }
}

#[derive(Deserialize)]
struct JokeDoc {
    content: String,
}

#[derive(Deserialize)]
struct ClipDoc {
    url: String,
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_hero_images(&self) -> Result<Vec<ImageRecord>>;
    async fn fetch_jokes(&self) -> Result<Vec<String>>;
    async fn fetch_results(&self) -> Result<Vec<ResultRecord>>;
    async fn fetch_signings(&self) -> Result<Vec<SigningRecord>>;
    // Raw links, normalized only when shown
    async fn fetch_clip_urls(&self) -> Result<Vec<String>>;
}

// One JSON array of documents per collection file
pub struct JsonDirectory {
    root: PathBuf,
}

impl JsonDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let bytes = tokio::fs::read(self.root.join(name)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ContentSource for JsonDirectory {
    async fn fetch_hero_images(&self) -> Result<Vec<ImageRecord>> {
        self.read_collection(HERO_IMAGES_DOC).await
    }

    async fn fetch_jokes(&self) -> Result<Vec<String>> {
        let docs: Vec<JokeDoc> = self.read_collection(JOKES_DOC).await?;
        Ok(docs.into_iter().map(|d| d.content).collect())
    }

    async fn fetch_results(&self) -> Result<Vec<ResultRecord>> {
        self.read_collection(RESULTS_DOC).await
    }

    async fn fetch_signings(&self) -> Result<Vec<SigningRecord>> {
        self.read_collection(SIGNINGS_DOC).await
    }

    async fn fetch_clip_urls(&self) -> Result<Vec<String>> {
        let docs: Vec<ClipDoc> = self.read_collection(CLIPS_DOC).await?;
        Ok(docs.into_iter().map(|d| d.url).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentPools {
    pub hero_images: Arc<[ImageRecord]>,
    pub jokes: Vec<String>,
    pub results: Vec<ResultRecord>,
    pub signings: Vec<SigningRecord>,
    pub clips: Vec<String>,
}

impl ContentPools {
    // A pool that cannot be read comes back empty
    pub async fn load(source: &dyn ContentSource) -> Self {
        let pools = Self {
            hero_images: or_empty("hero images", source.fetch_hero_images().await).into(),
            jokes: or_empty("jokes", source.fetch_jokes().await),
            results: or_empty("embarrassing results", source.fetch_results().await),
            signings: or_empty("signings", source.fetch_signings().await),
            clips: or_empty("clips", source.fetch_clip_urls().await),
        };
        info!(
            "Content loaded: {} hero images, {} jokes, {} results, {} signings, {} clips",
            pools.hero_images.len(),
            pools.jokes.len(),
            pools.results.len(),
            pools.signings.len(),
            pools.clips.len()
        );
        pools
    }
}

fn or_empty<T>(pool: &str, fetched: Result<Vec<T>>) -> Vec<T> {
    match fetched {
        Ok(items) => items,
        Err(e) => {
            warn!("Failed to load {}: {}", pool, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[tokio::test]
    async fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            HERO_IMAGES_DOC,
            r#"[{"url": "/hero/1.jpg", "headline": "Still waiting"}, {"url": "/hero/2.jpg"}]"#,
        );
        write(dir.path(), JOKES_DOC, r#"[{"content": "joke one"}, {"content": "joke two"}]"#);
        write(
            dir.path(),
            RESULTS_DOC,
            r#"[{"score": "Spurs 1-5 Arsenal", "details": "Carling Cup", "link": "https://example.org"}]"#,
        );
        write(
            dir.path(),
            SIGNINGS_DOC,
            r#"[{"name": "Player A", "excludeFromSOTS": true, "year": 2013, "fee": "£30m"},
                {"name": "Player B", "apps": 12, "goals": 0, "assists": 1.5}]"#,
        );
        write(dir.path(), CLIPS_DOC, r#"[{"url": "https://youtu.be/abc123"}]"#);

        let pools = ContentPools::load(&JsonDirectory::new(dir.path())).await;

        assert_eq!(pools.hero_images.len(), 2);
        assert_eq!(pools.hero_images[0].headline, "Still waiting");
        assert_eq!(pools.hero_images[1].headline, "");
        assert_eq!(pools.jokes, vec!["joke one", "joke two"]);
        assert_eq!(pools.results[0].score, "Spurs 1-5 Arsenal");
        assert!(pools.signings[0].exclude_from_pool);
        assert!(!pools.signings[1].exclude_from_pool);
        assert_eq!(pools.signings[0].fee, Some(StatValue::Text("£30m".into())));
        assert_eq!(pools.signings[0].year.as_ref().unwrap().to_string(), "2013");
        assert_eq!(pools.clips, vec!["https://youtu.be/abc123"]);
    }

    #[tokio::test]
    async fn test_failed_pool_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), JOKES_DOC, r#"[{"content": "only joke"}]"#);
        write(dir.path(), SIGNINGS_DOC, "not json");

        let pools = ContentPools::load(&JsonDirectory::new(dir.path())).await;

        assert_eq!(pools.jokes, vec!["only joke"]);
        assert!(pools.hero_images.is_empty());
        assert!(pools.signings.is_empty());
        assert!(pools.clips.is_empty());
    }
}
