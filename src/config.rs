use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArcanaConfig {
    pub server: ServerConfig,
    pub corpus: CorpusConfig,
    pub embedding: EmbeddingConfig,
    pub qdrant: QdrantConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorpusConfig {
    pub raw_path: String,
    pub corpus_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `"ollama"` or `"openai"`. Chosen once at startup — there is no
    /// runtime fallback between providers, since their vector dimensions
    /// differ and a collection built with one cannot serve the other.
    pub provider: String,
    pub model: String,
    pub ollama_base_url: String,
    pub openai_base_url: String,
    pub openai_api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct QdrantConfig {
    pub host: String,
    pub port: u16,
    /// Explicit collection name. When unset, the name is derived from the
    /// embedding provider and model so that embeddings from incompatible
    /// models never land in the same collection.
    pub collection: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_limit: usize,
}

impl Default for ArcanaConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            corpus: CorpusConfig::default(),
            embedding: EmbeddingConfig::default(),
            qdrant: QdrantConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let data_dir = default_arcana_dir().join("data");
        Self {
            raw_path: data_dir
                .join("tarot_raw.json")
                .to_string_lossy()
                .into_owned(),
            corpus_path: data_dir
                .join("tarot_cards.json")
                .to_string_lossy()
                .into_owned(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".into(),
            model: "nomic-embed-text".into(),
            ollama_base_url: "http://localhost:11434".into(),
            openai_base_url: "https://api.openai.com".into(),
            openai_api_key: String::new(),
        }
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 6333,
            collection: None,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { default_limit: 5 }
    }
}

/// Returns `~/.arcana/`
pub fn default_arcana_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".arcana")
}

/// Returns the default config file path: `~/.arcana/config.toml`
pub fn default_config_path() -> PathBuf {
    default_arcana_dir().join("config.toml")
}

impl ArcanaConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ArcanaConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides. Variable names match the
    /// chatbot deployment environment this crate serves.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("QDRANT_HOST") {
            self.qdrant.host = val;
        }
        if let Ok(val) = std::env::var("QDRANT_PORT") {
            if let Ok(port) = val.parse() {
                self.qdrant.port = port;
            }
        }
        if let Ok(val) = std::env::var("QDRANT_COLLECTION") {
            self.qdrant.collection = Some(val);
        }
        if let Ok(val) = std::env::var("OLLAMA_BASE_URL") {
            self.embedding.ollama_base_url = val;
        }
        if let Ok(val) = std::env::var("OLLAMA_MODEL") {
            self.embedding.model = val;
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            self.embedding.openai_api_key = val;
        }
        if let Ok(val) = std::env::var("ARCANA_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// Base URL of the Qdrant REST API.
    pub fn qdrant_url(&self) -> String {
        format!("http://{}:{}", self.qdrant.host, self.qdrant.port)
    }

    /// Effective collection name: the explicit override, or
    /// `tarot_{provider}_{model}` with `:` and `/` mapped to `_`.
    pub fn collection_name(&self) -> String {
        match &self.qdrant.collection {
            Some(name) => name.clone(),
            None => format!(
                "tarot_{}_{}",
                self.embedding.provider,
                self.embedding.model.replace([':', '/'], "_")
            ),
        }
    }

    pub fn resolved_raw_path(&self) -> PathBuf {
        expand_tilde(&self.corpus.raw_path)
    }

    pub fn resolved_corpus_path(&self) -> PathBuf {
        expand_tilde(&self.corpus.corpus_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
