//! Configuration loading from sentrank.toml.
//!
//! Every ranking knob has a sane default; a `sentrank.toml` in the
//! working directory (or any parent, like ruff-style tool configs)
//! overrides individual values without restating the rest.
//!
//! ## Example
//!
//! ```toml
//! similarity-threshold = 0.35
//! top-k = 8
//! query-weight = 0.6
//! structural-weight = 0.4
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::RankingConfig;

/// A loaded configuration: the effective ranking knobs plus where they
/// came from (for verbose display).
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Source file for this config, if any.
    pub source: Option<PathBuf>,
    /// Effective ranking configuration.
    pub ranking: RankingConfig,
}

/// Raw config as deserialized from TOML. Every field optional: absent
/// values keep their defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    similarity_threshold: Option<f64>,
    pagerank_alpha: Option<f64>,
    pagerank_epsilon: Option<f64>,
    pagerank_max_iterations: Option<usize>,
    structural_weight: Option<f64>,
    query_weight: Option<f64>,
    top_k: Option<usize>,
    context_sentences: Option<usize>,
    embedding_cache_size: Option<usize>,
}

impl Config {
    /// Load configuration from the given directory.
    ///
    /// Search order:
    /// 1. sentrank.toml in the directory
    /// 2. Walk up parents looking for sentrank.toml
    /// 3. Defaults if nothing found
    pub fn load(directory: &Path) -> Self {
        let mut current = Some(directory.to_path_buf());
        while let Some(dir) = current {
            let candidate = dir.join("sentrank.toml");
            if candidate.exists() {
                if let Some(config) = Self::load_file(&candidate) {
                    return config;
                }
            }
            current = dir.parent().map(Path::to_path_buf);
        }
        Self::default()
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let raw: RawConfig = toml::from_str(&content).ok()?;
        Some(Self::from_raw(raw, path.to_path_buf()))
    }

    fn from_raw(raw: RawConfig, source: PathBuf) -> Self {
        let defaults = RankingConfig::default();
        Self {
            source: Some(source),
            ranking: RankingConfig {
                similarity_threshold: raw.similarity_threshold.unwrap_or(defaults.similarity_threshold),
                pagerank_alpha: raw.pagerank_alpha.unwrap_or(defaults.pagerank_alpha),
                pagerank_epsilon: raw.pagerank_epsilon.unwrap_or(defaults.pagerank_epsilon),
                pagerank_max_iterations: raw
                    .pagerank_max_iterations
                    .unwrap_or(defaults.pagerank_max_iterations),
                structural_weight: raw.structural_weight.unwrap_or(defaults.structural_weight),
                query_weight: raw.query_weight.unwrap_or(defaults.query_weight),
                top_k: raw.top_k.unwrap_or(defaults.top_k),
                context_sentences: raw.context_sentences.unwrap_or(defaults.context_sentences),
                embedding_cache_size: raw
                    .embedding_cache_size
                    .unwrap_or(defaults.embedding_cache_size),
            },
        }
    }

    /// Format config for verbose display.
    pub fn display_summary(&self) -> String {
        let mut lines = Vec::new();

        match &self.source {
            Some(source) => lines.push(format!("   Config: {}", source.display())),
            None => lines.push("   Config: (defaults)".to_string()),
        }

        let r = &self.ranking;
        lines.push(format!(
            "   Edge threshold: {} | damping: {} | blend: {}*structural + {}*query",
            r.similarity_threshold, r.pagerank_alpha, r.structural_weight, r.query_weight
        ));
        lines.push(format!(
            "   Top-k: {} | context sentences: {} | embedding cache: {}",
            r.top_k, r.context_sentences, r.embedding_cache_size
        ));

        lines.join("\n")
    }
}
