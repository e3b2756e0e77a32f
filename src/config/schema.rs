use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::MAX_TOTAL;
use crate::service::{DEFAULT_RANK_LIMIT, MAX_RANK_LIMIT};

/// Tool configuration.
///
/// Every key is optional. Example YAML:
/// ```yaml
/// profiles: /srv/venture/startups.json
/// scores: /srv/venture/scores.json
/// ranking:
///   limit: 20
///   min_score: 60
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON file with `{ "startups": [...] }` (default: ~/.config/venture-score/startups.json)
    #[serde(default)]
    pub profiles: Option<PathBuf>,

    /// JSON file holding current scores (default: ~/.config/venture-score/scores.json)
    #[serde(default)]
    pub scores: Option<PathBuf>,

    #[serde(default)]
    pub ranking: Option<RankingConfig>,
}

/// Defaults for the `rank` command, overridable on the command line
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RankingConfig {
    #[serde(default)]
    pub limit: Option<usize>,

    #[serde(default)]
    pub min_score: Option<u32>,
}

impl Config {
    pub fn profiles_path(&self) -> PathBuf {
        self.profiles
            .clone()
            .unwrap_or_else(|| super::get_config_dir().join("startups.json"))
    }

    pub fn scores_path(&self) -> PathBuf {
        self.scores
            .clone()
            .unwrap_or_else(|| super::get_config_dir().join("scores.json"))
    }

    pub fn rank_limit(&self) -> usize {
        self.ranking
            .as_ref()
            .and_then(|r| r.limit)
            .unwrap_or(DEFAULT_RANK_LIMIT)
    }

    pub fn rank_min_score(&self) -> u32 {
        self.ranking
            .as_ref()
            .and_then(|r| r.min_score)
            .unwrap_or(0)
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref ranking) = config.ranking {
        if let Some(limit) = ranking.limit {
            if limit == 0 || limit > MAX_RANK_LIMIT {
                errors.push(format!(
                    "ranking.limit: must be between 1 and {}, got {}",
                    MAX_RANK_LIMIT, limit
                ));
            }
        }
        if let Some(min_score) = ranking.min_score {
            if min_score > MAX_TOTAL {
                errors.push(format!(
                    "ranking.min_score: must be at most {}, got {}",
                    MAX_TOTAL, min_score
                ));
            }
        }
    }

    if let (Some(profiles), Some(scores)) = (&config.profiles, &config.scores) {
        if profiles == scores {
            errors.push("scores: must not be the same file as profiles".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
