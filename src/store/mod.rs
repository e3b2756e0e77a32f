pub mod profiles;
pub mod scores;

use anyhow::Result;

use crate::profile::StartupProfile;
use crate::scoring::ScoreBreakdown;

pub use profiles::{read_profile, JsonProfileStore, MemoryProfileStore};
pub use scores::{JsonScoreStore, MemoryScoreStore, ScoreRecord, ScoreState};

/// Source of startup profiles, keyed by startup id.
pub trait ProfileStore {
    fn find_startup(&self, startup_id: &str) -> Result<Option<StartupProfile>>;
}

/// Current score per startup id. One record per startup, overwritten on
/// every upsert; no history is kept.
pub trait ScorePersistence {
    /// Insert or replace the score for `startup_id`
    fn upsert(&self, startup_id: &str, breakdown: ScoreBreakdown) -> Result<ScoreRecord>;

    fn get(&self, startup_id: &str) -> Result<Option<ScoreRecord>>;

    /// Records with `score_total >= min_score`, best first, at most `limit`
    fn ranked(&self, min_score: u32, limit: usize) -> Result<Vec<ScoreRecord>>;
}
