use super::ScorePersistence;
use crate::scoring::ScoreBreakdown;
use anyhow::{anyhow, Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const STATE_VERSION: u32 = 1;

/// The current score of one startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub startup_id: String,
    pub score_total: u32,
    pub breakdown: ScoreBreakdown,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    pub version: u32,
    #[serde(default)]
    pub scores: HashMap<String, ScoreRecord>,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            scores: HashMap::new(),
        }
    }

    /// Replace the score for `startup_id`, keeping its original creation time
    pub fn upsert(
        &mut self,
        startup_id: &str,
        breakdown: ScoreBreakdown,
        now: DateTime<Utc>,
    ) -> ScoreRecord {
        let created_at = self
            .scores
            .get(startup_id)
            .map_or(now, |existing| existing.created_at);
        let record = ScoreRecord {
            startup_id: startup_id.to_string(),
            score_total: breakdown.total,
            breakdown,
            created_at,
            updated_at: now,
        };
        self.scores.insert(startup_id.to_string(), record.clone());
        record
    }

    pub fn get(&self, startup_id: &str) -> Option<&ScoreRecord> {
        self.scores.get(startup_id)
    }

    /// Sort by score descending, then by update time ascending (scored
    /// earlier wins ties), then by startup id.
    pub fn ranked(&self, min_score: u32, limit: usize) -> Vec<ScoreRecord> {
        let mut records: Vec<_> = self
            .scores
            .values()
            .filter(|r| r.score_total >= min_score)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.score_total
                .cmp(&a.score_total)
                .then_with(|| a.updated_at.cmp(&b.updated_at))
                .then_with(|| a.startup_id.cmp(&b.startup_id))
        });
        records.truncate(limit);
        records
    }
}

/// Load score state from a JSON file
///
/// If the file doesn't exist, returns a new empty state.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_score_state(path: &Path) -> Result<ScoreState> {
    if !path.exists() {
        return Ok(ScoreState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open score file at {}", path.display()))?;

    let state: ScoreState =
        serde_json::from_reader(BufReader::new(file)).context("Failed to load score state")?;

    if state.version != STATE_VERSION {
        anyhow::bail!("Unsupported score state version: {}", state.version);
    }

    for record in state.scores.values() {
        if !record.breakdown.is_consistent() || record.breakdown.total != record.score_total {
            tracing::warn!(startup_id = %record.startup_id, "stored score breakdown is inconsistent");
        }
    }

    Ok(state)
}

/// Save score state to a JSON file atomically
pub fn save_score_state(path: &Path, state: &ScoreState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize score state")?;

    file.commit().context("Failed to save score state")?;

    Ok(())
}

/// Scores persisted to a single JSON file.
///
/// Every upsert re-reads the file and rewrites it atomically while holding
/// an exclusive lock on a sidecar `<file>.lock`, so writers in separate
/// handles or processes never drop each other's records.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Block until this handle holds the writer lock. Released on drop.
    fn lock_writer(&self) -> Result<File> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file at {}", lock_path.display()))?;
        FileExt::lock_exclusive(&file)
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
        Ok(file)
    }
}

impl ScorePersistence for JsonScoreStore {
    fn upsert(&self, startup_id: &str, breakdown: ScoreBreakdown) -> Result<ScoreRecord> {
        let _lock = self.lock_writer()?;
        let mut state = load_score_state(&self.path)?;
        let record = state.upsert(startup_id, breakdown, Utc::now());
        save_score_state(&self.path, &state)?;
        tracing::debug!(startup_id, total = record.score_total, path = %self.path.display(), "saved score");
        Ok(record)
    }

    fn get(&self, startup_id: &str) -> Result<Option<ScoreRecord>> {
        let state = load_score_state(&self.path)?;
        Ok(state.get(startup_id).cloned())
    }

    fn ranked(&self, min_score: u32, limit: usize) -> Result<Vec<ScoreRecord>> {
        let state = load_score_state(&self.path)?;
        Ok(state.ranked(min_score, limit))
    }
}

/// In-memory score store
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    state: Mutex<ScoreState>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScorePersistence for MemoryScoreStore {
    fn upsert(&self, startup_id: &str, breakdown: ScoreBreakdown) -> Result<ScoreRecord> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("score store lock poisoned"))?;
        Ok(state.upsert(startup_id, breakdown, Utc::now()))
    }

    fn get(&self, startup_id: &str) -> Result<Option<ScoreRecord>> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("score store lock poisoned"))?;
        Ok(state.get(startup_id).cloned())
    }

    fn ranked(&self, min_score: u32, limit: usize) -> Result<Vec<ScoreRecord>> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("score store lock poisoned"))?;
        Ok(state.ranked(min_score, limit))
    }
}
