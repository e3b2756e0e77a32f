use crate::access::{can_recalculate, can_view_ranking, Actor};
use crate::error::ServiceError;
use crate::profile::StartupProfile;
use crate::scoring::{compute_score, suggestions_for, ScoreBreakdown};
use crate::store::{ProfileStore, ScorePersistence, ScoreRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_RANK_LIMIT: usize = 50;
pub const MAX_RANK_LIMIT: usize = 100;

/// A startup's current score with improvement advice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub startup_id: String,
    pub score_total: u32, // 0 when never scored
    pub breakdown: Option<ScoreBreakdown>,
    pub updated_at: Option<DateTime<Utc>>,
    pub suggestions: Vec<String>,
}

/// One row of the investor-facing ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStartup {
    pub startup_id: String,
    pub score_total: u32,
    pub project_name: Option<String>,
    pub stage: Option<String>,
    pub business_name: Option<String>,
    pub industry: Option<String>,
}

/// Score a profile already in hand, without touching any store
pub fn score_profile(profile: &StartupProfile) -> ScoreBreakdown {
    compute_score(profile, profile.team_size())
}

/// Pin a requested ranking size into 1..=100. Zero means the default size.
pub fn clamp_limit(limit: usize) -> usize {
    if limit == 0 {
        return DEFAULT_RANK_LIMIT;
    }
    limit.min(MAX_RANK_LIMIT)
}

/// Recalculate, read and rank startup scores over injected stores.
pub struct ScoreService<P, S> {
    profiles: P,
    scores: S,
}

impl<P: ProfileStore, S: ScorePersistence> ScoreService<P, S> {
    pub fn new(profiles: P, scores: S) -> Self {
        Self { profiles, scores }
    }

    /// Recompute and store the score of `startup_id`. Only the founder or
    /// an admin may do this.
    pub fn recalculate(&self, startup_id: &str, actor: &Actor) -> Result<ScoreRecord, ServiceError> {
        let profile = self.require_startup(startup_id)?;

        if !can_recalculate(actor, &profile) {
            tracing::info!(startup_id, user_id = %actor.user_id, role = %actor.role, "recalculation denied");
            return Err(ServiceError::Forbidden(
                "Only founder or admin can recalculate score",
            ));
        }

        let team_size = profile.team_size();
        let breakdown = compute_score(&profile, team_size);
        tracing::debug!(startup_id, team_size, total = breakdown.total, "computed score");

        Ok(self.scores.upsert(startup_id, breakdown)?)
    }

    /// The stored score of `startup_id` with suggestions
    pub fn get_score(&self, startup_id: &str) -> Result<ScoreReport, ServiceError> {
        self.require_startup(startup_id)?;
        let record = self.scores.get(startup_id)?;

        let breakdown = record.as_ref().map(|r| r.breakdown);
        Ok(ScoreReport {
            startup_id: startup_id.to_string(),
            score_total: record.as_ref().map_or(0, |r| r.score_total),
            breakdown,
            updated_at: record.as_ref().map(|r| r.updated_at),
            suggestions: suggestions_for(breakdown.as_ref()),
        })
    }

    /// Best-scored startups with `score_total >= min_score`. Investors and
    /// admins only.
    pub fn ranked(
        &self,
        actor: &Actor,
        min_score: u32,
        limit: usize,
    ) -> Result<Vec<RankedStartup>, ServiceError> {
        if !can_view_ranking(actor) {
            return Err(ServiceError::Forbidden("Investor or admin only"));
        }

        let records = self.scores.ranked(min_score, clamp_limit(limit))?;
        records
            .into_iter()
            .map(|record| -> Result<RankedStartup, ServiceError> {
                let profile = self.profiles.find_startup(&record.startup_id)?;
                if profile.is_none() {
                    tracing::warn!(startup_id = %record.startup_id, "scored startup has no profile");
                }
                Ok(ranked_entry(record, profile.as_ref()))
            })
            .collect()
    }

    fn require_startup(&self, startup_id: &str) -> Result<StartupProfile, ServiceError> {
        self.profiles
            .find_startup(startup_id)?
            .ok_or_else(|| ServiceError::StartupNotFound(startup_id.to_string()))
    }
}

fn ranked_entry(record: ScoreRecord, profile: Option<&StartupProfile>) -> RankedStartup {
    let project = profile.and_then(|p| p.project.as_ref());
    RankedStartup {
        startup_id: record.startup_id,
        score_total: record.score_total,
        project_name: project.and_then(|p| p.project_name.clone()),
        stage: profile
            .map(|p| p.stage.clone())
            .filter(|s| !s.is_empty()),
        business_name: project.and_then(|p| p.business_name.clone()),
        industry: project.and_then(|p| p.industry.clone()),
    }
}
