use super::breakdown::ScoreBreakdown;
use super::weights::{clamp, Category};
use crate::profile::StartupProfile;

// Text lengths at which a category reaches its full weight from text alone
const PROBLEM_TEXT_FULL: f64 = 600.0;
const TARGET_MARKET_FULL: f64 = 500.0;
const PITCH_FULL: f64 = 800.0;
const TRACTION_TEXT_FULL: f64 = 600.0;

const TEAM_SIZE_CAP: u32 = 8;

// Assumed when no AI feasibility score is available
const DEFAULT_FEASIBILITY: f64 = 0.6;

/// Score a startup profile into the eight-category breakdown.
///
/// `team_size` is supplied by the caller (see [`StartupProfile::team_size`]).
/// Missing fields contribute their baseline; this never fails.
pub fn compute_score(profile: &StartupProfile, team_size: u32) -> ScoreBreakdown {
    ScoreBreakdown::from_fn(|category| {
        let base = category_base(category, profile, team_size);
        clamp(base * f64::from(category.weight()), category.weight())
    })
}

/// Unweighted base for one category, roughly in `[0, 1.7]`
fn category_base(category: Category, profile: &StartupProfile, team_size: u32) -> f64 {
    match category {
        Category::ProblemClarity => problem_clarity(profile),
        Category::MarketSize => market_size(profile),
        Category::BusinessModel => business_model(profile),
        Category::Innovation => innovation(profile),
        Category::Feasibility => feasibility(profile),
        Category::Traction => traction(profile),
        Category::TeamStrength => team_strength(profile, team_size),
        Category::FinancialLogic => financial_logic(profile),
    }
}

fn problem_clarity(profile: &StartupProfile) -> f64 {
    let len =
        text_len(profile.problem_statement()) + text_len(Some(profile.pitch_summary.as_str()));
    len / PROBLEM_TEXT_FULL
}

fn market_size(profile: &StartupProfile) -> f64 {
    let mut base = text_len(profile.target_market()) / TARGET_MARKET_FULL;
    if let Some(potential) = non_empty(profile.ai_market_potential.as_deref()) {
        let potential = potential.to_lowercase();
        base += if potential.contains("high") {
            0.7
        } else if potential.contains("medium") {
            0.4
        } else {
            0.2
        };
    }
    base
}

fn business_model(profile: &StartupProfile) -> f64 {
    let mut base = 0.0;
    if profile.funding_needed.is_some() {
        base += 0.4;
    }
    if profile.equity_offer.is_some() {
        base += 0.4;
    }
    if non_empty(profile.traction_metrics.as_deref()).is_some() {
        base += 0.2;
    }
    base
}

fn innovation(profile: &StartupProfile) -> f64 {
    let base = text_len(Some(profile.pitch_summary.as_str())) / PITCH_FULL;
    base + match risk_level(profile).as_deref() {
        Some("low") => 0.2,
        Some("medium") => 0.1,
        _ => 0.0,
    }
}

fn feasibility(profile: &StartupProfile) -> f64 {
    profile
        .ai_feasibility_score
        .map_or(DEFAULT_FEASIBILITY, |score| score / 100.0)
}

fn traction(profile: &StartupProfile) -> f64 {
    let mut base = text_len(profile.traction_metrics.as_deref()) / TRACTION_TEXT_FULL;
    if profile.has_committed_investment() {
        base += 0.6;
    }
    base
}

fn team_strength(profile: &StartupProfile, team_size: u32) -> f64 {
    let mut base = f64::from(team_size.min(TEAM_SIZE_CAP)) / f64::from(TEAM_SIZE_CAP);
    let stage = profile.stage.to_lowercase();
    if stage.contains("mvp") || stage.contains("launch") {
        base += 0.2;
    }
    base
}

fn financial_logic(profile: &StartupProfile) -> f64 {
    let mut base = 0.0;
    if profile.funding_needed.is_some_and(|f| f > 0.0) {
        base += 0.4;
    }
    if profile.equity_offer.is_some_and(|e| e > 0.0 && e <= 100.0) {
        base += 0.4;
    }
    if risk_level(profile).as_deref() == Some("low") {
        base += 0.2;
    }
    base
}

fn risk_level(profile: &StartupProfile) -> Option<String> {
    non_empty(profile.ai_risk_level.as_deref()).map(str::to_lowercase)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn text_len(s: Option<&str>) -> f64 {
    s.map_or(0, |s| s.chars().count()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{InvestmentRecord, InvestmentStatus, ProjectContext};

    fn text(len: usize) -> String {
        "a".repeat(len)
    }

    fn investment(status: InvestmentStatus) -> InvestmentRecord {
        InvestmentRecord {
            investor_id: None,
            amount: None,
            status,
        }
    }

    fn empty_profile() -> StartupProfile {
        StartupProfile {
            id: "s1".to_string(),
            stage: "idea".to_string(),
            ..Default::default()
        }
    }

    fn full_profile() -> StartupProfile {
        StartupProfile {
            id: "s1".to_string(),
            pitch_summary: text(800),
            traction_metrics: Some(text(600)),
            stage: "MVP".to_string(),
            funding_needed: Some(50000.0),
            equity_offer: Some(10.0),
            ai_market_potential: Some("High growth expected".to_string()),
            ai_risk_level: Some("Low".to_string()),
            ai_feasibility_score: Some(80.0),
            project: Some(ProjectContext {
                problem_statement: Some(String::new()),
                target_market: Some(text(500)),
                member_count: 4,
                ..Default::default()
            }),
            investments: vec![investment(InvestmentStatus::Committed)],
            ..Default::default()
        }
    }

    #[test]
    fn test_full_scenario() {
        let result = compute_score(&full_profile(), 4);

        assert_eq!(result.problem_clarity, 10);
        assert_eq!(result.market_size, 15);
        assert_eq!(result.business_model, 15);
        assert_eq!(result.innovation, 10);
        assert_eq!(result.feasibility, 12);
        assert_eq!(result.traction, 15);
        assert_eq!(result.team_strength, 7);
        assert_eq!(result.financial_logic, 10);
        assert_eq!(result.total, 94);
    }

    #[test]
    fn test_empty_profile_baseline() {
        let result = compute_score(&empty_profile(), 1);

        assert_eq!(result.problem_clarity, 0);
        assert_eq!(result.market_size, 0);
        assert_eq!(result.business_model, 0);
        assert_eq!(result.innovation, 0);
        assert_eq!(result.feasibility, 9); // default 0.6 * 15
        assert_eq!(result.traction, 0);
        assert_eq!(result.team_strength, 1); // 1/8 * 10 = 1.25
        assert_eq!(result.financial_logic, 0);
        assert_eq!(result.total, 10);
    }

    #[test]
    fn test_default_feasibility() {
        let mut profile = full_profile();
        profile.ai_feasibility_score = None;
        assert_eq!(compute_score(&profile, 4).feasibility, 9);
    }

    #[test]
    fn test_feasibility_out_of_range_is_clamped() {
        let mut profile = empty_profile();
        profile.ai_feasibility_score = Some(250.0);
        assert_eq!(compute_score(&profile, 1).feasibility, 15);

        profile.ai_feasibility_score = Some(-40.0);
        assert_eq!(compute_score(&profile, 1).feasibility, 0);

        profile.ai_feasibility_score = Some(f64::NAN);
        assert_eq!(compute_score(&profile, 1).feasibility, 0);
    }

    #[test]
    fn test_traction_from_investment_only() {
        let mut profile = empty_profile();
        profile.investments = vec![investment(InvestmentStatus::Completed)];
        assert_eq!(compute_score(&profile, 1).traction, 9);
    }

    #[test]
    fn test_uncommitted_investments_ignored() {
        let mut profile = empty_profile();
        profile.investments = vec![
            investment(InvestmentStatus::Expressed),
            investment(InvestmentStatus::MeetingRequested),
            investment(InvestmentStatus::Other),
        ];
        assert_eq!(compute_score(&profile, 1).traction, 0);
    }

    #[test]
    fn test_equity_above_hundred() {
        let mut profile = empty_profile();
        profile.equity_offer = Some(150.0);
        let result = compute_score(&profile, 1);

        // Business model only checks presence
        assert_eq!(result.business_model, 6);
        // Financial logic requires 0 < equity <= 100
        assert_eq!(result.financial_logic, 0);

        profile.funding_needed = Some(1000.0);
        let result = compute_score(&profile, 1);
        assert_eq!(result.business_model, 12);
        assert_eq!(result.financial_logic, 4);
    }

    #[test]
    fn test_zero_funding_counts_for_business_model_only() {
        let mut profile = empty_profile();
        profile.funding_needed = Some(0.0);
        profile.equity_offer = Some(0.0);
        let result = compute_score(&profile, 1);
        assert_eq!(result.business_model, 12);
        assert_eq!(result.financial_logic, 0);
    }

    #[test]
    fn test_equity_upper_bound_inclusive() {
        let mut profile = empty_profile();
        profile.equity_offer = Some(100.0);
        assert_eq!(compute_score(&profile, 1).financial_logic, 4);
    }

    #[test]
    fn test_market_potential_tiers() {
        let mut profile = empty_profile();
        profile.project = Some(ProjectContext {
            target_market: Some(text(20)), // 0.04 base
            ..Default::default()
        });
        let cases = [
            (Some("HIGH"), 11),      // 0.74 * 15 = 11.1
            (Some("Medium-ish"), 7), // 0.44 * 15 = 6.6
            (Some("niche"), 4),      // 0.24 * 15 = 3.6
            (Some(""), 1),
            (None, 1),
        ];
        for (potential, expected) in cases {
            profile.ai_market_potential = potential.map(str::to_string);
            assert_eq!(
                compute_score(&profile, 1).market_size,
                expected,
                "potential {:?}",
                potential
            );
        }
    }

    #[test]
    fn test_half_point_rounds_up() {
        let mut profile = empty_profile();
        profile.project = Some(ProjectContext {
            target_market: Some(text(250)),
            ..Default::default()
        });
        // 250/500 * 15 = 7.5
        assert_eq!(compute_score(&profile, 1).market_size, 8);
    }

    #[test]
    fn test_risk_level_is_exact_match() {
        let mut profile = empty_profile();
        profile.pitch_summary = text(400); // 0.5 base innovation

        profile.ai_risk_level = Some("LOW".to_string());
        let result = compute_score(&profile, 1);
        assert_eq!(result.innovation, 7);
        assert_eq!(result.financial_logic, 2);

        profile.ai_risk_level = Some("Medium".to_string());
        let result = compute_score(&profile, 1);
        assert_eq!(result.innovation, 6);
        assert_eq!(result.financial_logic, 0);

        profile.ai_risk_level = Some("low-ish".to_string());
        let result = compute_score(&profile, 1);
        assert_eq!(result.innovation, 5);
        assert_eq!(result.financial_logic, 0);
    }

    #[test]
    fn test_team_strength_caps_at_eight() {
        let mut profile = empty_profile();
        assert_eq!(compute_score(&profile, 8).team_strength, 10);
        assert_eq!(compute_score(&profile, 40).team_strength, 10);
        assert_eq!(compute_score(&profile, 4).team_strength, 5);

        profile.stage = "Pre-Launch".to_string();
        assert_eq!(compute_score(&profile, 4).team_strength, 7);
        assert_eq!(compute_score(&profile, 8).team_strength, 10);
    }

    #[test]
    fn test_empty_traction_text_adds_nothing() {
        let mut profile = empty_profile();
        profile.traction_metrics = Some(String::new());
        let result = compute_score(&profile, 1);
        assert_eq!(result.business_model, 0);
        assert_eq!(result.traction, 0);
    }

    #[test]
    fn test_pitch_length_is_monotonic() {
        let mut profile = empty_profile();
        let mut last = compute_score(&profile, 1);
        for len in (0..=1200).step_by(25) {
            profile.pitch_summary = text(len);
            let result = compute_score(&profile, 1);
            assert!(result.problem_clarity >= last.problem_clarity);
            assert!(result.innovation >= last.innovation);
            last = result;
        }
        assert_eq!(last.problem_clarity, 10);
        assert_eq!(last.innovation, 10);
    }

    #[test]
    fn test_problem_statement_counts_toward_clarity() {
        let mut profile = empty_profile();
        profile.project = Some(ProjectContext {
            problem_statement: Some(text(300)),
            ..Default::default()
        });
        assert_eq!(compute_score(&profile, 1).problem_clarity, 5);

        profile.pitch_summary = text(300);
        assert_eq!(compute_score(&profile, 1).problem_clarity, 10);
    }

    #[test]
    fn test_length_counts_characters() {
        let mut profile = empty_profile();
        profile.pitch_summary = "é".repeat(300); // 600 bytes, 300 chars
        assert_eq!(compute_score(&profile, 1).problem_clarity, 5);
    }

    #[test]
    fn test_deterministic() {
        let profile = full_profile();
        assert_eq!(compute_score(&profile, 3), compute_score(&profile, 3));
    }

    #[test]
    fn test_bounds_hold_for_extreme_inputs() {
        let profile = StartupProfile {
            id: "x".to_string(),
            pitch_summary: text(10_000),
            traction_metrics: Some(text(10_000)),
            stage: "mvp launch".to_string(),
            funding_needed: Some(f64::MAX),
            equity_offer: Some(-5.0),
            ai_market_potential: Some("high medium".to_string()),
            ai_risk_level: Some("low".to_string()),
            ai_feasibility_score: Some(f64::INFINITY),
            project: Some(ProjectContext {
                problem_statement: Some(text(10_000)),
                target_market: Some(text(10_000)),
                member_count: u32::MAX,
                ..Default::default()
            }),
            investments: vec![investment(InvestmentStatus::Committed)],
            ..Default::default()
        };
        let result = compute_score(&profile, u32::MAX);
        assert!(result.is_consistent());
        assert!(result.total <= 100);
        for (category, score) in result.iter() {
            assert!(score <= category.weight(), "{} out of range", category);
        }
    }
}
