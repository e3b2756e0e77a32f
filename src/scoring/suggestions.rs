use super::breakdown::ScoreBreakdown;

pub const NOT_SCORED: &str = "Score not calculated yet. Ask founder or admin to generate a score.";
pub const STRONG_SCORE: &str = "Strong overall score. Focus on execution and investor readiness.";

/// (threshold check, advice) pairs in reporting order
const RULES: [(fn(&ScoreBreakdown) -> bool, &str); 4] = [
    (
        |b| b.problem_clarity < 7,
        "Clarify the problem and who you serve in 2-3 sentences.",
    ),
    (
        |b| b.market_size < 10,
        "Strengthen your market size narrative and add data sources.",
    ),
    (
        |b| b.traction < 10,
        "Highlight concrete traction: users, revenue, pilots, or waitlist.",
    ),
    (
        |b| b.team_strength < 7,
        "Explain why this team can win (experience, past wins, complementary skills).",
    ),
];

/// Improvement advice for a stored breakdown. `None` means the startup has
/// never been scored.
pub fn suggestions_for(breakdown: Option<&ScoreBreakdown>) -> Vec<String> {
    let Some(breakdown) = breakdown else {
        return vec![NOT_SCORED.to_string()];
    };

    let mut suggestions: Vec<String> = RULES
        .iter()
        .filter(|(weak, _)| weak(breakdown))
        .map(|(_, advice)| advice.to_string())
        .collect();

    if suggestions.is_empty() {
        suggestions.push(STRONG_SCORE.to_string());
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Category;

    #[test]
    fn test_not_scored() {
        assert_eq!(suggestions_for(None), vec![NOT_SCORED.to_string()]);
    }

    #[test]
    fn test_strong_score() {
        let breakdown = ScoreBreakdown::from_fn(|c| c.weight());
        assert_eq!(
            suggestions_for(Some(&breakdown)),
            vec![STRONG_SCORE.to_string()]
        );
    }

    #[test]
    fn test_all_weak_in_order() {
        let breakdown = ScoreBreakdown::default();
        let suggestions = suggestions_for(Some(&breakdown));
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].starts_with("Clarify the problem"));
        assert!(suggestions[1].starts_with("Strengthen your market"));
        assert!(suggestions[2].starts_with("Highlight concrete traction"));
        assert!(suggestions[3].starts_with("Explain why this team"));
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let breakdown = ScoreBreakdown::from_fn(|c| match c {
            Category::ProblemClarity => 7,
            Category::MarketSize => 10,
            Category::Traction => 9,
            Category::TeamStrength => 7,
            _ => 0,
        });
        let suggestions = suggestions_for(Some(&breakdown));
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].contains("traction"));
    }
}
