use super::weights::Category;
use serde::{Deserialize, Serialize};

/// Per-category scores and their sum.
///
/// Every category score lies in `[0, category.weight()]` and `total` is the
/// sum of the eight, so `total` lies in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub problem_clarity: u32,
    pub market_size: u32,
    pub business_model: u32,
    pub innovation: u32,
    pub feasibility: u32,
    pub traction: u32,
    pub team_strength: u32,
    pub financial_logic: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    /// Build a breakdown from a per-category lookup; `total` is derived.
    pub fn from_fn(mut score_of: impl FnMut(Category) -> u32) -> Self {
        let mut breakdown = ScoreBreakdown {
            problem_clarity: score_of(Category::ProblemClarity),
            market_size: score_of(Category::MarketSize),
            business_model: score_of(Category::BusinessModel),
            innovation: score_of(Category::Innovation),
            feasibility: score_of(Category::Feasibility),
            traction: score_of(Category::Traction),
            team_strength: score_of(Category::TeamStrength),
            financial_logic: score_of(Category::FinancialLogic),
            total: 0,
        };
        breakdown.total = breakdown.iter().map(|(_, score)| score).sum();
        breakdown
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::ProblemClarity => self.problem_clarity,
            Category::MarketSize => self.market_size,
            Category::BusinessModel => self.business_model,
            Category::Innovation => self.innovation,
            Category::Feasibility => self.feasibility,
            Category::Traction => self.traction,
            Category::TeamStrength => self.team_strength,
            Category::FinancialLogic => self.financial_logic,
        }
    }

    /// Category scores in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Check the total and per-category bounds. Breakdowns read back from
    /// storage may have been edited by hand.
    pub fn is_consistent(&self) -> bool {
        let sum: u32 = self.iter().map(|(_, score)| score).sum();
        self.iter().all(|(c, score)| score <= c.weight()) && sum == self.total
    }
}
