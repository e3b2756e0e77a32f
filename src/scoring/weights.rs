use std::fmt;

/// The eight scoring categories, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    ProblemClarity,
    MarketSize,
    BusinessModel,
    Innovation,
    Feasibility,
    Traction,
    TeamStrength,
    FinancialLogic,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::ProblemClarity,
        Category::MarketSize,
        Category::BusinessModel,
        Category::Innovation,
        Category::Feasibility,
        Category::Traction,
        Category::TeamStrength,
        Category::FinancialLogic,
    ];

    /// Maximum points this category contributes to the 100-point total
    pub const fn weight(self) -> u32 {
        match self {
            Category::ProblemClarity => 10,
            Category::MarketSize => 15,
            Category::BusinessModel => 15,
            Category::Innovation => 10,
            Category::Feasibility => 15,
            Category::Traction => 15,
            Category::TeamStrength => 10,
            Category::FinancialLogic => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::ProblemClarity => "Problem clarity",
            Category::MarketSize => "Market size",
            Category::BusinessModel => "Business model",
            Category::Innovation => "Innovation",
            Category::Feasibility => "Feasibility",
            Category::Traction => "Traction",
            Category::TeamStrength => "Team strength",
            Category::FinancialLogic => "Financial logic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sum of all category weights
pub const MAX_TOTAL: u32 = 100;

/// Round `value` and pin it into `[0, max]`. NaN yields 0.
pub fn clamp(value: f64, max: u32) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let rounded = value.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= f64::from(max) {
        max
    } else {
        rounded as u32
    }
}
