use serde::{Deserialize, Serialize};

/// A startup profile together with the project and investment records the
/// scorer reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupProfile {
    pub id: String,
    #[serde(default)]
    pub owner_user_id: Option<String>, // Founder's user id
    #[serde(default)]
    pub pitch_summary: String,
    #[serde(default)]
    pub traction_metrics: Option<String>,
    #[serde(default)]
    pub stage: String, // "idea", "mvp", "launch", ...
    #[serde(default)]
    pub funding_needed: Option<f64>,
    #[serde(default)]
    pub equity_offer: Option<f64>, // Percentage
    #[serde(default)]
    pub ai_market_potential: Option<String>,
    #[serde(default)]
    pub ai_risk_level: Option<String>,
    #[serde(default)]
    pub ai_feasibility_score: Option<f64>, // 0-100
    #[serde(default)]
    pub project: Option<ProjectContext>,
    #[serde(default)]
    pub investments: Vec<InvestmentRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub problem_statement: Option<String>,
    #[serde(default)]
    pub target_market: Option<String>,
    #[serde(default)]
    pub member_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    #[serde(default)]
    pub investor_id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    pub status: InvestmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    Expressed,
    MeetingRequested,
    Committed,
    Completed,
    #[serde(other)]
    Other,
}

impl InvestmentStatus {
    /// Committed and completed investments are evidence of traction
    pub fn is_committed(self) -> bool {
        matches!(self, InvestmentStatus::Committed | InvestmentStatus::Completed)
    }
}

impl StartupProfile {
    /// Number of people on the project, never less than 1
    pub fn team_size(&self) -> u32 {
        self.project
            .as_ref()
            .map(|p| p.member_count)
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }

    pub fn problem_statement(&self) -> Option<&str> {
        self.project.as_ref()?.problem_statement.as_deref()
    }

    pub fn target_market(&self) -> Option<&str> {
        self.project.as_ref()?.target_market.as_deref()
    }

    pub fn has_committed_investment(&self) -> bool {
        self.investments.iter().any(|i| i.status.is_committed())
    }

    /// Display name: project name when known, otherwise the startup id
    pub fn display_name(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.project_name.as_deref())
            .unwrap_or(&self.id)
    }

    /// Trim optional text fields (blank becomes absent) and pin the AI
    /// feasibility score into 0-100.
    pub fn normalize(mut self) -> Self {
        self.id = self.id.trim().to_string();
        self.stage = self.stage.trim().to_string();
        self.owner_user_id = trimmed(self.owner_user_id);
        self.traction_metrics = trimmed(self.traction_metrics);
        self.ai_market_potential = trimmed(self.ai_market_potential);
        self.ai_risk_level = trimmed(self.ai_risk_level);
        self.ai_feasibility_score = self.ai_feasibility_score.map(|s| s.clamp(0.0, 100.0));
        if let Some(project) = self.project.as_mut() {
            project.project_name = trimmed(project.project_name.take());
            project.business_name = trimmed(project.business_name.take());
            project.industry = trimmed(project.industry.take());
        }
        self
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
