use crate::profile::StartupProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    ProjectManager,
    FinanceAdmin,
    Investor,
    Client,
    Talent,
    Hirer,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::ProjectManager,
        Role::FinanceAdmin,
        Role::Investor,
        Role::Client,
        Role::Talent,
        Role::Hirer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::ProjectManager => "project_manager",
            Role::FinanceAdmin => "finance_admin",
            Role::Investor => "investor",
            Role::Client => "client",
            Role::Talent => "talent",
            Role::Hirer => "hirer",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(
            self,
            Role::SuperAdmin | Role::ProjectManager | Role::FinanceAdmin
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Role::ALL.iter().map(|r| r.as_str()).collect();
                format!("unknown role '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// The authenticated caller of a score operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

/// Who may recompute a startup's score: an admin or the startup's founder
pub fn can_recalculate(actor: &Actor, profile: &StartupProfile) -> bool {
    actor.role.is_admin()
        || profile
            .owner_user_id
            .as_deref()
            .is_some_and(|owner| owner == actor.user_id)
}

/// Who may browse the ranked startup list: admins and investors
pub fn can_view_ranking(actor: &Actor) -> bool {
    actor.role.is_admin() || actor.role == Role::Investor
}
