pub mod types;
pub mod validation;

pub use types::{InvestmentRecord, InvestmentStatus, ProjectContext, StartupProfile};
pub use validation::validate_profiles;
