pub mod breakdown;
pub mod engine;
pub mod suggestions;
pub mod weights;

pub use breakdown::ScoreBreakdown;
pub use engine::compute_score;
pub use suggestions::suggestions_for;
pub use weights::{clamp, Category, MAX_TOTAL};
