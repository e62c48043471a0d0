pub use self::{
    attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes, TimedDifficultyAttributes},
    difficulty::{calculate_difficulty, calculate_timed_difficulty, OsuDifficulty},
    performance::OsuPerformance,
    score_state::OsuScoreState,
};

mod attributes;
pub(crate) mod difficulty;
mod performance;
mod score_state;
