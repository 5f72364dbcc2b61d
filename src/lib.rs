// Library interface for wordle-autoplay
// The binary and the integration tests both build on these modules

pub mod board;
pub mod cli;
pub mod constraints;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use board::{Board, SimulatedBoard};
pub use constraints::{ConstraintStore, FilterMode};
pub use error::WordleError;
pub use feedback::{Evaluation, FeedbackRow, compute_feedback};
pub use game_state::{GameConfig, GameOutcome, GameReport, GameSession, RunReport, run_games};
pub use solver::{CandidatePool, filter_candidates, recommend_guess};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
