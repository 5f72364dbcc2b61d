use crate::board::Board;
use crate::constraints::{ConstraintStore, FilterMode};
use crate::debug_log;
use crate::error::WordleError;
use crate::feedback::FeedbackRow;
use crate::solver::{CandidatePool, recommend_guess};
use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

/// Rounds allowed per game.
pub const MAX_ROUNDS: usize = 6;
/// Board width assumed when the dictionary is empty.
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// Bounded retries for board operations that fail transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, including the first one.
    pub max_attempts: u32,
    /// Wait before the second try; doubled for each further try.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Runs `op`, retrying while it fails with a transient error.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, WordleError>
    where
        F: FnMut() -> Result<T, WordleError>,
    {
        let mut delay = self.initial_backoff;
        let mut attempt = 1;
        loop {
            match op() {
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    log::warn!(
                        "{what} failed (attempt {attempt}/{}): {e}; retrying in {delay:?}",
                        self.max_attempts
                    );
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    delay = delay.saturating_mul(2);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub max_rounds: usize,
    pub filter_mode: FilterMode,
    pub retry: RetryPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            filter_mode: FilterMode::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Where a game is in its round cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    AwaitingGuess,
    GuessSubmitted { guess: String },
    FeedbackReceived { row: FeedbackRow },
    Solved,
    RoundsExhausted,
    PoolExhausted,
}

impl GameState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameState::Solved | GameState::RoundsExhausted | GameState::PoolExhausted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Solved,
    RoundsExhausted,
    PoolExhausted,
    /// The game was abandoned because of a board or feedback error.
    Aborted(String),
}

impl GameOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        *self == GameOutcome::Solved
    }
}

/// What happened in one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub rounds: usize,
    pub final_guess: Option<String>,
    pub guesses: Vec<String>,
}

/// One game's pool, constraints and progress. Created at game start, consumed at game end.
pub struct GameSession {
    config: GameConfig,
    pool: CandidatePool,
    store: ConstraintStore,
    state: GameState,
    round: usize,
    guesses: Vec<String>,
}

impl GameSession {
    #[must_use]
    pub fn new(dictionary: &CandidatePool, config: GameConfig) -> Self {
        let word_length = dictionary.word_length().unwrap_or(DEFAULT_WORD_LENGTH);
        Self {
            config,
            pool: dictionary.clone(),
            store: ConstraintStore::new(word_length),
            state: GameState::AwaitingGuess,
            round: 0,
            guesses: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    #[must_use]
    pub fn store(&self) -> &ConstraintStore {
        &self.store
    }

    /// Guesses accepted by the board so far.
    #[must_use]
    pub fn rounds_used(&self) -> usize {
        self.round
    }

    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Performs one state transition. Terminal states are left as they are.
    ///
    /// An error leaves the state unchanged; the game cannot usefully continue.
    pub fn step<B: Board + ?Sized>(&mut self, board: &mut B) -> Result<&GameState, WordleError> {
        let next = match self.state.clone() {
            GameState::AwaitingGuess => self.submit_next_guess(board)?,
            GameState::GuessSubmitted { guess } => {
                let round = self.round - 1;
                let row = self
                    .config
                    .retry
                    .run("reading feedback", || board.read_feedback(round))?;
                if !row.word().eq_ignore_ascii_case(&guess) {
                    return Err(WordleError::InvalidFeedback(format!(
                        "feedback row spells '{}', expected '{guess}'",
                        row.word()
                    )));
                }
                GameState::FeedbackReceived { row }
            }
            GameState::FeedbackReceived { row } => self.apply_feedback(&row)?,
            terminal => terminal,
        };
        self.state = next;
        Ok(&self.state)
    }

    fn submit_next_guess<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> Result<GameState, WordleError> {
        if self.round >= self.config.max_rounds {
            return Ok(GameState::RoundsExhausted);
        }
        loop {
            let recommendation = match recommend_guess(&self.pool, &self.store) {
                Ok(recommendation) => recommendation,
                Err(WordleError::EmptyPool) => return Ok(GameState::PoolExhausted),
                Err(e) => return Err(e),
            };
            let guess = recommendation.guess;
            // Never guess the same word twice, whatever the board says.
            self.pool.remove(&guess);
            debug_log!(
                "Round {}: guessing {guess} (score {}, {} words left)",
                self.round + 1,
                recommendation.score,
                self.pool.len()
            );
            match self
                .config
                .retry
                .run("submitting guess", || board.submit_guess(&guess))
            {
                Ok(()) => {
                    self.round += 1;
                    self.guesses.push(guess.clone());
                    return Ok(GameState::GuessSubmitted { guess });
                }
                Err(WordleError::SubmissionRejected(word)) => {
                    log::warn!("Board rejected {word}; dropping it from the pool");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn apply_feedback(&mut self, row: &FeedbackRow) -> Result<GameState, WordleError> {
        self.store.update(row)?;
        self.pool.retain_consistent(&self.store, self.config.filter_mode);
        debug_log!(
            "Round {}: {row} -> {} ({} words left)",
            self.round,
            self.store,
            self.pool.len()
        );

        if self.store.is_solved() {
            Ok(GameState::Solved)
        } else if self.round >= self.config.max_rounds {
            Ok(GameState::RoundsExhausted)
        } else if self.pool.is_empty() {
            Ok(GameState::PoolExhausted)
        } else {
            Ok(GameState::AwaitingGuess)
        }
    }

    /// Steps until the game ends.
    ///
    /// Board and feedback errors end the game as `Aborted`; only `BoardClosed`
    /// is passed back to the caller.
    pub fn play<B: Board + ?Sized>(mut self, board: &mut B) -> Result<GameReport, WordleError> {
        let outcome = loop {
            match self.step(board).cloned() {
                Ok(GameState::Solved) => break GameOutcome::Solved,
                Ok(GameState::RoundsExhausted) => break GameOutcome::RoundsExhausted,
                Ok(GameState::PoolExhausted) => break GameOutcome::PoolExhausted,
                Ok(_) => {}
                Err(WordleError::BoardClosed) => return Err(WordleError::BoardClosed),
                Err(e) => {
                    log::error!("Aborting game after {} rounds: {e}", self.round);
                    break GameOutcome::Aborted(e.to_string());
                }
            }
        };
        Ok(GameReport {
            outcome,
            rounds: self.round,
            final_guess: self.guesses.last().cloned(),
            guesses: self.guesses,
        })
    }
}

/// Every game played in a run, plus totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    games: Vec<GameReport>,
}

impl RunReport {
    pub fn record(&mut self, game: GameReport) {
        self.games.push(game);
    }

    #[must_use]
    pub fn games(&self) -> &[GameReport] {
        &self.games
    }

    #[must_use]
    pub fn total_games(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn successes(&self) -> usize {
        self.games.iter().filter(|g| g.outcome.is_success()).count()
    }

    #[must_use]
    pub fn success_percentage(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.successes() as f64 / self.total_games() as f64 * 100.0
    }

    /// Number of solved games per rounds used.
    #[must_use]
    pub fn rounds_histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for game in self.games.iter().filter(|g| g.outcome.is_success()) {
            *histogram.entry(game.rounds).or_insert(0) += 1;
        }
        histogram
    }
}

/// Plays games back to back until `max_games` is reached or the board closes.
///
/// Each game gets a fresh pool and constraint store. A failing game never stops
/// the run; `on_game` sees every finished game together with the running totals.
pub fn run_games<B, F>(
    board: &mut B,
    dictionary: &CandidatePool,
    config: &GameConfig,
    max_games: Option<usize>,
    mut on_game: F,
) -> RunReport
where
    B: Board + ?Sized,
    F: FnMut(&GameReport, &RunReport),
{
    let mut report = RunReport::default();
    while max_games.is_none_or(|max| report.total_games() < max) {
        let session = GameSession::new(dictionary, *config);
        let game = match session.play(board) {
            Ok(game) => game,
            Err(WordleError::BoardClosed) => {
                log::info!("Board closed; stopping after {} games", report.total_games());
                break;
            }
            Err(e) => GameReport {
                outcome: GameOutcome::Aborted(e.to_string()),
                rounds: 0,
                final_guess: None,
                guesses: Vec::new(),
            },
        };
        log::info!(
            "Game {}: {:?} in {} rounds (last guess {})",
            report.total_games() + 1,
            game.outcome,
            game.rounds,
            game.final_guess.as_deref().unwrap_or("-")
        );
        report.record(game);
        if let Some(last) = report.games().last() {
            on_game(last, &report);
        }

        if max_games.is_some_and(|max| report.total_games() >= max) {
            break;
        }
        match config
            .retry
            .run("starting a new game", || board.start_new_game())
        {
            Ok(()) => {}
            Err(WordleError::BoardClosed) => {
                log::info!("Board closed; stopping after {} games", report.total_games());
                break;
            }
            Err(e) => {
                log::error!("Could not start a new game, stopping: {e}");
                break;
            }
        }
    }
    log::info!(
        "Run finished: {} games, {} solved ({:.2}%)",
        report.total_games(),
        report.successes(),
        report.success_percentage()
    );
    report
}
