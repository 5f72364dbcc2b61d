use crate::board::Board;
use crate::constraints::FilterMode;
use crate::error::WordleError;
use crate::feedback::FeedbackRow;
use crate::game_state::{GameConfig, GameOutcome, GameReport, MAX_ROUNDS, RetryPolicy, RunReport};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::time::Duration;

/// Plays Wordle automatically, picking every guess from letter frequencies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input", global = true)]
    pub wordbank_path: Option<String>,

    /// Guesses allowed per game
    #[arg(long, default_value_t = MAX_ROUNDS, global = true)]
    pub max_rounds: usize,

    /// Also enforce excluded positions and letter counts when filtering
    #[arg(long, global = true)]
    pub strict: bool,

    /// Attempts per board operation before giving up on a game
    #[arg(long, default_value_t = 3, global = true)]
    pub retries: u32,

    /// Wait before the first retry, doubled after each further attempt
    #[arg(long, default_value_t = 250, global = true)]
    pub backoff_ms: u64,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play against an in-process board
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value_t = 100)]
        games: usize,

        /// Seed for picking random answers
        #[arg(long)]
        seed: Option<u64>,

        /// Play these answers in order instead of random ones
        #[arg(short, long = "answer")]
        answers: Vec<String>,
    },
    /// Relay guesses to a real game through the terminal
    Play,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            max_rounds: self.max_rounds,
            filter_mode: if self.strict {
                FilterMode::Strict
            } else {
                FilterMode::Reference
            },
            retry: RetryPolicy {
                max_attempts: self.retries.max(1),
                initial_backoff: Duration::from_millis(self.backoff_ms),
            },
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// A board operated by a person: guesses are printed, results are typed back in.
pub struct CliBoard<R: BufRead> {
    reader: R,
    guess: Option<String>,
    rows: Vec<FeedbackRow>,
}

impl<R: BufRead> CliBoard<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            guess: None,
            rows: Vec::new(),
        }
    }

    /// Reads one trimmed line. `exit` and end of input close the board.
    fn read_line(&mut self) -> Result<String, WordleError> {
        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Err(WordleError::BoardClosed);
        }
        let input = input.trim().to_string();
        if input.eq_ignore_ascii_case("exit") {
            return Err(WordleError::BoardClosed);
        }
        Ok(input)
    }
}

impl<R: BufRead> Board for CliBoard<R> {
    fn submit_guess(&mut self, word: &str) -> Result<(), WordleError> {
        println!("\nEnter this guess: {word}");
        loop {
            println!("Press Enter once it is accepted, type 'reject' if the game refuses it, or 'exit' to quit:");
            let input = self.read_line()?;
            if input.eq_ignore_ascii_case("reject") {
                return Err(WordleError::SubmissionRejected(word.to_string()));
            }
            if input.is_empty() || input.eq_ignore_ascii_case("ok") {
                break;
            }
            println!("Unrecognised answer '{input}'.");
        }
        self.guess = Some(word.to_string());
        Ok(())
    }

    fn read_feedback(&mut self, round: usize) -> Result<FeedbackRow, WordleError> {
        if let Some(row) = self.rows.get(round) {
            return Ok(row.clone());
        }
        let guess = match &self.guess {
            Some(guess) if round == self.rows.len() => guess.clone(),
            _ => return Err(WordleError::BoardNotReady(round)),
        };
        println!("Enter feedback for {guess} (G=green, Y=yellow, X=gray, e.g. GYXXG):");
        let input = self.read_line()?;
        if input.is_empty() {
            return Err(WordleError::BoardNotReady(round));
        }
        let row = FeedbackRow::from_pattern(&guess, &input)?;
        self.rows.push(row.clone());
        self.guess = None;
        Ok(row)
    }

    fn start_new_game(&mut self) -> Result<(), WordleError> {
        println!("\nStart a new game and press Enter, or type 'exit' to quit:");
        self.read_line()?;
        self.guess = None;
        self.rows.clear();
        Ok(())
    }
}

pub fn display_loaded_words(count: usize) {
    println!("Loaded {count} words.");
}

#[must_use]
pub fn describe_outcome(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Solved => "solved".to_string(),
        GameOutcome::RoundsExhausted => "out of rounds".to_string(),
        GameOutcome::PoolExhausted => "no candidates remain".to_string(),
        GameOutcome::Aborted(reason) => format!("aborted ({reason})"),
    }
}

pub fn display_game(number: usize, game: &GameReport) {
    println!(
        "Game {number}: {} after {} rounds [{}]",
        describe_outcome(&game.outcome),
        game.rounds,
        game.guesses.join(" ")
    );
}

#[must_use]
pub fn format_run_summary(report: &RunReport) -> String {
    let mut summary = format!(
        "Total Games: {}\nSuccess Percentage: {:.2}%",
        report.total_games(),
        report.success_percentage()
    );
    for (rounds, count) in report.rounds_histogram() {
        summary.push_str(&format!("\n  solved in {rounds}: {count}"));
    }
    summary
}

pub fn display_run_summary(report: &RunReport) {
    println!("\n{}", format_run_summary(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Evaluation;
    use assert_matches::assert_matches;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["wordle-autoplay", "simulate"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(
            cli.command,
            Command::Simulate {
                games: 100,
                seed: None,
                answers: Vec::new()
            }
        );
        assert_eq!(cli.game_config(), GameConfig::default());
    }

    #[test]
    fn test_parse_cli_with_flags() {
        let cli = Cli::try_parse_from([
            "wordle-autoplay",
            "-i",
            "custom_wordbank.txt",
            "--strict",
            "--max-rounds",
            "8",
            "--retries",
            "5",
            "--backoff-ms",
            "10",
            "-vv",
            "simulate",
            "--games",
            "3",
            "--seed",
            "42",
            "--answer",
            "crane",
            "--answer",
            "slate",
        ])
        .unwrap();

        assert_eq!(cli.wordbank_path.as_deref(), Some("custom_wordbank.txt"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Command::Simulate {
                games: 3,
                seed: Some(42),
                answers: vec!["crane".to_string(), "slate".to_string()]
            }
        );
        let config = cli.game_config();
        assert_eq!(config.max_rounds, 8);
        assert_eq!(config.filter_mode, FilterMode::Strict);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_backoff, Duration::from_millis(10));
    }

    #[test]
    fn test_parse_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wordle-autoplay", "play", "--input", "words.txt"]).unwrap();
        assert_eq!(cli.command, Command::Play);
        assert_eq!(cli.wordbank_path.as_deref(), Some("words.txt"));
    }

    #[test]
    fn test_parse_cli_requires_command() {
        assert!(Cli::try_parse_from(["wordle-autoplay"]).is_err());
    }

    #[test]
    fn test_zero_retries_still_tries_once() {
        let cli = Cli::try_parse_from(["wordle-autoplay", "--retries", "0", "play"]).unwrap();
        assert_eq!(cli.game_config().retry.max_attempts, 1);
    }

    #[test]
    fn test_cli_board_round_trip() {
        let mut board = CliBoard::new(Cursor::new("\nxxygg\n"));
        board.submit_guess("SLATE").unwrap();
        let row = board.read_feedback(0).unwrap();
        assert_eq!(row.word(), "SLATE");
        assert_eq!(row.pattern(), "XXYGG");
        // Already read rows are not asked for again.
        assert_eq!(board.read_feedback(0).unwrap(), row);
    }

    #[test]
    fn test_cli_board_ok_accepts() {
        let mut board = CliBoard::new(Cursor::new("OK\nGGGGG\n"));
        board.submit_guess("CRANE").unwrap();
        assert!(board.read_feedback(0).unwrap().is_solved());
    }

    #[test]
    fn test_cli_board_unrecognised_reply_asks_again() {
        let mut board = CliBoard::new(Cursor::new("rejcet\nreject\n"));
        assert_matches!(
            board.submit_guess("CRANE"),
            Err(WordleError::SubmissionRejected(word)) if word == "CRANE"
        );

        let mut board = CliBoard::new(Cursor::new("huh\nyes\n\nGXXXX\n"));
        board.submit_guess("CRANE").unwrap();
        assert_eq!(board.read_feedback(0).unwrap().pattern(), "GXXXX");

        let mut board = CliBoard::new(Cursor::new("huh\n"));
        assert_matches!(board.submit_guess("CRANE"), Err(WordleError::BoardClosed));
    }

    #[test]
    fn test_cli_board_reject() {
        let mut board = CliBoard::new(Cursor::new("reject\n"));
        assert_matches!(
            board.submit_guess("CRANE"),
            Err(WordleError::SubmissionRejected(word)) if word == "CRANE"
        );
        assert_matches!(board.read_feedback(0), Err(WordleError::BoardNotReady(0)));
    }

    #[test]
    fn test_cli_board_malformed_feedback() {
        let mut board = CliBoard::new(Cursor::new("\nGGQXX\n\nGGXX\n"));
        board.submit_guess("CRANE").unwrap();
        assert_matches!(board.read_feedback(0), Err(WordleError::InvalidFeedback(_)));
        board.submit_guess("CRANE").unwrap();
        assert_matches!(board.read_feedback(0), Err(WordleError::InvalidFeedback(_)));
    }

    #[test]
    fn test_cli_board_blank_feedback_is_not_ready() {
        let mut board = CliBoard::new(Cursor::new("\n\nYXXXG\n"));
        board.submit_guess("TRACE").unwrap();
        assert_matches!(board.read_feedback(0), Err(WordleError::BoardNotReady(0)));
        let row = board.read_feedback(0).unwrap();
        assert_eq!(
            row.iter().map(|(_, e)| *e).collect::<Vec<_>>(),
            vec![
                Evaluation::Present,
                Evaluation::Absent,
                Evaluation::Absent,
                Evaluation::Absent,
                Evaluation::Correct
            ]
        );
    }

    #[test]
    fn test_cli_board_exit_and_eof_close() {
        let mut board = CliBoard::new(Cursor::new("exit\n"));
        assert_matches!(board.submit_guess("CRANE"), Err(WordleError::BoardClosed));

        let mut board = CliBoard::new(Cursor::new("\n"));
        board.submit_guess("CRANE").unwrap();
        assert_matches!(board.read_feedback(0), Err(WordleError::BoardClosed));

        let mut board = CliBoard::new(Cursor::new(""));
        assert_matches!(board.start_new_game(), Err(WordleError::BoardClosed));
    }

    #[test]
    fn test_cli_board_new_game_clears_rows() {
        let mut board = CliBoard::new(Cursor::new("\nXXXXX\n\n"));
        board.submit_guess("CRANE").unwrap();
        board.read_feedback(0).unwrap();
        board.start_new_game().unwrap();
        assert_matches!(board.read_feedback(0), Err(WordleError::BoardNotReady(0)));
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(describe_outcome(&GameOutcome::Solved), "solved");
        assert_eq!(
            describe_outcome(&GameOutcome::Aborted("board closed".to_string())),
            "aborted (board closed)"
        );
    }

    #[test]
    fn test_format_run_summary() {
        let mut report = RunReport::default();
        assert_eq!(
            format_run_summary(&report),
            "Total Games: 0\nSuccess Percentage: 0.00%"
        );

        for outcome in [
            GameOutcome::Solved,
            GameOutcome::Solved,
            GameOutcome::PoolExhausted,
        ] {
            report.record(GameReport {
                outcome,
                rounds: 3,
                final_guess: None,
                guesses: Vec::new(),
            });
        }
        assert_eq!(
            format_run_summary(&report),
            "Total Games: 3\nSuccess Percentage: 66.67%\n  solved in 3: 2"
        );
    }
}
