use anyhow::{Context, Result, bail};
use std::io;
use wordle_autoplay::board::SimulatedBoard;
use wordle_autoplay::cli::{
    CliBoard, Command, display_game, display_loaded_words, display_run_summary, parse_cli,
};
use wordle_autoplay::game_state::run_games;
use wordle_autoplay::logging;
use wordle_autoplay::solver::CandidatePool;
use wordle_autoplay::wordbank::load_wordbank;

fn main() -> Result<()> {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let words = load_wordbank(cli.wordbank_path.as_deref()).with_context(|| {
        format!(
            "failed to load word bank from '{}'",
            cli.wordbank_path.as_deref().unwrap_or_default()
        )
    })?;
    if words.is_empty() {
        bail!("word bank contains no usable words");
    }
    let dictionary = CandidatePool::new(&words);
    display_loaded_words(dictionary.len());

    let config = cli.game_config();
    let report = match &cli.command {
        Command::Simulate {
            games,
            seed,
            answers,
        } => {
            let mut board = if answers.is_empty() {
                SimulatedBoard::random(dictionary.words(), *seed)?
            } else {
                SimulatedBoard::with_answers(dictionary.words(), answers.clone())?
            };
            run_games(&mut board, &dictionary, &config, Some(*games), |game, totals| {
                display_game(totals.total_games(), game);
            })
        }
        Command::Play => {
            let stdin = io::stdin();
            let mut board = CliBoard::new(stdin.lock());
            run_games(&mut board, &dictionary, &config, None, |game, totals| {
                display_game(totals.total_games(), game);
            })
        }
    };
    display_run_summary(&report);
    Ok(())
}
