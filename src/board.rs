// The game surface the solver plays against

use crate::error::WordleError;
use crate::feedback::{FeedbackRow, compute_feedback};
use crate::wordbank::WORD_LENGTH;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::collections::{BTreeSet, VecDeque};

/// A game surface that takes guesses and reports per-letter feedback.
pub trait Board {
    /// Registers a guess. Fails with `SubmissionRejected` when the board refuses the word.
    fn submit_guess(&mut self, word: &str) -> Result<(), WordleError>;

    /// Returns the feedback for the zero-based `round`. Fails with `BoardNotReady`
    /// when that round has not been rendered yet.
    fn read_feedback(&mut self, round: usize) -> Result<FeedbackRow, WordleError>;

    /// Resets the board for the next game.
    fn start_new_game(&mut self) -> Result<(), WordleError>;
}

impl<B: Board + ?Sized> Board for &mut B {
    fn submit_guess(&mut self, word: &str) -> Result<(), WordleError> {
        (**self).submit_guess(word)
    }

    fn read_feedback(&mut self, round: usize) -> Result<FeedbackRow, WordleError> {
        (**self).read_feedback(round)
    }

    fn start_new_game(&mut self) -> Result<(), WordleError> {
        (**self).start_new_game()
    }
}

#[derive(Debug)]
enum AnswerSource {
    Queue(VecDeque<String>),
    Random { words: Vec<String>, rng: StdRng },
}

impl AnswerSource {
    fn next_answer(&mut self) -> Option<String> {
        match self {
            AnswerSource::Queue(queue) => queue.pop_front(),
            AnswerSource::Random { words, rng } => words.choose(rng).cloned(),
        }
    }
}

#[derive(Debug)]
pub struct SimulatedBoard {
    accepted: BTreeSet<String>,
    source: AnswerSource,
    answer: String,
    rows: Vec<FeedbackRow>,
}

impl SimulatedBoard {
    /// Plays through `answers` in order, one per game. The board closes once they run out.
    pub fn with_answers<I, S>(accepted: I, answers: Vec<String>) -> Result<Self, WordleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted = normalise(accepted);
        let word_length = accepted
            .first()
            .map_or(WORD_LENGTH, |word| word.chars().count());
        let queue = answers
            .iter()
            .map(|answer| {
                let answer = answer.trim().to_ascii_uppercase();
                let playable = answer.chars().count() == word_length
                    && answer.chars().all(|c| c.is_ascii_alphabetic());
                if playable {
                    Ok(answer)
                } else {
                    Err(WordleError::InvalidAnswer(answer))
                }
            })
            .collect::<Result<_, _>>()?;
        Self::build(accepted, AnswerSource::Queue(queue))
    }

    pub fn random<I, S>(accepted: I, seed: Option<u64>) -> Result<Self, WordleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted = normalise(accepted);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let words = accepted.iter().cloned().collect();
        Self::build(accepted, AnswerSource::Random { words, rng })
    }

    fn build(
        mut accepted: BTreeSet<String>,
        mut source: AnswerSource,
    ) -> Result<Self, WordleError> {
        let answer = source.next_answer().ok_or(WordleError::BoardClosed)?;
        accepted.insert(answer.clone());
        Ok(Self {
            accepted,
            source,
            answer,
            rows: Vec::new(),
        })
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn rows(&self) -> &[FeedbackRow] {
        &self.rows
    }
}

fn normalise<I, S>(words: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_ascii_uppercase())
        .filter(|word| !word.is_empty())
        .collect()
}

impl Board for SimulatedBoard {
    fn submit_guess(&mut self, word: &str) -> Result<(), WordleError> {
        let word = word.trim().to_ascii_uppercase();
        if !self.accepted.contains(&word) {
            return Err(WordleError::SubmissionRejected(word));
        }
        self.rows.push(compute_feedback(&word, &self.answer)?);
        Ok(())
    }

    fn read_feedback(&mut self, round: usize) -> Result<FeedbackRow, WordleError> {
        self.rows
            .get(round)
            .cloned()
            .ok_or(WordleError::BoardNotReady(round))
    }

    fn start_new_game(&mut self) -> Result<(), WordleError> {
        self.answer = self.source.next_answer().ok_or(WordleError::BoardClosed)?;
        self.accepted.insert(self.answer.clone());
        self.rows.clear();
        Ok(())
    }
}
