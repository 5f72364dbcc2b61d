// Accumulated knowledge about the hidden word

use crate::error::WordleError;
use crate::feedback::{Evaluation, FeedbackRow};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Reference,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterBounds {
    pub min: usize,
    /// Known only once a row marked some copy of the letter absent.
    pub max: Option<usize>,
}

impl LetterBounds {
    fn admits(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

/// Per-game knowledge derived from feedback rows.
///
/// A letter is never in more than one of: confirmed at some position,
/// `present_letters`, `absent_letters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintStore {
    correct_letters: Vec<Option<char>>,
    present_letters: BTreeSet<char>,
    absent_letters: BTreeSet<char>,
    excluded_positions: Vec<BTreeSet<char>>,
    letter_bounds: BTreeMap<char, LetterBounds>,
}

impl ConstraintStore {
    #[must_use]
    pub fn new(word_length: usize) -> Self {
        Self {
            correct_letters: vec![None; word_length],
            present_letters: BTreeSet::new(),
            absent_letters: BTreeSet::new(),
            excluded_positions: vec![BTreeSet::new(); word_length],
            letter_bounds: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.correct_letters.len()
    }

    #[must_use]
    pub fn correct_letters(&self) -> &[Option<char>] {
        &self.correct_letters
    }

    #[must_use]
    pub fn present_letters(&self) -> &BTreeSet<char> {
        &self.present_letters
    }

    #[must_use]
    pub fn absent_letters(&self) -> &BTreeSet<char> {
        &self.absent_letters
    }

    #[must_use]
    pub fn excluded_positions(&self) -> &[BTreeSet<char>] {
        &self.excluded_positions
    }

    #[must_use]
    pub fn letter_bounds(&self, letter: char) -> Option<LetterBounds> {
        self.letter_bounds.get(&letter).copied()
    }

    #[must_use]
    pub fn is_confirmed(&self, letter: char) -> bool {
        self.correct_letters.contains(&Some(letter))
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.correct_letters.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn solution(&self) -> Option<String> {
        self.correct_letters.iter().copied().collect()
    }

    /// Folds one feedback row into the store.
    ///
    /// The row is validated first; on error the store is left untouched.
    pub fn update(&mut self, row: &FeedbackRow) -> Result<(), WordleError> {
        row.validate(self.word_length())?;

        for (position, &(letter, evaluation)) in row.iter().enumerate() {
            match evaluation {
                Evaluation::Correct => {
                    self.correct_letters[position] = Some(letter);
                    self.present_letters.remove(&letter);
                    self.absent_letters.remove(&letter);
                }
                Evaluation::Present => {
                    if !self.is_confirmed(letter) {
                        self.present_letters.insert(letter);
                    }
                    self.absent_letters.remove(&letter);
                    self.excluded_positions[position].insert(letter);
                }
                Evaluation::Absent => {
                    // A repeated guess letter can be gray while another copy is green or yellow.
                    if !self.is_confirmed(letter) && !self.present_letters.contains(&letter) {
                        self.absent_letters.insert(letter);
                    }
                    self.excluded_positions[position].insert(letter);
                }
            }
        }

        self.update_letter_bounds(row);
        Ok(())
    }

    fn update_letter_bounds(&mut self, row: &FeedbackRow) {
        let mut seen: BTreeMap<char, (usize, bool)> = BTreeMap::new();
        for &(letter, evaluation) in row.iter() {
            let (hits, gray) = seen.entry(letter).or_insert((0, false));
            match evaluation {
                Evaluation::Correct | Evaluation::Present => *hits += 1,
                Evaluation::Absent => *gray = true,
            }
        }
        for (letter, (hits, gray)) in seen {
            let bounds = self.letter_bounds.entry(letter).or_insert(LetterBounds {
                min: 0,
                max: None,
            });
            bounds.min = bounds.min.max(hits);
            if gray {
                bounds.max = Some(bounds.max.map_or(hits, |max| max.min(hits)));
            }
        }
    }

    #[must_use]
    pub fn is_satisfied_by(&self, word: &str, mode: FilterMode) -> bool {
        let letters: Vec<char> = word.chars().collect();
        if letters.len() != self.word_length() {
            return false;
        }
        if letters.iter().any(|c| self.absent_letters.contains(c)) {
            return false;
        }
        if !self.present_letters.iter().all(|c| letters.contains(c)) {
            return false;
        }
        let positions_match = self
            .correct_letters
            .iter()
            .zip(&letters)
            .all(|(known, letter)| known.is_none_or(|known| known == *letter));
        if !positions_match {
            return false;
        }
        if mode == FilterMode::Reference {
            return true;
        }

        let excluded_hit = self
            .excluded_positions
            .iter()
            .zip(&letters)
            .any(|(excluded, letter)| excluded.contains(letter));
        if excluded_hit {
            return false;
        }
        self.letter_bounds.iter().all(|(letter, bounds)| {
            bounds.admits(letters.iter().filter(|c| *c == letter).count())
        })
    }
}

impl fmt::Display for ConstraintStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let correct: String = self
            .correct_letters
            .iter()
            .map(|letter| letter.unwrap_or('-'))
            .collect();
        let present: String = self.present_letters.iter().collect();
        let absent: String = self.absent_letters.iter().collect();
        write!(f, "correct={correct} present={{{present}}} absent={{{absent}}}")
    }
}
