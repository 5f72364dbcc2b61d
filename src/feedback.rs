// Per-letter verdicts reported by the board, and the rows they form

use crate::error::WordleError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluation {
    Correct,
    Present,
    Absent,
}

impl Evaluation {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Evaluation::Correct),
            'Y' => Some(Evaluation::Present),
            'X' => Some(Evaluation::Absent),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Evaluation::Correct => 'G',
            Evaluation::Present => 'Y',
            Evaluation::Absent => 'X',
        }
    }
}

impl FromStr for Evaluation {
    type Err = WordleError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let tag = tag.trim();
        match tag.to_ascii_lowercase().as_str() {
            "correct" | "g" => Ok(Evaluation::Correct),
            "present" | "y" => Ok(Evaluation::Present),
            "absent" | "x" => Ok(Evaluation::Absent),
            _ => Err(WordleError::InvalidFeedback(format!(
                "unknown evaluation tag '{tag}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRow {
    tiles: Vec<(char, Evaluation)>,
}

impl FeedbackRow {
    /// Letters are upper-cased; nothing else is checked until the row is applied.
    #[must_use]
    pub fn new(tiles: Vec<(char, Evaluation)>) -> Self {
        Self {
            tiles: tiles
                .into_iter()
                .map(|(letter, evaluation)| (letter.to_ascii_uppercase(), evaluation))
                .collect(),
        }
    }

    pub fn from_tags<'a, I>(tiles: I) -> Result<Self, WordleError>
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        let tiles = tiles
            .into_iter()
            .map(|(letter, tag)| tag.parse().map(|evaluation| (letter, evaluation)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tiles))
    }

    /// Pairs the letters of `guess` with a G/Y/X pattern such as `XXYXG`.
    pub fn from_pattern(guess: &str, pattern: &str) -> Result<Self, WordleError> {
        let pattern = pattern.trim();
        if guess.chars().count() != pattern.chars().count() {
            return Err(WordleError::InvalidFeedback(format!(
                "pattern '{pattern}' does not match the length of '{guess}'"
            )));
        }
        let tiles = guess
            .chars()
            .zip(pattern.chars())
            .map(|(letter, code)| {
                Evaluation::from_char(code)
                    .map(|evaluation| (letter, evaluation))
                    .ok_or_else(|| {
                        WordleError::InvalidFeedback(format!(
                            "'{code}' is not one of G, Y or X"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tiles))
    }

    pub fn validate(&self, word_length: usize) -> Result<(), WordleError> {
        if self.tiles.len() != word_length {
            return Err(WordleError::InvalidFeedback(format!(
                "expected {word_length} tiles, got {}",
                self.tiles.len()
            )));
        }
        if let Some((letter, _)) = self
            .tiles
            .iter()
            .find(|(letter, _)| !letter.is_ascii_alphabetic())
        {
            return Err(WordleError::InvalidFeedback(format!(
                "tile letter '{letter}' is not alphabetic"
            )));
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(char, Evaluation)> {
        self.tiles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn word(&self) -> String {
        self.tiles.iter().map(|(letter, _)| *letter).collect()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.tiles.is_empty()
            && self
                .tiles
                .iter()
                .all(|(_, evaluation)| *evaluation == Evaluation::Correct)
    }

    #[must_use]
    pub fn pattern(&self) -> String {
        self.tiles
            .iter()
            .map(|(_, evaluation)| evaluation.to_char())
            .collect()
    }
}

impl fmt::Display for FeedbackRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.word(), self.pattern())
    }
}

/// Scores `guess` against `answer`: greens first, then yellows left to right.
pub fn compute_feedback(guess: &str, answer: &str) -> Result<FeedbackRow, WordleError> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let mut answer_chars: Vec<Option<char>> = answer.chars().map(Some).collect();
    if guess_chars.len() != answer_chars.len() {
        return Err(WordleError::InvalidFeedback(format!(
            "cannot score '{guess}' against a {}-letter answer",
            answer_chars.len()
        )));
    }

    let mut evaluations = vec![Evaluation::Absent; guess_chars.len()];
    for (i, letter) in guess_chars.iter().enumerate() {
        if answer_chars.get(i).copied().flatten() == Some(*letter) {
            evaluations[i] = Evaluation::Correct;
            answer_chars[i] = None;
        }
    }
    for (i, letter) in guess_chars.iter().enumerate() {
        if evaluations[i] == Evaluation::Correct {
            continue;
        }
        if let Some(pos) = answer_chars.iter().position(|c| *c == Some(*letter)) {
            evaluations[i] = Evaluation::Present;
            answer_chars[pos] = None;
        }
    }
    Ok(FeedbackRow::new(
        guess_chars.into_iter().zip(evaluations).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_evaluation_from_char() {
        assert_eq!(Evaluation::from_char('G'), Some(Evaluation::Correct));
        assert_eq!(Evaluation::from_char('y'), Some(Evaluation::Present));
        assert_eq!(Evaluation::from_char('x'), Some(Evaluation::Absent));
        assert_eq!(Evaluation::from_char('A'), None);
    }

    #[test]
    fn test_evaluation_from_tag() {
        assert_eq!("correct".parse::<Evaluation>().unwrap(), Evaluation::Correct);
        assert_eq!("Present".parse::<Evaluation>().unwrap(), Evaluation::Present);
        assert_eq!(" absent ".parse::<Evaluation>().unwrap(), Evaluation::Absent);
        assert_matches!(
            "tbd".parse::<Evaluation>(),
            Err(WordleError::InvalidFeedback(_))
        );
    }

    #[test]
    fn test_from_pattern() {
        let row = FeedbackRow::from_pattern("slate", "xxyxg").unwrap();
        assert_eq!(row.word(), "SLATE");
        assert_eq!(row.pattern(), "XXYXG");
        assert_eq!(row.to_string(), "SLATE XXYXG");
    }

    #[test]
    fn test_from_pattern_rejects_bad_input() {
        assert_matches!(
            FeedbackRow::from_pattern("SLATE", "XXY"),
            Err(WordleError::InvalidFeedback(_))
        );
        assert_matches!(
            FeedbackRow::from_pattern("SLATE", "XXYXA"),
            Err(WordleError::InvalidFeedback(_))
        );
    }

    #[test]
    fn test_from_tags() {
        let row = FeedbackRow::from_tags([
            ('c', "absent"),
            ('r', "present"),
            ('a', "correct"),
            ('n', "absent"),
            ('e', "correct"),
        ])
        .unwrap();
        assert_eq!(row.pattern(), "XYGXG");
        assert_matches!(
            FeedbackRow::from_tags([('c', "empty")]),
            Err(WordleError::InvalidFeedback(_))
        );
    }

    #[test]
    fn test_validate() {
        let row = FeedbackRow::from_pattern("CRANE", "GGGGG").unwrap();
        assert!(row.validate(5).is_ok());
        assert_matches!(row.validate(6), Err(WordleError::InvalidFeedback(_)));

        let row = FeedbackRow::new(vec![('C', Evaluation::Correct), ('4', Evaluation::Absent)]);
        assert_matches!(row.validate(2), Err(WordleError::InvalidFeedback(_)));
    }

    #[test]
    fn test_is_solved() {
        assert!(FeedbackRow::from_pattern("CRANE", "GGGGG").unwrap().is_solved());
        assert!(!FeedbackRow::from_pattern("CRANE", "GGGGY").unwrap().is_solved());
        assert!(!FeedbackRow::new(Vec::new()).is_solved());
    }

    #[test]
    fn test_compute_feedback_basic() {
        assert_eq!(compute_feedback("SLATE", "CRANE").unwrap().pattern(), "XXGXG");
        assert_eq!(compute_feedback("CRANE", "CRANE").unwrap().pattern(), "GGGGG");
        assert_eq!(compute_feedback("CRANE", "BRAIN").unwrap().pattern(), "XGGYX");
    }

    #[test]
    fn test_compute_feedback_repeated_letters() {
        // Only one S in the answer: the green claims it, the other copies are gray.
        assert_eq!(compute_feedback("SASSY", "STAMP").unwrap().pattern(), "GYXXX");
        // Greens are matched before yellows.
        assert_eq!(compute_feedback("EERIE", "THREE").unwrap().pattern(), "YXGXG");
        assert_eq!(compute_feedback("SPEED", "CREEP").unwrap().pattern(), "XYGGX");
    }

    #[test]
    fn test_compute_feedback_length_mismatch() {
        assert_matches!(
            compute_feedback("CRANE", "CRANES"),
            Err(WordleError::InvalidFeedback(_))
        );
        assert_matches!(
            compute_feedback("CRANES", "CRANE"),
            Err(WordleError::InvalidFeedback(_))
        );
    }
}
