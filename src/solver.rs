use crate::constraints::{ConstraintStore, FilterMode};
use crate::error::WordleError;
use std::collections::BTreeMap;

/// Dictionary words still consistent with everything learned in the current game.
///
/// Words are upper-case, unique and kept in lexicographic order, so scoring ties
/// always resolve to the same word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidatePool {
    words: Vec<String>,
}

impl CandidatePool {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_ascii_uppercase())
            .filter(|word| !word.is_empty())
            .collect();
        words.sort_unstable();
        words.dedup();
        Self { words }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    /// Length of the pooled words, taken from the first one.
    #[must_use]
    pub fn word_length(&self) -> Option<usize> {
        self.words.first().map(|word| word.chars().count())
    }

    /// Drops `word` for good. Returns whether it was in the pool.
    pub fn remove(&mut self, word: &str) -> bool {
        match self.words.binary_search_by(|probe| probe.as_str().cmp(word)) {
            Ok(index) => {
                self.words.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Keeps only the words `store` still allows. Returns how many were dropped.
    pub fn retain_consistent(&mut self, store: &ConstraintStore, mode: FilterMode) -> usize {
        let before = self.words.len();
        self.words.retain(|word| store.is_satisfied_by(word, mode));
        before - self.words.len()
    }
}

/// A guess picked from the pool, with the score that won it the spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub guess: String,
    pub score: i64,
}

/// Returns the candidates consistent with `store`, preserving their order.
#[must_use]
pub fn filter_candidates(
    candidates: &[String],
    store: &ConstraintStore,
    mode: FilterMode,
) -> Vec<String> {
    candidates
        .iter()
        .filter(|word| store.is_satisfied_by(word, mode))
        .cloned()
        .collect()
}

fn letter_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_uppercase()
        .then(|| (letter as u8 - b'A') as usize)
}

/// Counts every occurrence of every letter across `words`.
#[must_use]
pub fn build_freq_chart(words: &[String]) -> [usize; 26] {
    let mut freq = [0; 26];
    for word in words {
        for idx in word.chars().filter_map(letter_index) {
            freq[idx] += 1;
        }
    }
    freq
}

/// Scores one candidate: the pool frequency of each distinct letter it uses, minus
/// one for every position that repeats a present letter where it is known not to be.
#[must_use]
pub fn score_word(word: &str, freq: &[usize; 26], store: &ConstraintStore) -> i64 {
    let mut seen = [false; 26];
    let mut score: i64 = 0;
    for idx in word.chars().filter_map(letter_index) {
        if !seen[idx] {
            seen[idx] = true;
            score += freq[idx] as i64;
        }
    }

    let correct = store.correct_letters();
    let excluded = store.excluded_positions();
    for (pos, letter) in word.chars().enumerate() {
        let unresolved = correct.get(pos).is_some_and(Option::is_none);
        if unresolved
            && store.present_letters().contains(&letter)
            && excluded.get(pos).is_some_and(|set| set.contains(&letter))
        {
            score -= 1;
        }
    }
    score
}

/// Scores every candidate against the letter frequencies of the candidates themselves.
#[must_use]
pub fn score_candidates<'a>(
    candidates: &'a [String],
    store: &ConstraintStore,
) -> BTreeMap<&'a str, i64> {
    let freq = build_freq_chart(candidates);
    candidates
        .iter()
        .map(|word| (word.as_str(), score_word(word, &freq, store)))
        .collect()
}

/// Picks the highest score; ties go to the lexicographically first word.
pub fn select_guess(scores: &BTreeMap<&str, i64>) -> Result<Recommendation, WordleError> {
    let mut best: Option<(&str, i64)> = None;
    for (&word, &score) in scores {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((word, score));
        }
    }
    best.map(|(word, score)| Recommendation {
        guess: word.to_string(),
        score,
    })
    .ok_or(WordleError::EmptyPool)
}

/// Scores the pool and returns its best word.
pub fn recommend_guess(
    pool: &CandidatePool,
    store: &ConstraintStore,
) -> Result<Recommendation, WordleError> {
    select_guess(&score_candidates(pool.words(), store))
}
