use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const WORD_LENGTH: usize = 5;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

const APP_DIR: &str = "wordle-autoplay";
const WORDBANK_FILE: &str = "words.txt";

fn normalise_word(line: &str) -> Option<String> {
    let word = line.trim().to_uppercase();
    (word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())).then_some(word)
}

/// Parses one word per line, keeping only five-letter alphabetic words.
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalise_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalise_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Per-user word list location, e.g. `~/.config/wordle-autoplay/words.txt` on Linux.
#[must_use]
pub fn default_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(WORDBANK_FILE))
}

/// Loads the dictionary from `path`, else from the per-user file when it exists,
/// else from the embedded list.
pub fn load_wordbank(path: Option<&str>) -> io::Result<Vec<String>> {
    if let Some(path) = path {
        return load_wordbank_from_file(path);
    }
    if let Some(default_path) = default_wordbank_path()
        && default_path.is_file()
    {
        log::info!("Using word list at {}", default_path.display());
        return load_wordbank_from_file(default_path);
    }
    Ok(load_wordbank_from_str(EMBEDDED_WORDBANK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_load_from_str_filters_and_uppercases() {
        let words = load_wordbank_from_str("crane\n  Slate \nbad\ntoolong\nab1de\n\nTRACE\n");
        assert_eq!(words, vec!["CRANE", "SLATE", "TRACE"]);
    }

    #[test]
    fn test_embedded_wordbank_is_usable() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
        assert!(words.len() > 100);
        assert!(words.iter().all(|w| w.len() == WORD_LENGTH));
        assert!(words.contains(&"CRANE".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("wordbank_unit_{}.txt", std::process::id()));
        fs::write(&path, "crane\nslate\nxx\n").unwrap();
        let words = load_wordbank_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(words, vec!["CRANE", "SLATE"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_wordbank(Some("/nonexistent/definitely/missing.txt")).is_err());
    }

    #[test]
    fn test_default_path_shape() {
        if let Some(path) = default_wordbank_path() {
            assert!(path.ends_with("wordle-autoplay/words.txt"));
        }
    }
}
