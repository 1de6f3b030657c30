//! Word Dictionary
//!
//! The set of eligible five-letter words, loaded once at startup. Serves both
//! "is this a real word" checks and uniform random target selection.

use crate::games::types::Word;
use rand::{seq::SliceRandom, Rng};
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read word list {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("word list {source_name} contains no five-letter words")]
    Empty { source_name: String },
}

/// Immutable collection of uppercase five-letter words.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<Word>,
    lookup: HashSet<Word>,
}

impl Dictionary {
    /// Load a newline-delimited word list from disk.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let file = File::open(path).map_err(|source| LoadError::Io {
            source_name: source_name.clone(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &source_name)
    }

    /// Load from any line-oriented reader. `source_name` only shows up in errors and logs.
    pub fn from_reader(reader: impl BufRead, source_name: &str) -> Result<Self, LoadError> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line.map_err(|source| LoadError::Io {
                source_name: source_name.to_string(),
                source,
            })?);
        }
        Self::build(lines.iter().map(String::as_str), source_name)
    }

    /// Build from in-memory entries, applying the same filtering as a file load.
    pub fn from_words<'a>(entries: impl IntoIterator<Item = &'a str>) -> Result<Self, LoadError> {
        Self::build(entries, "<memory>")
    }

    fn build<'a>(entries: impl IntoIterator<Item = &'a str>, source_name: &str) -> Result<Self, LoadError> {
        let mut words = Vec::new();
        let mut lookup = HashSet::new();
        let mut skipped = 0usize;

        for entry in entries {
            match Word::parse(entry) {
                Some(word) => {
                    if lookup.insert(word.clone()) {
                        words.push(word);
                    }
                }
                None => skipped += 1,
            }
        }

        if words.is_empty() {
            return Err(LoadError::Empty {
                source_name: source_name.to_string(),
            });
        }

        debug!("Skipped {} ineligible entries from {}", skipped, source_name);
        info!("📖 Loaded {} words from {}", words.len(), source_name);

        Ok(Self { words, lookup })
    }

    /// Membership test; `word` is trimmed and uppercased first.
    pub fn contains(&self, word: &str) -> bool {
        Word::parse(word).is_some_and(|w| self.lookup.contains(&w))
    }

    pub fn contains_word(&self, word: &Word) -> bool {
        self.lookup.contains(word)
    }

    /// Uniform random draw using the thread-local RNG.
    pub fn pick_random(&self) -> &Word {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &Word {
        // Loading guarantees at least one word.
        self.words.choose(rng).unwrap_or(&self.words[0])
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}
