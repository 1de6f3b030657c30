//! Guess Scoring
//!
//! Compares a guess against the target and produces the per-letter marks.

use super::types::{Feedback, Mark, Word, WORD_LENGTH};
use std::collections::HashMap;

/// Score `guess` against `target`.
///
/// Exact matches are settled first and consume the target's letter budget;
/// only then are the remaining positions offered whatever budget is left, so
/// a letter is never credited more often than it occurs in the target.
pub fn score(guess: &Word, target: &Word) -> Feedback {
    let guess = guess.letters();
    let target = target.letters();

    let mut marks = [Mark::Absent; WORD_LENGTH];
    let mut remaining: HashMap<char, u8> = HashMap::with_capacity(WORD_LENGTH);
    for letter in target {
        *remaining.entry(letter).or_default() += 1;
    }

    for i in 0..WORD_LENGTH {
        if guess[i] == target[i] {
            marks[i] = Mark::Correct;
            if let Some(count) = remaining.get_mut(&guess[i]) {
                *count -= 1;
            }
        }
    }

    for i in 0..WORD_LENGTH {
        if marks[i] == Mark::Correct {
            continue;
        }
        match remaining.get_mut(&guess[i]) {
            Some(count) if *count > 0 => {
                marks[i] = Mark::Misplaced;
                *count -= 1;
            }
            _ => marks[i] = Mark::Absent,
        }
    }

    Feedback(marks)
}
