use smol_str::SmolStr;
use stringmetrics::jaccard;

use crate::{index::FrequencyIndex, record::normalize_token};

/// Known symptoms scoring below this are not worth suggesting.
pub const MIN_SIMILARITY: f32 = 0.3;

/// Find known symptoms that look like `token`, for "did you mean" hints on unknown input.
/// Returns up to `limit` symptoms with their similarity, most similar first.
pub fn similar_symptoms(index: &FrequencyIndex, token: &str, limit: usize) -> Vec<(SmolStr, f32)> {
    let Some(token) = normalize_token(token) else {
        return Vec::new();
    };

    let mut found = index
        .symptoms()
        .filter(|(symptom, _)| **symptom != token)
        .map(|(symptom, _)| (symptom.clone(), jaccard_trigram_similarity(&token, symptom)))
        .filter(|(_, score)| *score >= MIN_SIMILARITY)
        .collect::<Vec<_>>();

    found.sort_by(|(a, ascore), (b, bscore)| bscore.total_cmp(ascore).then_with(|| a.cmp(b)));
    found.truncate(limit);
    found
}

pub fn jaccard_trigram_similarity(one: &str, two: &str) -> f32 {
    jaccard(TrigramIterator::new(one), TrigramIterator::new(two))
}

enum TrigramIteratorState {
    FirstOneGram,
    FirstTwoGram,
    Trigram(usize),
    LastTwoGram,
    LastOneGram,
    Done,
}

/// Iterates the character trigrams of a word, padded with the leading and trailing one- and
/// two-grams. Works on character boundaries so multi-byte input is safe.
pub struct TrigramIterator<'a> {
    word: &'a str,
    /// Byte offset of every character, plus the end of the word.
    bounds: Vec<usize>,
    state: TrigramIteratorState,
}

impl<'a> TrigramIterator<'a> {
    pub fn new(word: &'a str) -> TrigramIterator<'a> {
        let bounds = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();

        TrigramIterator {
            word,
            bounds,
            state: TrigramIteratorState::FirstOneGram,
        }
    }

    fn chars(&self) -> usize {
        self.bounds.len() - 1
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.word[self.bounds[start]..self.bounds[end]]
    }
}

impl<'a> Iterator for TrigramIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.chars();
        let (next_state, result) = match self.state {
            TrigramIteratorState::FirstOneGram => {
                if len == 0 {
                    self.state = TrigramIteratorState::Done;
                    return None;
                }

                let next_state = if len > 1 {
                    TrigramIteratorState::FirstTwoGram
                } else {
                    TrigramIteratorState::Done
                };
                (next_state, self.slice(0, 1))
            }
            TrigramIteratorState::FirstTwoGram => {
                let next_state = if len > 2 {
                    TrigramIteratorState::Trigram(0)
                } else {
                    TrigramIteratorState::LastOneGram
                };
                (next_state, self.slice(0, 2))
            }
            TrigramIteratorState::Trigram(index) => {
                let next_state = if index + 3 >= len {
                    TrigramIteratorState::LastTwoGram
                } else {
                    TrigramIteratorState::Trigram(index + 1)
                };

                (next_state, self.slice(index, index + 3))
            }
            TrigramIteratorState::LastTwoGram => {
                (TrigramIteratorState::LastOneGram, self.slice(len - 2, len))
            }
            TrigramIteratorState::LastOneGram => {
                (TrigramIteratorState::Done, self.slice(len - 1, len))
            }
            TrigramIteratorState::Done => return None,
        };

        self.state = next_state;
        Some(result)
    }
}
