//! The candidate words available to the solver. Loading words from files or other sources is the
//! caller's job; this module just interns an already-loaded collection so that the rest of the
//! solver can refer to words by id and compare them cell by cell.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Debug, Formatter};

use crate::types::WordId;
use crate::MAX_SLOT_LENGTH;

/// A struct representing a word that can be chosen for a given slot.
#[derive(Clone)]
pub struct Word {
    /// The word as given by the caller.
    pub string: String,

    /// The word's characters, so that overlap checks can index by cell rather than by byte.
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    /// Length in cells (chars), which is what a slot length is compared against.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.string)
    }
}

/// An interned, deduplicated collection of candidate words. Ids are assigned in order of first
/// appearance, and that order is what the solver falls back on whenever its heuristics tie.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    pub words: Vec<Word>,
    pub word_id_by_string: HashMap<String, WordId>,
}

impl WordList {
    /// Build a word list from any collection of strings. Exact duplicates are collapsed into the
    /// first occurrence and empty strings are skipped.
    pub fn new<I, S>(words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_list = WordList::default();

        for word in words {
            let string = word.as_ref();
            if string.is_empty() || word_list.word_id_by_string.contains_key(string) {
                continue;
            }

            let word_id = word_list.words.len();
            word_list.words.push(Word {
                string: string.to_string(),
                glyphs: string.chars().collect(),
            });
            word_list
                .word_id_by_string
                .insert(string.to_string(), word_id);
        }

        word_list
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
    pub fn get(&self, word_id: WordId) -> Option<&Word> {
        self.words.get(word_id)
    }

    #[must_use]
    pub fn id_of(&self, string: &str) -> Option<WordId> {
        self.word_id_by_string.get(string).copied()
    }
}
