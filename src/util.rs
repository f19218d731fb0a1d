use std::collections::HashSet;

use crate::types::WordId;
use crate::word_list::WordList;

/// The set of characters that appear at position `cell_idx` across the given options. Checking a
/// word against this set is equivalent to searching the options for a word that agrees with it at
/// that position, but only walks the options once.
#[must_use]
pub fn letters_at(word_list: &WordList, options: &[WordId], cell_idx: usize) -> HashSet<char> {
    options
        .iter()
        .filter_map(|&word_id| word_list.words[word_id].glyphs.get(cell_idx).copied())
        .collect()
}
