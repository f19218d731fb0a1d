//! The domain store: for each variable, the words that are still candidates for it. Domains only
//! ever shrink while solving, except when the search restores a snapshot it took earlier.

use log::trace;

use crate::structure::Structure;
use crate::types::{VariableId, WordId};
use crate::word_list::WordList;

/// Candidate words per variable. Each domain is kept in ascending `WordId` order, which is also
/// word-list order, so membership checks can binary search and tie-breaks stay reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    options: Vec<Vec<WordId>>,
}

impl Domains {
    /// Start every variable off with the entire word list.
    #[must_use]
    pub fn new(structure: &Structure, word_list: &WordList) -> Domains {
        Domains {
            options: (0..structure.variable_count())
                .map(|_| (0..word_list.len()).collect())
                .collect(),
        }
    }

    /// Remove every word whose length doesn't match its variable's length. Returns the first
    /// variable left without any options, if there is one; every domain is pruned either way.
    pub fn enforce_node_consistency(
        &mut self,
        structure: &Structure,
        word_list: &WordList,
    ) -> Option<VariableId> {
        let mut emptied = None;

        for (variable_id, variable) in structure.variables().iter().enumerate() {
            self.retain(variable_id, |word_id| {
                word_list.words[word_id].len() == variable.length
            });

            trace!(
                target: "domains",
                "{variable:?} has {} options after node consistency",
                self.len(variable_id)
            );

            if emptied.is_none() && self.is_empty(variable_id) {
                emptied = Some(variable_id);
            }
        }

        emptied
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn options(&self, variable_id: VariableId) -> &[WordId] {
        &self.options[variable_id]
    }

    #[must_use]
    pub fn len(&self, variable_id: VariableId) -> usize {
        self.options[variable_id].len()
    }

    #[must_use]
    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.options[variable_id].is_empty()
    }

    #[must_use]
    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.options[variable_id].binary_search(&word_id).is_ok()
    }

    /// Keep only the options for which `keep` returns true. Returns whether anything was removed.
    pub fn retain<F>(&mut self, variable_id: VariableId, mut keep: F) -> bool
    where
        F: FnMut(WordId) -> bool,
    {
        let options = &mut self.options[variable_id];
        let before = options.len();
        options.retain(|&word_id| keep(word_id));
        options.len() != before
    }

    /// Collapse a variable's domain to a single word.
    pub fn assign(&mut self, variable_id: VariableId, word_id: WordId) {
        let options = &mut self.options[variable_id];
        options.clear();
        options.push(word_id);
    }
}
