//! This module implements grid-filling as a depth-first backtracking search. Before searching we
//! enforce node consistency (word length) and run AC-3 over every arc in the grid; the search
//! itself orders variables by minimum remaining values (breaking ties by degree) and orders each
//! variable's words so that the least constraining ones are tried first.
//!
//! By default each trial is only checked locally against the words already placed. Callers can
//! opt into maintaining arc consistency after every trial with `Inference::MaintainArcConsistency`,
//! which costs more per node but usually visits far fewer of them.
//!
//! The search has no deadline or node budget of its own; callers that need bounded solve times
//! should run it somewhere they can abandon it.

use instant::{Duration, Instant};
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::HashSet;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

use crate::arc_consistency::{establish_arc_consistency, Arc, ArcConsistencyFailure};
use crate::domains::Domains;
use crate::structure::Structure;
use crate::types::{Overlap, Variable, VariableId, WordId};
use crate::word_list::WordList;
use crate::CHECK_INVARIANTS;

/// What, if anything, to propagate after each trial assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Inference {
    /// Only check the new word against the words already placed.
    #[default]
    None,

    /// Also collapse the variable's domain to the new word and re-run AC-3 from its neighbors,
    /// rejecting the trial if that wipes out a domain.
    MaintainArcConsistency,
}

/// Knobs for a single solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveOptions {
    pub inference: Inference,
}

/// A struct tracking stats about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Search nodes visited (calls to the recursive step).
    pub states: usize,

    /// Trial words that were retracted, either because they conflicted with the assignment or
    /// because nothing below them led to a complete fill.
    pub backtracks: usize,

    /// AC-3 revisions that removed at least one word, across the initial pass and any inference.
    pub revisions: usize,

    pub total_time: Duration,
    pub arc_consistency_time: Duration,
}

/// A mapping from some subset of the structure's variables to the word chosen for each.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    words: Vec<Option<WordId>>,
    assigned_count: usize,
}

impl Assignment {
    /// An empty assignment for a structure with `variable_count` variables.
    #[must_use]
    pub fn new(variable_count: usize) -> Assignment {
        Assignment {
            words: vec![None; variable_count],
            assigned_count: 0,
        }
    }

    #[must_use]
    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.words.get(variable_id).copied().flatten()
    }

    #[must_use]
    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.get(variable_id).is_some()
    }

    /// Assign a word, returning the word it replaced, if any.
    pub fn insert(&mut self, variable_id: VariableId, word_id: WordId) -> Option<WordId> {
        let previous = self.words[variable_id].replace(word_id);
        if previous.is_none() {
            self.assigned_count += 1;
        }
        previous
    }

    /// Retract a variable's word, returning it.
    pub fn remove(&mut self, variable_id: VariableId) -> Option<WordId> {
        let previous = self.words.get_mut(variable_id).and_then(Option::take);
        if previous.is_some() {
            self.assigned_count -= 1;
        }
        previous
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned_count == 0
    }

    /// Does every variable have a word? Vacuously true for a structure without variables.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned_count == self.words.len()
    }

    /// Assigned `(variable, word)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(variable_id, word_id)| word_id.map(|word_id| (variable_id, word_id)))
    }

    /// The string assigned to a variable.
    #[must_use]
    pub fn word<'a>(&self, word_list: &'a WordList, variable_id: VariableId) -> Option<&'a str> {
        self.get(variable_id)
            .and_then(|word_id| word_list.get(word_id))
            .map(|word| word.string.as_str())
    }

    /// The assignment as plain `(variable, word)` pairs, for handing to code that doesn't know
    /// about ids.
    #[must_use]
    pub fn to_strings(
        &self,
        structure: &Structure,
        word_list: &WordList,
    ) -> Vec<(Variable, String)> {
        self.iter()
            .map(|(variable_id, word_id)| {
                (
                    *structure.variable(variable_id),
                    word_list.words[word_id].string.clone(),
                )
            })
            .collect()
    }
}

/// A struct representing the results of a successful solve.
#[derive(Debug, Clone)]
pub struct FillSuccess {
    pub assignment: Assignment,
    pub statistics: Statistics,
}

/// Why a structure can't be filled from a word list. This is an ordinary outcome, not a fault.
#[derive(Debug, Clone, Error)]
pub enum Unsatisfiable {
    /// Node consistency left this variable without a single word of the right length.
    #[error("no word in the list has the length of variable {variable_id}")]
    NoCandidates { variable_id: VariableId },

    /// The initial AC-3 pass emptied this variable's domain.
    #[error("arc consistency emptied the domain of variable {variable_id}")]
    DomainWipeout { variable_id: VariableId },

    /// The search tried every remaining candidate without completing the grid.
    #[error("search exhausted every candidate without completing the grid")]
    Exhausted { statistics: Statistics },
}

/// Do two words agree in the cell described by `overlap`?
fn words_agree(
    word_list: &WordList,
    word_id: WordId,
    other_word_id: WordId,
    overlap: Overlap,
) -> bool {
    let glyph = word_list.words[word_id].glyphs.get(overlap.index);
    let other_glyph = word_list.words[other_word_id].glyphs.get(overlap.other_index);
    matches!((glyph, other_glyph), (Some(a), Some(b)) if a == b)
}

/// Check a whole (possibly partial) assignment: no word is used twice, every word fits its
/// variable's length, and every pair of assigned crossing variables agrees on the shared letter.
#[must_use]
pub fn is_consistent(
    structure: &Structure,
    word_list: &WordList,
    assignment: &Assignment,
) -> bool {
    let mut seen_words: HashSet<WordId> = HashSet::with_capacity(assignment.len());

    for (variable_id, word_id) in assignment.iter() {
        if !seen_words.insert(word_id) {
            return false;
        }

        if word_list.words[word_id].len() != structure.variable(variable_id).length {
            return false;
        }

        for neighbor in structure.neighbors(variable_id) {
            if let Some(other_word_id) = assignment.get(neighbor.variable_id) {
                if !words_agree(word_list, word_id, other_word_id, neighbor.overlap) {
                    return false;
                }
            }
        }
    }

    true
}

/// The same three checks as `is_consistent`, restricted to the pairs involving `variable_id`.
/// This is all that needs checking after extending an assignment that was already consistent.
fn is_consistent_with_choice(
    structure: &Structure,
    word_list: &WordList,
    assignment: &Assignment,
    variable_id: VariableId,
) -> bool {
    let Some(word_id) = assignment.get(variable_id) else {
        return true;
    };

    if word_list.words[word_id].len() != structure.variable(variable_id).length {
        return false;
    }

    if assignment
        .iter()
        .any(|(other_id, other_word_id)| other_id != variable_id && other_word_id == word_id)
    {
        return false;
    }

    structure.neighbors(variable_id).iter().all(|neighbor| {
        assignment
            .get(neighbor.variable_id)
            .map_or(true, |other_word_id| {
                words_agree(word_list, word_id, other_word_id, neighbor.overlap)
            })
    })
}

/// Identify the next variable to fill: the unassigned variable with the fewest remaining options,
/// then the one with the most crossings, then the lowest id.
#[must_use]
pub fn select_unassigned_variable(
    structure: &Structure,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<VariableId> {
    (0..structure.variable_count())
        .filter(|&variable_id| !assignment.contains(variable_id))
        .min_by_key(|&variable_id| {
            (
                domains.len(variable_id),
                Reverse(structure.degree(variable_id)),
                variable_id,
            )
        })
}

/// Order a variable's options so that the words ruling out the fewest candidates come first. A
/// word rules itself out of every unassigned neighbor whose domain still contains it; ties keep
/// word-list order.
#[must_use]
pub fn order_domain_values(
    structure: &Structure,
    domains: &Domains,
    assignment: &Assignment,
    variable_id: VariableId,
) -> Vec<WordId> {
    let mut values = domains.options(variable_id).to_vec();

    values.sort_by_cached_key(|&word_id| {
        structure
            .neighbors(variable_id)
            .iter()
            .filter(|neighbor| {
                !assignment.contains(neighbor.variable_id)
                    && domains.contains(neighbor.variable_id, word_id)
            })
            .count()
    });

    values
}

/// State shared by every frame of a single search.
struct Search<'a> {
    structure: &'a Structure,
    word_list: &'a WordList,
    options: &'a SolveOptions,
    statistics: Statistics,
}

impl Search<'_> {
    /// Try to extend `assignment` to a complete one. On success the complete assignment is left in
    /// place; on failure `assignment` and `domains` are exactly as they were on entry.
    fn backtrack(&mut self, domains: &mut Domains, assignment: &mut Assignment) -> bool {
        self.statistics.states += 1;

        let Some(variable_id) = select_unassigned_variable(self.structure, domains, assignment)
        else {
            if CHECK_INVARIANTS && !is_consistent(self.structure, self.word_list, assignment) {
                panic!("Search produced an inconsistent complete assignment");
            }
            return true;
        };

        for word_id in order_domain_values(self.structure, domains, assignment, variable_id) {
            assignment.insert(variable_id, word_id);

            if is_consistent_with_choice(self.structure, self.word_list, assignment, variable_id) {
                trace!(
                    target: "search",
                    "Trying {:?} = {}",
                    self.structure.variable(variable_id),
                    self.word_list.words[word_id].string
                );

                match self.options.inference {
                    Inference::None => {
                        if self.backtrack(domains, assignment) {
                            return true;
                        }
                    }

                    Inference::MaintainArcConsistency => {
                        let snapshot = domains.clone();
                        if self.infer(domains, assignment, variable_id, word_id)
                            && self.backtrack(domains, assignment)
                        {
                            return true;
                        }
                        *domains = snapshot;
                    }
                }
            }

            assignment.remove(variable_id);
            self.statistics.backtracks += 1;
        }

        trace!(
            target: "search",
            "No option for {:?} completes the grid",
            self.structure.variable(variable_id)
        );

        false
    }

    /// Propagate a trial assignment through the unassigned neighbors. Leaves `domains` partially
    /// pruned on failure; the caller restores its snapshot.
    fn infer(
        &mut self,
        domains: &mut Domains,
        assignment: &Assignment,
        variable_id: VariableId,
        word_id: WordId,
    ) -> bool {
        let start = Instant::now();

        domains.assign(variable_id, word_id);
        let arcs = self
            .structure
            .neighbors(variable_id)
            .iter()
            .filter(|neighbor| !assignment.contains(neighbor.variable_id))
            .map(|neighbor| Arc {
                from: neighbor.variable_id,
                to: variable_id,
            })
            .collect();

        let result = establish_arc_consistency(self.structure, self.word_list, domains, Some(arcs));
        self.statistics.arc_consistency_time += start.elapsed();

        match result {
            Ok(revisions) => {
                self.statistics.revisions += revisions;
                true
            }
            Err(ArcConsistencyFailure { variable_id }) => {
                trace!(
                    target: "search",
                    "Inference wiped out {:?}",
                    self.structure.variable(variable_id)
                );
                false
            }
        }
    }
}

/// Fill the structure from the word list using the default options.
pub fn solve(structure: &Structure, word_list: &WordList) -> Result<FillSuccess, Unsatisfiable> {
    solve_with_options(structure, word_list, &SolveOptions::default())
}

/// Fill the structure from the word list: enforce node consistency, establish arc consistency,
/// then search. Deterministic for a given structure, word list (including its order), and
/// options.
pub fn solve_with_options(
    structure: &Structure,
    word_list: &WordList,
    options: &SolveOptions,
) -> Result<FillSuccess, Unsatisfiable> {
    let start = Instant::now();
    let mut statistics = Statistics::default();

    let mut domains = Domains::new(structure, word_list);
    if let Some(variable_id) = domains.enforce_node_consistency(structure, word_list) {
        debug!(
            target: "search",
            "No candidates of length {} for {:?}",
            structure.variable(variable_id).length,
            structure.variable(variable_id)
        );
        return Err(Unsatisfiable::NoCandidates { variable_id });
    }

    let arc_consistency_start = Instant::now();
    let initial_result = establish_arc_consistency(structure, word_list, &mut domains, None);
    statistics.arc_consistency_time = arc_consistency_start.elapsed();

    match initial_result {
        Ok(revisions) => statistics.revisions = revisions,
        Err(ArcConsistencyFailure { variable_id }) => {
            debug!(
                target: "search",
                "Initial arc consistency failed for {:?}",
                structure.variable(variable_id)
            );
            return Err(Unsatisfiable::DomainWipeout { variable_id });
        }
    }

    debug!(
        target: "search",
        "Searching {} variables with {} words after {} initial revisions",
        structure.variable_count(),
        word_list.len(),
        statistics.revisions
    );

    let mut search = Search {
        structure,
        word_list,
        options,
        statistics,
    };
    let mut assignment = Assignment::new(structure.variable_count());
    let found = search.backtrack(&mut domains, &mut assignment);

    let mut statistics = search.statistics;
    statistics.total_time = start.elapsed();
    debug!(target: "search", "Search finished (found = {found}): {statistics:?}");

    if found {
        Ok(FillSuccess {
            assignment,
            statistics,
        })
    } else {
        Err(Unsatisfiable::Exhausted { statistics })
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::backtracking_search::{
        is_consistent, order_domain_values, select_unassigned_variable, solve, solve_with_options,
        Assignment, Inference, SolveOptions, Unsatisfiable,
    };
    use crate::domains::Domains;
    use crate::structure::tests::structure_from_template;
    use crate::structure::Structure;
    use crate::types::{Direction, Variable};
    use crate::word_list::tests::fixture_word_list;
    use crate::word_list::WordList;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn mac() -> SolveOptions {
        SolveOptions {
            inference: Inference::MaintainArcConsistency,
        }
    }

    fn plus_structure() -> Structure {
        structure_from_template(indoc! {"
            #.#
            ...
            #.#
        "})
    }

    /// Assert that a solved assignment satisfies every constraint, checking each property
    /// directly rather than through `is_consistent`.
    fn assert_valid_fill(structure: &Structure, word_list: &WordList, assignment: &Assignment) {
        assert!(assignment.is_complete());

        let strings = assignment.to_strings(structure, word_list);
        for (variable, word) in &strings {
            assert_eq!(word.chars().count(), variable.length, "{word} doesn't fit");
        }

        for (i, (_, word)) in strings.iter().enumerate() {
            for (_, other) in &strings[i + 1..] {
                assert_ne!(word, other, "word used twice");
            }
        }

        for x in 0..structure.variable_count() {
            for neighbor in structure.neighbors(x) {
                let word: Vec<char> = assignment.word(word_list, x).unwrap().chars().collect();
                let other: Vec<char> = assignment
                    .word(word_list, neighbor.variable_id)
                    .unwrap()
                    .chars()
                    .collect();
                assert_eq!(
                    word[neighbor.overlap.index],
                    other[neighbor.overlap.other_index]
                );
            }
        }

        assert!(is_consistent(structure, word_list, assignment));
    }

    /// Exhaustively look for any valid fill, with no heuristics or propagation.
    fn brute_force_exists(
        structure: &Structure,
        word_list: &WordList,
        assignment: &mut Assignment,
        variable_id: usize,
    ) -> bool {
        if variable_id == structure.variable_count() {
            return true;
        }
        for word_id in 0..word_list.len() {
            assignment.insert(variable_id, word_id);
            if is_consistent(structure, word_list, assignment)
                && brute_force_exists(structure, word_list, assignment, variable_id + 1)
            {
                return true;
            }
            assignment.remove(variable_id);
        }
        false
    }

    #[test]
    fn test_single_variable_takes_first_word() {
        init_logger();
        let structure = structure_from_template("...");
        let word_list = WordList::new(["CAT", "DOG"]);

        let result = solve(&structure, &word_list).expect("Failed to find a fill");

        assert_eq!(result.assignment.word(&word_list, 0), Some("CAT"));
        assert_eq!(result.assignment.len(), 1);
    }

    #[test]
    fn test_crossing_variables_share_letter() {
        init_logger();
        let structure = plus_structure();
        let word_list = WordList::new(["CAT", "DOG", "COG"]);

        for options in [SolveOptions::default(), mac()] {
            let result =
                solve_with_options(&structure, &word_list, &options).expect("Failed to find a fill");

            assert_valid_fill(&structure, &word_list, &result.assignment);
            assert_eq!(result.assignment.word(&word_list, 0), Some("DOG"));
            assert_eq!(result.assignment.word(&word_list, 1), Some("COG"));
        }
    }

    #[test]
    fn test_missing_length_is_unsatisfiable_before_search() {
        let structure = structure_from_template(indoc! {"
            ....
            .###
            .###
        "});
        let word_list = WordList::new(["CAT", "DOG"]);

        let result = solve(&structure, &word_list);

        assert!(matches!(
            result,
            Err(Unsatisfiable::NoCandidates { variable_id: 0 })
        ));
    }

    #[test]
    fn test_empty_structure_is_vacuously_complete() {
        let structure = structure_from_template(indoc! {"
            #.#
            .#.
        "});
        let word_list = WordList::new(["CAT"]);

        let result = solve(&structure, &word_list).expect("Failed to find a fill");

        assert!(result.assignment.is_complete());
        assert!(result.assignment.is_empty());
        assert_eq!(result.statistics.states, 1);
    }

    #[test]
    fn test_initial_wipeout_is_unsatisfiable() {
        let structure = Structure::from_variables(
            3,
            4,
            vec![
                Variable::new(1, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 4),
            ],
        )
        .unwrap();
        let word_list = WordList::new(["ABC", "XYZW"]);

        assert!(matches!(
            solve(&structure, &word_list),
            Err(Unsatisfiable::DomainWipeout { .. })
        ));
    }

    #[test]
    fn test_uniqueness_makes_search_fail() {
        // Both slots can only hold ABA, which agrees with itself in the middle, so arc consistency
        // passes and only the no-duplicates rule rules it out.
        let structure = plus_structure();
        let word_list = WordList::new(["ABA"]);

        for options in [SolveOptions::default(), mac()] {
            match solve_with_options(&structure, &word_list, &options) {
                Err(Unsatisfiable::Exhausted { statistics }) => {
                    assert!(statistics.backtracks >= 1);
                }
                other => panic!("Expected exhaustion, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_is_consistent_checks_each_rule() {
        let structure = plus_structure();
        let word_list = WordList::new(["CAT", "DOG", "COG", "DOGS"]);
        let mut assignment = Assignment::new(structure.variable_count());

        assert!(is_consistent(&structure, &word_list, &assignment));

        assignment.insert(0, 1);
        assert!(is_consistent(&structure, &word_list, &assignment));

        // Duplicate word.
        assignment.insert(1, 1);
        assert!(!is_consistent(&structure, &word_list, &assignment));

        // Letters disagree in the shared cell.
        assignment.insert(1, 0);
        assert!(!is_consistent(&structure, &word_list, &assignment));

        // Wrong length.
        assignment.insert(1, 3);
        assert!(!is_consistent(&structure, &word_list, &assignment));

        assignment.insert(1, 2);
        assert!(is_consistent(&structure, &word_list, &assignment));
        assert!(assignment.is_complete());
    }

    #[test]
    fn test_assignment_insert_and_remove() {
        let mut assignment = Assignment::new(3);

        assert_eq!(assignment.insert(1, 7), None);
        assert_eq!(assignment.insert(1, 8), Some(7));
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.iter().collect::<Vec<_>>(), vec![(1, 8)]);

        assert_eq!(assignment.remove(1), Some(8));
        assert_eq!(assignment.remove(1), None);
        assert!(assignment.is_empty());
        assert!(!assignment.is_complete());
    }

    #[test]
    fn test_variable_selection_prefers_small_domains() {
        // Variable 0 (top across) crosses both downs (1 and 2), which each cross only it;
        // variable 3 (bottom across) crosses nothing.
        let structure = structure_from_template(indoc! {"
            ....
            .##.
            .##.
            ####
            ...#
        "});
        assert_eq!(structure.degree(0), 2);
        assert_eq!(structure.degree(1), 1);
        assert_eq!(structure.degree(3), 0);

        let word_list = WordList::new(["ABC", "ABCD", "BCD", "CDE", "DEF"]);
        let mut domains = Domains::new(&structure, &word_list);
        domains.enforce_node_consistency(&structure, &word_list);
        let mut assignment = Assignment::new(structure.variable_count());

        // Domain sizes: 1 (ABCD), then the three 3-letter slots with 4 options each.
        assert_eq!(
            select_unassigned_variable(&structure, &domains, &assignment),
            Some(0)
        );

        assignment.insert(0, 1);
        domains.retain(3, |word_id| word_id != 4);
        assert_eq!(
            select_unassigned_variable(&structure, &domains, &assignment),
            Some(3)
        );

        // With equal sizes and equal degrees, the lowest id wins.
        assignment.insert(3, 0);
        assert_eq!(
            select_unassigned_variable(&structure, &domains, &assignment),
            Some(1)
        );

        assignment.insert(1, 2);
        assignment.insert(2, 3);
        assert_eq!(
            select_unassigned_variable(&structure, &domains, &assignment),
            None
        );
    }

    #[test]
    fn test_degree_breaks_domain_size_ties() {
        // Two downs (0 and 1) and the across (2) that crosses both of them.
        let structure = structure_from_template(indoc! {"
            .#.
            ...
            .#.
        "});
        assert_eq!(structure.degree(2), 2);

        let word_list = WordList::new(["ABC", "BCD"]);
        let mut domains = Domains::new(&structure, &word_list);
        domains.enforce_node_consistency(&structure, &word_list);

        let assignment = Assignment::new(structure.variable_count());
        assert_eq!(
            select_unassigned_variable(&structure, &domains, &assignment),
            Some(2)
        );
    }

    #[test]
    fn test_least_constraining_values_come_first() {
        let structure = structure_from_template(indoc! {"
            ...
            ...
            ...
        "});
        let word_list = WordList::new(["AAA", "BBB", "CCC"]);
        let mut domains = Domains::new(&structure, &word_list);
        domains.enforce_node_consistency(&structure, &word_list);

        // Variable 0 (top across) crosses the three downs (1, 2, 3).
        domains.retain(1, |word_id| word_id != 2);
        domains.retain(2, |word_id| word_id != 2);
        domains.retain(3, |word_id| word_id == 0);

        let mut assignment = Assignment::new(structure.variable_count());
        assert_eq!(
            order_domain_values(&structure, &domains, &assignment, 0),
            vec![2, 1, 0]
        );

        // Assigned neighbors can't lose anything, so they no longer count.
        assignment.insert(3, 0);
        assert_eq!(
            order_domain_values(&structure, &domains, &assignment, 0),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn test_find_fill_for_3x3_square() {
        init_logger();
        let structure = structure_from_template(indoc! {"
            ...
            ...
            ...
        "});
        let word_list = fixture_word_list();

        for options in [SolveOptions::default(), mac()] {
            let result =
                solve_with_options(&structure, word_list, &options).expect("Failed to find a fill");

            println!("{:?}", result.statistics);
            assert_valid_fill(&structure, word_list, &result.assignment);
        }
    }

    #[test]
    fn test_find_fill_for_5x5_frame() {
        init_logger();
        let structure = structure_from_template(indoc! {"
            .....
            .###.
            .###.
            .###.
            .....
        "});
        let word_list = fixture_word_list();

        for options in [SolveOptions::default(), mac()] {
            let result =
                solve_with_options(&structure, word_list, &options).expect("Failed to find a fill");

            println!("{:?}", result.statistics);
            assert_valid_fill(&structure, word_list, &result.assignment);
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let structure = structure_from_template(indoc! {"
            ...
            ...
            ...
        "});
        let word_list = fixture_word_list();

        let first = solve(&structure, word_list).unwrap();
        let second = solve(&structure, word_list).unwrap();

        assert_eq!(first.assignment, second.assignment);
    }

    #[test]
    fn test_fill_fails_gracefully() {
        let structure = structure_from_template(indoc! {"
            ....
            ....
            ....
            ....
        "});

        // There's no 4x4 double word square to be found in the fixture list.
        assert!(solve(&structure, fixture_word_list()).is_err());
        assert!(solve_with_options(&structure, fixture_word_list(), &mac()).is_err());
    }

    #[test]
    fn test_random_word_lists_agree_with_brute_force() {
        let structure = structure_from_template(indoc! {"
            ...
            ...
            ...
        "});
        let all_words: Vec<String> = (0..8)
            .map(|bits: u8| {
                (0..3)
                    .map(|shift| if bits & (1 << shift) == 0 { 'A' } else { 'B' })
                    .collect()
            })
            .collect();

        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..40 {
            let words: Vec<&String> = all_words.iter().filter(|_| rng.gen_bool(0.8)).collect();
            let word_list = WordList::new(words);

            let mut scratch = Assignment::new(structure.variable_count());
            let expected = brute_force_exists(&structure, &word_list, &mut scratch, 0);

            for options in [SolveOptions::default(), mac()] {
                match solve_with_options(&structure, &word_list, &options) {
                    Ok(result) => {
                        assert!(expected, "found a fill that brute force couldn't");
                        assert_valid_fill(&structure, &word_list, &result.assignment);
                    }
                    Err(_) => assert!(!expected, "missed a fill that brute force found"),
                }
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_assignment_and_options_serde_round_trip() {
        let structure = plus_structure();
        let word_list = WordList::new(["CAT", "DOG", "COG"]);
        let result = solve(&structure, &word_list).unwrap();

        let json = serde_json::to_string(&result.assignment).unwrap();
        assert_eq!(
            serde_json::from_str::<Assignment>(&json).unwrap(),
            result.assignment
        );

        let json = serde_json::to_string(&mac()).unwrap();
        assert_eq!(json, r#"{"inference":"MaintainArcConsistency"}"#);
        assert_eq!(serde_json::from_str::<SolveOptions>(&json).unwrap(), mac());
    }
}
