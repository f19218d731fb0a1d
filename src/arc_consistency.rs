//! This module contains a crossword-specific implementation of the AC-3 algorithm. For our
//! purposes, a pair of crossing variables (x, y) is arc-consistent when every word left in x's
//! domain has at least one word in y's domain that puts the same letter in their shared cell.
//!
//! Revising one arc can break arcs that were already consistent, so whenever x loses a word we
//! requeue every arc pointing into x from its other neighbors, and keep going until the queue
//! drains or some domain is wiped out.

use log::{debug, trace};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

use crate::domains::Domains;
use crate::structure::Structure;
use crate::types::VariableId;
use crate::util::letters_at;
use crate::word_list::WordList;

/// An ordered pair of variables: revising it makes `from` consistent with `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    pub from: VariableId,
    pub to: VariableId,
}

/// Result from a failed call to `establish_arc_consistency`: revising arcs into this variable
/// left it without any options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("arc consistency emptied the domain of variable {variable_id}")]
pub struct ArcConsistencyFailure {
    pub variable_id: VariableId,
}

/// Make `x` arc-consistent with `y` by removing every word from `x`'s domain that has no
/// compatible word in `y`'s domain. Returns whether `x`'s domain changed; variables that don't
/// cross never change anything.
pub fn revise(
    structure: &Structure,
    word_list: &WordList,
    domains: &mut Domains,
    x: VariableId,
    y: VariableId,
) -> bool {
    let Some(overlap) = structure.overlap(x, y) else {
        return false;
    };

    let available = letters_at(word_list, domains.options(y), overlap.other_index);

    domains.retain(x, |word_id| {
        word_list.words[word_id]
            .glyphs
            .get(overlap.index)
            .is_some_and(|glyph| available.contains(glyph))
    })
}

/// Every ordered pair of distinct variables in the structure.
#[must_use]
pub fn all_arcs(structure: &Structure) -> Vec<Arc> {
    let count = structure.variable_count();
    (0..count)
        .flat_map(|from| {
            (0..count)
                .filter(move |&to| to != from)
                .map(move |to| Arc { from, to })
        })
        .collect()
}

/// Run AC-3 over the given arcs (or over every arc in the structure, if none are given), pruning
/// `domains` in place. On success, returns how many revisions actually removed something.
pub fn establish_arc_consistency(
    structure: &Structure,
    word_list: &WordList,
    domains: &mut Domains,
    arcs: Option<Vec<Arc>>,
) -> Result<usize, ArcConsistencyFailure> {
    let initial_arcs = arcs.unwrap_or_else(|| all_arcs(structure));

    // An arc only needs to be in the queue once at a time; `queued` mirrors the queue contents.
    let mut queue: VecDeque<Arc> = VecDeque::with_capacity(initial_arcs.len());
    let mut queued: HashSet<Arc> = HashSet::with_capacity(initial_arcs.len());
    for arc in initial_arcs {
        if arc.from != arc.to && queued.insert(arc) {
            queue.push_back(arc);
        }
    }

    let mut revisions = 0;

    while let Some(arc) = queue.pop_front() {
        queued.remove(&arc);

        if !revise(structure, word_list, domains, arc.from, arc.to) {
            continue;
        }
        revisions += 1;

        if domains.is_empty(arc.from) {
            debug!(
                target: "arc_consistency",
                "Domain wipeout for {:?} while revising against {:?}",
                structure.variable(arc.from),
                structure.variable(arc.to)
            );
            return Err(ArcConsistencyFailure {
                variable_id: arc.from,
            });
        }

        for neighbor in structure.neighbors(arc.from) {
            if neighbor.variable_id == arc.to {
                continue;
            }

            let requeued = Arc {
                from: neighbor.variable_id,
                to: arc.from,
            };
            if queued.insert(requeued) {
                queue.push_back(requeued);
            }
        }
    }

    trace!(
        target: "arc_consistency",
        "Arc consistency established after {revisions} revisions"
    );

    Ok(revisions)
}
