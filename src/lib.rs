#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod arc_consistency;
pub mod backtracking_search;
pub mod domains;
pub mod structure;
pub mod types;
pub mod util;
pub mod word_list;

pub use backtracking_search::{
    solve, solve_with_options, Assignment, FillSuccess, Inference, SolveOptions, Statistics,
    Unsatisfiable,
};
pub use structure::{Structure, StructureError};
pub use types::{Direction, Overlap, Variable, VariableId, WordId};
pub use word_list::WordList;

/// Should we run extra checks to validate that we're never in an invalid state during search? This
/// can be enabled with `--features check_invariants` when debugging or making risky algorithm
/// changes.
pub const CHECK_INVARIANTS: bool = cfg!(feature = "check_invariants");

/// The expected maximum length for a single slot. Longer slots work fine, they just spill their
/// per-slot buffers onto the heap.
pub const MAX_SLOT_LENGTH: usize = 21;
