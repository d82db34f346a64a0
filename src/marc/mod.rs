//! MARC audit-diff engine
//!
//! Pure functions over decoded records: no I/O, no shared state, safe to
//! call from any number of threads.
//!
//! - `flatten`: record -> ordered tag/value map
//! - `diff`: two flattened records (or one, for create/delete) -> `DiffResult`

pub mod diff;
pub mod flatten;

pub use diff::{compute_diff, compute_single_sided_diff, LAST_TRANSACTION_TAG};
pub use flatten::{flatten, flatten_content, FlattenedRecord, LEADER_TAG};
