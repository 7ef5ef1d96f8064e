//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for version components (`15.4.1`).
pub type SmallVec3<T> = SmallVec<[T; 3]>;
