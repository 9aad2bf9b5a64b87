//! Exclusion computation
//!
//! Each included path is expanded into the set of its siblings along the ascent
//! to the workspace root, the sets are intersected, and the result is merged with
//! the explicit exclusions and the global baseline.

pub mod generator;
pub mod intersect;
pub mod matcher;
pub mod siblings;

pub use generator::{generate_exclusion_globs, ExclusionOutcome};
pub use intersect::intersect_paths;
pub use matcher::ExclusionMatcher;
pub use siblings::sibling_set;
