//! Ancestor-aware intersection of path sets.

use crate::utils::ancestors;
use std::collections::BTreeSet;

/// Intersect any number of path sets, treating a directory as covering its
/// descendants.
///
/// A candidate is any member of any input set. It is kept when every input set
/// contains it or one of its ancestors. Only listed entries can appear in the
/// result; a directory is never synthesised from its children.
///
/// One input set is returned as-is and no input sets yield an empty result.
pub fn intersect_paths(sets: &[BTreeSet<String>]) -> BTreeSet<String> {
    match sets {
        [] => return BTreeSet::new(),
        [only] => return only.clone(),
        _ => {}
    }

    let candidates: BTreeSet<&String> = sets.iter().flatten().collect();

    candidates
        .into_iter()
        .filter(|candidate| {
            let chain = ancestors(candidate);
            let count = sets.iter().filter(|set| covers(set, candidate, &chain)).count();
            count == sets.len()
        })
        .cloned()
        .collect()
}

fn covers(set: &BTreeSet<String>, path: &str, chain: &[String]) -> bool {
    set.contains(path) || chain.iter().any(|ancestor| set.contains(ancestor))
}
