//! Sibling expansion for one included path.

use crate::scan::FileSystem;
use crate::utils::{lexical_normalize, relative_to};
use std::collections::BTreeSet;
use std::path::Path;

/// Collect everything that is a sibling of `included` or of one of its ancestors,
/// up to and including the children of `root`.
///
/// Returned paths are relative to `root`. The included path, its ancestors and
/// the root itself are never part of the result. Returns `None` when the walk
/// cannot be completed (a level fails to list, or the path escapes `root`); the
/// caller must then leave this inclusion out of the intersection.
pub fn sibling_set<F: FileSystem>(
    fs: &F,
    root: &Path,
    included: &str,
) -> Option<BTreeSet<String>> {
    let root = lexical_normalize(root);
    let mut folder = lexical_normalize(&root.join(included));
    let mut siblings = BTreeSet::new();

    if !folder.starts_with(&root) {
        tracing::warn!("Included path {} is outside of {}", included, root.display());
        return None;
    }

    while folder != root {
        // `parent()` is `None` once the filesystem root is reached.
        let Some(parent) = folder.parent().map(Path::to_path_buf) else {
            break;
        };

        match fs.list_children(&parent, Some(&folder)) {
            Ok(children) => {
                siblings.extend(children.iter().filter_map(|child| relative_to(child, &root)));
            }
            Err(e) => {
                tracing::warn!("Cannot walk inclusion {}: {:#}", included, e);
                return None;
            }
        }

        folder = parent;
    }

    tracing::debug!("Inclusion {} yields {} sibling paths", included, siblings.len());
    Some(siblings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    fn build_tree(root: &Path, entries: &[&str]) {
        for entry in entries {
            let path = root.join(entry);
            if entry.ends_with('/') {
                fs::create_dir_all(&path).expect("mkdir");
            } else {
                fs::create_dir_all(path.parent().expect("parent")).expect("mkdir parent");
                fs::write(&path, "").expect("write");
            }
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn walks_every_level_up_to_root() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        build_tree(
            root,
            &["src/core/mod.rs", "src/cli/main.rs", "src/lib.rs", "docs/guide.md", ".gitignore"],
        );

        let siblings = sibling_set(&LocalFs, root, "src/core");
        assert_eq!(siblings, Some(set(&[".gitignore", "docs", "src/cli", "src/lib.rs"])));
    }

    #[test]
    fn top_level_inclusion_only_lists_root_children() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        build_tree(root, &["src/", "docs/", "Cargo.toml"]);

        let siblings = sibling_set(&LocalFs, root, "src");
        assert_eq!(siblings, Some(set(&["Cargo.toml", "docs"])));
    }

    #[test]
    fn including_the_root_hides_nothing() {
        let tmp = TempDir::new().expect("tmp");
        build_tree(tmp.path(), &["src/", "docs/"]);
        assert_eq!(sibling_set(&LocalFs, tmp.path(), "."), Some(BTreeSet::new()));
    }

    #[test]
    fn escaping_paths_cannot_be_walked() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("proj");
        build_tree(&root, &["src/"]);
        assert_eq!(sibling_set(&LocalFs, &root, "../other"), None);
    }

    #[test]
    fn missing_parent_directory_cannot_be_walked() {
        let tmp = TempDir::new().expect("tmp");
        build_tree(tmp.path(), &["src/"]);
        assert_eq!(sibling_set(&LocalFs, tmp.path(), "gone/deeper/file.rs"), None);
    }

    #[test]
    fn missing_leaf_still_hides_its_siblings() {
        let tmp = TempDir::new().expect("tmp");
        build_tree(tmp.path(), &["src/a.rs", "README.md"]);
        let siblings = sibling_set(&LocalFs, tmp.path(), "src/new.rs");
        assert_eq!(siblings, Some(set(&["README.md", "src/a.rs"])));
    }
}
