//! Path normalization

use std::path::{Component, Path, PathBuf};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Clean up a stored or user-supplied path string.
///
/// Backslashes become slashes, `./` prefixes and trailing slashes are dropped and
/// an empty result collapses to `"."` (the workspace root).
pub fn clean_relative(path: &str) -> String {
    let mut normalized = normalize_path(path.trim());
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized.is_empty() {
        ".".to_string()
    } else {
        normalized
    }
}

/// Lexical path normalization without filesystem access.
///
/// Removes `.` components and resolves `..` components lexically.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !components.is_empty()
                    && !matches!(
                        components.last(),
                        Some(Component::ParentDir) | Some(Component::RootDir)
                    )
                {
                    components.pop();
                } else if !matches!(components.last(), Some(Component::RootDir)) {
                    components.push(component);
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Convert a path to a POSIX-style string (forward slashes).
pub fn to_posix_path(path: &Path) -> String {
    let rendered = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    // A leading RootDir renders as "/" and would otherwise double up.
    if rendered.starts_with("//") {
        rendered[1..].to_string()
    } else {
        rendered
    }
}

/// Render `path` relative to `root`, or `None` when it lies outside of it.
pub fn relative_to(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rendered = to_posix_path(rel);
    Some(if rendered.is_empty() { ".".to_string() } else { rendered })
}

/// Every proper ancestor of a slash-separated path, nearest first.
///
/// `"a/b/c"` yields `["a/b", "a"]`; an absolute `"/a/b"` yields `["/a", "/"]`.
pub fn ancestors(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = path.trim_end_matches('/');
    while let Some(idx) = current.rfind('/') {
        let parent = if idx == 0 { "/" } else { &current[..idx] };
        out.push(parent.to_string());
        if parent == "/" {
            break;
        }
        current = parent;
    }
    out
}
