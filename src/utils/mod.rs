//! Shared helpers

pub mod paths;

pub use paths::{
    ancestors, clean_relative, lexical_normalize, normalize_path, relative_to, to_posix_path,
};
