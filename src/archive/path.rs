// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Helpers over flat, forward-slash separated entry names.
//!
//! A name ending in `/` denotes a directory. Directories are implied by the names below them, so `xl/worksheets/a.xml`
//! implies both `xl/` and `xl/worksheets/`.

/// Returns whether the name denotes a directory.
pub(crate) fn is_dir_name(name: &str) -> bool {
    name.ends_with('/')
}

/// Returns every proper `/`-terminated prefix of a name, shortest first.
///
/// A directory name is not its own ancestor.
pub(crate) fn ancestors(name: &str) -> impl Iterator<Item = &str> {
    name.match_indices('/').map(move |(index, _)| &name[..=index]).filter(move |prefix| prefix.len() < name.len())
}

/// Normalises a directory argument so it ends in `/`. The empty string (the archive root) is left untouched.
pub(crate) fn normalize_dir(dir: &str) -> String {
    if dir.is_empty() || is_dir_name(dir) {
        dir.to_owned()
    } else {
        format!("{dir}/")
    }
}

/// Returns whether `name` sits exactly one segment below the normalised directory `dir`.
pub(crate) fn is_direct_child(dir: &str, name: &str) -> bool {
    match name.strip_prefix(dir) {
        Some(rest) if !rest.is_empty() => !rest.trim_end_matches('/').contains('/'),
        _ => false,
    }
}

/// Returns the last segment of a name, without the trailing `/` of a directory.
pub(crate) fn file_name(name: &str) -> &str {
    let trimmed = name.strip_suffix('/').unwrap_or(name);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
