//! Phase 1: Source Discovery
//!
//! This is the first phase of the `envmeta` pipeline. It computes, for one
//! environment and one dataset, the ordered list of fragment files that feed
//! the merge.
//!
//! ## Search Tiers
//!
//! Three glob patterns are combined, in this order:
//!
//! 1.  **Team**: `<input_root>/<env>/*/<dataset>.json`
//! 2.  **Environment**: `<input_root>/<env>/<dataset>.json`
//! 3.  **Global**: `<input_root>/<dataset>.json`
//!
//! Within a tier, files are visited in the order `glob` yields them (sorted by
//! path). The tier order fixes which record survives when a permissive dataset
//! repeats a key, but it is not a precedence rule: every match from every tier
//! is merged. Finding nothing is not an error. Hidden
//! folders are never matched by the team wildcard.
//!
//! Datasets with [`ResolutionScope::Global`] only consult the global tier.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::debug;

use crate::config::{json_file_name, Layout};
use crate::dataset::{DatasetKind, ResolutionScope};
use crate::error::{Error, Result};

/// Resolve the source files of `kind` for `env_name`.
pub fn resolve_files(layout: &Layout, env_name: &str, kind: DatasetKind) -> Result<Vec<PathBuf>> {
    let patterns = match kind.descriptor().scope {
        ResolutionScope::Environment => environment_patterns(&layout.input_root, env_name, kind),
        ResolutionScope::Global => vec![global_pattern(&layout.input_root, kind)],
    };

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for pattern in patterns {
        for path in expand(&pattern)? {
            let path = normalize_path(&path);
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    debug!(
        "Resolved {} source file(s) for dataset {} in environment {}",
        files.len(),
        kind,
        env_name
    );
    Ok(files)
}

/// Resolve the global file of `kind` only, regardless of its scope.
pub fn resolve_global(layout: &Layout, kind: DatasetKind) -> Result<Vec<PathBuf>> {
    expand(&global_pattern(&layout.input_root, kind))
        .map(|paths| paths.iter().map(|p| normalize_path(p)).collect())
}

fn environment_patterns(input_root: &Path, env_name: &str, kind: DatasetKind) -> Vec<String> {
    let root = escaped(input_root);
    let env = Pattern::escape(env_name);
    let file = Pattern::escape(&json_file_name(kind.name()));
    vec![
        format!("{root}/{env}/*/{file}"),
        format!("{root}/{env}/{file}"),
        format!("{root}/{file}"),
    ]
}

fn global_pattern(input_root: &Path, kind: DatasetKind) -> String {
    format!(
        "{}/{}",
        escaped(input_root),
        Pattern::escape(&json_file_name(kind.name()))
    )
}

fn escaped(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    Pattern::escape(raw.trim_end_matches('/'))
}

/// `*` never matches a hidden folder such as `.archive` or `.git`.
fn match_options() -> MatchOptions {
    MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    }
}

fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob_with(pattern, match_options())? {
        let path = entry.map_err(|e| Error::Io(e.into_error()))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Lexically normalize a path: drop `.` segments and fold `..` into its parent.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else {
                    normalized.push(component.as_os_str());
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
