//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, BuildResult};

use super::types::Config;

/// Project-level configuration file name
pub const PROJECT_CONFIG_FILE: &str = "msgbuild.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BuildResult<(Config, Vec<ConfigWarning>)> {
    let content =
        fs::read_to_string(path).map_err(|e| BuildError::io("failed to read", path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BuildError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults.
///
/// The first file found wins; environment overrides are applied last.
pub fn load_for_project(project_dir: &Path) -> BuildResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_dir.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        let (config, warnings) = load_with_warnings(&project_config)?;
        return Ok((config.with_env_overrides(), warnings));
    }

    if let Some(user_config) = user_config_path() {
        if user_config.is_file() {
            let (config, warnings) = load_with_warnings(&user_config)?;
            return Ok((config.with_env_overrides(), warnings));
        }
    }

    Ok((Config::default().with_env_overrides(), Vec::new()))
}

/// Apply environment variable overrides (MSGBUILD_* prefix)
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(go) = non_empty("MSGBUILD_GO") {
        config.toolchain.go = go;
    }
    if let Some(dep) = non_empty("MSGBUILD_DEP") {
        config.toolchain.dep = dep;
    }
    if let Some(golint) = non_empty("MSGBUILD_GOLINT") {
        config.toolchain.golint = golint;
    }
    if let Some(gofmt) = non_empty("MSGBUILD_GOFMT") {
        config.toolchain.gofmt = gofmt;
    }
    if let Some(import_path) = non_empty("MSGBUILD_IMPORT_PATH") {
        config.project.import_path = import_path.trim_end_matches('/').to_string();
    }

    config
}

/// `<config dir>/msgbuild/config.toml`
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("msgbuild").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "import_path",
        "name",
        "version",
        "layout",
        "workspace_dir",
        "packages_dir",
        "commands_dir",
        "vendor_dir",
        "source_extension",
        "toolchain",
        "go",
        "dep",
        "golint",
        "gofmt",
        "direct_tools",
        "lint",
        "min_confidence",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
