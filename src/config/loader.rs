//! Settings loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{StagehandError, StagehandResult};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Document syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Read and parse a settings document, collecting unknown keys as warnings.
pub fn load_document<T: DeserializeOwned>(
    path: &Path,
) -> StagehandResult<(T, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| {
        StagehandError::config(path, format!("cannot read settings file: {}", e))
    })?;
    parse_document(&content, DocumentFormat::from_path(path), path)
}

/// Parse settings text; `origin` is only used for error messages and warnings.
pub fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
    origin: &Path,
) -> StagehandResult<(T, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();

    let value: T = match format {
        DocumentFormat::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(content);
            let value = serde_ignored::deserialize(&mut deserializer, |p| {
                unknown_paths.push(p.to_string());
            })
            .map_err(|e| StagehandError::config(origin, e.to_string()))?;
            deserializer
                .end()
                .map_err(|e| StagehandError::config(origin, e.to_string()))?;
            value
        }
        DocumentFormat::Toml => {
            let deserializer = toml::de::Deserializer::new(content);
            serde_ignored::deserialize(deserializer, |p| {
                unknown_paths.push(p.to_string());
            })
            .map_err(|e| StagehandError::config(origin, e.to_string()))?
        }
    };

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
                file: origin.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((value, warnings))
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
        "project_name",
        "git_repository",
        "stages",
        "configs",
        "local",
        "firewall",
        "prompts",
        "user",
        "host",
        "port",
        "identity_file",
        "venv_directory",
        "code_src_directory",
        "requirements_file",
        "vcs_branch",
        "restart_command",
        "settings_module",
        "config_directory",
        "config_src",
        "venv_python_executable",
        "test_settings",
        "fallback_test_settings",
        "ssh_port",
        "open_ports",
        "database",
        "name",
        "password",
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
