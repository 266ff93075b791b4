//! Per-user facts files for the terminal chat.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use unicare_core::{Facts, UserId};

/// Where a chat session keeps its facts.
///
/// An explicit path wins; otherwise a signed-in user gets `<dir>/<user_id>.json`
/// under the configured directory or the platform data dir. Anonymous
/// sessions without an explicit path keep nothing.
pub fn facts_path(
    explicit: Option<&Path>,
    facts_dir: Option<&Path>,
    user_id: Option<&UserId>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let user_id = user_id?;
    let dir = match facts_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()?.join("unicare").join("facts"),
    };
    Some(dir.join(format!("{}.json", file_stem(user_id))))
}

fn file_stem(user_id: &UserId) -> String {
    user_id
        .to_string()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Read facts from `path`. A missing file is a fresh session.
pub fn load_facts(path: &Path) -> Result<Facts> {
    if !path.exists() {
        tracing::debug!("No facts file at {}, starting fresh", path.display());
        return Ok(Facts::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read facts file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse facts file: {}", path.display()))
}

pub fn save_facts(path: &Path, facts: &Facts) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(facts)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write facts file: {}", path.display()))
}
