use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kotoba_config::Config;

const DEFAULT_PROFILE: &str = "kotoba.json";

/// Load a JSON config profile
fn load_profile(path: &Path) -> anyhow::Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Explicit profile if given, else `kotoba.json` in the working directory when present
pub fn resolve_profile(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let default_profile = PathBuf::from(DEFAULT_PROFILE);
    default_profile.exists().then_some(default_profile)
}

/// Load `profile`, or defaults with environment overrides when there is none.
/// Runs before logging is set up, so it reports through its result only.
pub fn load_config(profile: Option<&Path>) -> anyhow::Result<Config> {
    match profile {
        Some(path) => load_profile(path),
        None => Ok(Config::new()),
    }
}

/// Write `config` as a pretty-printed profile
pub fn save_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    tracing::info!("Wrote config profile {}", path.display());
    Ok(())
}

/// Create the data directory tree if missing
pub fn init_data_dirs(config: &Config) -> anyhow::Result<()> {
    fs::create_dir_all(config.store_dir())
        .with_context(|| format!("Failed to create {}", config.store_dir().display()))?;
    Ok(())
}
