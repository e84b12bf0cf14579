// ============================================================
// Layer 5 — Config Store
// ============================================================
// Saves and restores a LoaderConfig as pretty-printed JSON so
// a run can be repeated with exactly the same files, seed and
// batch settings.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::config::LoaderConfig;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `cfg` as JSON, creating parent directories as needed.
    pub fn save(&self, cfg: &LoaderConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved loader config to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<LoaderConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid loader config in '{}'", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("runs/loader.json"));

        let mut cfg = LoaderConfig::new(vec!["a.txt", "b.txt"], "c.txt", "w.txt", "t.txt");
        cfg.seed    = 42;
        cfg.shuffle = false;

        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn test_missing_file() {
        let store = ConfigStore::new("/no/such/loader.json");
        assert!(store.load().is_err());
    }
}
