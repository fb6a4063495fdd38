use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const APP_DIR_NAME: &str = ".ayurprakriti_app";
pub const CONFIG_FILE_NAME: &str = "config_rules.yaml";
pub const DB_FILE_NAME: &str = "ayurprakriti.db";

/// Locations under the application directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub db: PathBuf,
    pub tmp: PathBuf,
    pub reports: PathBuf,
}

impl AppPaths {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config: root.join(CONFIG_FILE_NAME),
            db: root.join(DB_FILE_NAME),
            tmp: root.join("tmp"),
            reports: root.join("reports"),
            root,
        }
    }

    /// `override_dir` when given, else `~/.ayurprakriti_app`.
    pub fn resolve(override_dir: Option<&Path>) -> eyre::Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::at(dir));
        }
        let home = dirs::home_dir().ok_or_else(|| eyre::eyre!("no home directory found"))?;
        Ok(Self::at(home.join(APP_DIR_NAME)))
    }

    /// Create the root, `tmp/` and `reports/`.
    pub fn ensure(&self) -> eyre::Result<()> {
        for dir in [&self.root, &self.tmp, &self.reports] {
            fs::create_dir_all(dir)
                .map_err(|e| eyre::eyre!("failed to create {}: {e}", dir.display()))?;
        }
        Ok(())
    }

    /// Remove every file in `tmp/`. Failures are skipped. Returns how many
    /// files were removed.
    pub fn clean_tmp(&self) -> usize {
        let Ok(entries) = fs::read_dir(&self.tmp) else {
            return 0;
        };
        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => debug!(path = %path.display(), error = %e, "Temp file kept"),
            }
        }
        removed
    }
}
