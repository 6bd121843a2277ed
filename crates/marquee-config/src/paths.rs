use anyhow::Result;
use std::path::PathBuf;

/// Environment variable that relocates every marquee directory under one base
pub const BASE_PATH_ENV_VAR: &str = "MARQUEE_BASE_PATH";

/// Base path from `MARQUEE_BASE_PATH`, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var(BASE_PATH_ENV_VAR).ok().filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("marquee");
        let data_dir = dirs::data_dir()
            .map(|d| d.join("marquee"))
            .unwrap_or_else(|| base_dir.join("data"));

        Ok(Self {
            config_dir: base_dir,
            log_dir: data_dir.join("logs"),
            data_dir,
        })
    }

    /// Config files at the base level, data and logs in subdirectories
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    /// Directory holding persisted store snapshots
    pub fn state_dir(&self) -> PathBuf {
        self.data_dir.join("state")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// Default target for `--log-file` given without a path
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("marquee.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(self.state_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::with_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/marquee on Linux)
        Self::new().unwrap_or_else(|_| Self::with_base(std::env::temp_dir().join("marquee")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_base_layout() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path());

        assert_eq!(paths.config_file(), dir.path().join("config.toml"));
        assert_eq!(paths.state_dir(), dir.path().join("data").join("state"));
        assert_eq!(paths.log_file(), dir.path().join("logs").join("marquee.log"));

        paths.ensure_directories().unwrap();
        assert!(paths.state_dir().is_dir());
        assert!(dir.path().join("logs").is_dir());
    }
}
