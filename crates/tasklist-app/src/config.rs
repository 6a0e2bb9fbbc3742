use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tasklist_store::FileStore;

const CONFIG_DIR: &str = ".tasklist";
const CONFIG_FILE: &str = "config.toml";
const DATA_DIR: &str = "data";

/// Top-level configuration loaded from `.tasklist/config.toml`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Snapshot location.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Export naming.
    #[serde(default)]
    pub export: ExportConfig,
    /// List placeholder texts.
    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    /// Load configuration from a working directory. A missing file yields defaults.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let config_path = workdir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Open the file-backed storage configured for `workdir`.
    pub fn open_file_store(&self, workdir: impl AsRef<Path>) -> Result<FileStore> {
        let dir = self.storage.resolve_data_dir(workdir);
        FileStore::open(&dir).with_context(|| format!("failed to open storage at {}", dir.display()))
    }

    fn validate(&self) -> Result<()> {
        self.storage.ensure_valid_key()?;
        self.export.ensure_valid_prefix()
    }
}

/// Where and under which key the task snapshot is persisted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_key")]
    key: String,
    #[serde(default)]
    data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: Self::default_key(),
            data_dir: None,
        }
    }
}

impl StorageConfig {
    fn default_key() -> String {
        "tasks".into()
    }

    /// Construct a storage block with an explicit key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            data_dir: None,
        }
    }

    /// Key under which the snapshot is stored.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Data directory, relative paths resolved against `workdir`.
    pub fn resolve_data_dir(&self, workdir: impl AsRef<Path>) -> PathBuf {
        let workdir = workdir.as_ref();
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => workdir.join(dir),
            None => workdir.join(CONFIG_DIR).join(DATA_DIR),
        }
    }

    fn ensure_valid_key(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            bail!("storage key must not be empty");
        }
        Ok(())
    }
}

/// Export document naming.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    #[serde(default = "ExportConfig::default_prefix")]
    file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: Self::default_prefix(),
        }
    }
}

impl ExportConfig {
    fn default_prefix() -> String {
        "tasks_backup_".into()
    }

    /// Prefix placed before the export date in file names.
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    fn ensure_valid_prefix(&self) -> Result<()> {
        if self.file_prefix.trim().is_empty() {
            bail!("export file prefix must not be empty");
        }
        if self.file_prefix.contains(['/', '\\']) {
            bail!("export file prefix must not contain path separators");
        }
        Ok(())
    }
}

/// Placeholder texts used by the list view.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewConfig {
    /// Shown when the collection itself is empty.
    pub empty_message: String,
    /// Shown when a search hides every task.
    pub no_match_message: String,
    /// Shown in place of missing notes.
    pub notes_placeholder: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            empty_message: "No tasks yet. Add one above!".into(),
            no_match_message: "No tasks found matching your search.".into(),
            notes_placeholder: "No notes".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(dir: &Path, body: &str) -> Result<()> {
        let cfg_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&cfg_dir)?;
        let mut file = fs::File::create(cfg_dir.join(CONFIG_FILE))?;
        writeln!(file, "{body}")?;
        Ok(())
    }

    #[test]
    fn missing_config_returns_defaults() -> Result<()> {
        let dir = tempdir()?;
        let cfg = AppConfig::from_workdir(dir.path())?;
        assert_eq!(cfg.storage.key(), "tasks");
        assert_eq!(cfg.export.file_prefix(), "tasks_backup_");
        assert_eq!(cfg.view.notes_placeholder, "No notes");
        assert_eq!(
            cfg.storage.resolve_data_dir(dir.path()),
            dir.path().join(".tasklist").join("data")
        );
        Ok(())
    }

    #[test]
    fn load_config_with_overrides() -> Result<()> {
        let dir = tempdir()?;
        write_config(
            dir.path(),
            "[storage]\nkey = \"work-tasks\"\ndata_dir = \"store\"\n\n[view]\nempty_message = \"Nothing here\"",
        )?;

        let cfg = AppConfig::from_workdir(dir.path())?;
        assert_eq!(cfg.storage.key(), "work-tasks");
        assert_eq!(cfg.storage.resolve_data_dir(dir.path()), dir.path().join("store"));
        assert_eq!(cfg.view.empty_message, "Nothing here");
        assert_eq!(cfg.view.no_match_message, "No tasks found matching your search.");
        Ok(())
    }

    #[test]
    fn empty_storage_key_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        write_config(dir.path(), "[storage]\nkey = \"  \"")?;

        let Err(err) = AppConfig::from_workdir(dir.path()) else {
            panic!("empty storage key should error");
        };
        assert!(format!("{err:#}").contains("storage key must not be empty"));
        Ok(())
    }

    #[test]
    fn export_prefix_must_be_a_file_name() {
        let Err(err) = AppConfig::from_toml("[export]\nfile_prefix = \"../backup_\"") else {
            panic!("path-like prefix should error");
        };
        assert!(err.to_string().contains("path separators"));
    }

    #[test]
    fn malformed_toml_reports_path() -> Result<()> {
        let dir = tempdir()?;
        write_config(dir.path(), "[storage\nkey = 1")?;

        let Err(err) = AppConfig::from_workdir(dir.path()) else {
            panic!("malformed config should error");
        };
        assert!(err.to_string().contains("failed to parse"));
        Ok(())
    }

    #[test]
    fn open_file_store_creates_data_dir() -> Result<()> {
        let dir = tempdir()?;
        let cfg = AppConfig::default();
        let store = cfg.open_file_store(dir.path())?;
        assert!(store.root().is_dir());
        Ok(())
    }
}
