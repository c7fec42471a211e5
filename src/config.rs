use crate::parser::Family;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_families")]
    pub families: Vec<Family>,

    /// Where preview reports go; alongside the input when unset.
    #[serde(default)]
    pub report_dir: Option<PathBuf>,

    /// Unset means "write reports"; kept optional so a config file that
    /// omits it does not override one that sets it.
    #[serde(default)]
    pub write_reports: Option<bool>,

    /// Graphemes of surrounding XML shown per entry.
    #[serde(default = "default_context_width")]
    pub context_width: usize,

    /// Unset leaves `RUST_LOG` in charge, falling back to `warn`.
    #[serde(default)]
    pub log_level: Option<String>,

    /// File extensions picked up when a directory is given.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_families() -> Vec<Family> {
    Family::ALL.to_vec()
}

fn default_context_width() -> usize {
    60
}

fn default_extensions() -> Vec<String> {
    vec!["xml".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            families: default_families(),
            report_dir: None,
            write_reports: None,
            context_width: default_context_width(),
            log_level: None,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        families: Option<Vec<Family>>,
        report_dir: Option<PathBuf>,
        no_report: bool,
        log_level: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = PathBuf::from(".verbfix.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        if let Some(families) = families {
            config.families = families;
        }
        if let Some(dir) = report_dir {
            config.report_dir = Some(dir);
        }
        if no_report {
            config.write_reports = Some(false);
        }
        if let Some(level) = log_level {
            config.log_level = Some(level);
        }

        if config.families.is_empty() {
            anyhow::bail!("No form families enabled; set `families` in the config or pass --family");
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // other's values override self's if they differ from defaults
        if other.families != default_families() {
            self.families = other.families;
        }
        if other.report_dir.is_some() {
            self.report_dir = other.report_dir;
        }
        if other.context_width != default_context_width() {
            self.context_width = other.context_width;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.extensions != default_extensions() {
            self.extensions = other.extensions;
        }
        if other.write_reports.is_some() {
            self.write_reports = other.write_reports;
        }
        self
    }

    pub fn writes_reports(&self) -> bool {
        self.write_reports.unwrap_or(true)
    }

    /// Whether `path` has one of the configured extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "verbfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.families, vec![Family::Aorist, Family::Derived]);
        assert_eq!(config.context_width, 60);
        assert!(config.writes_reports());
        assert!(config.report_dir.is_none());
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            families: vec![Family::Derived],
            context_width: 40,
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.families, vec![Family::Derived]);
        assert_eq!(merged.context_width, 40);
        assert_eq!(merged.log_level, None);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
families = ["aorist"]
report_dir = "references"
write_reports = false
"#,
        )
        .unwrap();
        assert_eq!(config.families, vec![Family::Aorist]);
        assert_eq!(config.report_dir, Some(PathBuf::from("references")));
        assert!(!config.writes_reports());
        assert_eq!(config.extensions, vec!["xml".to_string()]);
    }

    #[test]
    fn test_local_without_key_keeps_global_write_reports() {
        let global: Config = toml::from_str("write_reports = false\n").unwrap();
        let local: Config = toml::from_str("context_width = 30\n").unwrap();

        let merged = Config::default().merge(global).merge(local);
        assert!(!merged.writes_reports());
        assert_eq!(merged.context_width, 30);

        let local: Config = toml::from_str("write_reports = true\n").unwrap();
        let merged = merged.merge(local);
        assert!(merged.writes_reports());
    }

    #[test]
    fn test_accepts_extension() {
        let config = Config::default();
        assert!(config.accepts(Path::new("db/ub0.XML")));
        assert!(!config.accepts(Path::new("notes.txt")));
        assert!(!config.accepts(Path::new("README")));
    }
}
