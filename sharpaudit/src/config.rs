//! TOML configuration, discovered by walking up from the audit root.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::CONFIG_FILENAME;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section.
    pub sharpaudit: SharpAuditConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` when defaults or programmatic config are in use.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options, all optional. Unset fields fall back to the
/// built-in limits; CLI flags override both.
pub struct SharpAuditConfig {
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include even when excluded by default.
    pub include_folders: Option<Vec<String>>,
    /// Namespace prefixes treated as platform imports and left out of
    /// the dependency graph.
    pub std_prefixes: Option<Vec<String>>,
    /// Sliding-window size for duplicate detection.
    pub window: Option<usize>,
    /// Maximum allowed lines for a file.
    pub max_file_loc: Option<usize>,
    /// Maximum allowed methods per file.
    pub max_file_methods: Option<usize>,
    /// Cyclomatic complexity warning threshold.
    pub max_complexity: Option<usize>,
    /// Cyclomatic complexity severe threshold.
    pub severe_complexity: Option<usize>,
    /// Method length warning threshold.
    pub max_method_lines: Option<usize>,
    /// Method length severe threshold.
    pub severe_method_lines: Option<usize>,
    /// Maximum allowed parameters for a method.
    pub max_parameters: Option<usize>,
    /// Minimum documentation ratio (0.0-1.0) for non-trivial files.
    pub min_doc_ratio: Option<f64>,
    /// Maximum outgoing namespace dependencies.
    pub max_fan_out: Option<usize>,
    /// Maximum incoming namespace dependencies.
    pub max_fan_in: Option<usize>,
}

impl Config {
    /// Loads configuration from the current directory, traversing up.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    /// Malformed or unreadable files are skipped; the search continues in
    /// the parent directory.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                if let Ok(content) = fs::read_to_string(&candidate) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.config_file_path.is_none());
        assert!(config.sharpaudit.window.is_none());
    }

    #[test]
    fn reads_toml_from_scan_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".sharpaudit.toml"),
            "[sharpaudit]\nwindow = 8\nmax_complexity = 15\nstd_prefixes = [\"System\", \"Microsoft\"]\n",
        )
        .unwrap();
        let config = Config::load_from_path(dir.path());
        assert_eq!(config.sharpaudit.window, Some(8));
        assert_eq!(config.sharpaudit.max_complexity, Some(15));
        assert_eq!(
            config.sharpaudit.std_prefixes,
            Some(vec!["System".to_owned(), "Microsoft".to_owned()])
        );
        assert!(config.config_file_path.is_some());
    }

    #[test]
    fn walks_up_to_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".sharpaudit.toml"), "[sharpaudit]\nwindow = 3\n").unwrap();
        let nested = dir.path().join("src").join("Core");
        fs::create_dir_all(&nested).unwrap();
        let config = Config::load_from_path(&nested);
        assert_eq!(config.sharpaudit.window, Some(3));
    }

    #[test]
    fn malformed_toml_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".sharpaudit.toml"), "not [ valid toml").unwrap();
        let config = Config::load_from_path(dir.path());
        assert!(config.config_file_path.is_none());
    }
}
