use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main storm-bench configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub api: ApiConfig,
    pub mock: MockConfig,
    pub output: OutputConfig,
}

/// Log verbosity written to the log file
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Live Storm service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint the live agent POSTs write requests to
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Environment variable holding the user id
    pub user_id_env: String,
    /// User id used when the user id variable is unset
    pub default_user_id: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

/// Mock agent settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MockConfig {
    /// Simulated latency of every pipeline step
    pub step_delay_ms: u64,
    /// Words of filler text per generated section
    pub words_per_section: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the default benchmark output paths live in
    pub dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://agent-prod.studio.lyzr.ai/v3/storm/write".to_string(),
            api_key_env: "LYZR_API_KEY".to_string(),
            user_id_env: "LYZR_USER_ID".to_string(),
            default_user_id: "user@example.com".to_string(),
            timeout_secs: 600,
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 5,
            words_per_section: 60,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("performance_results"),
        }
    }
}

impl OutputConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.dir.join("perf_results.csv")
    }

    pub fn jsonl_path(&self) -> PathBuf {
        self.dir.join("perf_results.jsonl")
    }

    pub fn plot_path(&self) -> PathBuf {
        self.dir.join("perf_plot.svg")
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var("STORM_BENCH_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from STORM_BENCH_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/storm-bench/storm-bench.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("storm-bench").join("storm-bench.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        let local_config = PathBuf::from("storm-bench.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.api.api_key_env, "LYZR_API_KEY");
        assert_eq!(config.api.user_id_env, "LYZR_USER_ID");
        assert_eq!(config.api.default_user_id, "user@example.com");
        assert_eq!(config.mock.step_delay_ms, 5);
    }

    #[test]
    fn test_default_output_paths() {
        let output = OutputConfig::default();
        assert_eq!(output.csv_path(), PathBuf::from("performance_results/perf_results.csv"));
        assert_eq!(output.jsonl_path(), PathBuf::from("performance_results/perf_results.jsonl"));
        assert_eq!(output.plot_path(), PathBuf::from("performance_results/perf_plot.svg"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "log_level: debug\nmock:\n  step_delay_ms: 0\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.mock.step_delay_ms, 0);
        assert_eq!(config.mock.words_per_section, 60);
        assert_eq!(config.api.timeout_secs, 600);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storm-bench.yaml");
        fs::write(&path, "output:\n  dir: /tmp/results\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("/tmp/results"));
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Off.as_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Trace.as_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_expand_path_no_expansion() {
        let path = PathBuf::from("/usr/local/bin");
        let expanded = Config::expand_path(&path);
        assert_eq!(expanded, PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        // SAFETY: Test runs single-threaded, env var is test-specific
        unsafe {
            std::env::set_var("STORM_BENCH_TEST_VAR", "/custom/path");
        }
        let path = PathBuf::from("$STORM_BENCH_TEST_VAR/results.csv");
        let expanded = Config::expand_path(&path);
        assert_eq!(expanded, PathBuf::from("/custom/path/results.csv"));
        unsafe {
            std::env::remove_var("STORM_BENCH_TEST_VAR");
        }
    }
}
