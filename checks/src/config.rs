use crate::env::RuntimeVersion;
use crate::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one run of the dashboard checks.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// HTML document checked by the structural checks
    pub html_path: PathBuf,
    /// Text the page title must contain
    pub title_keyword: String,
    /// Minimum number of `.card` elements
    pub min_cards: usize,
    /// Simulated load times above this fail
    pub load_time_threshold_ms: f64,
    /// Lowest accepted runtime version, `major.minor[.patch]`
    pub min_runtime_version: String,
    /// Program queried with `--version` when `RUNTIME_VERSION` is unset
    pub runtime_command: String,
    /// Directories the workspace must contain
    pub expected_dirs: Vec<PathBuf>,
    /// Fixed deployment environment; picked at random when unset
    pub environment: Option<String>,
    /// Seed for the simulated values; entropy when unset
    pub seed: Option<u64>,
    /// Run the mock-backed deployment requirement checks
    pub deployment_checks: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            html_path: PathBuf::from("index.html"),
            title_keyword: "DevOps".to_string(),
            min_cards: 3,
            load_time_threshold_ms: 1000.0,
            min_runtime_version: "1.70".to_string(),
            runtime_command: "rustc".to_string(),
            expected_dirs: vec![PathBuf::from("reports")],
            environment: None,
            seed: None,
            deployment_checks: true,
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> HarnessResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> HarnessResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn with_html_path(mut self, html_path: impl Into<PathBuf>) -> Self {
        self.html_path = html_path.into();
        self
    }

    pub fn with_title_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.title_keyword = keyword.into();
        self
    }

    pub fn with_min_cards(mut self, min_cards: usize) -> Self {
        self.min_cards = min_cards;
        self
    }

    pub fn with_load_time_threshold_ms(mut self, threshold: f64) -> Self {
        self.load_time_threshold_ms = threshold;
        self
    }

    pub fn with_min_runtime_version(mut self, version: impl Into<String>) -> Self {
        self.min_runtime_version = version.into();
        self
    }

    pub fn with_runtime_command(mut self, command: impl Into<String>) -> Self {
        self.runtime_command = command.into();
        self
    }

    pub fn with_expected_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.expected_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_deployment_checks(mut self, enabled: bool) -> Self {
        self.deployment_checks = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.html_path.as_os_str().is_empty() {
            return Err("HTML path cannot be empty".to_string());
        }

        if self.title_keyword.trim().is_empty() {
            return Err("Title keyword cannot be empty".to_string());
        }

        if self.min_cards == 0 {
            return Err("Minimum card count must be greater than 0".to_string());
        }

        if !(self.load_time_threshold_ms.is_finite() && self.load_time_threshold_ms > 0.0) {
            return Err("Load time threshold must be a positive number".to_string());
        }

        if RuntimeVersion::parse(&self.min_runtime_version).is_none() {
            return Err(format!(
                "Minimum runtime version '{}' is not of the form major.minor[.patch]",
                self.min_runtime_version
            ));
        }

        if self.runtime_command.trim().is_empty() {
            return Err("Runtime command cannot be empty".to_string());
        }

        if let Some(environment) = &self.environment {
            if environment.trim().is_empty() {
                return Err("Environment cannot be empty when set".to_string());
            }
        }

        Ok(())
    }

    /// [`validate`](Self::validate), lifted into [`HarnessError`].
    pub fn validated(self) -> HarnessResult<Self> {
        self.validate()
            .map_err(|message| HarnessError::InvalidConfig { message })?;
        Ok(self)
    }
}
