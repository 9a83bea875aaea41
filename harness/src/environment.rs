//! Performance and environment introspection checks.
//!
//! Simulated values (load time, environment, build number) come from the
//! caller's random source so a seeded run is reproducible.

use checks::{ensure, CheckError, CheckResult, RuntimeVersion};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const ENVIRONMENTS: [&str; 3] = ["development", "staging", "production"];

/// Simulated page load time in milliseconds, uniform in `[100, 600)`.
pub fn simulate_load_time<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(100.0..600.0)
}

pub fn check_load_time(load_time_ms: f64, threshold_ms: f64) -> CheckResult {
    ensure(
        load_time_ms <= threshold_ms,
        format!("Page load time exceeds {}ms threshold", threshold_ms),
    )
}

pub fn detect_environment<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ENVIRONMENTS[rng.gen_range(0..ENVIRONMENTS.len())]
}

pub fn generate_build_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("build-{}", rng.gen_range(0..1000))
}

/// What the dashboard's build number element displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub environment: String,
    pub build_id: String,
    pub timestamp: DateTime<Utc>,
}

impl BuildInfo {
    /// Fill in the banner, simulating whatever the environment did not supply.
    ///
    /// A configured environment and a `BUILD_ID` from the CI server take
    /// precedence; the RNG is only drawn for missing values, environment first.
    pub fn resolve<R: Rng + ?Sized>(
        environment: Option<String>,
        build_id: Option<String>,
        rng: &mut R,
    ) -> Self {
        let environment = environment.unwrap_or_else(|| detect_environment(rng).to_string());
        let build_id = build_id.unwrap_or_else(|| generate_build_id(rng));
        Self {
            environment,
            build_id,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Build: {} | Environment: {} | {}",
            self.build_id,
            self.environment,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

pub fn check_runtime_version(actual: Option<&str>, minimum: &str) -> CheckResult {
    let minimum = RuntimeVersion::parse(minimum).ok_or_else(|| {
        CheckError::new(format!("Invalid minimum runtime version: {}", minimum))
    })?;
    let raw = actual.ok_or_else(|| CheckError::new("Runtime version not available"))?;
    let version = RuntimeVersion::parse(raw)
        .ok_or_else(|| CheckError::new(format!("Unrecognized runtime version: {}", raw)))?;

    info!(%version, %minimum, "runtime version");
    ensure(
        version.at_least(&minimum),
        format!(
            "Runtime version {} is older than required {}",
            version, minimum
        ),
    )
}

/// Require `dir` to exist; under CI a missing directory is created instead.
pub fn check_directory(dir: &Path, ci: bool) -> CheckResult {
    if dir.is_dir() {
        return Ok(());
    }

    if ci {
        fs::create_dir_all(dir).map_err(|e| {
            CheckError::new(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        warn!(dir = %dir.display(), "created missing directory");
        return Ok(());
    }

    Err(CheckError::new(format!(
        "Required directory not found: {}",
        dir.display()
    )))
}
