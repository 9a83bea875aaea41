//! Process environment captured once at the start of a run.

use regex::Regex;
use std::cmp::Ordering;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use tracing::{debug, info};

/// Overrides the version reported by the runtime command.
pub const RUNTIME_VERSION_VAR: &str = "RUNTIME_VERSION";
pub const CI_VAR: &str = "CI";
pub const BUILD_ID_VAR: &str = "BUILD_ID";
pub const WORKSPACE_VAR: &str = "WORKSPACE";

/// A `major.minor[.patch]` version, compared numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RuntimeVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl RuntimeVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first version number found in `text`.
    ///
    /// Accepts bare versions (`1.70`), prefixed ones (`v18.2.0`) and full
    /// tool banners (`rustc 1.82.0 (f6e511eec 2024-10-15)`). A missing patch
    /// component counts as zero.
    pub fn parse(text: &str) -> Option<Self> {
        static VERSION: OnceLock<Regex> = OnceLock::new();
        let re = VERSION.get_or_init(|| {
            Regex::new(r"(?:^|[^\d.])v?(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid")
        });

        let caps = re.captures(text)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        Some(Self::new(major, minor, patch))
    }

    pub fn at_least(&self, minimum: &RuntimeVersion) -> bool {
        self.cmp(minimum) != Ordering::Less
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Environment signals the checks read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    /// Running under CI; missing expected directories get created
    pub ci: bool,
    pub build_id: Option<String>,
    pub workspace: Option<PathBuf>,
    /// Raw version string, e.g. the output of `rustc --version`
    pub runtime_version: Option<String>,
}

impl EnvSnapshot {
    /// Read the process environment, falling back to `<runtime_command> --version`
    /// when `RUNTIME_VERSION` is not set.
    pub fn capture(runtime_command: &str) -> Self {
        let runtime_version =
            non_empty_var(RUNTIME_VERSION_VAR).or_else(|| detect_runtime_version(runtime_command));

        Self {
            ci: env::var(CI_VAR).map(|v| is_truthy(&v)).unwrap_or(false),
            build_id: non_empty_var(BUILD_ID_VAR),
            workspace: non_empty_var(WORKSPACE_VAR).map(PathBuf::from),
            runtime_version,
        }
    }

    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    pub fn with_build_id(mut self, build_id: impl Into<String>) -> Self {
        self.build_id = Some(build_id.into());
        self
    }

    pub fn with_runtime_version(mut self, version: impl Into<String>) -> Self {
        self.runtime_version = Some(version.into());
        self
    }

    pub fn log_diagnostics(&self) {
        info!(
            ci = self.ci,
            build_id = self.build_id.as_deref().unwrap_or("<unset>"),
            workspace = %self
                .workspace
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unset>".to_string()),
            runtime_version = self.runtime_version.as_deref().unwrap_or("<unknown>"),
            "environment"
        );
    }
}

/// Run `<command> --version` and return its trimmed stdout.
pub fn detect_runtime_version(command: &str) -> Option<String> {
    let output = Command::new(command)
        .arg("--version")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        Ok(output) => {
            debug!(command, status = ?output.status, "runtime version command failed");
            None
        }
        Err(e) => {
            debug!(command, error = %e, "runtime version command unavailable");
            None
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
