//! The DevOps dashboard check suite.
//!
//! Checks run in a fixed order:
//!
//! 1. HTML elements: the document load gate, then title, header, cards,
//!    build info and viewport. When the document fails to load the structural checks are
//!    skipped and only the load failure is recorded.
//! 2. Performance: simulated page load time.
//! 3. Environment: build info banner, runtime version, expected directories.
//! 4. Critical deployment requirements: security headers, service
//!    dependencies and configuration, all backed by mock data. These can be
//!    turned off with `deployment_checks = false`.
//! 5. Optionally, a check that always fails.
//!
//! # Examples
//!
//! ```rust
//! use checks::{EnvSnapshot, HarnessConfig};
//! use harness::DashboardSuite;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = HarnessConfig::default()
//!     .with_html_path("/nonexistent/index.html")
//!     .with_expected_dirs(Vec::<String>::new());
//! let env = EnvSnapshot::default().with_runtime_version("1.80.0");
//!
//! let mut suite = DashboardSuite::with_rng(config, env, StdRng::seed_from_u64(3)).quiet();
//! let results = suite.run_all();
//!
//! assert!(!results.is_success());
//! assert_eq!(results.failures()[0].name, "Load HTML document");
//! ```

use crate::deployment::{
    check_configuration, check_security_headers, check_service_dependencies,
    MOCK_CONFIG_ERRORS, MOCK_PRESENT_HEADERS, MOCK_SERVICE_STATUS, REQUIRED_SECURITY_HEADERS,
    REQUIRED_SERVICES,
};
use crate::environment::{
    check_directory, check_load_time, check_runtime_version, simulate_load_time, BuildInfo,
};
use crate::structure::{
    check_build_info, check_cards, check_header, check_title, check_viewport,
    BUILD_NUMBER_SELECTOR,
};
use checks::{CheckError, CheckRunner, EnvSnapshot, HarnessConfig, PageDocument, TestResults};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

pub const LOAD_DOCUMENT: &str = "Load HTML document";
pub const PAGE_TITLE: &str = "Check page title";
pub const PAGE_HEADER: &str = "Check page header";
pub const DASHBOARD_CARDS: &str = "Validate dashboard cards";
pub const ENVIRONMENT_STATUS: &str = "Check environment status";
pub const RESPONSIVE_DESIGN: &str = "Verify responsive design";
pub const PAGE_LOAD_TIME: &str = "Page load time";
pub const ENVIRONMENT_DETECTION: &str = "Environment detection";
pub const RUNTIME_VERSION: &str = "Runtime version";
pub const SECURITY_HEADERS: &str = "API endpoints security check";
pub const SERVICE_DEPENDENCIES: &str = "Service dependencies check";
pub const CONFIGURATION_VALIDATION: &str = "Configuration validation";
pub const INTENTIONAL_FAILURE: &str = "Intentional failure";

pub fn directory_check_name(dir: &std::path::Path) -> String {
    format!("Directory exists: {}", dir.display())
}

pub struct DashboardSuite<R: RngCore = StdRng> {
    config: HarnessConfig,
    env: EnvSnapshot,
    rng: R,
    include_intentional_failure: bool,
    echo: bool,
}

impl DashboardSuite<StdRng> {
    /// Seeded from `config.seed`, or from OS entropy when no seed is set.
    pub fn new(config: HarnessConfig, env: EnvSnapshot) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, env, rng)
    }
}

impl<R: RngCore> DashboardSuite<R> {
    pub fn with_rng(config: HarnessConfig, env: EnvSnapshot, rng: R) -> Self {
        Self {
            config,
            env,
            rng,
            include_intentional_failure: false,
            echo: true,
        }
    }

    pub fn with_intentional_failure(mut self, enabled: bool) -> Self {
        self.include_intentional_failure = enabled;
        self
    }

    /// Suppress per-check console lines.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Names of the checks `run_all` registers, in order, assuming the
    /// document loads.
    pub fn check_names(&self) -> Vec<String> {
        let mut names: Vec<String> = [
            LOAD_DOCUMENT,
            PAGE_TITLE,
            PAGE_HEADER,
            DASHBOARD_CARDS,
            ENVIRONMENT_STATUS,
            RESPONSIVE_DESIGN,
            PAGE_LOAD_TIME,
            ENVIRONMENT_DETECTION,
            RUNTIME_VERSION,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        names.extend(
            self.config
                .expected_dirs
                .iter()
                .map(|dir| directory_check_name(dir)),
        );
        if self.config.deployment_checks {
            names.extend(
                [SECURITY_HEADERS, SERVICE_DEPENDENCIES, CONFIGURATION_VALIDATION]
                    .iter()
                    .map(|s| s.to_string()),
            );
        }
        if self.include_intentional_failure {
            names.push(INTENTIONAL_FAILURE.to_string());
        }
        names
    }

    pub fn run_all(&mut self) -> TestResults {
        info!(html = %self.config.html_path.display(), "Starting DevOps tests...");
        let mut runner = if self.echo {
            CheckRunner::new()
        } else {
            CheckRunner::quiet()
        };

        let document = self.test_html_elements(&mut runner);
        self.test_performance(&mut runner);
        self.test_environment_features(&mut runner, document.as_ref());
        if self.config.deployment_checks {
            self.test_critical_deployment_requirements(&mut runner);
        }

        if self.include_intentional_failure {
            simulate_failing_test(&mut runner);
        }

        runner.finish()
    }

    fn test_html_elements(&self, runner: &mut CheckRunner) -> Option<PageDocument> {
        let path = &self.config.html_path;
        let mut document = None;

        runner.run_check(LOAD_DOCUMENT, || {
            let loaded = PageDocument::load(path).map_err(|e| {
                CheckError::new(format!(
                    "Failed to load HTML document {}: {}",
                    path.display(),
                    e
                ))
            })?;
            document = Some(loaded);
            Ok(())
        });

        let Some(doc) = document.as_ref() else {
            warn!(html = %path.display(), "skipping structural checks");
            return None;
        };

        runner.run_check(PAGE_TITLE, || check_title(doc, &self.config.title_keyword));
        runner.run_check(PAGE_HEADER, || check_header(doc));
        runner.run_check(DASHBOARD_CARDS, || check_cards(doc, self.config.min_cards));
        runner.run_check(ENVIRONMENT_STATUS, || check_build_info(doc));
        runner.run_check(RESPONSIVE_DESIGN, || check_viewport(doc));

        document
    }

    fn test_performance(&mut self, runner: &mut CheckRunner) {
        let threshold = self.config.load_time_threshold_ms;
        let rng = &mut self.rng;

        runner.run_check(PAGE_LOAD_TIME, || {
            let load_time = simulate_load_time(rng);
            info!("Page load time: {:.2}ms", load_time);
            check_load_time(load_time, threshold)
        });
    }

    fn test_environment_features(
        &mut self,
        runner: &mut CheckRunner,
        document: Option<&PageDocument>,
    ) {
        let configured = self.config.environment.clone();
        let build_id = self.env.build_id.clone();
        let rng = &mut self.rng;

        runner.run_check(ENVIRONMENT_DETECTION, || {
            let info = BuildInfo::resolve(configured, build_id, rng);

            let has_build_number = match document {
                Some(doc) => doc.exists(BUILD_NUMBER_SELECTOR)?,
                None => false,
            };
            if has_build_number {
                info!(build_number = %info, "build info");
            } else {
                debug!(build_number = %info, "no build number element to update");
            }
            Ok(())
        });

        let minimum = &self.config.min_runtime_version;
        let actual = self.env.runtime_version.as_deref();
        runner.run_check(RUNTIME_VERSION, || check_runtime_version(actual, minimum));

        for dir in &self.config.expected_dirs {
            let ci = self.env.ci;
            runner.run_check(&directory_check_name(dir), || check_directory(dir, ci));
        }
    }

    fn test_critical_deployment_requirements(&self, runner: &mut CheckRunner) {
        runner.run_check(SECURITY_HEADERS, || {
            check_security_headers(&REQUIRED_SECURITY_HEADERS, &MOCK_PRESENT_HEADERS)
        });
        runner.run_check(SERVICE_DEPENDENCIES, || {
            check_service_dependencies(&REQUIRED_SERVICES, &MOCK_SERVICE_STATUS)
        });
        runner.run_check(CONFIGURATION_VALIDATION, || {
            check_configuration(&MOCK_CONFIG_ERRORS)
        });
    }
}

fn simulate_failing_test(runner: &mut CheckRunner) {
    runner.run_check(INTENTIONAL_FAILURE, || {
        Err(CheckError::new("This test was designed to fail"))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn suite_without_document() -> DashboardSuite<StepRng> {
        let config = HarnessConfig::default()
            .with_html_path("/nonexistent/dashboard/index.html")
            .with_expected_dirs(Vec::<String>::new());
        let env = EnvSnapshot::default().with_runtime_version("1.80.0");
        DashboardSuite::with_rng(config, env, StepRng::new(0, 1)).quiet()
    }

    #[test]
    fn test_missing_document_skips_structural_checks() {
        let results = suite_without_document().run_all();

        let names: Vec<_> = results.failures().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                LOAD_DOCUMENT,
                SECURITY_HEADERS,
                SERVICE_DEPENDENCIES,
                CONFIGURATION_VALIDATION
            ]
        );
        // load gate, load time, environment detection, runtime version, 3 mocks
        assert_eq!(results.total(), 7);
        assert_eq!(results.passed(), 3);
        assert!(results.failures()[0]
            .error
            .starts_with("Failed to load HTML document /nonexistent/dashboard/index.html"));
    }

    #[test]
    fn test_intentional_failure_is_last() {
        let results = suite_without_document()
            .with_intentional_failure(true)
            .run_all();

        let last = results.failures().last().unwrap();
        assert_eq!(last.name, INTENTIONAL_FAILURE);
        assert_eq!(last.error, "This test was designed to fail");
    }

    #[test]
    fn test_check_names_follow_configuration() {
        let config = HarnessConfig::default().with_expected_dirs(["reports", "logs"]);
        let suite = DashboardSuite::with_rng(config, EnvSnapshot::default(), StepRng::new(0, 1))
            .with_intentional_failure(true);

        let names = suite.check_names();
        assert_eq!(names.first().map(String::as_str), Some(LOAD_DOCUMENT));
        assert!(names.contains(&"Directory exists: reports".to_string()));
        assert!(names.contains(&"Directory exists: logs".to_string()));
        assert_eq!(names.last().map(String::as_str), Some(INTENTIONAL_FAILURE));
        assert_eq!(names[2], PAGE_HEADER);
        assert_eq!(names.len(), 15);
    }

    #[test]
    fn test_deployment_checks_can_be_disabled() {
        let results = {
            let config = HarnessConfig::default()
                .with_html_path("/nonexistent/dashboard/index.html")
                .with_expected_dirs(Vec::<String>::new())
                .with_deployment_checks(false);
            let env = EnvSnapshot::default().with_runtime_version("1.80.0");
            DashboardSuite::with_rng(config, env, StepRng::new(0, 1))
                .quiet()
                .run_all()
        };

        assert_eq!(results.total(), 4);
        assert_eq!(results.failed(), 1);
        assert_eq!(results.failures()[0].name, LOAD_DOCUMENT);
    }
}
