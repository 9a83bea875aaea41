//! Executes named checks and records their outcomes.
//!
//! A runner is created per harness invocation. Every check handed to
//! [`CheckRunner::run_check`] runs to completion, whether or not earlier ones
//! failed, so the final [`TestResults`] lists all failures of the run.
//!
//! ```rust
//! use checks::{ensure, CheckRunner};
//!
//! let mut runner = CheckRunner::new();
//! runner.run_check("Always passes", || Ok(()));
//! runner.run_check("Always fails", || ensure(false, "nope"));
//!
//! let results = runner.finish();
//! assert_eq!(results.total(), 2);
//! assert_eq!(results.failures()[0].error, "nope");
//! ```

use crate::error::CheckResult;
use crate::results::TestResults;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct CheckRunner {
    results: TestResults,
    /// Print per-check lines to the console
    echo: bool,
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRunner {
    pub fn new() -> Self {
        Self {
            results: TestResults::new(),
            echo: true,
        }
    }

    /// A runner that only reports through `tracing`, for machine-readable output.
    pub fn quiet() -> Self {
        Self {
            results: TestResults::new(),
            echo: false,
        }
    }

    /// Run `check` once and record the outcome under `name`.
    ///
    /// Returns `true` when the check passed. A panic inside the check is
    /// recorded as a failure carrying the panic message.
    pub fn run_check<F>(&mut self, name: &str, check: F) -> bool
    where
        F: FnOnce() -> CheckResult,
    {
        if self.echo {
            println!("Running test: {}", name);
        }
        let started = Instant::now();

        // The process-wide panic hook still reports the panic on stderr.
        let outcome = match panic::catch_unwind(AssertUnwindSafe(check)) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.message().to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        };

        debug!(check = name, elapsed = ?started.elapsed(), "check finished");

        match outcome {
            Ok(()) => {
                if self.echo {
                    println!("✓ PASSED: {}", name);
                }
                self.results.record_pass();
                true
            }
            Err(message) => {
                if self.echo {
                    eprintln!("× FAILED: {}", name);
                    eprintln!("  Error: {}", message);
                } else {
                    warn!(check = name, error = %message, "check failed");
                }
                self.results.record_failure(name, message);
                false
            }
        }
    }

    pub fn results(&self) -> &TestResults {
        &self.results
    }

    pub fn finish(self) -> TestResults {
        self.results
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked".to_string()
    }
}
