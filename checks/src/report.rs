//! Summary rendering for a finished run.

use crate::error::HarnessResult;
use crate::results::TestResults;
use tracing::{error, info};

/// Render the human-readable summary block.
pub fn render_summary(results: &TestResults) -> String {
    let mut out = format!(
        "\n==== TEST SUMMARY ====\nTotal tests: {}\nPassed: {}\nFailed: {}\n",
        results.total(),
        results.passed(),
        results.failed()
    );

    if !results.failures().is_empty() {
        out.push_str("\nFailures:\n");
        for (index, failure) in results.failures().iter().enumerate() {
            out.push_str(&format!("{}. {}: {}\n", index + 1, failure.name, failure.error));
        }
    }

    out.push_str("=====================\n");
    out
}

/// Render the result record as pretty-printed JSON.
pub fn render_json(results: &TestResults) -> HarnessResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Print the summary and return the run's success signal.
pub fn print_summary(results: &TestResults) -> bool {
    print!("{}", render_summary(results));

    info!(
        total = results.total(),
        passed = results.passed(),
        failed = results.failed(),
        "check run complete"
    );

    if !results.is_success() {
        eprintln!("Tests failed! Pipeline should stop.");
        error!(failed = results.failed(), "checks failed");
    }

    results.is_success()
}
