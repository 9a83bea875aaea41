//! Run-scoped accumulation of check outcomes.

use serde::{Deserialize, Serialize};

/// A single failed check, in the order it ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub name: String,
    pub error: String,
}

/// Pass/fail counts for one harness run.
///
/// Only [`TestResults::record_pass`] and [`TestResults::record_failure`]
/// mutate the counts, so `passed + failed == total` and
/// `failures.len() == failed` always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResults {
    passed: usize,
    failed: usize,
    total: usize,
    failures: Vec<FailureRecord>,
}

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self) {
        self.passed += 1;
        self.total += 1;
    }

    pub fn record_failure(&mut self, name: impl Into<String>, error: impl Into<String>) {
        self.failed += 1;
        self.total += 1;
        self.failures.push(FailureRecord {
            name: name.into(),
            error: error.into(),
        });
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_results_are_successful() {
        let results = TestResults::new();
        assert_eq!(results.total(), 0);
        assert!(results.failures().is_empty());
        assert!(results.is_success());
    }

    #[test]
    fn test_record_failure_keeps_name_and_error() {
        let mut results = TestResults::new();
        results.record_pass();
        results.record_failure("Check page title", "Title element not found or incorrect");

        assert_eq!(results.passed(), 1);
        assert_eq!(results.failed(), 1);
        assert_eq!(results.total(), 2);
        assert!(!results.is_success());
        assert_eq!(
            results.failures(),
            &[FailureRecord {
                name: "Check page title".to_string(),
                error: "Title element not found or incorrect".to_string(),
            }]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let mut results = TestResults::new();
        results.record_failure("Intentional failure", "This test was designed to fail");

        let value = serde_json::to_value(&results).unwrap();
        assert_eq!(value["passed"], 0);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["total"], 1);
        assert_eq!(value["failures"][0]["name"], "Intentional failure");
        assert_eq!(value["failures"][0]["error"], "This test was designed to fail");
    }

    proptest! {
        #[test]
        fn counts_stay_consistent(outcomes in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut results = TestResults::new();
            for (i, passed) in outcomes.iter().enumerate() {
                if *passed {
                    results.record_pass();
                } else {
                    results.record_failure(format!("check-{i}"), "failed");
                }
            }

            let failing = outcomes.iter().filter(|p| !**p).count();
            prop_assert_eq!(results.total(), outcomes.len());
            prop_assert_eq!(results.failed(), failing);
            prop_assert_eq!(results.passed(), outcomes.len() - failing);
            prop_assert_eq!(results.passed() + results.failed(), results.total());
            prop_assert_eq!(results.failures().len(), results.failed());
        }
    }
}
