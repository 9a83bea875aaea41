//! Deployment requirement checks backed by fixed mock data.
//!
//! Nothing here probes a real service. The built-in mocks describe a
//! deployment that is missing two security headers, has `auth-service`
//! disconnected and carries two configuration errors, so the corresponding
//! checks always fail. They exist to exercise failure reporting.

use checks::{ensure, CheckResult};

pub const REQUIRED_SECURITY_HEADERS: [&str; 3] = [
    "Content-Security-Policy",
    "X-XSS-Protection",
    "X-Content-Type-Options",
];

pub const MOCK_PRESENT_HEADERS: [&str; 1] = ["X-Content-Type-Options"];

pub const REQUIRED_SERVICES: [&str; 4] = ["database", "cache", "auth-service", "logging"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Connected,
    Disconnected,
}

pub const MOCK_SERVICE_STATUS: [(&str, ServiceStatus); 4] = [
    ("database", ServiceStatus::Connected),
    ("cache", ServiceStatus::Connected),
    ("auth-service", ServiceStatus::Disconnected),
    ("logging", ServiceStatus::Connected),
];

pub const MOCK_CONFIG_ERRORS: [&str; 2] = [
    "Missing required environment variable: API_KEY",
    "Invalid logging level specified",
];

pub fn check_security_headers(required: &[&str], present: &[&str]) -> CheckResult {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|header| !present.iter().any(|p| p.eq_ignore_ascii_case(header)))
        .collect();

    ensure(
        missing.is_empty(),
        format!("Missing required security headers: {}", missing.join(", ")),
    )
}

/// A service counts as unavailable unless it is listed as connected.
pub fn check_service_dependencies(
    required: &[&str],
    statuses: &[(&str, ServiceStatus)],
) -> CheckResult {
    let unavailable: Vec<&str> = required
        .iter()
        .copied()
        .filter(|service| {
            !statuses
                .iter()
                .any(|(name, status)| name == service && *status == ServiceStatus::Connected)
        })
        .collect();

    ensure(
        unavailable.is_empty(),
        format!("Critical services unavailable: {}", unavailable.join(", ")),
    )
}

pub fn check_configuration(errors: &[&str]) -> CheckResult {
    ensure(
        errors.is_empty(),
        format!("Configuration errors detected: {}", errors.join("; ")),
    )
}
