pub mod deployment;
pub mod environment;
pub mod structure;
pub mod suite;

pub use deployment::{
    check_configuration, check_security_headers, check_service_dependencies, ServiceStatus,
};
pub use environment::{check_directory, check_load_time, check_runtime_version, BuildInfo};
pub use structure::{check_build_info, check_cards, check_header, check_title, check_viewport};
pub use suite::DashboardSuite;
