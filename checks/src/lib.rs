pub mod config;
pub mod document;
pub mod env;
pub mod error;
pub mod report;
pub mod results;
pub mod runner;

pub use config::HarnessConfig;
pub use document::PageDocument;
pub use env::{detect_runtime_version, EnvSnapshot, RuntimeVersion};
pub use error::{ensure, CheckError, CheckResult, HarnessError, HarnessResult};
pub use report::{print_summary, render_json, render_summary};
pub use results::{FailureRecord, TestResults};
pub use runner::CheckRunner;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::document::*;
    pub use crate::env::*;
    pub use crate::error::*;
    pub use crate::report::*;
    pub use crate::results::*;
    pub use crate::runner::*;
}
