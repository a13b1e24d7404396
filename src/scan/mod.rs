pub mod executor;
pub mod simulator;
pub mod target;
pub mod tool;

pub use executor::{ExecutorConfig, ScanExecutor, ScanOutcome};
pub use target::ScanTarget;
pub use tool::ToolIdentifier;
