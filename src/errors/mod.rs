pub mod types;

pub use types::ScandeckError;
