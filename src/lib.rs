pub mod cli;
pub mod config;
pub mod transpiler;

// Re-export commonly used types
pub use config::Config;
pub use transpiler::{transpile, transpile_file, CompileReport, TranspileError};
