//! Top-level commands

pub mod rename;
pub mod report;

pub use rename::run;
pub use report::write_report;
