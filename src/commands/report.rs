//! JSON run report

use crate::types::{RenamerError, RunResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `result` as pretty-printed JSON to `path`, creating parent
/// directories as needed
pub fn write_report(path: &Path, result: &RunResult) -> Result<(), RenamerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)
        .map_err(|e| RenamerError::Report(format!("Failed to serialize report: {}", e)))?;
    writer.flush()?;
    Ok(())
}
