//! Common test utilities

use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Read a band's log file as parsed JSON records. A missing file means no
/// records were emitted through that sink.
pub fn read_json_records(path: &Path) -> Vec<Value> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .map(|line| serde_json::from_str(line).expect("log line should be valid JSON"))
        .collect()
}

/// The message field of each record, in file order.
pub fn messages(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            record["fields"]["message"]
                .as_str()
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}
