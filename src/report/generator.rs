//! Report generation.
//!
//! Renders a [`CheckReport`] as plain text or JSON.

use crate::models::CheckReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Generate a plain text report.
pub fn generate_text_report(report: &CheckReport) -> String {
    let mut output = String::new();
    let metadata = &report.metadata;

    output.push_str(&format!(
        "Checked {} files in {:.2}s ({})\n",
        metadata.files_checked,
        metadata.duration_seconds,
        metadata.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    match &report.failures {
        None => output.push_str("All checks passed.\n"),
        Some(failures) => {
            output.push_str(&format!("{} failed:\n", metadata.files_failed));
            for message in failures.messages() {
                output.push_str(&format!("  - {}\n", message));
            }
            output.push_str(&format!("\nError: {}\n", failures));
        }
    }

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &CheckReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Write a rendered report to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchOutcome;
    use crate::ErrorAggregator;

    fn create_test_report(messages: &[&str]) -> CheckReport {
        let errors: ErrorAggregator = messages.iter().copied().collect();
        let outcome = BatchOutcome {
            total: 5,
            failed: errors.len(),
            result: errors.into_result(),
        };
        CheckReport::from_outcome(outcome, 0.5)
    }

    #[test]
    fn test_text_report_passed() {
        let report = create_test_report(&[]);
        let text = generate_text_report(&report);

        assert!(report.passed());
        assert!(text.starts_with("Checked 5 files in 0.50s"));
        assert!(text.contains("All checks passed."));
    }

    #[test]
    fn test_text_report_failed() {
        let report = create_test_report(&["a.txt: does not exist", "b.txt: file is empty"]);
        let text = generate_text_report(&report);

        assert!(text.contains("2 failed:"));
        assert!(text.contains("  - a.txt: does not exist\n"));
        assert!(text.contains("Error: a.txt: does not exist, b.txt: file is empty"));
    }

    #[test]
    fn test_json_report() {
        let report = create_test_report(&["boom"]);
        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["files_checked"], 5);
        assert_eq!(value["metadata"]["files_failed"], 1);
        assert_eq!(value["failures"]["messages"][0], "boom");

        let passed = generate_json_report(&create_test_report(&[])).unwrap();
        assert!(!passed.contains("failures"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        write_report("hello", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}
