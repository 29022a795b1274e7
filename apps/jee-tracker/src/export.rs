//! JSON snapshot of the dashboard.

use crate::dashboard::DashboardSummary;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for a snapshot taken at `at`.
pub fn snapshot_file_name(at: DateTime<Utc>) -> String {
    format!("jee-tracker-{}.json", at.format("%Y%m%d-%H%M%S"))
}

/// Write `summary` as pretty JSON into `dir`, creating it if needed.
/// Returns the path written.
pub fn export_snapshot(summary: &DashboardSummary, dir: &Path) -> Result<PathBuf> {
    export_snapshot_at(summary, dir, Utc::now())
}

pub fn export_snapshot_at(
    summary: &DashboardSummary,
    dir: &Path,
    at: DateTime<Utc>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(snapshot_file_name(at));
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "dashboard snapshot exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::ExamCountdown;
    use crate::fixtures::Dataset;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn summary() -> DashboardSummary {
        let today = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let exam = NaiveDate::from_ymd_opt(2025, 1, 24).unwrap();
        DashboardSummary::build(
            &Dataset::sample(),
            today,
            ExamCountdown::new("JEE Mains", exam, today),
        )
    }

    #[test]
    fn test_file_name() {
        let at = DateTime::from_timestamp(1_734_400_000, 0).unwrap();
        assert_eq!(snapshot_file_name(at), "jee-tracker-20241217-014640.json");
    }

    #[test]
    fn test_export_writes_json() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("exports");
        let path = export_snapshot(&summary(), &nested).unwrap();

        assert!(path.starts_with(&nested));
        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["overall_progress"], 15);
        assert_eq!(value["tasks_total"], 3);
        assert_eq!(value["latest_test"]["id"], "test1");
        assert_eq!(value["todays_tasks"][0]["slot"], "6:00-8:00");
    }
}
