//! Output formatters for probe runs
//!
//! Provides table, JSON and brief output, plus a CSV export of individual
//! iterations.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::models::{CheckStats, IterationReport, RunSummary};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Run summary formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a run summary
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_check_row(&self, stats: &CheckStats) -> String {
        let symbol = match (stats.fails == 0, self.colorize) {
            (true, true) => "\x1b[32m✓\x1b[0m",
            (true, false) => "✓",
            (false, true) => "\x1b[31m✗\x1b[0m",
            (false, false) => "✗",
        };
        format!(
            "{} {:32} {:>6} passed {:>6} failed ({:5.1}%)",
            symbol,
            stats.name,
            stats.passes,
            stats.fails,
            stats.pass_rate()
        )
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str("\n╔══════════════════════════════════════════════════════════════════════╗\n");
        output.push_str(&format!(
            "║  {:20} started {:40} ║\n",
            summary.scenario.name(),
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
        ));
        output.push_str("╠══════════════════════════════════════════════════════════════════════╣\n");

        for stats in &summary.checks {
            output.push_str(&format!("  {}\n", self.format_check_row(stats)));
        }

        output.push_str("╠══════════════════════════════════════════════════════════════════════╣\n");

        let aborted_str = if self.colorize && summary.aborted > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.aborted)
        } else {
            summary.aborted.to_string()
        };

        output.push_str(&format!(
            "  Iterations: {} | Completed: {} | Aborted: {} | Duration: {}ms\n",
            summary.iterations, summary.completed, aborted_str, summary.total_duration_ms
        ));
        output.push_str("╚══════════════════════════════════════════════════════════════════════╝\n");

        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        let checks: usize = summary.checks.iter().map(CheckStats::total).sum();
        format!(
            "{}: {} iteration(s), {} aborted, {}/{} checks passed in {}ms",
            summary.scenario.name(),
            summary.iterations,
            summary.aborted,
            checks - summary.failed_checks(),
            checks,
            summary.total_duration_ms
        )
    }
}

/// One CSV row per iteration
#[derive(Serialize)]
struct IterationRow<'a> {
    iteration: u32,
    order_id: &'a str,
    checks_passed: usize,
    checks_failed: usize,
    aborted: bool,
    abort_reason: &'a str,
    duration_ms: u64,
}

impl<'a> From<&'a IterationReport> for IterationRow<'a> {
    fn from(report: &'a IterationReport) -> Self {
        let failed = report.failed_checks();
        Self {
            iteration: report.iteration,
            order_id: report.order_id.as_deref().unwrap_or(""),
            checks_passed: report.checks.len() - failed,
            checks_failed: failed,
            aborted: report.is_aborted(),
            abort_reason: report
                .aborted
                .as_ref()
                .map(|a| a.reason.as_str())
                .unwrap_or(""),
            duration_ms: report.duration_ms,
        }
    }
}

/// Save a run to disk: `.csv` gets per-iteration rows, anything else the
/// full summary as JSON
pub fn save_summary(summary: &RunSummary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let is_csv = path.extension().map(|e| e == "csv").unwrap_or(false);

    if is_csv {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for report in &summary.reports {
            writer.serialize(IterationRow::from(report))?;
        }
        writer.flush()?;
    } else {
        let content =
            serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckResult, ScenarioKind};
    use chrono::Utc;
    use tempfile::tempdir;

    fn summary() -> RunSummary {
        let reports = vec![
            IterationReport::new(
                1,
                vec![
                    CheckResult::pass("is status payment 200"),
                    CheckResult::pass("is status check payment 200"),
                ],
            )
            .with_order_id("1700000000000"),
            IterationReport::new(2, vec![CheckResult::fail("is status payment 200", "status 500")])
                .with_abort("payment failed", None),
        ];
        RunSummary::new(ScenarioKind::Payment, Utc::now(), reports, 2000)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("json-pretty"), Some(OutputFormat::JsonPretty));
        assert_eq!(OutputFormat::from_str("xml"), None);
    }

    #[test]
    fn test_brief_format() {
        let text = ResultFormatter::new(OutputFormat::Summary).format_summary(&summary());
        assert_eq!(
            text,
            "Payment Flow: 2 iteration(s), 1 aborted, 2/3 checks passed in 2000ms"
        );
    }

    #[test]
    fn test_table_format_lists_checks() {
        let text = ResultFormatter::new(OutputFormat::Table)
            .no_color()
            .format_summary(&summary());
        assert!(text.contains("✗ is status payment 200"));
        assert!(text.contains("✓ is status check payment 200"));
        assert!(text.contains("Aborted: 1"));
    }

    #[test]
    fn test_table_format_colors_by_default() {
        let colored = ResultFormatter::new(OutputFormat::Table).format_summary(&summary());
        assert!(colored.contains("\x1b[31m✗\x1b[0m is status payment 200"));

        let plain = ResultFormatter::new(OutputFormat::Table)
            .no_color()
            .format_summary(&summary());
        assert!(!plain.contains('\x1b'));
    }

    #[test]
    fn test_json_format() {
        let text = ResultFormatter::new(OutputFormat::Json).format_summary(&summary());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["scenario"], "payment");
        assert_eq!(value["aborted"], 1);
    }

    #[test]
    fn test_save_csv_and_json() {
        let dir = tempdir().unwrap();

        let csv_path = dir.path().join("run.csv");
        save_summary(&summary(), &csv_path).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("iteration,order_id,checks_passed,checks_failed,aborted,abort_reason,duration_ms")
        );
        assert_eq!(lines.next(), Some("1,1700000000000,2,0,false,,0"));
        assert_eq!(lines.next(), Some("2,,0,1,true,payment failed,0"));

        let json_path = dir.path().join("run.json");
        save_summary(&summary(), &json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["reports"].as_array().unwrap().len(), 2);
    }
}
