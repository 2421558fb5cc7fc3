//! Console output formatter for run results

use chatcheck_domain::{RunOutcome, RunSummary};
use colored::Colorize;
use std::path::Path;

/// Formats the final run outcome for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format(
        outcome: &RunOutcome,
        summary: Option<&RunSummary>,
        json_path: &Path,
        html_path: Option<&Path>,
    ) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Run Results"));
        output.push('\n');

        if let Some(summary) = summary {
            output.push_str(&format!(
                "{} {} via {}\n",
                "Target:".cyan().bold(),
                summary.target,
                summary.surface
            ));
            output.push_str(&format!(
                "{} {}  {} {}\n",
                "Tester:".cyan().bold(),
                summary.tester,
                "Judge:".cyan().bold(),
                summary.judged_by
            ));
            if let Some(duration) = &summary.duration {
                output.push_str(&format!("{} {}\n", "Duration:".cyan().bold(), duration));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "{} {}   {} {}   {} {}\n",
            "Attempted:".bold(),
            outcome.attempted,
            "Passed:".green().bold(),
            outcome.passed,
            "Failed:".red().bold(),
            outcome.failed
        ));

        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Report:".cyan().bold(),
            json_path.display()
        ));
        if let Some(html) = html_path {
            output.push_str(&format!("{}   {}\n", "HTML:".cyan().bold(), html.display()));
        }

        output.push_str(&Self::footer());
        output
    }

    fn header(title: &str) -> String {
        format!("\n{}\n{}\n", title.bold(), "=".repeat(title.len()))
    }

    fn footer() -> String {
        format!("{}\n", "-".repeat(40).dimmed())
    }
}
