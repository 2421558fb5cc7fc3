//! Progress reporting for chatcheck runs

use chatcheck_application::ports::progress::RunProgress;
use chatcheck_domain::{ExchangeResult, RunOutcome, Verdict};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports run progress with a question-level progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    total_questions: u64,
}

impl ProgressReporter {
    pub fn new(total_questions: usize) -> Self {
        Self {
            bar: Mutex::new(None),
            total_questions: total_questions as u64,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn verdict_mark(status: &Verdict) -> String {
        match status {
            Verdict::Pass => "v".green().to_string(),
            Verdict::Fail => "x".red().to_string(),
            Verdict::Error => "!".yellow().to_string(),
        }
    }
}

impl RunProgress for ProgressReporter {
    fn on_topic_started(&self, title: &str, ordinal: usize, total: usize) {
        let mut guard = self.bar.lock().unwrap();
        let bar = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new(self.total_questions);
            pb.set_style(Self::bar_style());
            pb
        });
        bar.set_prefix(format!("Topic {}/{}", ordinal, total));
        bar.set_message(title.to_string());
    }

    fn on_exchange_recorded(&self, result: &ExchangeResult) {
        if let Some(bar) = self.bar.lock().unwrap().as_ref() {
            bar.set_message(format!(
                "{} {}",
                Self::verdict_mark(&result.status),
                result.question_key
            ));
            bar.inc(1);
        }
    }

    fn on_run_completed(&self, outcome: &RunOutcome) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_with_message(format!(
                "{} ({} passed, {} failed)",
                "done".green(),
                outcome.passed,
                outcome.failed
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RunProgress for SimpleProgress {
    fn on_topic_started(&self, title: &str, ordinal: usize, total: usize) {
        println!("{} [{}/{}] {}", "->".cyan(), ordinal, total, title.bold());
    }

    fn on_exchange_recorded(&self, result: &ExchangeResult) {
        let mark = match result.status {
            Verdict::Pass => "v".green(),
            Verdict::Fail => "x".red(),
            Verdict::Error => "!".yellow(),
        };
        println!(
            "  {} {} (score {:.0}, {} ms)",
            mark, result.question_key, result.score, result.duration_ms
        );
    }

    fn on_topic_completed(&self, _title: &str, duration: Duration) {
        println!("  {} {:.1}s", "topic done in".dimmed(), duration.as_secs_f64());
    }

    fn on_run_completed(&self, outcome: &RunOutcome) {
        println!(
            "\n{} attempted, {} passed, {} failed",
            outcome.attempted,
            outcome.passed.to_string().green(),
            outcome.failed.to_string().red()
        );
    }
}
