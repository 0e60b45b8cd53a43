use crate::convert::ConversionTarget;
use crate::statistics::RunStatistics;

use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_TEMPLATE: &str = "[{bar:30}] {percent}% | {pos}/{len} files";

/// Single-line progress bar for a conversion run. The total may grow while the walk discovers more files.
pub struct Reporter {
    progress_bar: ProgressBar,
}

impl Reporter {
    pub fn new(initial_total: u64) -> Self {
        let progress_bar = ProgressBar::new(initial_total);
        progress_bar.set_style(
            ProgressStyle::with_template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        Self { progress_bar }
    }

    /// Draws nothing; used by tests and embedders that only want the statistics.
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
        }
    }

    pub fn total(&self) -> u64 {
        self.progress_bar.length().unwrap_or(0)
    }

    /// Grows the total to at least `total`.
    pub fn reveal_total(&self, total: u64) {
        if total > self.total() {
            self.progress_bar.set_length(total);
        }
    }

    pub fn advance(&self, statistics: &RunStatistics) {
        self.progress_bar.set_position(statistics.processed_files);
    }

    /// Runs `f` with the bar cleared so log output does not tear it.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.progress_bar.suspend(f)
    }

    pub fn finish(&self) {
        self.progress_bar.finish();
    }
}

pub fn print_run_summary(statistics: &RunStatistics, target: ConversionTarget) {
    println!();
    println!("==============================");
    println!("Files processed:   {}", statistics.processed_files);
    println!("Files copied:      {}", statistics.copied_files);
    println!("Files converted:   {} (to {})", statistics.converted_files, target.name());
    println!("Files with errors: {}", statistics.failed_files);
    println!("Time taken:        {:.2} seconds", statistics.elapsed().as_secs_f64());
    println!("==============================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::FileOutcome;

    #[test]
    fn total_only_grows() {
        let reporter = Reporter::hidden();
        reporter.reveal_total(4);
        reporter.reveal_total(2);

        assert_eq!(reporter.total(), 4);
    }

    #[test]
    fn advance_follows_processed_files() {
        let reporter = Reporter::new(2);
        let mut statistics = RunStatistics::new();
        statistics.record(FileOutcome::Converted);

        reporter.advance(&statistics);

        assert_eq!(reporter.progress_bar.position(), 1);
    }
}
