use std::time::{Duration, Instant};

/// What happened to one eligible source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Copied,
    Converted,
    Failed,
}

#[derive(Debug)]
pub struct RunStatistics {
    pub total_files: u64,
    pub processed_files: u64,
    pub copied_files: u64,
    pub converted_files: u64,
    pub failed_files: u64,
    pub started_at: Instant,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self {
            total_files: 0,
            processed_files: 0,
            copied_files: 0,
            converted_files: 0,
            failed_files: 0,
            started_at: Instant::now(),
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Copied => self.copied_files += 1,
            FileOutcome::Converted => self.converted_files += 1,
            FileOutcome::Failed => self.failed_files += 1,
        }
        self.processed_files += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// `processed == copied + converted + failed` and `processed <= total`.
    pub fn is_consistent(&self) -> bool {
        self.processed_files == self.copied_files + self.converted_files + self.failed_files
            && self.processed_files <= self.total_files
    }
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct VerifyStatistics {
    pub directories: u64,
    pub total_files: u64,
    pub matching_files: u64,
    pub mismatched_files: u64,
    pub invalid_files: u64,
}
