//! Progress reporting for the upload-then-analyze flow.
//!
//! The reading phase reports real percentages from bytes read. The analyzing
//! phase has nothing real to measure, so it runs a synthetic estimate that
//! creeps toward 99 and only reaches 100 when the response actually arrives.
//! Cosmetic, not a timing guarantee.

/// Map bytes read / bytes total to a whole percentage.
pub fn read_percent(bytes_read: u64, bytes_total: u64) -> u8 {
    if bytes_total == 0 {
        return 100;
    }
    let percent = (bytes_read as f64 / bytes_total as f64 * 100.0).round();
    percent.min(100.0) as u8
}

/// Synthetic analyzing-phase progress: monotone, asymptotic to 99.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisProgress {
    percent: f64,
}

impl AnalysisProgress {
    pub fn new() -> Self {
        Self { percent: 0.0 }
    }

    /// Advance one step; slows as it approaches 99.
    pub fn tick(&mut self) -> f64 {
        if self.percent < 99.0 {
            let remaining = 100.0 - self.percent;
            self.percent = (self.percent + (remaining * 0.05).max(0.1)).min(99.0);
        }
        self.percent
    }

    /// Force completion once the response has landed.
    pub fn finish(&mut self) -> f64 {
        self.percent = 100.0;
        self.percent
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_percent_is_bounded() {
        assert_eq!(read_percent(0, 100), 0);
        assert_eq!(read_percent(50, 100), 50);
        assert_eq!(read_percent(100, 100), 100);
        assert_eq!(read_percent(200, 100), 100);
        assert_eq!(read_percent(0, 0), 100);
    }

    #[test]
    fn synthetic_progress_is_monotone_and_capped() {
        let mut progress = AnalysisProgress::new();
        let mut last = 0.0;
        for _ in 0..10_000 {
            let now = progress.tick();
            assert!(now >= last);
            assert!(now <= 99.0);
            last = now;
        }
        // Asymptote: lots of ticks get close to but never past 99.
        assert!(last > 95.0);
        assert_eq!(progress.finish(), 100.0);
    }
}
