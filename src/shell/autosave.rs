//! Autosave countdown
//!
//! Driven by elapsed time like a fixed-timestep accumulator: the caller feeds
//! in wall-clock deltas and gets back how many save periods have completed.

/// Countdown that fires once per full interval while enabled
#[derive(Debug, Clone, PartialEq)]
pub struct AutosaveTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl AutosaveTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Restart the countdown from zero
    pub fn rearm(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Advance by `dt_ms`. Returns the number of saves now due.
    ///
    /// While disabled the countdown stays cancelled and never accumulates.
    pub fn advance(&mut self, dt_ms: f64, enabled: bool) -> u32 {
        if !enabled || self.interval_ms <= 0.0 {
            self.elapsed_ms = 0.0;
            return 0;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let mut due = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = AutosaveTimer::new(60_000.0);
        let mut saves = 0;
        for _ in 0..180 {
            saves += timer.advance(1_000.0, true);
        }
        assert_eq!(saves, 3);
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut timer = AutosaveTimer::new(60_000.0);
        assert_eq!(timer.advance(600_000.0, false), 0);
        assert_eq!(timer.advance(59_000.0, true), 0);
        assert_eq!(timer.advance(1_000.0, true), 1);
    }

    #[test]
    fn test_disable_cancels_pending_progress() {
        let mut timer = AutosaveTimer::new(60_000.0);
        timer.advance(59_000.0, true);
        timer.advance(1_000.0, false);
        assert_eq!(timer.advance(1_000.0, true), 0);
    }

    #[test]
    fn test_rearm_restarts_countdown() {
        let mut timer = AutosaveTimer::new(60_000.0);
        timer.advance(50_000.0, true);
        timer.rearm();
        assert_eq!(timer.advance(50_000.0, true), 0);
        assert_eq!(timer.advance(10_000.0, true), 1);
    }

    #[test]
    fn test_long_gap_reports_every_missed_period() {
        let mut timer = AutosaveTimer::new(60_000.0);
        assert_eq!(timer.advance(130_000.0, true), 2);
        assert_eq!(timer.advance(49_000.0, true), 0);
        assert_eq!(timer.advance(1_000.0, true), 1);
    }
}
