//! Fixed-delay pacing for sequential calls to the rate API
use std::time::Duration;

pub struct Pacer {
    /// Pause after every `period`th loop position
    period: usize,
    /// Length of each pause
    delay: Duration,
    pauses: usize,
}

impl Pacer {
    /// `period` is clamped to at least 1
    pub fn with_policy(period: usize, delay: Duration) -> Self {
        Self {
            period: period.max(1),
            delay,
            pauses: 0,
        }
    }

    /// Whether loop position `index` (zero-based over all candidates) ends a pacing period
    fn is_due(&self, index: usize) -> bool {
        index % self.period == self.period - 1
    }

    /// Called after a remote lookup at loop position `index`; sleeps if the position is due
    pub async fn after_lookup(&mut self, index: usize) {
        if !self.is_due(index) {
            return;
        }

        tracing::debug!("Rate API pacing: waiting {}ms after position {}", self.delay.as_millis(), index);
        tokio::time::sleep(self.delay).await;
        self.pauses += 1;
    }

    /// Number of pauses taken so far
    pub fn pauses(&self) -> usize {
        self.pauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::{PACING_DELAY, PACING_PERIOD};

    #[test]
    fn test_due_positions_are_every_fifth() {
        let pacer = Pacer::with_policy(PACING_PERIOD, PACING_DELAY);
        let due: Vec<usize> = (0..31).filter(|i| pacer.is_due(*i)).collect();
        assert_eq!(due, vec![4, 9, 14, 19, 24, 29]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_fixed_delay() {
        let mut pacer = Pacer::with_policy(PACING_PERIOD, PACING_DELAY);
        let start = tokio::time::Instant::now();

        pacer.after_lookup(3).await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        pacer.after_lookup(4).await;
        assert!(start.elapsed() >= PACING_DELAY);
        assert_eq!(pacer.pauses(), 1);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let pacer = Pacer::with_policy(0, Duration::ZERO);
        assert!(pacer.is_due(0));
        assert!(pacer.is_due(7));
    }
}
