use std::time::{Duration, Instant};

/// Drift-correcting schedule for animated line updates.
///
/// Tracks the ideal elapsed time (`ticks * interval`) against wall-clock time
/// since `started`, so that each delay absorbs the lateness of earlier ticks
/// and the long-run rate converges on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClock {
    started: Instant,
    ideal_elapsed: Duration,
    ticks: u64,
}

impl LineClock {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            ideal_elapsed: Duration::ZERO,
            ticks: 0,
        }
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn ideal_elapsed(&self) -> Duration {
        self.ideal_elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Account for one tick at `interval` and return the wait before the next:
    /// `interval - (actual - ideal)`, clamped at zero.
    pub fn next_delay(&mut self, interval: Duration, now: Instant) -> Duration {
        self.ticks += 1;
        self.ideal_elapsed += interval;
        let actual = now.saturating_duration_since(self.started);
        (interval + self.ideal_elapsed).saturating_sub(actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(40);

    #[test]
    fn test_first_tick_waits_two_intervals() {
        let t0 = Instant::now();
        let mut clock = LineClock::new(t0);
        assert_eq!(clock.next_delay(INTERVAL, t0), INTERVAL * 2);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_on_time_ticks_keep_interval() {
        let t0 = Instant::now();
        let mut clock = LineClock::new(t0);
        clock.next_delay(INTERVAL, t0);
        assert_eq!(clock.next_delay(INTERVAL, t0 + INTERVAL * 2), INTERVAL);
        assert_eq!(clock.next_delay(INTERVAL, t0 + INTERVAL * 3), INTERVAL);
    }

    #[test]
    fn test_late_tick_shortens_next_delay() {
        let t0 = Instant::now();
        let mut clock = LineClock::new(t0);
        clock.next_delay(INTERVAL, t0);
        let late = Duration::from_millis(15);
        assert_eq!(clock.next_delay(INTERVAL, t0 + INTERVAL * 2 + late), INTERVAL - late);
    }

    #[test]
    fn test_early_tick_lengthens_next_delay() {
        let t0 = Instant::now();
        let mut clock = LineClock::new(t0);
        clock.next_delay(INTERVAL, t0);
        let early = Duration::from_millis(10);
        assert_eq!(clock.next_delay(INTERVAL, t0 + INTERVAL * 2 - early), INTERVAL + early);
    }

    #[test]
    fn test_very_late_tick_does_not_go_negative() {
        let t0 = Instant::now();
        let mut clock = LineClock::new(t0);
        clock.next_delay(INTERVAL, t0);
        assert_eq!(clock.next_delay(INTERVAL, t0 + Duration::from_secs(5)), Duration::ZERO);
        assert_eq!(clock.ideal_elapsed(), INTERVAL * 2);
    }
}
