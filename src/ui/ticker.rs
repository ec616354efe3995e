use std::time::{Duration, Instant};

/// Recurring task on the UI loop. The loop asks it whether a tick is due
/// each frame and how long it may sleep before the next one.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    /// First tick fires one interval after `start`.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start + interval,
        }
    }

    /// True once per elapsed interval. The next deadline is measured from
    /// `now`, so late ticks are not caught up.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1), start);

        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(999)));
        assert!(ticker.poll(start + Duration::from_secs(1)));
        assert!(!ticker.poll(start + Duration::from_millis(1500)));
        assert!(ticker.poll(start + Duration::from_secs(2)));
    }

    #[test]
    fn late_tick_does_not_catch_up() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1), start);

        let late = start + Duration::from_millis(3500);
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late + Duration::from_millis(10)));
        assert_eq!(ticker.until_next(late), Duration::from_secs(1));
    }

    #[test]
    fn until_next_saturates() {
        let start = Instant::now();
        let ticker = Ticker::new(Duration::from_secs(1), start);
        assert_eq!(ticker.until_next(start + Duration::from_secs(5)), Duration::ZERO);
    }
}
