use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{RollDelays, MAX_DELAY_SECS};

/// Floor applied to manual roll spacing regardless of the configured window.
pub const MANUAL_DELAY_FLOOR_MS: i64 = 1_500;

/// Jittered rate limiter between successive roll submissions.
#[derive(Debug, Clone)]
pub struct RollPacer {
    rng: StdRng,
    next_roll_at: Option<DateTime<Utc>>,
}

impl Default for RollPacer {
    fn default() -> Self {
        Self::new()
    }
}

impl RollPacer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            next_roll_at: None,
        }
    }

    /// True once the scheduled deadline has passed, or when nothing is scheduled.
    pub fn ready(&self, now: DateTime<Utc>) -> bool {
        self.next_roll_at.map_or(true, |deadline| now >= deadline)
    }

    pub fn next_roll_at(&self) -> Option<DateTime<Utc>> {
        self.next_roll_at
    }

    pub fn reset(&mut self) {
        self.next_roll_at = None;
    }

    /// Schedules the next manual submission: `max(1.5 s, uniform(min, max))`.
    pub fn schedule_manual(&mut self, now: DateTime<Utc>, delays: &RollDelays) -> DateTime<Utc> {
        let jitter = self.jitter_ms(delays.manual_min_secs, delays.manual_max_secs);
        self.schedule(now, jitter.max(MANUAL_DELAY_FLOOR_MS))
    }

    /// Schedules the first automatic submission after a loot window opens.
    pub fn schedule_auto(&mut self, now: DateTime<Utc>, delays: &RollDelays) -> DateTime<Utc> {
        let jitter = self.jitter_ms(delays.auto_min_secs, delays.auto_max_secs);
        self.schedule(now, jitter)
    }

    fn schedule(&mut self, now: DateTime<Utc>, delay_ms: i64) -> DateTime<Utc> {
        let deadline = now
            .checked_add_signed(Duration::milliseconds(delay_ms))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.next_roll_at = Some(deadline);
        deadline
    }

    fn jitter_ms(&mut self, min_secs: f32, max_secs: f32) -> i64 {
        let min = secs_to_ms(min_secs);
        let max = secs_to_ms(max_secs);
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

fn secs_to_ms(secs: f32) -> i64 {
    if secs.is_finite() && secs > 0.0 {
        (f64::from(secs.min(MAX_DELAY_SECS)) * 1_000.0).round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 20, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn manual_delay_never_drops_below_floor() {
        let mut pacer = RollPacer::with_rng(StdRng::seed_from_u64(7));
        let delays = RollDelays::default();

        for _ in 0..32 {
            let deadline = pacer.schedule_manual(start(), &delays);
            assert!(deadline - start() >= Duration::milliseconds(MANUAL_DELAY_FLOOR_MS));
        }
    }

    #[test]
    fn auto_delay_stays_inside_window() {
        let mut pacer = RollPacer::with_rng(StdRng::seed_from_u64(11));
        let delays = RollDelays::default();

        for _ in 0..32 {
            let wait = pacer.schedule_auto(start(), &delays) - start();
            assert!(wait >= Duration::milliseconds(1_500));
            assert!(wait < Duration::milliseconds(3_000));
        }
    }

    #[test]
    fn collapsed_window_uses_lower_bound() {
        let mut pacer = RollPacer::with_rng(StdRng::seed_from_u64(3));
        let delays = RollDelays {
            auto_min_secs: 2.0,
            auto_max_secs: 2.0,
            ..RollDelays::default()
        };

        let wait = pacer.schedule_auto(start(), &delays) - start();
        assert_eq!(wait, Duration::milliseconds(2_000));
    }

    #[test]
    fn unsanitized_huge_window_is_capped() {
        let mut pacer = RollPacer::with_rng(StdRng::seed_from_u64(13));
        let delays = RollDelays {
            auto_min_secs: 1e13,
            auto_max_secs: 1e13,
            ..RollDelays::default()
        };

        let wait = pacer.schedule_auto(start(), &delays) - start();
        assert_eq!(wait, Duration::milliseconds(60_000));
    }

    #[test]
    fn deadline_saturates_at_end_of_time() {
        let mut pacer = RollPacer::with_rng(StdRng::seed_from_u64(17));

        let deadline = pacer.schedule_manual(DateTime::<Utc>::MAX_UTC, &RollDelays::default());
        assert_eq!(deadline, DateTime::<Utc>::MAX_UTC);
        assert!(!pacer.ready(start()));
    }

    #[test]
    fn ready_tracks_deadline() {
        let mut pacer = RollPacer::with_rng(StdRng::seed_from_u64(5));
        assert!(pacer.ready(start()));

        let deadline = pacer.schedule_manual(start(), &RollDelays::default());
        assert!(!pacer.ready(start()));
        assert!(pacer.ready(deadline));

        pacer.reset();
        assert!(pacer.next_roll_at().is_none());
    }
}
