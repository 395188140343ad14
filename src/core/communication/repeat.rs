use crate::domain::error::{TtyDbgError, TtyDbgResult};
use std::time::Duration;

/// Spacing between repeats when no interval was configured
pub const DEFAULT_REPEAT_SPACING: Duration = Duration::from_secs(1);

/// Largest accepted magnitude for a repeat count
pub const MAX_REPEAT_COUNT: u64 = u32::MAX as u64;

/// How many times, and how often, a payload is transmitted.
///
/// * `count > 0`: exactly `count` transmissions, spaced by the interval or
///   one second when no interval is set.
/// * `count < 0`: unbounded, but only with an explicit interval; without
///   one the payload is sent once.
/// * `count == 0`: nothing is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatPolicy {
    pub count: i64,
    pub interval_secs: Option<u64>,
}

impl RepeatPolicy {
    pub fn new(count: i64, interval_secs: Option<u64>) -> Self {
        Self {
            count,
            interval_secs,
        }
    }

    pub fn validate(&self) -> TtyDbgResult<()> {
        if self.count.unsigned_abs() > MAX_REPEAT_COUNT {
            return Err(TtyDbgError::InvalidCount { count: self.count });
        }
        Ok(())
    }

    pub fn schedule(&self) -> TtyDbgResult<RepeatSchedule> {
        self.validate()?;

        let remaining = if self.count < 0 {
            None
        } else {
            Some(self.count.unsigned_abs())
        };
        Ok(RepeatSchedule {
            remaining,
            interval: self.interval_secs.map(Duration::from_secs),
        })
    }
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self::new(-1, None)
    }
}

/// Iteration state of a [`RepeatPolicy`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatSchedule {
    /// `None` while unbounded
    remaining: Option<u64>,
    interval: Option<Duration>,
}

impl RepeatSchedule {
    /// True when no transmission should happen at all
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Account for one transmission.
    ///
    /// Returns the delay before the next transmission, or `None` once the
    /// policy is done.
    pub fn after_transmission(&mut self) -> Option<Duration> {
        match self.remaining.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                if *remaining > 0 {
                    Some(self.interval.unwrap_or(DEFAULT_REPEAT_SPACING))
                } else {
                    None
                }
            }
            None => self.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delays(policy: RepeatPolicy, limit: usize) -> Vec<Duration> {
        let mut schedule = policy.schedule().unwrap();
        let mut delays = Vec::new();
        while delays.len() < limit {
            match schedule.after_transmission() {
                Some(delay) => delays.push(delay),
                None => break,
            }
        }
        delays
    }

    #[test]
    fn test_zero_count_is_exhausted() {
        let schedule = RepeatPolicy::new(0, None).schedule().unwrap();
        assert!(schedule.is_exhausted());
    }

    #[test]
    fn test_bounded_count_uses_default_spacing() {
        // three transmissions, two gaps
        assert_eq!(
            delays(RepeatPolicy::new(3, None), 10),
            vec![DEFAULT_REPEAT_SPACING, DEFAULT_REPEAT_SPACING]
        );
    }

    #[test]
    fn test_bounded_count_with_interval() {
        assert_eq!(
            delays(RepeatPolicy::new(2, Some(5)), 10),
            vec![Duration::from_secs(5)]
        );
        assert!(delays(RepeatPolicy::new(1, Some(5)), 10).is_empty());
    }

    #[test]
    fn test_unbounded_without_interval_sends_once() {
        assert!(delays(RepeatPolicy::default(), 10).is_empty());
    }

    #[test]
    fn test_unbounded_with_interval_never_ends() {
        assert_eq!(
            delays(RepeatPolicy::new(-1, Some(2)), 100),
            vec![Duration::from_secs(2); 100]
        );
    }

    #[test]
    fn test_zero_interval() {
        assert_eq!(delays(RepeatPolicy::new(2, Some(0)), 10), vec![Duration::ZERO]);
    }

    #[test]
    fn test_out_of_range_count() {
        for count in [i64::MAX, i64::MIN, MAX_REPEAT_COUNT as i64 + 1] {
            let result = RepeatPolicy::new(count, None).schedule();
            assert!(matches!(result, Err(TtyDbgError::InvalidCount { .. })));
        }
        assert!(RepeatPolicy::new(MAX_REPEAT_COUNT as i64, None).validate().is_ok());
    }
}
