use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// represents the one pending wake event
/// the preset is referenced by name only, it may have been deleted by the time the timer fires
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Timer {
    pub preset_name: String,
    /// epoch milliseconds
    pub at_millis: i64,
}

impl Timer {
    #[must_use]
    pub fn new(preset_name: impl Into<String>, at_millis: i64) -> Self {
        Self {
            preset_name: preset_name.into(),
            at_millis,
        }
    }

    /// the next time the wall clock reads `hour:minute` after `now`
    /// (today if it hasn't passed yet, otherwise tomorrow)
    ///
    /// returns `None` for an out of range hour or minute
    #[must_use]
    pub fn next_at(
        preset_name: impl Into<String>,
        hour: u32,
        minute: u32,
        now: DateTime<Local>,
    ) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        let today = now.date_naive();
        // a day is skipped if the time falls in a dst gap
        let at = (0..=2)
            .filter_map(|days| today.checked_add_days(Days::new(days)))
            .filter_map(|date| date.and_time(time).and_local_timezone(Local).earliest())
            .find(|at| *at > now)?;
        Some(Self::new(preset_name, at.timestamp_millis()))
    }

    #[must_use]
    pub fn local_time(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.at_millis).single()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn local(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 10, 14, hour, minute, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn next_at_later_today() {
        let now = local(0, 30);
        let timer = Timer::next_at("test-1", 1, 2, now).unwrap();
        let at = timer.local_time().unwrap();
        assert_eq!(timer.preset_name, "test-1");
        assert_eq!((at.hour(), at.minute(), at.second()), (1, 2, 0));
        assert_eq!(at.day(), 14);
    }

    #[test]
    fn next_at_rolls_over_to_tomorrow() {
        let now = local(7, 0);
        let at = Timer::next_at("test", 6, 45, now)
            .unwrap()
            .local_time()
            .unwrap();
        assert_eq!((at.day(), at.hour(), at.minute()), (15, 6, 45));
    }

    #[test]
    fn next_at_same_minute_is_tomorrow() {
        let now = local(6, 45);
        let at = Timer::next_at("test", 6, 45, now)
            .unwrap()
            .local_time()
            .unwrap();
        assert_eq!(at.day(), 15);
    }

    #[test]
    fn next_at_rejects_bad_time() {
        assert!(Timer::next_at("test", 24, 0, local(0, 0)).is_none());
        assert!(Timer::next_at("test", 0, 60, local(0, 0)).is_none());
    }
}
