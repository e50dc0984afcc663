//! Consistency streaks over the set of days with a food log.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

/// Consecutive logged days ending today. A day that is not logged yet does
/// not break the streak until it is over, so the count may end yesterday.
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let start = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut count = 0;
    let mut day = start;
    while days.contains(&day) {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

/// Longest run of consecutive logged days.
pub fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        run = match prev {
            Some(p) if day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(list: &[(i32, u32, u32)]) -> BTreeSet<NaiveDate> {
        list.iter()
            .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_streak_including_today() {
        let logged = days(&[(2026, 2, 27), (2026, 2, 28), (2026, 3, 1)]);
        assert_eq!(current_streak(&logged, date(2026, 3, 1)), 3);
    }

    #[test]
    fn test_current_streak_today_not_yet_logged() {
        let logged = days(&[(2026, 3, 1), (2026, 3, 2)]);
        assert_eq!(current_streak(&logged, date(2026, 3, 3)), 2);
        assert_eq!(current_streak(&logged, date(2026, 3, 4)), 0);
    }

    #[test]
    fn test_longest_streak() {
        let logged = days(&[
            (2026, 1, 1),
            (2026, 1, 2),
            (2026, 1, 5),
            (2026, 1, 6),
            (2026, 1, 7),
            (2026, 1, 9),
        ]);
        assert_eq!(longest_streak(&logged), 3);
        assert_eq!(longest_streak(&BTreeSet::new()), 0);
    }
}
