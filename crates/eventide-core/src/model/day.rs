use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Returns `00:00:00` of the given day.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Returns `23:59:59.999999` of the given day.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + TimeDelta::days(1) - TimeDelta::microseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).expect("leap day");

        let start = start_of_day(date);
        let end = end_of_day(date);

        assert_eq!(start.date(), date);
        assert_eq!(start.time(), NaiveTime::MIN);
        assert_eq!(end.date(), date);
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.nanosecond(), 999_999_000);
    }
}
