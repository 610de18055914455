use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::{from_millis, to_millis};
use crate::numeric::ContinuousNumericScale;

/// Calendar interval used to floor timestamps and step between ticks
pub trait TimestampInterval: Send + Sync + std::fmt::Debug {
    fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime;
    fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime;

    fn ceil(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let floored = self.floor(date);
        if &floored == date {
            *date
        } else {
            self.offset(floored, 1)
        }
    }
}

pub mod interval {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct MillisecondInterval;
    #[derive(Debug, Clone)]
    pub struct SecondInterval;
    #[derive(Debug, Clone)]
    pub struct MinuteInterval;
    #[derive(Debug, Clone)]
    pub struct HourInterval;
    #[derive(Debug, Clone)]
    pub struct DayInterval;
    #[derive(Debug, Clone)]
    pub struct WeekInterval;
    #[derive(Debug, Clone)]
    pub struct MonthInterval;
    #[derive(Debug, Clone)]
    pub struct YearInterval;

    fn midnight(date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN)
    }

    impl TimestampInterval for MillisecondInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            *date
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::milliseconds(step)
        }
    }

    impl TimestampInterval for SecondInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            date.with_nanosecond(0).unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::seconds(step)
        }
    }

    impl TimestampInterval for MinuteInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let time = NaiveTime::from_hms_opt(date.hour(), date.minute(), 0).unwrap_or(NaiveTime::MIN);
            date.date().and_time(time)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::minutes(step)
        }
    }

    impl TimestampInterval for HourInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let time = NaiveTime::from_hms_opt(date.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
            date.date().and_time(time)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::hours(step)
        }
    }

    impl TimestampInterval for DayInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            midnight(date.date())
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::days(step)
        }
    }

    /// Weeks starting on Sunday
    impl TimestampInterval for WeekInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let days_from_sunday = date.weekday().num_days_from_sunday() as i64;
            midnight(date.date()) - Duration::days(days_from_sunday)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::weeks(step)
        }
    }

    impl TimestampInterval for MonthInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            midnight(date.date() - Duration::days(date.day0() as i64))
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            let total_months = (date.year() as i64) * 12 + date.month0() as i64 + step;
            let year = total_months.div_euclid(12) as i32;
            let month = total_months.rem_euclid(12) as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, 1)
                .map(midnight)
                .unwrap_or(date)
        }
    }

    impl TimestampInterval for YearInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .map(midnight)
                .unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(date.year() + step as i32, 1, 1)
                .map(midnight)
                .unwrap_or(date)
        }
    }

    pub fn millisecond() -> Box<dyn TimestampInterval> {
        Box::new(MillisecondInterval)
    }

    pub fn second() -> Box<dyn TimestampInterval> {
        Box::new(SecondInterval)
    }

    pub fn minute() -> Box<dyn TimestampInterval> {
        Box::new(MinuteInterval)
    }

    pub fn hour() -> Box<dyn TimestampInterval> {
        Box::new(HourInterval)
    }

    pub fn day() -> Box<dyn TimestampInterval> {
        Box::new(DayInterval)
    }

    pub fn week() -> Box<dyn TimestampInterval> {
        Box::new(WeekInterval)
    }

    pub fn month() -> Box<dyn TimestampInterval> {
        Box::new(MonthInterval)
    }

    pub fn year() -> Box<dyn TimestampInterval> {
        Box::new(YearInterval)
    }
}

/// Granularity of the interval chosen for ticks, used to pick a label format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TickGranularity {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

fn tick_intervals() -> Vec<(Box<dyn TimestampInterval>, i64, i64, TickGranularity)> {
    use TickGranularity::*;
    vec![
        (interval::millisecond(), 1, 1, Millisecond),
        (interval::millisecond(), 5, 5, Millisecond),
        (interval::millisecond(), 10, 10, Millisecond),
        (interval::millisecond(), 50, 50, Millisecond),
        (interval::millisecond(), 100, 100, Millisecond),
        (interval::millisecond(), 250, 250, Millisecond),
        (interval::millisecond(), 500, 500, Millisecond),
        (interval::second(), 1, SECOND_MS, Second),
        (interval::second(), 5, 5 * SECOND_MS, Second),
        (interval::second(), 15, 15 * SECOND_MS, Second),
        (interval::second(), 30, 30 * SECOND_MS, Second),
        (interval::minute(), 1, MINUTE_MS, Minute),
        (interval::minute(), 5, 5 * MINUTE_MS, Minute),
        (interval::minute(), 15, 15 * MINUTE_MS, Minute),
        (interval::minute(), 30, 30 * MINUTE_MS, Minute),
        (interval::hour(), 1, HOUR_MS, Hour),
        (interval::hour(), 3, 3 * HOUR_MS, Hour),
        (interval::hour(), 6, 6 * HOUR_MS, Hour),
        (interval::hour(), 12, 12 * HOUR_MS, Hour),
        (interval::day(), 1, DAY_MS, Day),
        (interval::day(), 2, 2 * DAY_MS, Day),
        (interval::week(), 1, WEEK_MS, Day),
        (interval::month(), 1, MONTH_MS, Month),
        (interval::month(), 3, 3 * MONTH_MS, Month),
        (interval::year(), 1, YEAR_MS, Year),
    ]
}

#[derive(Clone, Debug)]
pub struct TimestampScaleConfig {
    pub domain: (NaiveDateTime, NaiveDateTime),
    pub range: (f32, f32),
    pub clamp: bool,
}

impl Default for TimestampScaleConfig {
    fn default() -> Self {
        let epoch = NaiveDateTime::UNIX_EPOCH;
        Self {
            domain: (epoch, epoch + Duration::days(1)),
            range: (0.0, 1.0),
            clamp: false,
        }
    }
}

/// A scale that maps naive timestamps to a numeric range
#[derive(Clone, Debug)]
pub struct TimestampScale {
    domain_start: NaiveDateTime,
    domain_end: NaiveDateTime,
    range_start: f32,
    range_end: f32,
    clamp: bool,
}

impl TimestampScale {
    pub fn new(config: &TimestampScaleConfig) -> Self {
        Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
        }
    }

    /// Extends the domain outward to whole interval boundaries
    pub fn nice(mut self, interval: Option<Box<dyn TimestampInterval>>) -> Self {
        if self.domain_start == self.domain_end {
            return self;
        }

        let interval = interval.unwrap_or_else(|| {
            let span = (self.domain_end - self.domain_start).abs();
            if span < Duration::seconds(1) {
                interval::millisecond()
            } else if span < Duration::minutes(1) {
                interval::second()
            } else if span < Duration::hours(1) {
                interval::minute()
            } else if span < Duration::days(1) {
                interval::hour()
            } else if span < Duration::days(30) {
                interval::day()
            } else if span < Duration::days(365) {
                interval::month()
            } else {
                interval::year()
            }
        });

        if self.domain_start <= self.domain_end {
            self.domain_start = interval.floor(&self.domain_start);
            self.domain_end = interval.ceil(&self.domain_end);
        } else {
            self.domain_start = interval.ceil(&self.domain_start);
            self.domain_end = interval.floor(&self.domain_end);
        }
        self
    }

    fn tick_interval(&self, count: f32) -> (Box<dyn TimestampInterval>, i64, TickGranularity) {
        let span_ms = (self.domain_end - self.domain_start).num_milliseconds().abs() as f64;
        let target_step = span_ms / count.max(1.0) as f64;

        tick_intervals()
            .into_iter()
            .find(|(_, _, step_ms, _)| *step_ms as f64 >= target_step)
            .map(|(interval, step, _, granularity)| (interval, step, granularity))
            .unwrap_or_else(|| {
                let years = (target_step / YEAR_MS as f64).ceil().max(1.0) as i64;
                (interval::year(), years, TickGranularity::Year)
            })
    }

    /// Granularity of the interval `ticks(count)` steps by
    pub fn tick_granularity(&self, count: Option<f32>) -> TickGranularity {
        self.tick_interval(count.unwrap_or(10.0)).2
    }
}

impl ContinuousNumericScale<NaiveDateTime> for TimestampScale {
    fn domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    fn scale(&self, value: &NaiveDateTime) -> f32 {
        if self.domain_start == self.domain_end || self.range_start == self.range_end {
            return self.range_start;
        }

        let d0 = to_millis(&self.domain_start);
        let d1 = to_millis(&self.domain_end);
        let t = (to_millis(value) - d0) / (d1 - d0);
        let scaled = self.range_start + (t as f32) * (self.range_end - self.range_start);

        if self.clamp {
            let lo = self.range_start.min(self.range_end);
            let hi = self.range_start.max(self.range_end);
            scaled.clamp(lo, hi)
        } else {
            scaled
        }
    }

    fn invert(&self, value: f32) -> NaiveDateTime {
        if self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || self.range_start.is_nan()
            || self.range_end.is_nan()
        {
            return self.domain_start;
        }

        let value = if self.clamp {
            let lo = self.range_start.min(self.range_end);
            let hi = self.range_start.max(self.range_end);
            value.clamp(lo, hi)
        } else {
            value
        };

        let t = ((value - self.range_start) / (self.range_end - self.range_start)) as f64;
        let d0 = to_millis(&self.domain_start);
        let d1 = to_millis(&self.domain_end);
        from_millis(d0 + t * (d1 - d0)).unwrap_or(self.domain_start)
    }

    fn ticks(&self, count: Option<f32>) -> Vec<NaiveDateTime> {
        let (interval, step, _) = self.tick_interval(count.unwrap_or(10.0));
        let (start, end) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let mut ticks = Vec::new();
        let mut tick = interval.ceil(&start);
        while tick <= end {
            ticks.push(tick);
            let next = interval.offset(tick, step);
            if next <= tick {
                break;
            }
            tick = next;
        }
        ticks
    }
}
