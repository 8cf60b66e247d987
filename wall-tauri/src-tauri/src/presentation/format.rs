use chrono::{DateTime, Utc};

// 秒 → 分 → 時 → 日 → 週 → 月 → 年
const STEPS: [f64; 6] = [60.0, 60.0, 24.0, 7.0, 365.0 / 7.0 / 12.0, 12.0];
const UNITS: [&str; 7] = ["second", "minute", "hour", "day", "week", "month", "year"];

/// "just now" / "5 minutes ago" / "in 2 hours" のような相対時刻
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = (now - created_at).num_milliseconds() as f64 / 1000.0;
    let future = delta < 0.0;
    let mut diff = delta.abs();

    let mut unit = 0;
    while unit < STEPS.len() && diff >= STEPS[unit] {
        diff /= STEPS[unit];
        unit += 1;
    }
    let count = diff.floor() as i64;

    // 10 秒未満はまとめて "just now"
    if unit == 0 && count <= 9 {
        return if future { "right now" } else { "just now" }.to_string();
    }

    let phrase = if count <= 1 && unit > 0 {
        format!("1 {}", UNITS[unit])
    } else {
        format!("{} {}s", count, UNITS[unit])
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(delta: Duration) -> String {
        time_ago(now() - delta, now())
    }

    #[test]
    fn seconds() {
        assert_eq!(ago(Duration::seconds(0)), "just now");
        assert_eq!(ago(Duration::seconds(9)), "just now");
        assert_eq!(ago(Duration::seconds(10)), "10 seconds ago");
        assert_eq!(ago(Duration::seconds(59)), "59 seconds ago");
    }

    #[test]
    fn minutes_and_hours() {
        assert_eq!(ago(Duration::seconds(60)), "1 minute ago");
        assert_eq!(ago(Duration::seconds(119)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::hours(1)), "1 hour ago");
        assert_eq!(ago(Duration::hours(23)), "23 hours ago");
    }

    #[test]
    fn days_weeks_months_years() {
        assert_eq!(ago(Duration::days(1)), "1 day ago");
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(14)), "2 weeks ago");
        assert_eq!(ago(Duration::days(62)), "2 months ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn future_timestamps() {
        assert_eq!(time_ago(now() + Duration::seconds(3), now()), "right now");
        assert_eq!(
            time_ago(now() + Duration::minutes(2), now()),
            "in 2 minutes"
        );
    }
}
