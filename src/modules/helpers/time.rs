pub struct TimeHelper {}

pub const ZERO_TIME: &str = "00:00.000";

impl TimeHelper {
    /// # format milliseconds
    /// format a duration in milliseconds as `M:SS.sss`. minutes are not padded.
    /// zero and negative durations are formatted as `00:00.000`
    ///
    /// ## Arguments
    /// * `ms` - the duration in milliseconds
    ///
    /// ## Returns
    /// * `String` - the formatted duration
    pub fn millis_to_formatted(ms: i64) -> String {
        if ms <= 0 {
            return ZERO_TIME.to_string();
        }

        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;
        format!("{}:{:02}.{:03}", minutes, seconds, millis)
    }

    /// # parse formatted time
    /// parse a `M:SS.sss` string back into milliseconds.
    ///
    /// ## Arguments
    /// * `formatted` - the formatted time
    ///
    /// ## Returns
    /// * `Option<i64>` - the milliseconds, none if the string is not a formatted time
    pub fn formatted_to_millis(formatted: &str) -> Option<i64> {
        let (minutes, rest) = formatted.trim().split_once(':')?;
        let (seconds, millis) = rest.split_once('.')?;

        if minutes.is_empty() || seconds.len() != 2 || millis.len() != 3 {
            return None;
        }
        if ![minutes, seconds, millis].iter().all(|part| part.bytes().all(|b| b.is_ascii_digit())) {
            return None;
        }

        let minutes: i64 = minutes.parse().ok()?;
        let seconds: i64 = seconds.parse().ok()?;
        let millis: i64 = millis.parse().ok()?;
        if seconds >= 60 {
            return None;
        }

        Some(minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// format a sector or lap value, `None` when the feed has no signal for it
    pub fn optional_millis(ms: i64) -> Option<String> {
        if ms > 0 {
            Some(TimeHelper::millis_to_formatted(ms))
        } else {
            None
        }
    }
}
