//! Time utilities: facility offset parsing and timestamp formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Utc};

/// Record timestamps are minute-precision local civil time.
pub const RECORD_FORMAT: &str = "%Y-%m-%d %H:%M";

const COMMIT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Parse `+05:30`, `-04:00`, `+0530` or `Z`/`UTC` into a fixed offset.
pub fn parse_offset(s: &str) -> AppResult<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| AppError::InvalidOffset(s.to_string()));
    }

    let (sign, rest) = match s.chars().next() {
        Some('+') => (1, &s[1..]),
        Some('-') => (-1, &s[1..]),
        _ => return Err(AppError::InvalidOffset(s.to_string())),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidOffset(s.to_string()));
    }

    let hours: i32 = digits[..2]
        .parse()
        .map_err(|_| AppError::InvalidOffset(s.to_string()))?;
    let minutes: i32 = digits[2..]
        .parse()
        .map_err(|_| AppError::InvalidOffset(s.to_string()))?;
    if minutes >= 60 {
        return Err(AppError::InvalidOffset(s.to_string()));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| AppError::InvalidOffset(s.to_string()))
}

pub fn now_at(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

/// Timestamp stored in a new record.
pub fn record_stamp(at: DateTime<FixedOffset>) -> String {
    at.format(RECORD_FORMAT).to_string()
}

/// Timestamp appended to remote commit messages.
pub fn commit_stamp(at: DateTime<FixedOffset>) -> String {
    at.format(COMMIT_FORMAT).to_string()
}
