// libs/appointment-cell/src/services/time_policy.rs
//
// Slot-validity policy: every check is evaluated against the clinic-local
// wall clock, while the accepted instant is stored in UTC.
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;

pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 17;
/// 17:30 is a bookable start time, not just the closing boundary.
pub const CLOSING_MINUTE: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimePolicyError {
    #[error("Start time must carry a UTC offset, e.g. 2025-07-01T12:00:00+03:00 or 2025-07-01T12:00:00Z")]
    MissingTimezone,

    #[error("Start time is not a valid RFC 3339 timestamp")]
    InvalidFormat,

    #[error("Start time must be in the future")]
    PastTime,

    #[error("Appointments are accepted between 09:00 and 17:30 clinic time")]
    OutsideBusinessHours,

    #[error("Appointments are accepted on working days only (Mon-Fri)")]
    NonWorkingDay,

    #[error("Appointments start on the hour or the half hour, with zero seconds")]
    InvalidGranularity,
}

impl TimePolicyError {
    pub fn reason(&self) -> &'static str {
        match self {
            TimePolicyError::MissingTimezone => "missing_timezone",
            TimePolicyError::InvalidFormat => "invalid_time_format",
            TimePolicyError::PastTime => "past_time",
            TimePolicyError::OutsideBusinessHours => "outside_business_hours",
            TimePolicyError::NonWorkingDay => "non_working_day",
            TimePolicyError::InvalidGranularity => "invalid_granularity",
        }
    }
}

/// Parse a client-supplied timestamp, requiring an explicit UTC offset. A
/// timestamp that is well-formed apart from the missing offset gets its own
/// error so the client is told exactly what to fix.
pub fn parse_start_time(raw: &str) -> Result<DateTime<FixedOffset>, TimePolicyError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt),
        Err(_) => {
            let offsetless = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").is_ok()
                || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").is_ok();
            if offsetless {
                Err(TimePolicyError::MissingTimezone)
            } else {
                Err(TimePolicyError::InvalidFormat)
            }
        }
    }
}

/// Validate a parsed instant against the clinic's business rules and return
/// it converted to UTC, the canonical storage form.
///
/// `now` is injected rather than read from the system clock; the comparison
/// is between instants, so the offset the client supplied is preserved.
pub fn normalize(
    start: DateTime<FixedOffset>,
    now: DateTime<Utc>,
    clinic_tz: Tz,
) -> Result<DateTime<Utc>, TimePolicyError> {
    if start <= now {
        return Err(TimePolicyError::PastTime);
    }

    let local = start.with_timezone(&clinic_tz);

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(TimePolicyError::NonWorkingDay);
    }

    if local.hour() < OPENING_HOUR
        || local.hour() > CLOSING_HOUR
        || (local.hour() == CLOSING_HOUR && local.minute() > CLOSING_MINUTE)
    {
        return Err(TimePolicyError::OutsideBusinessHours);
    }

    if (local.minute() != 0 && local.minute() != 30)
        || local.second() != 0
        || local.nanosecond() != 0
    {
        return Err(TimePolicyError::InvalidGranularity);
    }

    Ok(start.with_timezone(&Utc))
}
