use chrono::{DateTime, Utc};

use crate::error::ConformanceError;
use crate::util::parse_iso_period;

/// Temporal rules: start/end ordering and ISO 8601 duration syntax.
///
/// Start times are advisory on entities and mandatory on most events; the
/// caller picks which checks apply to its kind.
pub struct TimeValidator;

impl TimeValidator {
    /// Validate a duration string. Empty strings are accepted.
    pub fn check_duration(duration: &str) -> Result<(), ConformanceError> {
        if duration.is_empty() {
            return Ok(());
        }
        parse_iso_period(duration)
            .map(|_| ())
            .map_err(|reason| ConformanceError::InvalidDurationFormat {
                duration: duration.to_string(),
                reason,
            })
    }

    /// Validate start time ordering.
    /// If both times are present, start must strictly precede end. An absent
    /// start is permitted.
    pub fn check_start_time(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<(), ConformanceError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::check_order(start, end),
            _ => Ok(()),
        }
    }

    /// Validate a required end time.
    /// End must be present; if start is also present it must precede end.
    pub fn check_end_time(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<(), ConformanceError> {
        let end = end.ok_or_else(|| ConformanceError::missing("endedAtTime"))?;
        match start {
            Some(start) => Self::check_order(start, end),
            None => Ok(()),
        }
    }

    /// Validate that a mandatory start time is present.
    pub fn check_start_required(start: Option<DateTime<Utc>>) -> Result<(), ConformanceError> {
        start
            .map(|_| ())
            .ok_or_else(|| ConformanceError::missing("startedAtTime"))
    }

    fn check_order(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ConformanceError> {
        if start < end {
            Ok(())
        } else {
            Err(ConformanceError::TimeOrderingViolation { start, end })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 11, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_durations() {
        for d in ["", "PT1004199059S", "PT130S", "PT2M10S", "P1DT2S", "P1Y2M3DT5H20M30.123S"] {
            assert!(TimeValidator::check_duration(d).is_ok(), "{} rejected", d);
        }
    }

    #[test]
    fn test_invalid_durations() {
        for d in ["1Y", "P1S", "P-1Y", "P1M2Y", "P1Y-1M"] {
            let err = TimeValidator::check_duration(d).unwrap_err();
            assert!(
                matches!(err, ConformanceError::InvalidDurationFormat { ref duration, .. } if duration == d),
                "{} accepted",
                d
            );
        }
    }

    #[test]
    fn test_start_time() {
        assert!(TimeValidator::check_start_time(Some(at(10)), Some(at(11))).is_ok());
        assert!(TimeValidator::check_start_time(Some(at(10)), None).is_ok());
        assert!(TimeValidator::check_start_time(None, Some(at(11))).is_ok());
        assert!(TimeValidator::check_start_time(None, None).is_ok());

        assert_eq!(
            TimeValidator::check_start_time(Some(at(11)), Some(at(10))),
            Err(ConformanceError::TimeOrderingViolation {
                start: at(11),
                end: at(10)
            })
        );
        // Equal instants do not satisfy strict ordering
        assert!(TimeValidator::check_start_time(Some(at(10)), Some(at(10))).is_err());
    }

    #[test]
    fn test_end_time() {
        assert!(TimeValidator::check_end_time(Some(at(10)), Some(at(11))).is_ok());
        assert!(TimeValidator::check_end_time(None, Some(at(11))).is_ok());
        assert_eq!(
            TimeValidator::check_end_time(Some(at(10)), None),
            Err(ConformanceError::MissingRequiredField {
                field: "endedAtTime"
            })
        );
        assert!(matches!(
            TimeValidator::check_end_time(Some(at(12)), Some(at(11))),
            Err(ConformanceError::TimeOrderingViolation { .. })
        ));
    }

    #[test]
    fn test_start_required() {
        assert!(TimeValidator::check_start_required(Some(at(10))).is_ok());
        assert_eq!(
            TimeValidator::check_start_required(None),
            Err(ConformanceError::MissingRequiredField {
                field: "startedAtTime"
            })
        );
    }
}
