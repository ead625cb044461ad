//! ISO 8601 period parsing.
//!
//! Accepts the standard period format `PnYnMnWnDTnHnMnS`. Every component is
//! optional but at least one must be present, components appear at most once
//! and in that order, numbers are unsigned, and only seconds may carry a
//! fraction (`.` or `,` separator). A `T` must be followed by at least one
//! time component.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error type for ISO 8601 period parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("period must start with 'P'")]
    MissingDesignator,

    #[error("period has no components")]
    Empty,

    #[error("time separator 'T' is not followed by a time component")]
    EmptyTimePart,

    #[error("expected a digit, found {found:?}")]
    ExpectedDigit { found: char },

    #[error("number is not followed by a unit designator")]
    MissingUnit,

    #[error("unknown unit designator {unit:?}")]
    UnknownUnit { unit: char },

    #[error("unit designator {unit:?} is repeated or out of order")]
    OutOfOrder { unit: char },

    #[error("only seconds may have a fractional part")]
    FractionNotAllowed,

    #[error("component exceeds {}", MAX_COMPONENT)]
    Overflow,
}

/// A parsed ISO 8601 period.
///
/// Components are kept as written; no normalization between units is
/// performed (`PT90S` stays 90 seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsoPeriod {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Fractional seconds, truncated to millisecond precision.
    pub millis: u32,
}

/// Largest value a single component may hold.
pub const MAX_COMPONENT: u32 = i32::MAX as u32;

const DATE_UNITS: [char; 4] = ['Y', 'M', 'W', 'D'];
const TIME_UNITS: [char; 3] = ['H', 'M', 'S'];

/// Parses an ISO 8601 period string.
pub fn parse_iso_period(text: &str) -> Result<IsoPeriod, DurationParseError> {
    let body = text
        .strip_prefix('P')
        .ok_or(DurationParseError::MissingDesignator)?;

    let (date_part, time_part) = match body.find('T') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let mut period = IsoPeriod::default();

    let date_components = parse_components(date_part, &DATE_UNITS)?;
    for component in &date_components {
        if component.millis.is_some() {
            return Err(DurationParseError::FractionNotAllowed);
        }
        match component.unit {
            'Y' => period.years = component.value,
            'M' => period.months = component.value,
            'W' => period.weeks = component.value,
            _ => period.days = component.value,
        }
    }

    let mut time_count = 0;
    if let Some(time_part) = time_part {
        let time_components = parse_components(time_part, &TIME_UNITS)?;
        if time_components.is_empty() {
            return Err(DurationParseError::EmptyTimePart);
        }
        for component in &time_components {
            match (component.unit, component.millis) {
                ('S', millis) => {
                    period.seconds = component.value;
                    period.millis = millis.unwrap_or(0);
                }
                (_, Some(_)) => return Err(DurationParseError::FractionNotAllowed),
                ('H', None) => period.hours = component.value,
                (_, None) => period.minutes = component.value,
            }
        }
        time_count = time_components.len();
    }

    if date_components.is_empty() && time_count == 0 {
        return Err(DurationParseError::Empty);
    }

    Ok(period)
}

/// Returns true if `text` is a valid ISO 8601 period.
pub fn is_iso_period(text: &str) -> bool {
    parse_iso_period(text).is_ok()
}

struct Component {
    value: u32,
    millis: Option<u32>,
    unit: char,
}

/// Parses a run of `<number><unit>` components, enforcing the unit order.
fn parse_components(part: &str, units: &[char]) -> Result<Vec<Component>, DurationParseError> {
    let mut components = Vec::new();
    let mut next_unit = 0usize;
    let mut chars = part.chars().peekable();

    while let Some(&first) = chars.peek() {
        if !first.is_ascii_digit() {
            return Err(DurationParseError::ExpectedDigit { found: first });
        }

        let mut value: u32 = 0;
        while let Some(&c) = chars.peek() {
            let Some(digit) = c.to_digit(10) else { break };
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .filter(|v| *v <= MAX_COMPONENT)
                .ok_or(DurationParseError::Overflow)?;
            chars.next();
        }

        let mut millis = None;
        if let Some(&sep) = chars.peek() {
            if sep == '.' || sep == ',' {
                chars.next();
                let mut fraction = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    fraction.push(c);
                    chars.next();
                }
                if fraction.is_empty() {
                    return match chars.peek() {
                        Some(&found) => Err(DurationParseError::ExpectedDigit { found }),
                        None => Err(DurationParseError::MissingUnit),
                    };
                }
                millis = Some(parse_fractional_millis(&fraction));
            }
        }

        let unit = chars.next().ok_or(DurationParseError::MissingUnit)?;
        let position = units
            .iter()
            .position(|u| *u == unit)
            .ok_or(DurationParseError::UnknownUnit { unit })?;
        if position < next_unit {
            return Err(DurationParseError::OutOfOrder { unit });
        }
        next_unit = position + 1;

        components.push(Component {
            value,
            millis,
            unit,
        });
    }

    Ok(components)
}

/// Pads or truncates a fraction digit string to three digits.
fn parse_fractional_millis(fraction: &str) -> u32 {
    let mut padded: String = fraction.chars().take(3).collect();
    while padded.len() < 3 {
        padded.push('0');
    }
    padded.parse().unwrap_or(0)
}

impl FromStr for IsoPeriod {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso_period(s)
    }
}

impl fmt::Display for IsoPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("P")?;
        for (value, unit) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if value != 0 {
                write!(f, "{}{}", value, unit)?;
            }
        }

        let has_time = self.hours != 0 || self.minutes != 0 || self.seconds != 0 || self.millis != 0;
        if has_time {
            f.write_str("T")?;
            if self.hours != 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes != 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds != 0 || self.millis != 0 {
                if self.millis != 0 {
                    let frac = format!("{:03}", self.millis);
                    write!(f, "{}.{}S", self.seconds, frac.trim_end_matches('0'))?;
                } else {
                    write!(f, "{}S", self.seconds)?;
                }
            }
        } else if self.years == 0 && self.months == 0 && self.weeks == 0 && self.days == 0 {
            f.write_str("T0S")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_only() {
        let period = parse_iso_period("PT1004199059S").unwrap();
        assert_eq!(period.seconds, 1_004_199_059);

        let period = parse_iso_period("PT130S").unwrap();
        assert_eq!(period.seconds, 130);
    }

    #[test]
    fn test_parse_mixed_components() {
        let period = parse_iso_period("P1DT2S").unwrap();
        assert_eq!(period.days, 1);
        assert_eq!(period.seconds, 2);

        let period = parse_iso_period("PT2M10S").unwrap();
        assert_eq!(period.minutes, 2);
        assert_eq!(period.seconds, 10);

        let period = parse_iso_period("P1Y2M3DT5H20M30.123S").unwrap();
        assert_eq!(
            period,
            IsoPeriod {
                years: 1,
                months: 2,
                weeks: 0,
                days: 3,
                hours: 5,
                minutes: 20,
                seconds: 30,
                millis: 123,
            }
        );
    }

    #[test]
    fn test_parse_weeks() {
        assert_eq!(parse_iso_period("P3W").unwrap().weeks, 3);
        assert!(parse_iso_period("P1Y2W").is_ok());
    }

    #[test]
    fn test_month_and_minute_are_distinguished() {
        let period = parse_iso_period("P1MT1M").unwrap();
        assert_eq!(period.months, 1);
        assert_eq!(period.minutes, 1);
    }

    #[test]
    fn test_fraction_precision() {
        assert_eq!(parse_iso_period("PT1.5S").unwrap().millis, 500);
        assert_eq!(parse_iso_period("PT1,25S").unwrap().millis, 250);
        assert_eq!(parse_iso_period("PT1.123456S").unwrap().millis, 123);
    }

    #[test]
    fn test_rejects_invalid_forms() {
        assert_eq!(
            parse_iso_period("1Y"),
            Err(DurationParseError::MissingDesignator)
        );
        assert_eq!(
            parse_iso_period("P1S"),
            Err(DurationParseError::UnknownUnit { unit: 'S' })
        );
        assert_eq!(
            parse_iso_period("P-1Y"),
            Err(DurationParseError::ExpectedDigit { found: '-' })
        );
        assert_eq!(
            parse_iso_period("P1M2Y"),
            Err(DurationParseError::OutOfOrder { unit: 'Y' })
        );
        assert_eq!(
            parse_iso_period("P1Y-1M"),
            Err(DurationParseError::ExpectedDigit { found: '-' })
        );
    }

    #[test]
    fn test_rejects_structural_errors() {
        assert_eq!(parse_iso_period("P"), Err(DurationParseError::Empty));
        assert_eq!(parse_iso_period("PT"), Err(DurationParseError::EmptyTimePart));
        assert_eq!(parse_iso_period("P1"), Err(DurationParseError::MissingUnit));
        assert_eq!(
            parse_iso_period("P1.5D"),
            Err(DurationParseError::FractionNotAllowed)
        );
        assert_eq!(
            parse_iso_period("PT1.5M"),
            Err(DurationParseError::FractionNotAllowed)
        );
        assert_eq!(
            parse_iso_period("P1Y1Y"),
            Err(DurationParseError::OutOfOrder { unit: 'Y' })
        );
        assert_eq!(
            parse_iso_period("PT99999999999S"),
            Err(DurationParseError::Overflow)
        );
        assert!(parse_iso_period("-P1Y").is_err());
        assert!(parse_iso_period("p1y").is_err());
    }

    #[test]
    fn test_component_above_i32_max_rejected() {
        assert_eq!(parse_iso_period("PT2147483647S").unwrap().seconds, MAX_COMPONENT);
        assert_eq!(
            parse_iso_period("PT2147483648S"),
            Err(DurationParseError::Overflow)
        );
        assert_eq!(
            parse_iso_period("P4294967295D"),
            Err(DurationParseError::Overflow)
        );
        assert!(!is_iso_period("P3000000000Y"));
    }

    #[test]
    fn test_display_roundtrip() {
        let periods = ["PT130S", "P1DT2S", "P1Y2M3DT5H20M30.123S", "P3W", "PT1.5S"];
        for text in periods {
            let period: IsoPeriod = text.parse().unwrap();
            assert_eq!(period.to_string(), text, "Roundtrip failed for {}", text);
        }
    }
}
