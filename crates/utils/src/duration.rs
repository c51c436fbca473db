//! Go-style duration strings such as `5s`, `1ms`, `1h30m` or `1.5s`
//!
//! A duration is an optional sign followed by one or more
//! `<decimal number><unit>` pairs. Recognised units are `ns`, `us` (or `µs`),
//! `ms`, `s`, `m` and `h`. The bare string `0` is accepted as zero.

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

// Fraction digits beyond this cannot change a nanosecond count.
const MAX_FRACTION_DIGITS: usize = 18;

/// Reasons a duration string is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("empty duration")]
    Empty,
    #[error("negative durations are not allowed")]
    Negative,
    #[error("expected a number")]
    ExpectedNumber,
    #[error("missing unit")]
    MissingUnit,
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("duration out of range")]
    Overflow,
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(len)
}

/// Parse a Go-style duration string
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole_digits, after) = split_digits(rest);
        let (fraction_digits, after) = match after.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after),
        };
        if whole_digits.is_empty() && fraction_digits.is_empty() {
            return Err(ParseDurationError::ExpectedNumber);
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit);
        }
        let scale =
            unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit(unit.to_string()))?;

        let whole: u128 = if whole_digits.is_empty() {
            0
        } else {
            whole_digits
                .parse()
                .map_err(|_| ParseDurationError::Overflow)?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or(ParseDurationError::Overflow)?;

        let fraction = &fraction_digits[..fraction_digits.len().min(MAX_FRACTION_DIGITS)];
        if !fraction.is_empty() {
            let numerator: u128 = fraction
                .parse()
                .map_err(|_| ParseDurationError::Overflow)?;
            let denominator = 10u128.pow(fraction.len() as u32);
            nanos = nanos
                .checked_add(numerator * scale / denominator)
                .ok_or(ParseDurationError::Overflow)?;
        }

        total = total
            .checked_add(nanos)
            .ok_or(ParseDurationError::Overflow)?;
        rest = after;
    }

    if total > u128::from(u64::MAX) {
        return Err(ParseDurationError::Overflow);
    }
    if negative && total > 0 {
        return Err(ParseDurationError::Negative);
    }
    Ok(Duration::from_nanos(total as u64))
}

/// Render a duration in the same syntax `parse_duration` accepts,
/// e.g. `5s`, `1m30s`, `1h0m0s`, `1.5ms`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", decimal(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, NANOS_PER_MILLI));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3_600;
    let minutes = (total_secs / 60) % 60;
    let seconds = decimal(
        u128::from(total_secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos()),
        NANOS_PER_SEC,
    );

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
