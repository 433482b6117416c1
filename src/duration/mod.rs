//! Time input parsing and formatting.
//!
//! This module turns free-form duration text into whole seconds and back:
//! - `parse`: "500", "1m", "1.5h", "2h15m30s", "1h 30m" → seconds
//! - `format_canonical`: seconds → shortest re-typeable form ("1h 30m")
//! - `format_clock`: seconds → "MM:SS"
//! - `format_tray_abbrev`: seconds → compact tray label ("25m", "1.5h")
//!
//! A bare number is always seconds. Everything here is pure and has no
//! dependency on the rest of the crate.

use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// User-facing validation message for rejected time input.
pub const VALIDATION_MESSAGE: &str = "Введите корректное время! (например: 500, 1m, 1h, 1d)";

/// Adjust steps (seconds) offered while a timer is running or paused.
pub const ADJUST_STEPS: [i64; 8] = [-3600, -600, -300, -60, 60, 300, 600, 3600];

/// Nudge steps (seconds) offered for the duration input while idle.
pub const INPUT_ADJUST_STEPS: [i64; 6] = [-600, -300, -60, 60, 300, 600];

/// Quick start presets.
pub const QUICK_PRESETS: [&str; 5] = ["1m", "5m", "10m", "25m", "1h"];

/// Placeholder shown in the tray when nothing is left to count.
pub const TRAY_EMPTY: &str = "—";

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_DAY: u64 = 86_400;

// ============================================================================
// ParseError
// ============================================================================

/// Reasons a duration string was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or whitespace only.
    #[error("пустое значение времени")]
    Empty,

    /// No recognizable number or `<number><unit>` token.
    #[error("не удалось распознать время: '{0}'")]
    Invalid(String),

    /// Input parsed but evaluated to zero seconds.
    #[error("время должно быть больше нуля")]
    NotPositive,

    /// Input does not fit in the seconds counter.
    #[error("слишком большое значение времени")]
    TooLarge,
}

impl ParseError {
    /// Returns the message to show next to the input field.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        VALIDATION_MESSAGE
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a duration expression into whole seconds.
///
/// Accepted forms, in priority order:
/// 1. digits only: seconds (`"500"`)
/// 2. one `<number><unit>` token, unit one of `s m h d` in any case,
///    fractional numbers floored after conversion (`"1.5m"` → 90)
/// 3. any number of such tokens anywhere in the text, summed
///    (`"2h15m30s"`, `"1h 30m"`); tokens with a zero value are skipped
///
/// # Errors
///
/// Returns a `ParseError` for empty input, text without tokens, totals of
/// zero, and values that overflow `u64`.
///
/// # Examples
///
/// ```
/// use tray_timer::duration::parse;
///
/// assert_eq!(parse("500"), Ok(500));
/// assert_eq!(parse("2h15m30s"), Ok(8130));
/// assert!(parse("abc").is_err());
/// ```
pub fn parse(text: &str) -> Result<u64, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let seconds: u64 = trimmed.parse().map_err(|_| ParseError::TooLarge)?;
        return if seconds > 0 {
            Ok(seconds)
        } else {
            Err(ParseError::NotPositive)
        };
    }

    let tokens = scan_tokens(trimmed);
    if tokens.is_empty() {
        return Err(ParseError::Invalid(trimmed.to_string()));
    }

    let mut total: u64 = 0;
    for (value, multiplier) in tokens {
        if value <= 0.0 {
            continue;
        }
        let seconds = (value * multiplier as f64).floor();
        if !seconds.is_finite() || seconds >= u64::MAX as f64 {
            return Err(ParseError::TooLarge);
        }
        total = total
            .checked_add(seconds as u64)
            .ok_or(ParseError::TooLarge)?;
    }

    if total > 0 {
        Ok(total)
    } else {
        Err(ParseError::NotPositive)
    }
}

/// Parses a signed duration such as `"+5m"`, `"-90"` or `"-1h"`.
///
/// An unsigned value is positive.
///
/// # Errors
///
/// Same as [`parse`] for the unsigned part; values beyond `i64` fail with
/// `ParseError::TooLarge`.
pub fn parse_delta(text: &str) -> Result<i64, ParseError> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.chars().next() {
        Some('-') => (true, &trimmed[1..]),
        Some('+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = i64::try_from(parse(rest)?).map_err(|_| ParseError::TooLarge)?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Scans `<number>\s*<unit>` tokens left to right.
///
/// A failed match advances by one character, so a token may start inside a
/// longer run of digits (`"1.5.5m"` yields `5.5m`).
fn scan_tokens(text: &str) -> Vec<(f64, u64)> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match match_token(&chars, i) {
            Some((token, end)) => {
                tokens.push(token);
                i = end;
            }
            None => i += 1,
        }
    }

    tokens
}

/// Matches one token at `start`, returning it and the index just past it.
fn match_token(chars: &[char], start: usize) -> Option<((f64, u64), usize)> {
    let digits_end = skip_digits(chars, start);
    if digits_end == start {
        return None;
    }

    let mut number_end = digits_end;
    if chars.get(digits_end) == Some(&'.') {
        let fraction_end = skip_digits(chars, digits_end + 1);
        if fraction_end > digits_end + 1 {
            number_end = fraction_end;
        }
    }

    let mut unit_pos = number_end;
    while chars.get(unit_pos).is_some_and(|c| c.is_whitespace()) {
        unit_pos += 1;
    }

    let multiplier = chars.get(unit_pos).copied().and_then(unit_multiplier)?;
    let number: String = chars[start..number_end].iter().collect();
    let value: f64 = number.parse().ok()?;

    Some(((value, multiplier), unit_pos + 1))
}

fn skip_digits(chars: &[char], mut pos: usize) -> usize {
    while chars.get(pos).is_some_and(|c| c.is_ascii_digit()) {
        pos += 1;
    }
    pos
}

fn unit_multiplier(unit: char) -> Option<u64> {
    match unit.to_ascii_lowercase() {
        's' => Some(1),
        'm' => Some(SECS_PER_MINUTE),
        'h' => Some(SECS_PER_HOUR),
        'd' => Some(SECS_PER_DAY),
        _ => None,
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats seconds as the shortest form a user would type back in.
///
/// - `0` → `"1s"` (clamped minimum)
/// - under a minute → `"Ns"`
/// - under an hour → `"Mm"` (leftover seconds dropped)
/// - otherwise `"Hh"` or `"Hh Mm"`
///
/// This is lossy: `parse(format_canonical(n))` lands in the same unit
/// bucket as `n`, not necessarily on `n` itself.
#[must_use]
pub fn format_canonical(seconds: u64) -> String {
    if seconds == 0 {
        return "1s".to_string();
    }
    if seconds < SECS_PER_MINUTE {
        return format!("{}s", seconds);
    }
    if seconds < SECS_PER_HOUR {
        return format!("{}m", seconds / SECS_PER_MINUTE);
    }

    let hours = seconds / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    if minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}h", hours)
    }
}

/// Formats seconds as zero-padded `MM:SS`; minutes are not wrapped at 60.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    format!(
        "{:02}:{:02}",
        seconds / SECS_PER_MINUTE,
        seconds % SECS_PER_MINUTE
    )
}

/// Formats seconds for the tray glyph: `"—"`, `"Ns"`, `"Mm"` or `"H.Dh"`.
///
/// The hour form keeps one decimal, truncated rather than rounded
/// (5400 → `"1.5h"`, 3959 → `"1.0h"`).
#[must_use]
pub fn format_tray_abbrev(seconds: u64) -> String {
    if seconds == 0 {
        return TRAY_EMPTY.to_string();
    }
    if seconds < SECS_PER_MINUTE {
        return format!("{}s", seconds);
    }
    if seconds < SECS_PER_HOUR {
        return format!("{}m", seconds / SECS_PER_MINUTE);
    }

    let tenths = seconds / (SECS_PER_HOUR / 10);
    format!("{}.{}h", tenths / 10, tenths % 10)
}

// ============================================================================
// Input nudging
// ============================================================================

/// Applies a nudge step to the text of an idle duration input.
///
/// Returns the replacement text, or `None` when the input should stay as is:
/// - unparseable input becomes `format_canonical(delta)` for positive steps
/// - otherwise the step is added; a negative result leaves the input alone
///
/// ```
/// use tray_timer::duration::adjust_input;
///
/// assert_eq!(adjust_input("25m", 300), Some("30m".to_string()));
/// assert_eq!(adjust_input("", -60), None);
/// ```
#[must_use]
pub fn adjust_input(current: &str, delta: i64) -> Option<String> {
    match parse(current) {
        Err(_) => (delta > 0).then(|| format_canonical(delta.unsigned_abs())),
        Ok(seconds) => {
            let updated = i128::from(seconds) + i128::from(delta);
            if updated < 0 {
                return None;
            }
            Some(format_canonical(
                u64::try_from(updated).unwrap_or(u64::MAX),
            ))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
