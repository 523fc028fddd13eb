//! Birth date parsing and rendering.
//!
//! A deployment picks one display pattern (for example `yyyy-MM-dd` or
//! `dd/MM/yyyy`) and the same [`DateCodec`] is used to parse incoming payloads
//! and to render stored dates, so a value written through the API reads back
//! byte-for-byte identical.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Pattern used when no configuration overrides it.
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd";

/// Errors raised when a display pattern cannot be translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatePatternError {
    /// The pattern was empty or only whitespace.
    #[error("date pattern must not be empty")]
    Empty,
    /// The pattern contained a letter run other than `yyyy`, `MM` or `dd`.
    #[error("unsupported date pattern token `{token}`")]
    UnsupportedToken { token: String },
    /// The pattern does not contain a year, month and day exactly once.
    #[error("date pattern `{pattern}` must contain yyyy, MM and dd exactly once")]
    Incomplete { pattern: String },
}

/// Raised when an input string does not match the configured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Data no formato invalido. Utilize o formato {pattern}.")]
pub struct DateCodecError {
    pattern: String,
}

impl DateCodecError {
    /// The display pattern the caller should have used.
    pub fn expected_pattern(&self) -> &str {
        &self.pattern
    }
}

/// A value that may already be rendered.
///
/// Rendering a [`DateValue::Text`] is a no-op so callers can format values
/// that were never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue<'a> {
    /// A calendar date to render with the configured pattern.
    Date(NaiveDate),
    /// Text that is passed through untouched.
    Text(&'a str),
}

/// Parses and formats dates with a single configurable pattern.
///
/// # Examples
/// ```
/// use patient_registry::domain::DateCodec;
///
/// let codec = DateCodec::new("dd/MM/yyyy").expect("supported pattern");
/// let date = codec.parse("20/05/1990").expect("valid date");
/// assert_eq!(codec.format(date), "20/05/1990");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCodec {
    pattern: String,
    strftime: String,
}

impl Default for DateCodec {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_PATTERN.to_owned(),
            strftime: "%Y-%m-%d".to_owned(),
        }
    }
}

impl DateCodec {
    /// Build a codec from a display pattern such as `yyyy-MM-dd`.
    pub fn new(pattern: impl Into<String>) -> Result<Self, DatePatternError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(DatePatternError::Empty);
        }
        let strftime = translate_pattern(&pattern)?;
        Ok(Self { pattern, strftime })
    }

    /// The display pattern, as configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Strictly parse `input` against the configured pattern.
    pub fn parse(&self, input: &str) -> Result<NaiveDate, DateCodecError> {
        NaiveDate::parse_from_str(input, &self.strftime).map_err(|_| DateCodecError {
            pattern: self.pattern.clone(),
        })
    }

    /// Render `date` with the configured pattern.
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.strftime).to_string()
    }

    /// Render a date, passing already-rendered text through unchanged.
    pub fn format_value<'a>(&self, value: DateValue<'a>) -> Cow<'a, str> {
        match value {
            DateValue::Date(date) => Cow::Owned(self.format(date)),
            DateValue::Text(text) => Cow::Borrowed(text),
        }
    }
}

impl fmt::Display for DateCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn translate_pattern(pattern: &str) -> Result<String, DatePatternError> {
    let mut strftime = String::with_capacity(pattern.len());
    let mut seen = (0_u8, 0_u8, 0_u8);
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if !ch.is_ascii_alphabetic() {
            if ch == '%' {
                strftime.push_str("%%");
            } else {
                strftime.push(ch);
            }
            continue;
        }

        let mut token = String::from(ch);
        while let Some(&next) = chars.peek() {
            if next != ch {
                break;
            }
            token.push(next);
            chars.next();
        }

        match token.as_str() {
            "yyyy" => {
                seen.0 = seen.0.saturating_add(1);
                strftime.push_str("%Y");
            }
            "MM" => {
                seen.1 = seen.1.saturating_add(1);
                strftime.push_str("%m");
            }
            "dd" => {
                seen.2 = seen.2.saturating_add(1);
                strftime.push_str("%d");
            }
            _ => return Err(DatePatternError::UnsupportedToken { token }),
        }
    }

    if seen != (1, 1, 1) {
        return Err(DatePatternError::Incomplete {
            pattern: pattern.to_owned(),
        });
    }
    Ok(strftime)
}
