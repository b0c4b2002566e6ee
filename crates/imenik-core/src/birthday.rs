//! Parsing of the textual date grammars accepted for `birthday`.
//!
//! The separator decides the field order, so no input matches two grammars
//! with different meanings: slashes are month-first, dots and dashes are
//! day-first unless the year leads.

use chrono::{Datelike, NaiveDate};

use crate::{Error, Result};

/// Accepted input grammars, tried in order. Numeric fields accept one or two
/// digits; month names may be full or abbreviated.
pub const INPUT_FORMATS: &[&str] = &[
  "%m/%d/%Y",
  "%d.%m.%Y",
  "%Y-%m-%d",
  "%d-%m-%Y",
  "%B %d, %Y",
  "%d %B %Y",
];

/// Parse a birthday from any of [`INPUT_FORMATS`].
///
/// Two-digit (or otherwise short) years are rejected rather than guessed.
pub fn parse_birthday(input: &str) -> Result<NaiveDate> {
  let input = input.trim();
  let date = INPUT_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
    .ok_or_else(|| Error::UnrecognisedDate(input.to_owned()))?;

  if !(1000..=9999).contains(&date.year()) {
    return Err(Error::YearOutOfRange(input.to_owned()));
  }
  Ok(date)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn us_slash_is_month_first() {
    assert_eq!(parse_birthday("05/14/1988").unwrap(), ymd(1988, 5, 14));
  }

  #[test]
  fn dotted_is_day_first_with_short_month() {
    assert_eq!(parse_birthday("14.5.1988").unwrap(), ymd(1988, 5, 14));
    assert_eq!(parse_birthday("14.05.1988").unwrap(), ymd(1988, 5, 14));
  }

  #[test]
  fn grammars_agree_on_the_same_day() {
    let expected = ymd(1988, 5, 14);
    for input in [
      "05/14/1988",
      "14.5.1988",
      "1988-05-14",
      "14-05-1988",
      "May 14, 1988",
      "14 May 1988",
      "14 may 1988",
    ] {
      assert_eq!(parse_birthday(input).unwrap(), expected, "input {input:?}");
    }
  }

  #[test]
  fn surrounding_whitespace_is_ignored() {
    assert_eq!(parse_birthday("  1988-05-14 ").unwrap(), ymd(1988, 5, 14));
  }

  #[test]
  fn day_first_slash_is_rejected() {
    assert!(matches!(
      parse_birthday("14/05/1988"),
      Err(Error::UnrecognisedDate(_))
    ));
  }

  #[test]
  fn impossible_dates_are_rejected() {
    assert!(parse_birthday("02/30/1988").is_err());
    assert!(parse_birthday("31.4.1988").is_err());
  }

  #[test]
  fn short_years_are_rejected() {
    assert!(matches!(
      parse_birthday("14.5.88"),
      Err(Error::YearOutOfRange(_))
    ));
  }

  #[test]
  fn garbage_is_rejected() {
    assert!(parse_birthday("not a date").is_err());
    assert!(parse_birthday("1988").is_err());
    assert!(parse_birthday("05/14/1988 extra").is_err());
  }
}
