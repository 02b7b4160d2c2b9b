//! Validation and decoding of 10-digit national identity codes.
//!
//! A code packs a birth date (two-digit year, month field with century
//! encoding, day), a gender marker, and a weighted-checksum digit into ten
//! ASCII digits. All functions are pure: the caller supplies the reference
//! date for age computation, keeping the codec testable and clock-free.
//!
//! # Design Principle
//!
//! Validation and decoding are split so callers can cheaply reject
//! malformed input before committing to a full decode. [`extract_birth_date`]
//! independently re-validates the calendar date — a code can pass the
//! digit-count check yet encode day 31 in a 30-day month, and must be
//! rejected even when the checksum happens to pass.
//!
//! # Functions
//!
//! - [`is_valid`] — boolean input gate, never fails
//! - [`validate`] — same checks, surfacing the specific failure kind
//! - [`extract_birth_date`] — decode the embedded birth date
//! - [`gender`] — gender marker of a fully valid code
//! - [`age_on`] — whole years between the birth date and a reference date
//! - [`decode`] — everything at once for fully valid codes

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::NamedayError;

/// Weights applied to the first nine digits for the modulo-11 checksum.
const CHECKSUM_WEIGHTS: [u32; 9] = [2, 4, 8, 5, 10, 9, 7, 3, 6];

/// Gender marker encoded in the ninth digit (even = male, odd = female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

/// The fully decoded view of a valid identity code.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedIdentity {
    /// Birth date extracted from the code.
    pub birth_date: NaiveDate,
    /// Gender marker from the ninth digit.
    pub gender: Gender,
    /// Whole years of age at the reference date given to [`decode`].
    pub age: i32,
}

/// Check whether a code is structurally valid: ten digits, a real embedded
/// birth date, and a matching checksum digit.
///
/// Fails closed — returns `false` for any malformed input, never errors.
/// Use [`validate`] when the caller needs to know *why* a code is invalid.
///
/// # Examples
///
/// ```
/// use nameday_engine::identity::is_valid;
///
/// assert!(is_valid("8001014507"));
/// assert!(!is_valid("8001014500")); // checksum digit wrong
/// assert!(!is_valid("80010145"));   // too short
/// ```
pub fn is_valid(code: &str) -> bool {
    validate(code).is_ok()
}

/// Validate a code, surfacing the specific failure kind.
///
/// Checks run in order of increasing cost and specificity:
///
/// 1. shape — exactly ten ASCII digits, else [`NamedayError::InvalidFormat`]
/// 2. embedded date — must be a real Gregorian date, else
///    [`NamedayError::InvalidDate`]
/// 3. checksum — weighted modulo-11 test, else
///    [`NamedayError::ChecksumMismatch`]
pub fn validate(code: &str) -> Result<(), NamedayError> {
    let digits = code_digits(code)?;
    decode_birth_date(&digits)?;
    if !checksum_matches(&digits) {
        return Err(NamedayError::ChecksumMismatch(code.to_string()));
    }
    Ok(())
}

/// Decode the birth date embedded in a code.
///
/// Digits 0–1 are a two-digit year, 2–3 a raw month carrying the century,
/// 4–5 the day. Century encoding on the raw month:
///
/// - raw month > 40 — 2000s, actual month = raw − 40
/// - raw month > 20 — 1800s, actual month = raw − 20
/// - otherwise — 1900s, actual month unchanged
///
/// The checksum is deliberately **not** checked here; pair with [`validate`]
/// or [`is_valid`] when full validity matters.
///
/// # Errors
///
/// Returns [`NamedayError::InvalidFormat`] if the code is not exactly ten
/// digits, or [`NamedayError::InvalidDate`] if the decoded month/day do not
/// form a valid calendar date for the decoded year.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use nameday_engine::identity::extract_birth_date;
///
/// let date = extract_birth_date("8001014507").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap());
/// ```
pub fn extract_birth_date(code: &str) -> Result<NaiveDate, NamedayError> {
    let digits = code_digits(code)?;
    decode_birth_date(&digits)
}

/// Return the gender marker of a fully valid code.
///
/// # Errors
///
/// Surfaces the specific validation failure ([`NamedayError::InvalidFormat`],
/// [`NamedayError::InvalidDate`], or [`NamedayError::ChecksumMismatch`]) when
/// the code is not valid.
pub fn gender(code: &str) -> Result<Gender, NamedayError> {
    let digits = code_digits(code)?;
    decode_birth_date(&digits)?;
    if !checksum_matches(&digits) {
        return Err(NamedayError::ChecksumMismatch(code.to_string()));
    }
    Ok(gender_from_digit(digits[8]))
}

/// Whole years between the embedded birth date and `reference`, decremented
/// by one when the birth anniversary has not yet occurred in the reference
/// year.
///
/// # Errors
///
/// Same as [`extract_birth_date`]; the checksum is not consulted.
pub fn age_on(code: &str, reference: NaiveDate) -> Result<i32, NamedayError> {
    let birth = extract_birth_date(code)?;
    Ok(years_between(birth, reference))
}

/// Fully validate a code and decode every derived field at once.
///
/// `reference` anchors the age computation (typically "today" supplied by
/// the caller).
///
/// # Errors
///
/// Same taxonomy as [`validate`].
pub fn decode(code: &str, reference: NaiveDate) -> Result<DecodedIdentity, NamedayError> {
    let digits = code_digits(code)?;
    let birth_date = decode_birth_date(&digits)?;
    if !checksum_matches(&digits) {
        return Err(NamedayError::ChecksumMismatch(code.to_string()));
    }
    Ok(DecodedIdentity {
        birth_date,
        gender: gender_from_digit(digits[8]),
        age: years_between(birth_date, reference),
    })
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Extract the ten digits of a code, rejecting anything else.
fn code_digits(code: &str) -> Result<[u32; 10], NamedayError> {
    let bytes = code.as_bytes();
    if bytes.len() != 10 {
        return Err(NamedayError::InvalidFormat(format!(
            "expected 10 digits, got {} characters",
            code.chars().count()
        )));
    }
    let mut digits = [0u32; 10];
    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(NamedayError::InvalidFormat(format!(
                "non-digit character in '{code}'"
            )));
        }
        digits[i] = u32::from(b - b'0');
    }
    Ok(digits)
}

/// Decode the birth date from the digit array, applying century encoding.
fn decode_birth_date(digits: &[u32; 10]) -> Result<NaiveDate, NamedayError> {
    let yy = (digits[0] * 10 + digits[1]) as i32;
    let raw_month = digits[2] * 10 + digits[3];
    let day = digits[4] * 10 + digits[5];

    let (year, month) = if raw_month > 40 {
        (2000 + yy, raw_month - 40)
    } else if raw_month > 20 {
        (1800 + yy, raw_month - 20)
    } else {
        (1900 + yy, raw_month)
    };

    // from_ymd_opt enforces month range and per-month day count, leap years
    // included.
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        NamedayError::InvalidDate(format!("{year:04}-{month:02}-{day:02}"))
    })
}

/// Expected checksum digit for the first nine digits.
fn expected_check_digit(digits: &[u32; 10]) -> u32 {
    let sum: u32 = digits[..9]
        .iter()
        .zip(CHECKSUM_WEIGHTS)
        .map(|(d, w)| d * w)
        .sum();
    match sum % 11 {
        10 => 0,
        rem => rem,
    }
}

fn checksum_matches(digits: &[u32; 10]) -> bool {
    expected_check_digit(digits) == digits[9]
}

fn gender_from_digit(digit: u32) -> Gender {
    if digit % 2 == 0 {
        Gender::Male
    } else {
        Gender::Female
    }
}

/// Whole years from `birth` to `reference` with the has-anniversary-passed
/// adjustment.
fn years_between(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

// ── Tests ───────────────────────────────────────────────────────────────────
