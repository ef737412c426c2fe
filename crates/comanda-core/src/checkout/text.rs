//! Free-text cleanup, client-name validation and order references.

use crate::error::ComandaError;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Minimum client-name length, in characters, after trimming.
pub const MIN_CLIENT_NAME_LEN: usize = 5;

/// Maximum number of letters taken from the name for a reference.
pub const REFERENCE_PREFIX_LEN: usize = 3;

/// Strip characters that could break the order message.
///
/// Keeps letters (ASCII, Latin-1 and Latin Extended), ASCII digits, `.` `,`
/// and `-`. Every whitespace character becomes a plain space so a note
/// cannot add lines to the message. Everything else is dropped, including
/// the `*` `_` `~` markup characters.
///
/// ```
/// use comanda_core::checkout::sanitize_free_text;
/// assert_eq!(sanitize_free_text("sin *cebolla*\n¡ya!"), "sin cebolla ya");
/// ```
pub fn sanitize_free_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if is_permitted(c) {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

fn is_permitted(c: char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | ',' | '-' => true,
        '\u{00D7}' | '\u{00F7}' => false,
        '\u{00C0}'..='\u{024F}' => true,
        _ => false,
    }
}

/// Trim a client name and check it is long enough.
pub fn validate_client(name: &str) -> Result<String, ComandaError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_CLIENT_NAME_LEN {
        return Err(ComandaError::InvalidName {
            min: MIN_CLIENT_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Build a short, memorable order reference: `PREFIX` + `DD` + `HHMMSS`.
///
/// `PREFIX` is the first three ASCII letters of `name`, upper-cased; it is
/// shorter when the name has fewer letters. Two clients with similar names
/// ordering in the same second get the same reference.
///
/// ```
/// use chrono::NaiveDate;
/// use comanda_core::checkout::generate_reference;
///
/// let now = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap().and_hms_opt(8, 3, 7).unwrap();
/// assert_eq!(generate_reference("Ana", now), "ANA05080307");
/// ```
pub fn generate_reference(name: &str, now: NaiveDateTime) -> String {
    let prefix: String = name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(REFERENCE_PREFIX_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    format!(
        "{}{:02}{:02}{:02}{:02}",
        prefix,
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}
