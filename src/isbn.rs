//! ISBN helpers.
//!
//! The parse pipeline only applies [`is_well_formed`], a loose shape check:
//! an extracted ISBN with an implausible shape is reported through
//! [`crate::ParseWarning::ImplausibleIsbn`] but kept verbatim, since
//! scanned catalog exports frequently carry transcription noise and a
//! checksum failure would discard usable data. The strict checksum
//! validators are provided for downstream callers that want to verify an
//! identifier before use.

/// Strip dashes and spaces from an ISBN.
///
/// # Examples
///
/// ```
/// assert_eq!(marcline::isbn::normalize("978-0-14-044913-6"), "9780140449136");
/// ```
#[must_use]
pub fn normalize(isbn: &str) -> String {
    isbn.replace(['-', ' '], "")
}

/// Loose shape check: after stripping separators, the value must be 10 or
/// 13 characters of digits, where only the final character of a 10-digit
/// form may be `X`.
///
/// This is deliberately weaker than a checksum validation.
#[must_use]
pub fn is_well_formed(isbn: &str) -> bool {
    let clean = normalize(isbn);
    let chars: Vec<char> = clean.chars().collect();
    match chars.len() {
        10 => {
            chars[..9].iter().all(char::is_ascii_digit)
                && (chars[9].is_ascii_digit() || chars[9] == 'X' || chars[9] == 'x')
        }
        13 => chars.iter().all(char::is_ascii_digit),
        _ => false,
    }
}

/// Validate an ISBN-10 checksum (weights 10 down to 1, mod 11; the check
/// digit may be `X` for 10).
#[must_use]
pub fn validate_isbn10(isbn: &str) -> bool {
    let clean = normalize(isbn);
    if clean.len() != 10 {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, ch) in clean.chars().enumerate() {
        let digit = if i == 9 && (ch == 'X' || ch == 'x') {
            10
        } else if let Some(d) = ch.to_digit(10) {
            d
        } else {
            return false;
        };
        sum += digit * (10 - u32::try_from(i).unwrap_or(10));
    }
    sum % 11 == 0
}

/// Validate an ISBN-13 checksum (alternating weights 1 and 3, mod 10; must
/// start with a `978` or `979` prefix).
#[must_use]
pub fn validate_isbn13(isbn: &str) -> bool {
    let clean = normalize(isbn);
    if clean.len() != 13 || !(clean.starts_with("978") || clean.starts_with("979")) {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, ch) in clean.chars().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        sum += digit * if i % 2 == 0 { 1 } else { 3 };
    }
    sum % 10 == 0
}

/// Validate an ISBN checksum, auto-detecting the 10- or 13-digit form.
#[must_use]
pub fn validate(isbn: &str) -> bool {
    match normalize(isbn).len() {
        10 => validate_isbn10(isbn),
        13 => validate_isbn13(isbn),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("978-0-14-044913-6"), "9780140449136");
        assert_eq!(normalize("0 306 40615 2"), "0306406152");
    }

    #[test]
    fn test_well_formed_accepts_plausible_shapes() {
        assert!(is_well_formed("9780140449136"));
        assert!(is_well_formed("978-0-14-044913-6"));
        assert!(is_well_formed("0306406152"));
        assert!(is_well_formed("043942089X"));
        // Wrong checksum but right shape is still well-formed.
        assert!(is_well_formed("9780140449135"));
    }

    #[test]
    fn test_well_formed_rejects_wrong_shapes() {
        assert!(!is_well_formed("ISBN123"));
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("97801404491367"));
        assert!(!is_well_formed("X780140449136"));
    }

    #[test]
    fn test_validate_isbn10() {
        assert!(validate_isbn10("0306406152"));
        assert!(validate_isbn10("0-439-42089-X"));
        assert!(!validate_isbn10("0306406153"));
        assert!(!validate_isbn10("abcd123456"));
    }

    #[test]
    fn test_validate_isbn13() {
        assert!(validate_isbn13("9780306406157"));
        assert!(validate_isbn13("978-0-14-044913-6"));
        assert!(!validate_isbn13("9780306406158"));
        assert!(!validate_isbn13("1234567890123"));
    }

    #[test]
    fn test_validate_auto_detect() {
        assert!(validate("0306406152"));
        assert!(validate("9780306406157"));
        assert!(!validate("123"));
    }
}
