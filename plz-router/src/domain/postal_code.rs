//! Postal code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid postal code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid postal code: {reason}")]
pub struct InvalidPostalCode {
    reason: &'static str,
}

/// A valid German postal code (PLZ).
///
/// A PLZ is always exactly 5 ASCII digits. Leading zeros are significant,
/// so the code is stored as its digits rather than as a number.
///
/// # Examples
///
/// ```
/// use plz_router::domain::PostalCode;
///
/// let plz = PostalCode::parse("01067").unwrap();
/// assert_eq!(plz.as_str(), "01067");
/// assert_eq!(plz.leading_digit(), 0);
///
/// // Wrong length is rejected
/// assert!(PostalCode::parse("1234").is_err());
/// assert!(PostalCode::parse("123456").is_err());
///
/// // Non-digits are rejected
/// assert!(PostalCode::parse("12a45").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostalCode([u8; 5]);

impl PostalCode {
    /// Parse a postal code from a string.
    ///
    /// The input must be exactly 5 ASCII digits, with no surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidPostalCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 {
            return Err(InvalidPostalCode {
                reason: "must be exactly 5 digits",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidPostalCode {
                reason: "must contain only digits 0-9",
            });
        }

        Ok(PostalCode([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]]))
    }

    /// Parse user input, discarding everything that is not an ASCII digit.
    ///
    /// `" 12 345 "` parses as `12345`; `"12a45"` leaves four digits and is rejected.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidPostalCode> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(InvalidPostalCode {
                reason: "no digits given",
            });
        }
        Self::parse(&digits)
    }

    /// Returns the postal code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII digits
        std::str::from_utf8(&self.0).unwrap()
    }

    /// The first digit, which drives all routing decisions.
    pub fn leading_digit(&self) -> u8 {
        self.0[0] - b'0'
    }
}

impl fmt::Debug for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostalCode({})", self.as_str())
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PostalCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
