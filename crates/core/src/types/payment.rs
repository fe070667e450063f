//! Checkout customer and payment details.
//!
//! No payment is captured: the card fields are only format-checked (Luhn,
//! expiration, CVV length) and stored with the order.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::email::{Email, EmailError};

/// Shortest accepted first or last name.
const MIN_NAME_LENGTH: usize = 3;

/// Shortest accepted ASU ID.
const MIN_ASU_ID_LENGTH: usize = 3;

/// Errors found while validating checkout details.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("{field} must be at least 3 letters")]
    InvalidName { field: &'static str },
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("card number must be 12 to 19 digits")]
    CardNumberFormat,
    #[error("card number failed checksum")]
    CardNumberChecksum,
    #[error("expiration month must be between 1 and 12")]
    ExpirationMonth,
    #[error("expiration year is out of range")]
    ExpirationYear,
    #[error("CVV must be 3 or 4 digits")]
    Cvv,
    #[error("ASU ID must be at least 3 digits")]
    AsuId,
}

/// Card expiration month and four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExpiration {
    pub month: u8,
    pub year: u16,
}

impl CardExpiration {
    /// Build an expiration date, reading two-digit years as 20YY.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::ExpirationMonth` or `PaymentError::ExpirationYear`.
    pub fn new(month: u32, year: u32) -> Result<Self, PaymentError> {
        let month = u8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(PaymentError::ExpirationMonth)?;
        let year = match year {
            0..=99 => 2000 + year,
            2000..=2099 => year,
            _ => return Err(PaymentError::ExpirationYear),
        };
        let year = u16::try_from(year).map_err(|_| PaymentError::ExpirationYear)?;
        Ok(Self { month, year })
    }
}

impl fmt::Display for CardExpiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Validated checkout details.
///
/// Implements `Debug` manually to redact card data.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub card_number: String,
    pub card_expiration: CardExpiration,
    pub card_cvv: String,
    pub asu_id: String,
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("card_number", &"[REDACTED]")
            .field("card_expiration", &"[REDACTED]")
            .field("card_cvv", &"[REDACTED]")
            .field("asu_id", &self.asu_id)
            .finish()
    }
}

impl PaymentDetails {
    /// Validate raw checkout fields.
    ///
    /// Whitespace and dashes inside the card number are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first `PaymentError` found, checking fields in form order.
    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        first_name: &str,
        last_name: &str,
        email: &str,
        card_number: &str,
        expiration_month: u32,
        expiration_year: u32,
        card_cvv: &str,
        asu_id: &str,
    ) -> Result<Self, PaymentError> {
        let first_name = validate_name(first_name, "first name")?;
        let last_name = validate_name(last_name, "last name")?;
        let email = Email::parse(email)?;

        let card_number: String = card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if !(12..=19).contains(&card_number.len()) || !is_digits(&card_number) {
            return Err(PaymentError::CardNumberFormat);
        }
        if !luhn_valid(&card_number) {
            return Err(PaymentError::CardNumberChecksum);
        }

        let card_expiration = CardExpiration::new(expiration_month, expiration_year)?;

        let card_cvv = card_cvv.trim();
        if !(3..=4).contains(&card_cvv.len()) || !is_digits(card_cvv) {
            return Err(PaymentError::Cvv);
        }

        let asu_id = asu_id.trim();
        if asu_id.len() < MIN_ASU_ID_LENGTH || !is_digits(asu_id) {
            return Err(PaymentError::AsuId);
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            card_number,
            card_expiration,
            card_cvv: card_cvv.to_owned(),
            asu_id: asu_id.to_owned(),
        })
    }

    /// Customer's display name ("First Last").
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn validate_name(value: &str, field: &'static str) -> Result<String, PaymentError> {
    let value = value.trim();
    if value.len() < MIN_NAME_LENGTH || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PaymentError::InvalidName { field });
    }
    Ok(value.to_owned())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Luhn checksum over a string of ASCII digits.
///
/// Returns `false` for empty input or any non-digit character.
#[must_use]
pub fn luhn_valid(digits: &str) -> bool {
    if !is_digits(digits) {
        return false;
    }
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VISA_TEST: &str = "4111111111111111";

    fn valid() -> Result<PaymentDetails, PaymentError> {
        PaymentDetails::validate(
            "Sparky", "Devil", "sparky@asu.edu", VISA_TEST, 4, 27, "123", "1234567890",
        )
    }

    #[test]
    fn test_luhn() {
        assert!(luhn_valid(VISA_TEST));
        assert!(luhn_valid("79927398713"));
        assert!(!luhn_valid("79927398710"));
        assert!(!luhn_valid(""));
        assert!(!luhn_valid("4111-1111"));
    }

    #[test]
    fn test_validate_accepts_good_details() {
        let details = valid().unwrap();
        assert_eq!(details.full_name(), "Sparky Devil");
        assert_eq!(details.card_expiration, CardExpiration { month: 4, year: 2027 });
    }

    #[test]
    fn test_validate_strips_card_separators() {
        let details = PaymentDetails::validate(
            "Sparky",
            "Devil",
            "sparky@asu.edu",
            "4111 1111-1111 1111",
            12,
            2030,
            "1234",
            "123",
        )
        .unwrap();
        assert_eq!(details.card_number, VISA_TEST);
    }

    #[test]
    fn test_validate_rejects_each_field() {
        let check = |result: Result<PaymentDetails, PaymentError>, expected: PaymentError| {
            assert_eq!(result.unwrap_err(), expected);
        };

        check(
            PaymentDetails::validate("Al", "Devil", "a@b.co", VISA_TEST, 1, 25, "123", "123"),
            PaymentError::InvalidName { field: "first name" },
        );
        check(
            PaymentDetails::validate("Sparky", "D3vil", "a@b.co", VISA_TEST, 1, 25, "123", "123"),
            PaymentError::InvalidName { field: "last name" },
        );
        check(
            PaymentDetails::validate("Sparky", "Devil", "a@b", VISA_TEST, 1, 25, "123", "123"),
            PaymentError::InvalidEmail(EmailError::InvalidDomain),
        );
        check(
            PaymentDetails::validate("Sparky", "Devil", "a@b.co", "4111", 1, 25, "123", "123"),
            PaymentError::CardNumberFormat,
        );
        check(
            PaymentDetails::validate(
                "Sparky",
                "Devil",
                "a@b.co",
                "4111111111111112",
                1,
                25,
                "123",
                "123",
            ),
            PaymentError::CardNumberChecksum,
        );
        check(
            PaymentDetails::validate("Sparky", "Devil", "a@b.co", VISA_TEST, 13, 25, "123", "123"),
            PaymentError::ExpirationMonth,
        );
        check(
            PaymentDetails::validate("Sparky", "Devil", "a@b.co", VISA_TEST, 1, 1999, "123", "123"),
            PaymentError::ExpirationYear,
        );
        check(
            PaymentDetails::validate("Sparky", "Devil", "a@b.co", VISA_TEST, 1, 25, "12a", "123"),
            PaymentError::Cvv,
        );
        check(
            PaymentDetails::validate("Sparky", "Devil", "a@b.co", VISA_TEST, 1, 25, "123", "12"),
            PaymentError::AsuId,
        );
    }

    #[test]
    fn test_debug_redacts_card_data() {
        let debug_output = format!("{:?}", valid().unwrap());
        assert!(debug_output.contains("Sparky"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(VISA_TEST));
        assert!(!debug_output.contains("123\""));
    }
}
