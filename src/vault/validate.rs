//! Field validation run before any record enters the vault.

use std::sync::LazyLock;

use regex::Regex;

use super::record::{CardRecord, PasswordRecord};
use crate::errors::ValidationError;

static EXPIRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").unwrap_or_else(|e| panic!("expiry regex: {e}"))
});

const MIN_CARD_DIGITS: usize = 15;
const MAX_CARD_DIGITS: usize = 19;

/// Strip the spaces and hyphens people type between digit groups.
pub fn normalize_card_number(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect()
}

pub fn password(record: &PasswordRecord) -> Result<(), ValidationError> {
    require("site name", &record.site_name)?;
    require("username", &record.username)?;
    require("password", &record.secret)?;
    Ok(())
}

pub fn card(record: &CardRecord) -> Result<(), ValidationError> {
    require("card name", &record.card_name)?;
    require("cardholder name", &record.cardholder_name)?;
    require("card number", &record.card_number)?;
    card_number(&record.card_number)?;
    require("expiry date", &record.expiry_date)?;
    expiry(&record.expiry_date)?;
    cvv(&record.cvv)
}

/// Digits only, 15 to 19 of them.
pub fn card_number(number: &str) -> Result<(), ValidationError> {
    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::CardNumberNotDigits);
    }
    let len = number.len();
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&len) {
        return Err(ValidationError::CardNumberLength(len));
    }
    Ok(())
}

/// `MM/YY` with a real month.
pub fn expiry(value: &str) -> Result<(), ValidationError> {
    if EXPIRY.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::ExpiryFormat(value.to_string()))
    }
}

pub fn cvv(value: &str) -> Result<(), ValidationError> {
    if (3..=4).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::CvvFormat)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::record::{CardType, NewCard, Record};
    use chrono::Utc;

    fn card_with(number: &str, expiry: &str, cvv: &str) -> CardRecord {
        CardRecord::create(
            NewCard {
                card_name: "Main".into(),
                card_type: CardType::Visa,
                cardholder_name: "Ada".into(),
                card_number: number.into(),
                expiry_date: expiry.into(),
                cvv: cvv.into(),
            },
            "id".into(),
            Utc::now(),
        )
    }

    #[test]
    fn accepts_valid_card() {
        assert_eq!(card(&card_with("4111111111111111", "07/29", "123")), Ok(()));
        assert_eq!(card(&card_with("378282246310005", "12/30", "1234")), Ok(()));
    }

    #[test]
    fn rejects_short_card_number_with_length_reason() {
        assert_eq!(
            card(&card_with("123", "07/29", "123")),
            Err(ValidationError::CardNumberLength(3))
        );
    }

    #[test]
    fn rejects_long_card_number() {
        assert_eq!(
            card_number(&"4".repeat(20)),
            Err(ValidationError::CardNumberLength(20))
        );
    }

    #[test]
    fn rejects_letters_in_card_number() {
        assert_eq!(
            card_number("4111x11111111111"),
            Err(ValidationError::CardNumberNotDigits)
        );
    }

    #[test]
    fn expiry_needs_real_month() {
        assert!(expiry("07/29").is_ok());
        assert!(expiry("12/00").is_ok());
        assert!(expiry("13/29").is_err());
        assert!(expiry("00/29").is_err());
        assert!(expiry("7/29").is_err());
        assert!(expiry("07/2029").is_err());
    }

    #[test]
    fn cvv_is_three_or_four_digits() {
        assert!(cvv("123").is_ok());
        assert!(cvv("1234").is_ok());
        assert_eq!(cvv("12"), Err(ValidationError::CvvFormat));
        assert_eq!(cvv("12a"), Err(ValidationError::CvvFormat));
        assert_eq!(cvv("12345"), Err(ValidationError::CvvFormat));
    }

    #[test]
    fn empty_required_field_is_named() {
        let mut c = card_with("4111111111111111", "07/29", "123");
        c.card_name = "  ".into();
        assert_eq!(card(&c), Err(ValidationError::EmptyField("card name")));
    }
}
