// Validation utilities module
// Provides custom validation functions for domain-specific rules

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that a phone number is plausible: digits with optional leading +,
/// spaces or dashes allowed, at least 6 digits
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let trimmed = phone.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = rest.chars().filter(|c| c.is_ascii_digit()).count();
    let valid_chars = rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');

    if digits >= 6 && valid_chars {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

/// Validates that a monetary value is not negative
pub fn validate_non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        Err(ValidationError::new("amount_must_not_be_negative"))
    } else {
        Ok(())
    }
}

/// Validates that a margin percentage is not negative
pub fn validate_margin(margin: &Decimal) -> Result<(), ValidationError> {
    if margin.is_sign_negative() {
        Err(ValidationError::new("margin_must_not_be_negative"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_phone_formats() {
        assert!(validate_phone("600000000").is_ok());
        assert!(validate_phone("+34 600 00 00 00").is_ok());
        assert!(validate_phone("600-123-456").is_ok());
    }

    #[test]
    fn test_invalid_phone_formats() {
        assert!(validate_phone("12345").is_err()); // too short
        assert!(validate_phone("not a phone").is_err());
        assert!(validate_phone("600000000x").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_non_negative_amount() {
        assert!(validate_non_negative_amount(&dec!(0)).is_ok());
        assert!(validate_non_negative_amount(&dec!(19.99)).is_ok());
        assert!(validate_non_negative_amount(&dec!(-0.01)).is_err());
    }

    #[test]
    fn test_margin_bounds() {
        assert!(validate_margin(&dec!(0)).is_ok());
        assert!(validate_margin(&dec!(150)).is_ok());
        assert!(validate_margin(&dec!(-1)).is_err());
    }
}
