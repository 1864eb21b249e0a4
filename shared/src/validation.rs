//! Validation utilities for the Vyapaar platform
//!
//! Includes India-specific GST identifier checks used on registration
//! and invoice settings forms.

use rust_decimal::Decimal;

/// Validate a GSTIN: 15 characters — 2-digit state code, 10-character
/// PAN, entity digit, the literal 'Z', and a checksum character.
/// Structure only; the checksum itself is not verified here.
pub fn validate_gstin(gstin: &str) -> Result<(), &'static str> {
    let bytes = gstin.as_bytes();
    if bytes.len() != 15 {
        return Err("GSTIN must be exactly 15 characters");
    }
    if !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
        return Err("GSTIN must start with a 2-digit state code");
    }
    if !gstin
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err("GSTIN may only contain digits and uppercase letters");
    }
    if bytes[13] != b'Z' {
        return Err("GSTIN character 14 must be 'Z'");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a unit rate used for repricing: finite and strictly positive.
pub fn validate_rate(rate: Decimal) -> Result<(), &'static str> {
    if rate <= Decimal::ZERO {
        return Err("Rate must be greater than zero");
    }
    Ok(())
}

/// Validate a `#RRGGBB` hex color used in invoice settings
pub fn validate_hex_color(color: &str) -> Result<(), &'static str> {
    let rest = color
        .strip_prefix('#')
        .ok_or("Color must start with '#'")?;
    if rest.len() != 6 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Color must be a 6-digit hex value");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_gstin() {
        assert!(validate_gstin("27AAPFU0939F1ZV").is_ok());
    }

    #[test]
    fn test_invalid_gstin() {
        assert!(validate_gstin("27AAPFU0939F1Z").is_err()); // too short
        assert!(validate_gstin("XXAAPFU0939F1ZV").is_err()); // no state code
        assert!(validate_gstin("27aapfu0939f1zv").is_err()); // lowercase
        assert!(validate_gstin("27AAPFU0939F1XV").is_err()); // missing Z
    }

    #[test]
    fn test_rate_validation() {
        assert!(validate_rate(Decimal::from(5)).is_ok());
        assert!(validate_rate(Decimal::ZERO).is_err());
        assert!(validate_rate(Decimal::from(-3)).is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#007BFF").is_ok());
        assert!(validate_hex_color("007BFF").is_err());
        assert!(validate_hex_color("#07BFF").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
    }
}
