//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate minimum length.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.len() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Validate an EVM wallet address (`0x` followed by 40 hex digits).
///
/// Only the shape is checked, not the EIP-55 checksum casing.
pub fn validate_wallet_address(address: &str) -> Result<(), String> {
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| "Wallet address must start with 0x".to_string())?;

    if hex.len() != 40 {
        return Err(format!(
            "Wallet address must have 40 hex digits after 0x, got {}",
            hex.len()
        ));
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Wallet address contains non-hex characters".to_string());
    }

    Ok(())
}
