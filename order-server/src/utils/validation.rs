//! Input validation helpers
//!
//! Shared length limits and text checks. Helpers return the failure message;
//! each component wraps it in its own validation variant.

// ── Text length limits ──────────────────────────────────────────────

/// Names: staff, guests, restaurants, menu items
pub const MAX_NAME_LEN: usize = 200;

/// Notes and reasons (cancellation reason etc.)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, id proof number
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Largest party a single reservation may request
pub const MAX_PARTY_SIZE: u32 = 500;

/// Largest quantity of one line item
pub const MAX_ITEM_QUANTITY: u32 = 1_000;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.len() > max_len {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), String> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(format!("{field} is too long ({} chars, max {max_len})", v.len()));
    }
    Ok(())
}
