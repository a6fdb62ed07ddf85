//! Input validation for caller-supplied identifiers, party names, and
//! scoring weights.
//!
//! The engine proper tolerates bad rows by skipping them; this module is
//! for the outer boundary (CLI, HTTP glue) where rejecting malformed
//! input early gives a better error than a silently empty result.

use crate::error::FairMediatorError;
use crate::ranking::RankWeights;
use crate::types::{Party, PartyRole};

pub const MAX_PARTY_LENGTH: usize = 200;
pub const MAX_ID_LENGTH: usize = 64;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim
/// whitespace, and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, FairMediatorError> {
    if input.len() > max_len {
        return Err(FairMediatorError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(FairMediatorError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a party name: enforce length, strip control chars, trim.
pub fn validate_party_name(input: &str) -> Result<String, FairMediatorError> {
    sanitize_text(input, MAX_PARTY_LENGTH)
}

/// Validate a mediator id: non-empty, length-capped, no whitespace.
pub fn validate_mediator_id(input: &str) -> Result<String, FairMediatorError> {
    let sanitized = sanitize_text(input, MAX_ID_LENGTH)?;
    if sanitized.contains(char::is_whitespace) {
        return Err(FairMediatorError::InvalidInput(format!(
            "mediator id '{}' must not contain whitespace",
            sanitized
        )));
    }
    Ok(sanitized)
}

/// Parse a party from `role:name` syntax (e.g. `plaintiff:Acme Corp`).
/// A prefix that is not a known role is treated as part of the name.
pub fn parse_party(input: &str) -> Result<Party, FairMediatorError> {
    if let Some((prefix, rest)) = input.split_once(':') {
        if let Some(role) = PartyRole::parse(prefix) {
            let name = validate_party_name(rest)?;
            return Ok(Party::with_role(name, role));
        }
    }
    Ok(Party::new(validate_party_name(input)?))
}

/// Validate ranking weights: every component in 0..=1 and at least one
/// component non-zero.
pub fn validate_weights(weights: &RankWeights) -> Result<(), FairMediatorError> {
    let components = [
        ("experience", weights.experience),
        ("specialization", weights.specialization),
        ("rating", weights.rating),
        ("risk", weights.risk),
        ("ideology", weights.ideology),
    ];
    for (name, value) in components {
        if !(0.0..=1.0).contains(&value) {
            return Err(FairMediatorError::InvalidInput(format!(
                "weight '{}' must be between 0.0 and 1.0, got {}",
                name, value
            )));
        }
    }
    if components.iter().map(|(_, v)| v).sum::<f64>() <= 0.0 {
        return Err(FairMediatorError::InvalidInput(
            "at least one weight must be non-zero".to_string(),
        ));
    }
    Ok(())
}
