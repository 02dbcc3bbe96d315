//! Device id validation.
//!
//! Ids are checked before they are ever interpolated into a command
//! argument list. The command runner already refuses to involve a shell,
//! so this is defence in depth against tokens whose meaning to the audio
//! server is not fully specified.

use super::error::ValidationError;

/// Upper bound on accepted device id length, in bytes.
///
/// Real server ids are short ASCII tokens; the bound only exists to stop
/// pathological input from reaching the command layer.
pub const MAX_DEVICE_ID_LEN: usize = 256;

/// Checks a caller-supplied device id against the observed id grammar.
///
/// Accepts ASCII alphanumerics plus `.`, `-` and `_`, the alphabet the
/// audio server actually uses for ids such as
/// `alsa_output.usb-Vendor_Product-00.analog-stereo`.
///
/// # Errors
/// Returns an enumerated [`ValidationError`] naming the rejection reason.
/// The rejected input itself is never part of the error, so reasons are
/// safe to log or display without sanitising.
pub fn validate_device_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Empty);
    }

    if id.bytes().any(|b| b == 0 || b.is_ascii_control()) {
        return Err(ValidationError::ControlCharacters);
    }

    if id.contains("..") {
        return Err(ValidationError::PathTraversal);
    }

    if id.len() > MAX_DEVICE_ID_LEN {
        return Err(ValidationError::TooLong {
            limit: MAX_DEVICE_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err(ValidationError::DisallowedCharacters);
    }

    Ok(())
}
