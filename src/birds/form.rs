//! Form body decoding for the create endpoint
//!
//! Strict `application/x-www-form-urlencoded` decoding: the body must
//! be valid UTF-8 and every percent escape must carry two hex digits.
//! A decode failure means the caller appends nothing.

use std::collections::HashMap;
use url::form_urlencoded;

/// Form decode failure, surfaced upstream as a 500 with an empty body.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("form body is not valid UTF-8")]
    InvalidUtf8,
    #[error("malformed percent escape at byte {0}")]
    BadEscape(usize),
}

/// Decode a urlencoded body into key/value pairs.
///
/// Later duplicates of a key overwrite earlier ones; `+` decodes to a
/// space. Missing keys are the caller's concern.
pub fn decode(body: &[u8]) -> Result<HashMap<String, String>, FormError> {
    let text = std::str::from_utf8(body).map_err(|_| FormError::InvalidUtf8)?;
    check_escapes(text)?;
    Ok(form_urlencoded::parse(text.as_bytes())
        .into_owned()
        .collect())
}

/// Reject `%` sequences that are not followed by two hex digits.
fn check_escapes(text: &str) -> Result<(), FormError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(a), Some(b)) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit()
            );
            if !valid {
                return Err(FormError::BadEscape(i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
