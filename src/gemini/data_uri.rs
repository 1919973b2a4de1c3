//! Helpers for `data:` URIs carrying base64 payloads
//!
//! Generated images travel as `data:image/png;base64,<payload>` strings,
//! matching what the browser front-ends of this API render directly.

use crate::error::{NexusError, Result};

/// Build a base64 data URI from a MIME type and payload
pub fn build(mime_type: &str, payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, payload)
}

/// Split a base64 data URI into its MIME type and payload
///
/// # Errors
///
/// Returns an API error when the input is not a `data:<mime>;base64,<payload>`
/// string.
pub fn split(uri: &str) -> Result<(String, String)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| NexusError::Api(format!("not a data URI: {}", truncate(uri))))?;
    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| NexusError::Api(format!("not a base64 data URI: {}", truncate(uri))))?;
    Ok((mime_type.to_string(), payload.to_string()))
}

/// Shorten a URI for inclusion in error messages
fn truncate(uri: &str) -> String {
    const MAX: usize = 48;
    if uri.len() <= MAX {
        uri.to_string()
    } else {
        let cut = uri
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &uri[..cut])
    }
}
