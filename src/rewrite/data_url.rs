//! Recoloring of SVG documents embedded in `data:` image sources.
//!
//! The payload is treated as opaque text: percent-decode, run the markup
//! rewriter, percent-encode back. Encoding uses the same character set as
//! JavaScript's `encodeURIComponent`, so decode/encode round-trips the
//! rewritten document losslessly.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::markup::rewrite_markup;
use crate::error::RecolorError;

const SVG_DATA_PREFIX: &str = "data:image/svg+xml";

/// Characters left verbatim by `encodeURIComponent`.
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// True when the source is an SVG data URL this module can look at.
pub fn is_svg_data_url(src: &str) -> bool {
    src.len() >= SVG_DATA_PREFIX.len()
        && src[..SVG_DATA_PREFIX.len()].eq_ignore_ascii_case(SVG_DATA_PREFIX)
}

/// Recolor the SVG document inside a data URL, returning the new URL.
///
/// The header (everything up to the first comma) is preserved verbatim.
/// Base64 payloads are not percent-encoded text and are reported as
/// unsupported rather than guessed at.
pub fn rewrite_data_url(src: &str, background: &str) -> Result<String, RecolorError> {
    if !is_svg_data_url(src) {
        return Err(RecolorError::NotSvgDataUrl);
    }

    let comma = src.find(',').ok_or(RecolorError::NotSvgDataUrl)?;
    let (header, payload) = (&src[..comma], &src[comma + 1..]);

    if header.to_ascii_lowercase().contains(";base64") {
        return Err(RecolorError::UnsupportedEncoding("base64".to_string()));
    }

    let decoded = percent_decode_str(payload).decode_utf8()?;
    let rewritten = rewrite_markup(&decoded, background);
    let encoded = utf8_percent_encode(&rewritten, COMPONENT_SET).to_string();

    Ok(format!("{header},{encoded}"))
}
