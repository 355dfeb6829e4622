//! Test documents and data-URL helpers.

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

/// Percent-encode an SVG document into an image source.
pub fn svg_data_url(svg: &str) -> String {
    format!(
        "data:image/svg+xml,{}",
        utf8_percent_encode(svg, NON_ALPHANUMERIC)
    )
}

/// Decode the payload of an SVG data URL.
pub fn decode_data_url(src: &str) -> String {
    let payload = src.split_once(',').expect("data URL has a payload").1;
    percent_decode_str(payload)
        .decode_utf8()
        .expect("payload decodes")
        .into_owned()
}

/// A document with one inline SVG and one SVG-bearing image.
pub fn mixed_document() -> String {
    format!(
        r##"<div><p>intro</p><svg><rect fill="#000000"/><text>Label</text></svg><img src="{}"/></div>"##,
        svg_data_url(r##"<svg><path fill="white" stroke="#000"/></svg>"##)
    )
}
