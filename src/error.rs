use thiserror::Error;

/// Errors from the data-URL rewrite path.
///
/// All variants are contained: the pipeline logs them and leaves the affected
/// element untouched. Nothing here ever reaches the host as a failure.
#[derive(Debug, Error)]
pub enum RecolorError {
    #[error("Not an SVG data URL")]
    NotSvgDataUrl,

    #[error("Unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Percent-decode error: {0}")]
    Decode(#[from] std::str::Utf8Error),
}

/// Errors from parsing or serializing the in-repo element tree.
///
/// Hosts that bring their own tree representation never see these.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("XML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("Document has no root element")]
    NoRoot,

    #[error("Unexpected closing tag: {0}")]
    UnexpectedClose(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
