//! Color rewriting core.
//!
//! Three views of the same substitution rules: [`markup`] rewrites
//! serialized SVG/CSS text, [`element`] rewrites a live element tree through
//! the [`crate::dom::ElementHandle`] capability set, and [`data_url`]
//! rewrites SVG documents embedded in `data:` image sources. All of them map
//! effectively-white values to the current host background and
//! effectively-black values to [`FOREGROUND`].

pub mod classify;
pub mod data_url;
pub mod element;
pub mod markup;

pub use data_url::{is_svg_data_url, rewrite_data_url};
pub use element::{is_processed, mark_processed, rewrite_element, PROCESSED_ATTR};
pub use markup::{rewrite_markup, rewrite_style};

/// The fixed light foreground substituted for black ink.
pub const FOREGROUND: &str = "white";
