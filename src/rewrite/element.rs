//! In-place recoloring of a live SVG element tree.
//!
//! Walks every descendant of an SVG root, remapping `fill`, `stroke` and
//! `color` attributes plus inline `style` declarations. The root element is
//! marked with [`PROCESSED_ATTR`] once the rewrite completes; a marked root
//! is never rewritten again, which makes the operation idempotent however
//! often the host re-invokes it.

use crate::dom::ElementHandle;

use super::classify;
use super::markup::rewrite_style;
use super::FOREGROUND;

/// Marker attribute recording that an element has been recolored.
pub const PROCESSED_ATTR: &str = "data-reink-processed";

/// True when the element already carries the processed marker.
pub fn is_processed(element: &impl ElementHandle) -> bool {
    element.attr(PROCESSED_ATTR).is_some()
}

/// Attach the processed marker.
pub fn mark_processed(element: &impl ElementHandle) {
    element.set_attr(PROCESSED_ATTR, "true");
}

/// Recolor an SVG element tree in place.
///
/// A no-op when the root is already marked. Otherwise every descendant is
/// rewritten, the root gets its fill mapped (or defaulted), and the marker
/// is set last.
pub fn rewrite_element<H: ElementHandle>(root: &H, background: &str) {
    if is_processed(root) {
        return;
    }

    for element in root.descendants() {
        rewrite_descendant(&element, background);
    }

    // Root-level default: an SVG root without any fill renders black ink by
    // default, invisible on a dark background.
    match root.attr("fill") {
        Some(fill) => {
            if let Some(mapped) = map_color(&fill, background) {
                root.set_attr("fill", &mapped);
            }
        }
        None => root.set_attr("fill", FOREGROUND),
    }

    mark_processed(root);
}

fn rewrite_descendant<H: ElementHandle>(element: &H, background: &str) {
    let tag = element.tag_name();

    match element.attr("fill") {
        Some(fill) => {
            if let Some(mapped) = map_color(&fill, background) {
                element.set_attr("fill", &mapped);
            }
        }
        // Text with unset fill defaults to black in most renderers.
        None if is_text_element(&tag) => element.set_attr("fill", FOREGROUND),
        None => {}
    }

    if let Some(stroke) = element.attr("stroke") {
        if let Some(mapped) = map_color(&stroke, background) {
            element.set_attr("stroke", &mapped);
        }
    }

    if let Some(color) = element.attr("color") {
        if let Some(mapped) = map_color(&color, background) {
            element.set_attr("color", &mapped);
        }
    }

    // Write-back is unconditional once a style attribute exists.
    if let Some(style) = element.attr("style") {
        element.set_attr("style", &rewrite_style(&style, background));
    }

    // A nested SVG root is fully covered by this pass; mark it so a later
    // scan cannot recolor its subtree a second time.
    if tag.eq_ignore_ascii_case("svg") {
        mark_processed(element);
    }
}

fn map_color(value: &str, background: &str) -> Option<String> {
    if classify::is_white(value) {
        Some(background.to_string())
    } else if classify::is_black(value) {
        Some(FOREGROUND.to_string())
    } else {
        None
    }
}

fn is_text_element(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("text") || tag.eq_ignore_ascii_case("tspan")
}
