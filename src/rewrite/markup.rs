//! Textual substitution over serialized SVG markup and style declarations.
//!
//! Substitutions run in two fixed phases: every white spelling becomes the
//! host background first, then every black spelling becomes the fixed light
//! foreground. The black phase writes `white` literals, so it must run after
//! the white phase or its output would be re-mapped to the background.
//!
//! Patterns are anchored so that hyphenated properties (`stop-color`,
//! `fill-opacity`), longer color words (`whitesmoke`) and longer hex
//! literals (`#ffffff00`) never match.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::FOREGROUND;

const WHITE_ALT: &str = r"#ffffff\b|#fff\b|white\b|rgb\(\s*255\s*,\s*255\s*,\s*255\s*\)";
const BLACK_ALT: &str = r"#000000\b|#000\b|black\b|rgb\(\s*0\s*,\s*0\s*,\s*0\s*\)";

/// Compiled patterns for one phase: both attribute quote styles plus the
/// CSS declaration form, each over `fill`, `stroke` and `color`.
struct PhasePatterns {
    attr_dq: Regex,
    attr_sq: Regex,
    decl: Regex,
}

impl PhasePatterns {
    fn compile(alt: &str) -> Self {
        Self {
            attr_dq: attr_pattern('"', alt),
            attr_sq: attr_pattern('\'', alt),
            decl: decl_pattern(alt),
        }
    }
}

fn attr_pattern(quote: char, alt: &str) -> Regex {
    Regex::new(&format!(
        r##"(?i)(^|[^-\w])(fill|stroke|color)(\s*=\s*){quote}\s*(?:{alt})\s*{quote}"##
    ))
    .unwrap()
}

fn decl_pattern(alt: &str) -> Regex {
    Regex::new(&format!(r"(?i)(^|[^-\w])(fill|stroke|color)(\s*:\s*)(?:{alt})")).unwrap()
}

static WHITE_PATTERNS: LazyLock<PhasePatterns> =
    LazyLock::new(|| PhasePatterns::compile(WHITE_ALT));
static BLACK_PATTERNS: LazyLock<PhasePatterns> =
    LazyLock::new(|| PhasePatterns::compile(BLACK_ALT));

/// Rewrite a serialized SVG document (or any markup blob).
///
/// Covers attribute form in both quote styles and declaration form, in
/// phase order. Unrecognized values pass through byte-identical.
pub fn rewrite_markup(text: &str, background: &str) -> String {
    let text = apply_phase(text, &WHITE_PATTERNS, background);
    apply_phase(&text, &BLACK_PATTERNS, FOREGROUND)
}

/// Rewrite an inline style string.
///
/// The declaration-form subset of [`rewrite_markup`]: attribute-form rules
/// never apply inside a style value.
pub fn rewrite_style(style: &str, background: &str) -> String {
    let style = replace_decl(style, &WHITE_PATTERNS.decl, background);
    replace_decl(&style, &BLACK_PATTERNS.decl, FOREGROUND)
}

fn apply_phase(text: &str, patterns: &PhasePatterns, replacement: &str) -> String {
    let text = patterns.attr_dq.replace_all(text, |caps: &Captures| {
        format!("{}{}{}\"{replacement}\"", &caps[1], &caps[2], &caps[3])
    });
    let text = patterns.attr_sq.replace_all(&text, |caps: &Captures| {
        format!("{}{}{}'{replacement}'", &caps[1], &caps[2], &caps[3])
    });
    replace_decl(&text, &patterns.decl, replacement)
}

fn replace_decl(text: &str, decl: &Regex, replacement: &str) -> String {
    decl.replace_all(text, |caps: &Captures| {
        format!("{}{}{}{replacement}", &caps[1], &caps[2], &caps[3])
    })
    .into_owned()
}
