//! Textual color classification.
//!
//! Only the enumerated spellings below count as white or black. There is no
//! numeric parsing and no tolerance: `#fefefe` is neither, `whitesmoke` is
//! neither, and unknown values always classify as neither.

const WHITE_SPELLINGS: &[&str] = &[
    "#fff",
    "#ffffff",
    "white",
    "rgb(255,255,255)",
    "rgb(255, 255, 255)",
];

const BLACK_SPELLINGS: &[&str] = &["#000", "#000000", "black", "rgb(0,0,0)", "rgb(0, 0, 0)"];

/// True when the value spells pure white.
pub fn is_white(value: &str) -> bool {
    matches_any(value, WHITE_SPELLINGS)
}

/// True when the value spells pure black.
pub fn is_black(value: &str) -> bool {
    matches_any(value, BLACK_SPELLINGS)
}

fn matches_any(value: &str, spellings: &[&str]) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    spellings.contains(&normalized.as_str())
}
