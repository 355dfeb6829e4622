//! Reink - theme-adaptive SVG recoloring.
//!
//! Rewrites the color palette of inlined SVG graphics (and SVG data-URL
//! images) embedded in rendered documents so they stay legible against the
//! host application's current background color. Effectively-white values
//! become the host background; effectively-black values become a fixed light
//! foreground. Every element is rewritten exactly once and then marked.

pub mod dom;
pub mod error;
pub mod models;
pub mod rewrite;
pub mod services;
