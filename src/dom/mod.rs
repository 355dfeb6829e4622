//! Element-tree abstraction.
//!
//! The rewriters and the scheduler never touch a concrete document library;
//! they operate on [`ElementHandle`], the minimal capability set a rendered
//! document exposes: tag name, attribute read/write, descendant enumeration.
//! Hosts with a live document tree implement the trait over their own node
//! references. [`Tree`] is the in-repo implementation, used by the CLI and
//! the test suite.

pub mod tree;

pub use tree::{NodeRef, Tree};

use std::hash::Hash;

/// A mutable handle to one element of a rendered document.
///
/// Handles are cheap clones with identity semantics: two handles compare
/// equal exactly when they refer to the same element, and hashing follows
/// equality so handles can key sets. Attribute names are matched ASCII
/// case-insensitively, as rendered-document hosts do.
pub trait ElementHandle: Clone + PartialEq + Eq + Hash {
    /// Tag name as authored (callers compare case-insensitively).
    fn tag_name(&self) -> String;

    /// Current value of an attribute, or `None` when absent.
    fn attr(&self, name: &str) -> Option<String>;

    /// Set an attribute, replacing any existing value.
    fn set_attr(&self, name: &str, value: &str);

    /// Every descendant element in document order, the handle itself
    /// excluded.
    fn descendants(&self) -> Vec<Self>;
}
