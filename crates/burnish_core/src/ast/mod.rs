//! Syntax-tree data model.
//!
//! - [`node`] — the tagged [`Node`][node::Node] tree and its operations.
//! - [`ops`] — operator alphabets with their exact source spellings.
//! - [`lexical`] — reserved-word and identifier-shape predicates.
//! - [`numeric`] — numeric-literal formatting.

/// Reserved-word and identifier-shape predicates.
pub mod lexical;
/// The tagged node tree and its operations.
pub mod node;
/// Numeric-literal formatting.
pub mod numeric;
/// Operator alphabets with their exact source spellings.
pub mod ops;
