//! `burnish_core` — the core library of the Burnish JavaScript compactor.
//!
//! Burnish models ECMAScript-3 programs as owned syntax trees and provides
//! two algorithms over them: a printer ([`Node::render`][ast::node::Node::render])
//! that emits compact or pretty source text with optional source-line
//! preservation, and a reducer ([`Node::reduce`][ast::node::Node::reduce])
//! that applies local meaning-preserving rewrites: constant folding of
//! logical and conditional operators, dead-branch elimination in `if`,
//! empty-block removal, and member-access canonicalization.
//!
//! The parser that produces trees, the host CLI, and file I/O are external
//! collaborators; this crate only owns the in-memory representation and the
//! algorithms over it.
//!
//! # Crate layout
//!
//! - [`ast`] — node model, operator alphabets, lexical predicates, and
//!   numeric-literal formatting.
//! - [`error`] — error types and the [`BurnishResult`][error::BurnishResult]
//!   alias.
//! - [`render`] — the printer: option bitset, traversal state, and the rope
//!   output buffer.
//! - [`reduce`] — the bottom-up rewriter.

/// Syntax-tree data model and leaf-level helpers.
pub mod ast;
/// Error types and [`BurnishResult`][error::BurnishResult] alias.
pub mod error;
/// Bottom-up local rewriting of syntax trees.
pub mod reduce;
/// Source-text rendering: options, printer, and rope buffer.
pub mod render;
