//! ECMAScript-3 syntax-tree node definitions.
//!
//! Every syntactic category is a variant of [`NodeKind`]; a [`Node`] pairs a
//! kind with its source line and an ordered sequence of child slots. Child
//! slots hold `Option<Node>`: `None` is the *absent* sentinel used for
//! optional grammar positions (the name of a function expression, the
//! `else` branch of an `if`, the `catch`/`finally` parts of a `try`), and
//! is distinct from an empty child sequence.
//!
//! Parents exclusively own their children; detaching a child with
//! [`remove_child`][Node::remove_child] or
//! [`replace_child`][Node::replace_child] transfers ownership to the
//! caller, and dropping a node drops its subtree.
//!
//! Structural equality ([`PartialEq`]) compares variant tags, payloads, and
//! children pairwise with strict length; source lines do not participate.

use std::collections::VecDeque;

use crate::ast::ops::{AssignOp, BinaryOp, PostfixOp, StatementKeyword, UnaryOp};
use crate::error::{BurnishError, BurnishResult};

// ─────────────────────────────────────────────────────────────────────────────
// NodeKind
// ─────────────────────────────────────────────────────────────────────────────

/// The syntactic category of a [`Node`], with its variant payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ── Leaf expressions ──────────────────────────────────────────────────
    /// Numeric literal carrying a finite double.
    NumericLiteral(f64),
    /// String literal. When `quoted`, `value` carries the surrounding
    /// quotes and the already-escaped body exactly as the lexer produced
    /// them; when unquoted, `value` is raw content wrapped in `"…"` at
    /// print time (the producer must have escaped interior `"` and `\`).
    StringLiteral {
        /// Literal text, quoted or raw as described above.
        value: String,
        /// Whether `value` already carries its quotes.
        quoted: bool,
    },
    /// Regular-expression literal `/body/flags`.
    RegexLiteral {
        /// The pattern between the slashes.
        body: String,
        /// The flag characters after the closing slash.
        flags: String,
    },
    /// `true` / `false`.
    BooleanLiteral(bool),
    /// `null`.
    NullLiteral,
    /// `this`.
    This,
    /// The empty expression slot, e.g. the middle of `for(;;)`. Renders as
    /// nothing.
    EmptyExpression,
    /// Plain identifier.
    Identifier(String),

    // ── Composite expressions ─────────────────────────────────────────────
    /// Explicitly parenthesized expression `(…)` [1].
    ///
    /// Parentheses are explicit nodes so the printer never has to reason
    /// about operator precedence.
    Parenthetical,
    /// Unary prefix application [1].
    Unary(UnaryOp),
    /// Postfix `++` / `--` [1].
    Postfix(PostfixOp),
    /// Binary infix application [2].
    Operator(BinaryOp),
    /// Assignment `lhs op rhs` [2].
    Assignment(AssignOp),
    /// `cond ? then : else` [3].
    ConditionalExpression,
    /// `callee(args)` [2] — (callee, [`ArgList`][NodeKind::ArgList]).
    FunctionCall,
    /// `new callee(args)` [2] — (callee, [`ArgList`][NodeKind::ArgList]).
    FunctionConstructor,
    /// `object.identifier` [2].
    StaticMemberExpression,
    /// `object[expr]` [2].
    DynamicMemberExpression,
    /// Object literal `{…}` of [`ObjectLiteralProperty`][NodeKind::ObjectLiteralProperty] children.
    ObjectLiteral,
    /// `key: value` inside an object literal [2].
    ObjectLiteralProperty,
    /// Array literal `[…]`.
    ArrayLiteral,
    /// `function [name](args) {…}` in expression position [3] — the name
    /// slot may be absent.
    FunctionExpression,

    // ── Declarations and statements ───────────────────────────────────────
    /// Top-level program container.
    Program,
    /// A list of statements.
    StatementList,
    /// Parenthesized argument or parameter list.
    ArgList,
    /// `function name(args) {…}` declaration [3].
    FunctionDeclaration,
    /// `if (cond) then [else …]` [3] — the else slot may be absent.
    If,
    /// `while (cond) body` [2].
    While,
    /// `do body while (cond);` [2].
    DoWhile,
    /// `for (init; cond; update) body` [4].
    ForLoop,
    /// `for (lhs in rhs) body` [3].
    ForIn,
    /// `with (object) body` [2].
    With,
    /// `try {…} [catch (param) {…}] [finally {…}]` [4] — (block, param,
    /// catch block, finally block); the catch param and catch block are
    /// absent together.
    Try,
    /// `switch (disc) {…}` [2] — (discriminant, statement list of case
    /// clauses and their statements).
    Switch,
    /// `case expr:` [1].
    CaseClause,
    /// `default:`.
    DefaultClause,
    /// `var …` declaration; children are identifiers or assignments. The
    /// `iterator` flag marks a declaration embedded in a `for` header, so
    /// statement rendering must not append a semicolon.
    VarDeclaration {
        /// `true` when the declaration sits inside a `for` header.
        iterator: bool,
    },
    /// `throw` / `return` / `continue` / `break` [1] — the operand slot may
    /// be absent (bare `return;`).
    StatementWithExpression(StatementKeyword),
    /// `label: statement` [2].
    Label,
}

impl NodeKind {
    /// Returns the variant name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::NumericLiteral(_) => "NumericLiteral",
            NodeKind::StringLiteral { .. } => "StringLiteral",
            NodeKind::RegexLiteral { .. } => "RegexLiteral",
            NodeKind::BooleanLiteral(_) => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::This => "This",
            NodeKind::EmptyExpression => "EmptyExpression",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Parenthetical => "Parenthetical",
            NodeKind::Unary(_) => "Unary",
            NodeKind::Postfix(_) => "Postfix",
            NodeKind::Operator(_) => "Operator",
            NodeKind::Assignment(_) => "Assignment",
            NodeKind::ConditionalExpression => "ConditionalExpression",
            NodeKind::FunctionCall => "FunctionCall",
            NodeKind::FunctionConstructor => "FunctionConstructor",
            NodeKind::StaticMemberExpression => "StaticMemberExpression",
            NodeKind::DynamicMemberExpression => "DynamicMemberExpression",
            NodeKind::ObjectLiteral => "ObjectLiteral",
            NodeKind::ObjectLiteralProperty => "ObjectLiteralProperty",
            NodeKind::ArrayLiteral => "ArrayLiteral",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::Program => "Program",
            NodeKind::StatementList => "StatementList",
            NodeKind::ArgList => "ArgList",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::If => "If",
            NodeKind::While => "While",
            NodeKind::DoWhile => "DoWhile",
            NodeKind::ForLoop => "ForLoop",
            NodeKind::ForIn => "ForIn",
            NodeKind::With => "With",
            NodeKind::Try => "Try",
            NodeKind::Switch => "Switch",
            NodeKind::CaseClause => "CaseClause",
            NodeKind::DefaultClause => "DefaultClause",
            NodeKind::VarDeclaration { .. } => "VarDeclaration",
            NodeKind::StatementWithExpression(_) => "StatementWithExpression",
            NodeKind::Label => "Label",
        }
    }

    /// Returns `true` for expression variants — the categories that may
    /// occupy rvalue positions and take a terminating `;` in statement
    /// position.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::NumericLiteral(_)
                | NodeKind::StringLiteral { .. }
                | NodeKind::RegexLiteral { .. }
                | NodeKind::BooleanLiteral(_)
                | NodeKind::NullLiteral
                | NodeKind::This
                | NodeKind::EmptyExpression
                | NodeKind::Identifier(_)
                | NodeKind::Parenthetical
                | NodeKind::Unary(_)
                | NodeKind::Postfix(_)
                | NodeKind::Operator(_)
                | NodeKind::Assignment(_)
                | NodeKind::ConditionalExpression
                | NodeKind::FunctionCall
                | NodeKind::FunctionConstructor
                | NodeKind::StaticMemberExpression
                | NodeKind::DynamicMemberExpression
                | NodeKind::ObjectLiteral
                | NodeKind::ArrayLiteral
                | NodeKind::FunctionExpression
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node
// ─────────────────────────────────────────────────────────────────────────────

/// A syntax-tree node: variant tag, source line, and owned child slots.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    lineno: u32,
    children: VecDeque<Option<Node>>,
}

impl Node {
    /// Creates a childless node. A `lineno` of 0 means unknown/synthetic
    /// and suppresses line catch-up when rendering.
    pub fn new(kind: NodeKind, lineno: u32) -> Self {
        Self {
            kind,
            lineno,
            children: VecDeque::new(),
        }
    }

    /// Creates a [`Program`][NodeKind::Program] node, which defaults to
    /// line 1.
    pub fn program() -> Self {
        Self::new(NodeKind::Program, 1)
    }

    /// Builder form of [`append_child`][Node::append_child] for a present
    /// child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push_back(Some(child));
        self
    }

    /// Builder form of [`append_child`][Node::append_child] for an absent
    /// slot.
    pub fn with_absent_child(mut self) -> Self {
        self.children.push_back(None);
        self
    }

    /// The node's variant tag and payload.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The variant name, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Source line carried from construction; 0 means unknown.
    pub fn lineno(&self) -> u32 {
        self.lineno
    }

    // ── Child-slot operations ─────────────────────────────────────────────

    /// Appends a child slot at the back.
    pub fn append_child(&mut self, child: Option<Node>) {
        self.children.push_back(child);
    }

    /// Inserts a child slot at the front.
    pub fn prepend_child(&mut self, child: Option<Node>) {
        self.children.push_front(child);
    }

    /// Inserts a child slot before position `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is past the end of the child sequence.
    pub fn insert_before(&mut self, child: Option<Node>, pos: usize) {
        self.children.insert(pos, child);
    }

    /// Removes the slot at `pos` entirely, transferring ownership of its
    /// occupant (if any) to the caller. Returns `None` for an absent slot
    /// or an out-of-range position.
    pub fn remove_child(&mut self, pos: usize) -> Option<Node> {
        self.children.remove(pos).flatten()
    }

    /// Swaps `child` into the slot at `pos`, returning the previous
    /// occupant. Out-of-range positions drop `child` and return `None`.
    pub fn replace_child(&mut self, child: Option<Node>, pos: usize) -> Option<Node> {
        match self.children.get_mut(pos) {
            Some(slot) => std::mem::replace(slot, child),
            None => None,
        }
    }

    /// The ordered child slots.
    pub fn child_nodes(&self) -> &VecDeque<Option<Node>> {
        &self.children
    }

    /// Mutable handle onto the ordered child slots.
    pub fn child_nodes_mut(&mut self) -> &mut VecDeque<Option<Node>> {
        &mut self.children
    }

    /// The node in slot `pos`, if the slot exists and is not absent.
    pub fn child(&self, pos: usize) -> Option<&Node> {
        self.children.get(pos).and_then(Option::as_ref)
    }

    /// Takes the node out of slot `pos`, leaving the slot absent.
    pub(crate) fn detach_child(&mut self, pos: usize) -> Option<Node> {
        self.children.get_mut(pos).and_then(Option::take)
    }

    /// The node in slot `pos`, or an error describing the malformed tree.
    pub(crate) fn required_child(&self, pos: usize) -> BurnishResult<&Node> {
        match self.children.get(pos) {
            Some(Some(node)) => Ok(node),
            Some(None) => Err(BurnishError::InvariantViolation(format!(
                "{} node is missing required child {pos}",
                self.kind_name()
            ))),
            None => Err(BurnishError::StructuralViolation {
                kind: self.kind_name(),
                expected: pos + 1,
                found: self.children.len(),
            }),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The name of an [`Identifier`][NodeKind::Identifier]; `None` for
    /// every other variant.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Renames an identifier in place. No effect on other variants.
    pub fn rename(&mut self, name: impl Into<String>) {
        if let NodeKind::Identifier(current) = &mut self.kind {
            *current = name.into();
        }
    }

    /// The value of a [`NumericLiteral`][NodeKind::NumericLiteral].
    pub fn number_value(&self) -> Option<f64> {
        match self.kind {
            NodeKind::NumericLiteral(value) => Some(value),
            _ => None,
        }
    }

    /// The value of a [`BooleanLiteral`][NodeKind::BooleanLiteral].
    pub fn bool_value(&self) -> Option<bool> {
        match self.kind {
            NodeKind::BooleanLiteral(value) => Some(value),
            _ => None,
        }
    }

    /// The raw value of a [`StringLiteral`][NodeKind::StringLiteral],
    /// quotes included when the literal carries them.
    pub fn string_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::StringLiteral { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The content of a [`StringLiteral`][NodeKind::StringLiteral] with the
    /// outermost matching quotes stripped; escapes are left as-is. Returns
    /// the raw value unchanged when the literal is unquoted.
    pub fn unquoted_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::StringLiteral {
                value,
                quoted: false,
            } => Some(value),
            NodeKind::StringLiteral {
                value,
                quoted: true,
            } => {
                let bytes = value.as_bytes();
                if bytes.len() >= 2 {
                    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
                    if first == last && (first == b'"' || first == b'\'') {
                        return Some(&value[1..value.len() - 1]);
                    }
                }
                Some(value)
            }
            _ => None,
        }
    }

    /// The operator of an [`Operator`][NodeKind::Operator] node.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self.kind {
            NodeKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// The operator of an [`Assignment`][NodeKind::Assignment] node.
    pub fn assign_op(&self) -> Option<AssignOp> {
        match self.kind {
            NodeKind::Assignment(op) => Some(op),
            _ => None,
        }
    }

    /// The operator of a [`Unary`][NodeKind::Unary] node.
    pub fn unary_op(&self) -> Option<UnaryOp> {
        match self.kind {
            NodeKind::Unary(op) => Some(op),
            _ => None,
        }
    }

    /// The operator of a [`Postfix`][NodeKind::Postfix] node.
    pub fn postfix_op(&self) -> Option<PostfixOp> {
        match self.kind {
            NodeKind::Postfix(op) => Some(op),
            _ => None,
        }
    }

    /// The keyword of a
    /// [`StatementWithExpression`][NodeKind::StatementWithExpression] node.
    pub fn statement_keyword(&self) -> Option<StatementKeyword> {
        match self.kind {
            NodeKind::StatementWithExpression(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Returns `true` for a `var` declaration embedded in a `for` header.
    pub fn is_iterator_declaration(&self) -> bool {
        matches!(self.kind, NodeKind::VarDeclaration { iterator: true })
    }

    /// Marks or unmarks a `var` declaration as a `for`-header iterator. No
    /// effect on other variants.
    pub fn set_iterator(&mut self, value: bool) {
        if let NodeKind::VarDeclaration { iterator } = &mut self.kind {
            *iterator = value;
        }
    }

    /// Returns `true` for expression variants.
    pub fn is_expression(&self) -> bool {
        self.kind.is_expression()
    }

    /// Returns `true` when assignment to this expression is syntactically
    /// legal: identifiers, member accesses, and parentheticals wrapping
    /// one of those.
    pub fn is_valid_lval(&self) -> bool {
        match &self.kind {
            NodeKind::Identifier(_)
            | NodeKind::StaticMemberExpression
            | NodeKind::DynamicMemberExpression => true,
            NodeKind::Parenthetical => self.child(0).is_some_and(Node::is_valid_lval),
            _ => false,
        }
    }

    /// Statically decidable truthiness of a constant expression.
    ///
    /// `Some(true)` for nonzero numeric literals and `true`;
    /// `Some(false)` for zero and `false`; parentheticals defer to their
    /// inner expression. Every other node answers `None` — the reducer's
    /// soundness depends on nothing else claiming constancy.
    pub fn constant_bool(&self) -> Option<bool> {
        match &self.kind {
            NodeKind::NumericLiteral(value) => Some(*value != 0.0),
            NodeKind::BooleanLiteral(value) => Some(*value),
            NodeKind::Parenthetical => self.child(0).and_then(Node::constant_bool),
            _ => None,
        }
    }

    /// Returns `true` for a direct call to `eval`.
    ///
    /// Exposed for external scope analysis; neither rendering nor
    /// reduction treats `eval` specially.
    pub fn is_eval(&self) -> bool {
        matches!(self.kind, NodeKind::FunctionCall)
            && self.child(0).and_then(Node::name) == Some("eval")
    }
}

/// Structural equality: variant tags, payloads, and children pairwise with
/// strict length. Source lines do not participate.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.children == other.children
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
