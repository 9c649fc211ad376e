//! Bottom-up local rewriting of syntax trees.
//!
//! [`Node::reduce`] walks the tree bottom-up and applies a fixed set of
//! meaning-preserving rewrites: short-circuit folding of `||` / `&&` / `,`,
//! constant-condition elimination in `?:` and `if`, `!`-folding, empty-block
//! cleanup, the `bagofholding` feature-flag stub, and canonicalization of
//! string-keyed properties and subscripts into identifiers.
//!
//! The call consumes the node and returns `Some` replacement (which may be
//! the same node with rewritten children) or `None`, meaning the node
//! should disappear from its parent. Callers reassign their slot from the
//! return value, so ownership of discarded subtrees ends inside the call.
//!
//! Each rule inspects only already-reduced children, so a single bottom-up
//! pass suffices; reduction is idempotent.

use crate::ast::lexical;
use crate::ast::node::{Node, NodeKind};
use crate::ast::ops::{BinaryOp, UnaryOp};

impl Node {
    /// Reduces the tree bottom-up. Returns the surviving node, or `None`
    /// when the node reduced away entirely.
    pub fn reduce(mut self) -> Option<Node> {
        if matches!(self.kind(), NodeKind::Program | NodeKind::StatementList) {
            self.reduce_statement_children();
            return Some(self);
        }

        self.reduce_children();

        if let Some(op) = self.binary_op() {
            return self.fold_operator(op);
        }
        if self.unary_op() == Some(UnaryOp::LogicalNot) {
            return self.fold_logical_not();
        }
        if matches!(self.kind(), NodeKind::ConditionalExpression) {
            return self.fold_conditional();
        }
        if matches!(self.kind(), NodeKind::If) {
            return self.fold_if();
        }
        if matches!(self.kind(), NodeKind::FunctionCall) {
            return self.fold_call();
        }
        if matches!(self.kind(), NodeKind::ObjectLiteralProperty) {
            return self.fold_property();
        }
        if matches!(self.kind(), NodeKind::DynamicMemberExpression) {
            return self.fold_subscript();
        }
        Some(self)
    }

    /// Default sweep: reduce every occupied slot in place. A child that
    /// reduces away leaves its slot absent, preserving the node's arity.
    fn reduce_children(&mut self) {
        for slot in self.child_nodes_mut().iter_mut() {
            if let Some(child) = slot.take() {
                *slot = child.reduce();
            }
        }
    }

    /// Statement-container sweep (programs and statement lists): children
    /// that reduce away are removed from the list, as are expression
    /// statements whose value is a constant — those can have no side
    /// effects. Stray absent entries are discarded.
    fn reduce_statement_children(&mut self) {
        let children = std::mem::take(self.child_nodes_mut());
        for slot in children {
            let Some(child) = slot else { continue };
            let Some(child) = child.reduce() else { continue };
            if child.is_expression() && child.constant_bool().is_some() {
                continue;
            }
            self.append_child(Some(child));
        }
    }

    /// Constant truthiness of the child at `pos`, if it is a constant
    /// expression.
    fn child_truth(&self, pos: usize) -> Option<bool> {
        self.child(pos).and_then(Node::constant_bool)
    }

    /// Short-circuit folding for `||`, `&&`, and the comma operator.
    fn fold_operator(mut self, op: BinaryOp) -> Option<Node> {
        match op {
            BinaryOp::Or => match self.child_truth(0) {
                Some(true) => self.detach_child(0),
                Some(false) => {
                    if self.child_truth(1) == Some(false) {
                        Some(Node::new(NodeKind::BooleanLiteral(false), 0))
                    } else {
                        self.detach_child(1)
                    }
                }
                None => Some(self),
            },
            BinaryOp::And => match self.child_truth(0) {
                Some(false) => Some(Node::new(NodeKind::BooleanLiteral(false), 0)),
                Some(true) => {
                    if self.child_truth(1) == Some(false) {
                        Some(Node::new(NodeKind::BooleanLiteral(false), 0))
                    } else {
                        self.detach_child(1)
                    }
                }
                None => Some(self),
            },
            BinaryOp::Comma => {
                if self.child_truth(0).is_some() {
                    self.detach_child(1)
                } else {
                    Some(self)
                }
            }
            _ => Some(self),
        }
    }

    /// `!constant` folds to the opposite boolean literal.
    fn fold_logical_not(self) -> Option<Node> {
        match self.child_truth(0) {
            Some(value) => Some(Node::new(NodeKind::BooleanLiteral(!value), 0)),
            None => Some(self),
        }
    }

    /// A constant condition selects one branch of `?:` outright.
    fn fold_conditional(mut self) -> Option<Node> {
        match self.child_truth(0) {
            Some(true) => self.detach_child(1),
            Some(false) => self.detach_child(2),
            None => Some(self),
        }
    }

    fn fold_if(mut self) -> Option<Node> {
        // A constant condition leaves only the surviving branch; a false
        // condition without an else leaves nothing at all.
        match self.child_truth(0) {
            Some(true) => return self.detach_child(1),
            Some(false) => return self.detach_child(2),
            None => {}
        }

        // An empty else branch can be dropped outright. Empty blocks are
        // usually debris from other rewrites, e.g. `bagofholding()`.
        if self.child(2).is_some_and(|block| block.child_nodes().is_empty()) {
            self.replace_child(None, 2);
        }

        let then_empty = self
            .child(1)
            .is_some_and(|block| block.child_nodes().is_empty());

        // Both branches gone: only the condition's side effects remain.
        if then_empty && self.child(2).is_none() {
            return self.detach_child(0);
        }

        // Empty then with a live else: negate the condition and promote
        // the else branch.
        if then_empty && self.child(2).is_some() {
            if let Some(cond) = self.detach_child(0) {
                let lineno = cond.lineno();
                let negated = Node::new(NodeKind::Unary(UnaryOp::LogicalNot), lineno)
                    .with_child(Node::new(NodeKind::Parenthetical, lineno).with_child(cond))
                    .reduce();
                self.replace_child(negated, 0);
            }
            let else_block = self.detach_child(2);
            self.replace_child(else_block, 1);
        }

        Some(self)
    }

    /// Calls to the build-time feature-flag stub `bagofholding` evaluate
    /// to `false`. Other callee names are not special.
    fn fold_call(self) -> Option<Node> {
        if self.child(0).and_then(Node::name) == Some("bagofholding") {
            return Some(Node::new(NodeKind::BooleanLiteral(false), 0));
        }
        Some(self)
    }

    /// `{"key": v}` becomes `{key: v}` when the quoted key has identifier
    /// shape.
    fn fold_property(mut self) -> Option<Node> {
        if let Some((name, lineno)) = self.identifier_shaped_string(0) {
            self.replace_child(Some(Node::new(NodeKind::Identifier(name), lineno)), 0);
        }
        Some(self)
    }

    /// `o["key"]` becomes `o.key` when the subscript has identifier shape.
    fn fold_subscript(mut self) -> Option<Node> {
        if let Some((name, lineno)) = self.identifier_shaped_string(1) {
            let object = self.detach_child(0);
            let mut member = Node::new(NodeKind::StaticMemberExpression, self.lineno());
            member.append_child(object);
            member.append_child(Some(Node::new(NodeKind::Identifier(name), lineno)));
            return Some(member);
        }
        Some(self)
    }

    /// If the child at `pos` is a string literal whose unquoted value has
    /// identifier shape, returns that value and the literal's line.
    fn identifier_shaped_string(&self, pos: usize) -> Option<(String, u32)> {
        let child = self.child(pos)?;
        if !matches!(child.kind(), NodeKind::StringLiteral { .. }) {
            return None;
        }
        let name = child.unquoted_value()?;
        if !lexical::is_identifier(name) {
            return None;
        }
        Some((name.to_string(), child.lineno()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
