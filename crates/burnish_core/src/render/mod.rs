//! Source-text rendering of syntax trees.
//!
//! The printer walks a [`Node`] tree and emits ECMAScript-3 source. Three
//! shapes of output are available through [`RenderOpts`]:
//!
//! - compact (the default): minimum whitespace;
//! - [`PRETTY`][RenderOpts::PRETTY]: spaces around operators, two-space
//!   indentation, newlines between statements, braces around every block;
//! - [`MAINTAIN_LINENO`][RenderOpts::MAINTAIN_LINENO]: newlines are
//!   inserted ahead of any node whose recorded line is beyond the current
//!   output line, so compiled output keeps one-to-one line correspondence
//!   with its source.
//!
//! Each node is rendered through up to three contracts: its own textual
//! form, its form as a statement (usually the same plus `;`), and its form
//! as a block (braces added or elided depending on mode and contents).
//! Indentation is a traversal parameter; the only mutable state is the
//! option flags and the logical line counter.

/// Chunked rope used as the printer's output buffer.
pub mod rope;

use bitflags::bitflags;

use crate::ast::node::{Node, NodeKind};
use crate::ast::numeric;
use crate::ast::ops::BinaryOp;
use crate::error::BurnishResult;
use crate::render::rope::Rope;

bitflags! {
    /// Rendering options, combinable as a bitset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RenderOpts: u8 {
        /// Human-oriented output: spaces around binary operators (except
        /// the comma), spaces inside control-statement parentheses,
        /// two-space indentation, newlines between statements, and braces
        /// around single-statement bodies.
        const PRETTY = 0b01;
        /// Emit catch-up newlines so that every rendered node lands at or
        /// after its recorded source line. Nodes with line 0 never force
        /// catch-up. Orthogonal to `PRETTY`.
        const MAINTAIN_LINENO = 0b10;
    }
}

/// Mutable state threaded through one render pass.
struct RenderState {
    pretty: bool,
    keep_lineno: bool,
    /// Current logical output line; advanced by catch-up newlines.
    line: u32,
    /// Set once the first statement has been emitted, to suppress the
    /// leading newline in pretty mode.
    statement_emitted: bool,
}

impl RenderState {
    fn new(opts: RenderOpts) -> Self {
        Self {
            pretty: opts.contains(RenderOpts::PRETTY),
            keep_lineno: opts.contains(RenderOpts::MAINTAIN_LINENO),
            line: 1,
            statement_emitted: false,
        }
    }
}

fn push_indent(out: &mut Rope, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

impl Node {
    /// Renders the tree as ECMAScript-3 source text.
    pub fn render(&self, opts: RenderOpts) -> BurnishResult<String> {
        let mut state = RenderState::new(opts);
        Ok(self.render_node(&mut state, 0)?.flatten())
    }

    /// The node's own textual form, without leading or trailing
    /// indentation, newlines, or statement punctuation.
    fn render_node(&self, state: &mut RenderState, indent: usize) -> BurnishResult<Rope> {
        match self.kind() {
            // ── Leaves ────────────────────────────────────────────────────
            NodeKind::NumericLiteral(value) => {
                Ok(Rope::from(numeric::number_to_literal(*value)?))
            }
            NodeKind::StringLiteral { value, quoted } => {
                let mut out = Rope::new();
                if *quoted {
                    out.push_str(value);
                } else {
                    out.push_str("\"");
                    out.push_str(value);
                    out.push_str("\"");
                }
                Ok(out)
            }
            NodeKind::RegexLiteral { body, flags } => {
                let mut out = Rope::from("/");
                out.push_str(body);
                out.push_str("/");
                out.push_str(flags);
                Ok(out)
            }
            NodeKind::BooleanLiteral(value) => {
                Ok(Rope::from(if *value { "true" } else { "false" }))
            }
            NodeKind::NullLiteral => Ok(Rope::from("null")),
            NodeKind::This => Ok(Rope::from("this")),
            NodeKind::EmptyExpression => Ok(Rope::new()),
            NodeKind::Identifier(name) => Ok(Rope::from(name.as_str())),

            // ── Composite expressions ─────────────────────────────────────
            NodeKind::Parenthetical => {
                let mut out = Rope::from("(");
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.push_str(")");
                Ok(out)
            }
            NodeKind::Unary(op) => {
                let operand = self.required_child(0)?;
                let mut out = Rope::from(op.as_str());
                if op.needs_space() && !matches!(operand.kind(), NodeKind::Parenthetical) {
                    out.push_str(" ");
                }
                out.append(operand.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::Postfix(op) => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                out.push_str(op.as_str());
                Ok(out)
            }
            NodeKind::Operator(op) => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                if state.pretty {
                    // The comma binds to its left operand even here.
                    if *op != BinaryOp::Comma {
                        out.push_str(" ");
                    }
                    out.push_str(op.as_str());
                    out.push_str(" ");
                } else if op.is_word() {
                    out.push_str(" ");
                    out.push_str(op.as_str());
                    out.push_str(" ");
                } else {
                    out.push_str(op.as_str());
                }
                out.append(self.required_child(1)?.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::Assignment(op) => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                if state.pretty {
                    out.push_str(" ");
                }
                out.push_str(op.as_str());
                if state.pretty {
                    out.push_str(" ");
                }
                out.append(self.required_child(1)?.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::ConditionalExpression => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                out.push_str(if state.pretty { " ? " } else { "?" });
                out.append(self.required_child(1)?.render_node(state, indent)?);
                out.push_str(if state.pretty { " : " } else { ":" });
                out.append(self.required_child(2)?.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::FunctionCall => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                out.append(self.required_child(1)?.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::FunctionConstructor => {
                let mut out = Rope::from("new ");
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.append(self.required_child(1)?.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::StaticMemberExpression => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                out.push_str(".");
                out.append(self.required_child(1)?.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::DynamicMemberExpression => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                out.push_str("[");
                out.append(self.required_child(1)?.render_node(state, indent)?);
                out.push_str("]");
                Ok(out)
            }
            NodeKind::ObjectLiteral => {
                let mut out = Rope::from("{");
                out.append(self.render_implode_children(state, indent)?);
                out.push_str("}");
                Ok(out)
            }
            NodeKind::ObjectLiteralProperty => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                out.push_str(if state.pretty { ": " } else { ":" });
                out.append(self.required_child(1)?.render_node(state, indent)?);
                Ok(out)
            }
            NodeKind::ArrayLiteral => {
                let mut out = Rope::from("[");
                out.append(self.render_implode_children(state, indent)?);
                out.push_str("]");
                Ok(out)
            }
            NodeKind::FunctionExpression => {
                let mut out = Rope::from("function");
                if let Some(name) = self.child(0) {
                    out.push_str(" ");
                    out.append(name.render_node(state, indent)?);
                }
                out.append(self.required_child(1)?.render_node(state, indent)?);
                out.append(self.required_child(2)?.render_block(true, state, indent)?);
                Ok(out)
            }

            // ── Declarations and statements ───────────────────────────────
            NodeKind::FunctionDeclaration => {
                let mut out = Rope::from("function ");
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.append(self.required_child(1)?.render_node(state, indent)?);
                out.append(self.required_child(2)?.render_block(true, state, indent)?);
                Ok(out)
            }
            NodeKind::Program | NodeKind::StatementList => {
                let mut out = Rope::new();
                for slot in self.child_nodes() {
                    if let Some(child) = slot {
                        out.append(child.render_indented_statement(state, indent)?);
                    }
                }
                Ok(out)
            }
            NodeKind::ArgList => {
                let mut out = Rope::from("(");
                out.append(self.render_implode_children(state, indent)?);
                out.push_str(")");
                Ok(out)
            }
            NodeKind::If => self.render_if(state, indent),
            NodeKind::While => {
                let mut out = Rope::from(if state.pretty { "while (" } else { "while(" });
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.push_str(")");
                out.append(self.required_child(1)?.render_block(false, state, indent)?);
                Ok(out)
            }
            NodeKind::DoWhile => {
                let mut out = Rope::from("do");
                // Braces are not strictly required here, but always adding
                // them sidesteps the dangling-statement ambiguity.
                out.append(self.required_child(0)?.render_block(true, state, indent)?);
                let cond = self.required_child(1)?;
                if state.keep_lineno {
                    cond.render_lineno_catchup(state, &mut out);
                }
                out.push_str(if state.pretty { " while (" } else { "while(" });
                out.append(cond.render_node(state, indent)?);
                out.push_str(")");
                Ok(out)
            }
            NodeKind::ForLoop => {
                let mut out = Rope::from(if state.pretty { "for (" } else { "for(" });
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.push_str(if state.pretty { "; " } else { ";" });
                out.append(self.required_child(1)?.render_node(state, indent)?);
                out.push_str(if state.pretty { "; " } else { ";" });
                out.append(self.required_child(2)?.render_node(state, indent)?);
                out.push_str(")");
                out.append(self.required_child(3)?.render_block(false, state, indent)?);
                Ok(out)
            }
            NodeKind::ForIn => {
                let mut out = Rope::from(if state.pretty { "for (" } else { "for(" });
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.push_str(" in ");
                out.append(self.required_child(1)?.render_node(state, indent)?);
                out.push_str(")");
                out.append(self.required_child(2)?.render_block(false, state, indent)?);
                Ok(out)
            }
            NodeKind::With => {
                let mut out = Rope::from(if state.pretty { "with (" } else { "with(" });
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.push_str(")");
                out.append(self.required_child(1)?.render_block(false, state, indent)?);
                Ok(out)
            }
            NodeKind::Try => {
                let mut out = Rope::from("try");
                out.append(self.required_child(0)?.render_block(true, state, indent)?);
                if let Some(param) = self.child(1) {
                    out.push_str(if state.pretty { " catch (" } else { "catch(" });
                    out.append(param.render_node(state, indent)?);
                    out.push_str(")");
                    out.append(self.required_child(2)?.render_block(true, state, indent)?);
                }
                if let Some(finalizer) = self.child(3) {
                    out.push_str(if state.pretty { " finally" } else { "finally" });
                    out.append(finalizer.render_block(true, state, indent)?);
                }
                Ok(out)
            }
            NodeKind::Switch => {
                let mut out = Rope::from("switch(");
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.push_str(")");
                // The body is rendered one level deeper; case clauses then
                // out-dent themselves so their statements sit one past them.
                out.append(self.required_child(1)?.render_block(true, state, indent + 1)?);
                Ok(out)
            }
            NodeKind::CaseClause => {
                let mut out = Rope::from("case ");
                out.append(self.required_child(0)?.render_node(state, indent)?);
                out.push_str(":");
                Ok(out)
            }
            NodeKind::DefaultClause => Ok(Rope::from("default:")),
            NodeKind::VarDeclaration { .. } => {
                let mut out = Rope::from("var ");
                out.append(self.render_implode_children(state, indent)?);
                Ok(out)
            }
            NodeKind::StatementWithExpression(keyword) => {
                let mut out = Rope::from(keyword.as_str());
                if let Some(operand) = self.child(0) {
                    out.push_str(" ");
                    out.append(operand.render_node(state, indent)?);
                }
                Ok(out)
            }
            NodeKind::Label => {
                let mut out = self.required_child(0)?.render_node(state, indent)?;
                out.push_str(if state.pretty { ": " } else { ":" });
                out.append(self.required_child(1)?.render_node(state, indent)?);
                Ok(out)
            }
        }
    }

    fn render_if(&self, state: &mut RenderState, indent: usize) -> BurnishResult<Rope> {
        let mut out = Rope::from(if state.pretty { "if (" } else { "if(" });
        out.append(self.required_child(0)?.render_node(state, indent)?);
        out.push_str(")");

        let then_block = self.required_child(1)?;
        let else_block = self.child(2);

        let must = state.pretty || then_block.child_nodes().is_empty() || else_block.is_some();
        out.append(then_block.render_block(must, state, indent)?);

        if let Some(else_block) = else_block {
            out.push_str(if state.pretty { " else" } else { "else" });
            if matches!(else_block.kind(), NodeKind::If) {
                // `else if` chains stay flat instead of nesting blocks.
                if state.keep_lineno {
                    else_block.render_lineno_catchup(state, &mut out);
                }
                out.push_str(" ");
                out.append(else_block.render_node(state, indent)?);
            } else {
                let block = else_block.render_block(false, state, indent)?;
                if !matches!(block.first_char(), Some('{') | Some(' ')) {
                    out.push_str(" ");
                }
                out.append(block);
            }
        }
        Ok(out)
    }

    /// The node's form in statement position: expressions, `var`
    /// declarations outside `for` headers, `do…while`, labels, and the
    /// expression-carrying statements take a terminating `;`.
    fn render_statement(&self, state: &mut RenderState, indent: usize) -> BurnishResult<Rope> {
        let semicolon = match self.kind() {
            NodeKind::VarDeclaration { iterator } => !*iterator,
            NodeKind::StatementWithExpression(_) | NodeKind::DoWhile | NodeKind::Label => true,
            kind => kind.is_expression(),
        };
        let mut out = self.render_node(state, indent)?;
        if semicolon {
            out.push_str(";");
        }
        Ok(out)
    }

    /// The node's form as one entry of a statement list: in pretty mode a
    /// newline plus indentation is prefixed (suppressed before the very
    /// first statement of the output); in lineno mode the prefix is
    /// whatever catch-up requires.
    fn render_indented_statement(
        &self,
        state: &mut RenderState,
        indent: usize,
    ) -> BurnishResult<Rope> {
        let indent = match self.kind() {
            // Statement lists flatten into their surroundings.
            NodeKind::Program | NodeKind::StatementList => {
                return self.render_node(state, indent);
            }
            // Case labels sit one level shallower than the statements that
            // follow them.
            NodeKind::CaseClause | NodeKind::DefaultClause => indent.saturating_sub(1),
            _ => indent,
        };

        if !state.pretty && !state.keep_lineno {
            return self.render_statement(state, indent);
        }

        let mut out = Rope::new();
        let newline = if state.keep_lineno {
            self.render_lineno_catchup(state, &mut out)
        } else if state.statement_emitted {
            out.push_str("\n");
            true
        } else {
            state.statement_emitted = true;
            false
        };
        if state.pretty && newline {
            push_indent(&mut out, indent);
        }
        out.append(self.render_statement(state, indent)?);
        Ok(out)
    }

    /// The node's form in block position. With `must` unset, compact mode
    /// elides the braces around a single-statement list and renders an
    /// empty list as a bare `;`.
    fn render_block(
        &self,
        must: bool,
        state: &mut RenderState,
        indent: usize,
    ) -> BurnishResult<Rope> {
        match self.kind() {
            NodeKind::EmptyExpression => Ok(Rope::from(";")),
            NodeKind::Program | NodeKind::StatementList => {
                if !must && self.child_nodes().is_empty() {
                    Ok(Rope::from(";"))
                } else if !must && !state.pretty && self.child_nodes().len() == 1 {
                    let mut out = Rope::new();
                    if state.keep_lineno {
                        self.render_lineno_catchup(state, &mut out);
                    }
                    out.append(self.required_child(0)?.render_block(must, state, indent)?);
                    Ok(out)
                } else {
                    self.render_braced(state, indent)
                }
            }
            _ => {
                if !must && !state.pretty {
                    let mut out = Rope::new();
                    if state.keep_lineno {
                        self.render_lineno_catchup(state, &mut out);
                    }
                    out.append(self.render_statement(state, indent)?);
                    Ok(out)
                } else {
                    self.render_braced(state, indent)
                }
            }
        }
    }

    /// Brace-wrapped block rendering shared by every `render_block` path.
    fn render_braced(&self, state: &mut RenderState, indent: usize) -> BurnishResult<Rope> {
        let mut out = Rope::from(if state.pretty { " {" } else { "{" });
        out.append(self.render_indented_statement(state, indent + 1)?);
        if state.pretty || state.keep_lineno {
            let newline = if state.keep_lineno {
                self.render_lineno_catchup(state, &mut out)
            } else {
                out.push_str("\n");
                true
            };
            if state.pretty && newline {
                push_indent(&mut out, indent);
            }
        }
        out.push_str("}");
        Ok(out)
    }

    /// Renders all children joined by `,` (compact) or `, ` (pretty).
    /// Absent slots contribute no text but keep their separator, matching
    /// elided positions in argument and array lists.
    fn render_implode_children(
        &self,
        state: &mut RenderState,
        indent: usize,
    ) -> BurnishResult<Rope> {
        let glue = if state.pretty { ", " } else { "," };
        let mut out = Rope::new();
        let mut slots = self.child_nodes().iter().peekable();
        while let Some(slot) = slots.next() {
            if let Some(child) = slot {
                out.append(child.render_node(state, indent)?);
            }
            if slots.peek().is_some() {
                out.push_str(glue);
            }
        }
        Ok(out)
    }

    /// Emits enough newlines for the output to reach this node's recorded
    /// line. Returns whether any newline was emitted. Nodes with line 0 and
    /// nodes at or behind the current line emit nothing.
    fn render_lineno_catchup(&self, state: &mut RenderState, out: &mut Rope) -> bool {
        if self.lineno() == 0 || state.line >= self.lineno() {
            return false;
        }
        for _ in state.line..self.lineno() {
            out.push_str("\n");
        }
        state.line = self.lineno();
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ops::{AssignOp, PostfixOp, StatementKeyword, UnaryOp};

    fn ident(name: &str) -> Node {
        Node::new(NodeKind::Identifier(name.into()), 0)
    }

    fn ident_at(name: &str, lineno: u32) -> Node {
        Node::new(NodeKind::Identifier(name.into()), lineno)
    }

    fn num(value: f64) -> Node {
        Node::new(NodeKind::NumericLiteral(value), 0)
    }

    fn args(exprs: Vec<Node>) -> Node {
        let mut list = Node::new(NodeKind::ArgList, 0);
        for expr in exprs {
            list.append_child(Some(expr));
        }
        list
    }

    fn call(name: &str) -> Node {
        Node::new(NodeKind::FunctionCall, 0)
            .with_child(ident(name))
            .with_child(args(vec![]))
    }

    fn list(stmts: Vec<Node>) -> Node {
        let mut node = Node::new(NodeKind::StatementList, 0);
        for stmt in stmts {
            node.append_child(Some(stmt));
        }
        node
    }

    fn binop(op: BinaryOp, left: Node, right: Node) -> Node {
        Node::new(NodeKind::Operator(op), 0)
            .with_child(left)
            .with_child(right)
    }

    fn compact(node: &Node) -> String {
        node.render(RenderOpts::empty()).unwrap()
    }

    fn pretty(node: &Node) -> String {
        node.render(RenderOpts::PRETTY).unwrap()
    }

    fn lineno(node: &Node) -> String {
        node.render(RenderOpts::MAINTAIN_LINENO).unwrap()
    }

    // ── Leaves ────────────────────────────────────────────────────────────

    #[test]
    fn test_literals() {
        assert_eq!(compact(&num(1.0)), "1");
        assert_eq!(compact(&num(0.5)), "0.5");
        assert_eq!(compact(&Node::new(NodeKind::BooleanLiteral(true), 0)), "true");
        assert_eq!(compact(&Node::new(NodeKind::NullLiteral, 0)), "null");
        assert_eq!(compact(&Node::new(NodeKind::This, 0)), "this");
        assert_eq!(compact(&Node::new(NodeKind::EmptyExpression, 0)), "");
        assert_eq!(compact(&ident("foo")), "foo");
    }

    #[test]
    fn test_string_literals() {
        let unquoted = Node::new(
            NodeKind::StringLiteral {
                value: "hi".into(),
                quoted: false,
            },
            0,
        );
        assert_eq!(compact(&unquoted), "\"hi\"");

        let quoted = Node::new(
            NodeKind::StringLiteral {
                value: "'hi'".into(),
                quoted: true,
            },
            0,
        );
        assert_eq!(compact(&quoted), "'hi'");
    }

    #[test]
    fn test_regex_literal() {
        let regex = Node::new(
            NodeKind::RegexLiteral {
                body: "ab+".into(),
                flags: "gi".into(),
            },
            0,
        );
        assert_eq!(compact(&regex), "/ab+/gi");
    }

    #[test]
    fn test_non_finite_literal_is_an_error() {
        let err = num(f64::NAN).render(RenderOpts::empty()).unwrap_err();
        assert!(matches!(err, crate::error::BurnishError::PayloadOutOfRange(_)));
    }

    // ── Operators ─────────────────────────────────────────────────────────

    #[test]
    fn test_binary_operator_compact() {
        assert_eq!(compact(&binop(BinaryOp::Add, ident("a"), ident("b"))), "a+b");
        assert_eq!(compact(&binop(BinaryOp::UShr, ident("a"), num(2.0))), "a>>>2");
        assert_eq!(
            compact(&binop(BinaryOp::Comma, ident("a"), ident("b"))),
            "a,b"
        );
    }

    #[test]
    fn test_word_operators_keep_spaces_in_compact() {
        assert_eq!(
            compact(&binop(BinaryOp::In, ident("k"), ident("o"))),
            "k in o"
        );
        assert_eq!(
            compact(&binop(BinaryOp::Instanceof, ident("x"), ident("F"))),
            "x instanceof F"
        );
    }

    #[test]
    fn test_binary_operator_pretty() {
        assert_eq!(pretty(&binop(BinaryOp::Add, ident("a"), ident("b"))), "a + b");
        assert_eq!(pretty(&binop(BinaryOp::In, ident("k"), ident("o"))), "k in o");
        // No space before the comma.
        assert_eq!(pretty(&binop(BinaryOp::Comma, ident("a"), ident("b"))), "a, b");
    }

    #[test]
    fn test_assignment() {
        let assign = Node::new(NodeKind::Assignment(AssignOp::Assign), 0)
            .with_child(ident("a"))
            .with_child(num(1.0));
        assert_eq!(compact(&assign), "a=1");
        assert_eq!(pretty(&assign), "a = 1");

        let compound = Node::new(NodeKind::Assignment(AssignOp::ShlAssign), 0)
            .with_child(ident("a"))
            .with_child(num(2.0));
        assert_eq!(compact(&compound), "a<<=2");
    }

    #[test]
    fn test_unary_spacing() {
        let not = Node::new(NodeKind::Unary(UnaryOp::LogicalNot), 0).with_child(ident("x"));
        assert_eq!(compact(&not), "!x");

        let typeof_bare = Node::new(NodeKind::Unary(UnaryOp::Typeof), 0).with_child(ident("x"));
        assert_eq!(compact(&typeof_bare), "typeof x");

        // The parenthesis replaces the separating space.
        let typeof_paren = Node::new(NodeKind::Unary(UnaryOp::Typeof), 0)
            .with_child(Node::new(NodeKind::Parenthetical, 0).with_child(ident("x")));
        assert_eq!(compact(&typeof_paren), "typeof(x)");

        let void_zero = Node::new(NodeKind::Unary(UnaryOp::Void), 0).with_child(num(0.0));
        assert_eq!(compact(&void_zero), "void 0");

        let delete_member = Node::new(NodeKind::Unary(UnaryOp::Delete), 0).with_child(
            Node::new(NodeKind::StaticMemberExpression, 0)
                .with_child(ident("a"))
                .with_child(ident("b")),
        );
        assert_eq!(compact(&delete_member), "delete a.b");

        let pre_inc = Node::new(NodeKind::Unary(UnaryOp::PreIncrement), 0).with_child(ident("i"));
        assert_eq!(compact(&pre_inc), "++i");
    }

    #[test]
    fn test_postfix() {
        let post = Node::new(NodeKind::Postfix(PostfixOp::Decrement), 0).with_child(ident("i"));
        assert_eq!(compact(&post), "i--");
    }

    #[test]
    fn test_conditional() {
        let cond = Node::new(NodeKind::ConditionalExpression, 0)
            .with_child(ident("c"))
            .with_child(ident("t"))
            .with_child(ident("e"));
        assert_eq!(compact(&cond), "c?t:e");
        assert_eq!(pretty(&cond), "c ? t : e");
    }

    // ── Calls and member access ───────────────────────────────────────────

    #[test]
    fn test_calls() {
        let call = Node::new(NodeKind::FunctionCall, 0)
            .with_child(ident("f"))
            .with_child(args(vec![num(1.0), num(2.0)]));
        assert_eq!(compact(&call), "f(1,2)");
        assert_eq!(pretty(&call), "f(1, 2)");

        let ctor = Node::new(NodeKind::FunctionConstructor, 0)
            .with_child(ident("F"))
            .with_child(args(vec![]));
        assert_eq!(compact(&ctor), "new F()");
    }

    #[test]
    fn test_member_access() {
        let dot = Node::new(NodeKind::StaticMemberExpression, 0)
            .with_child(ident("a"))
            .with_child(ident("b"));
        assert_eq!(compact(&dot), "a.b");

        let bracket = Node::new(NodeKind::DynamicMemberExpression, 0)
            .with_child(ident("a"))
            .with_child(ident("i"));
        assert_eq!(compact(&bracket), "a[i]");
    }

    // ── Literals with children ────────────────────────────────────────────

    #[test]
    fn test_object_literal() {
        let prop = |key: &str, value: f64| {
            Node::new(NodeKind::ObjectLiteralProperty, 0)
                .with_child(ident(key))
                .with_child(num(value))
        };
        let object = Node::new(NodeKind::ObjectLiteral, 0)
            .with_child(prop("a", 1.0))
            .with_child(prop("b", 2.0));
        assert_eq!(compact(&object), "{a:1,b:2}");
        assert_eq!(pretty(&object), "{a: 1, b: 2}");
    }

    #[test]
    fn test_array_literal() {
        let array = Node::new(NodeKind::ArrayLiteral, 0)
            .with_child(num(1.0))
            .with_child(num(2.0))
            .with_child(num(3.0));
        assert_eq!(compact(&array), "[1,2,3]");

        // Elided positions keep their separators.
        let mut sparse = Node::new(NodeKind::ArrayLiteral, 0).with_child(num(1.0));
        sparse.append_child(None);
        sparse.append_child(Some(num(3.0)));
        assert_eq!(compact(&sparse), "[1,,3]");
    }

    // ── Functions ─────────────────────────────────────────────────────────

    #[test]
    fn test_function_declaration() {
        let decl = Node::new(NodeKind::FunctionDeclaration, 0)
            .with_child(ident("f"))
            .with_child(args(vec![ident("a"), ident("b")]))
            .with_child(list(vec![Node::new(
                NodeKind::StatementWithExpression(StatementKeyword::Return),
                0,
            )
            .with_child(ident("a"))]));
        assert_eq!(compact(&decl), "function f(a,b){return a;}");
        assert_eq!(
            pretty(&list(vec![decl])),
            "function f(a, b) {\n  return a;\n}"
        );
    }

    #[test]
    fn test_function_expression_names() {
        let named = Node::new(NodeKind::FunctionExpression, 0)
            .with_child(ident("f"))
            .with_child(args(vec![]))
            .with_child(list(vec![]));
        assert_eq!(compact(&named), "function f(){}");

        let anonymous = Node::new(NodeKind::FunctionExpression, 0)
            .with_absent_child()
            .with_child(args(vec![]))
            .with_child(list(vec![]));
        assert_eq!(compact(&anonymous), "function(){}");
    }

    // ── Statements ────────────────────────────────────────────────────────

    #[test]
    fn test_statement_list_compact() {
        assert_eq!(compact(&list(vec![call("a"), call("b")])), "a();b();");
    }

    #[test]
    fn test_statement_list_pretty() {
        assert_eq!(pretty(&list(vec![call("a"), call("b")])), "a();\nb();");
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(compact(&Node::program()), "");
    }

    #[test]
    fn test_statement_with_expression() {
        let ret = Node::new(NodeKind::StatementWithExpression(StatementKeyword::Return), 0)
            .with_child(ident("x"));
        assert_eq!(compact(&list(vec![ret])), "return x;");

        let bare = Node::new(NodeKind::StatementWithExpression(StatementKeyword::Return), 0)
            .with_absent_child();
        assert_eq!(compact(&list(vec![bare])), "return;");

        let brk = Node::new(NodeKind::StatementWithExpression(StatementKeyword::Break), 0)
            .with_absent_child();
        assert_eq!(compact(&list(vec![brk])), "break;");
    }

    #[test]
    fn test_var_declaration() {
        let decl = Node::new(NodeKind::VarDeclaration { iterator: false }, 0)
            .with_child(
                Node::new(NodeKind::Assignment(AssignOp::Assign), 0)
                    .with_child(ident("a"))
                    .with_child(num(1.0)),
            )
            .with_child(ident("b"));
        assert_eq!(compact(&list(vec![decl.clone()])), "var a=1,b;");
        assert_eq!(pretty(&list(vec![decl])), "var a = 1, b;");
    }

    #[test]
    fn test_iterator_var_declaration_has_no_semicolon() {
        let decl = Node::new(NodeKind::VarDeclaration { iterator: true }, 0).with_child(ident("x"));
        assert_eq!(compact(&list(vec![decl])), "var x");
    }

    #[test]
    fn test_label() {
        let labeled = Node::new(NodeKind::Label, 0)
            .with_child(ident("top"))
            .with_child(call("a"));
        assert_eq!(compact(&list(vec![labeled.clone()])), "top:a();");
        assert_eq!(pretty(&list(vec![labeled])), "top: a();");
    }

    // ── If ────────────────────────────────────────────────────────────────

    #[test]
    fn test_if_without_else_drops_braces() {
        let stmt = Node::new(NodeKind::If, 0)
            .with_child(ident("x"))
            .with_child(list(vec![call("a")]))
            .with_absent_child();
        assert_eq!(compact(&list(vec![stmt])), "if(x)a();");
    }

    #[test]
    fn test_if_multi_statement_then_keeps_braces() {
        let stmt = Node::new(NodeKind::If, 0)
            .with_child(ident("x"))
            .with_child(list(vec![call("a"), call("b")]))
            .with_absent_child();
        assert_eq!(compact(&list(vec![stmt])), "if(x){a();b();}");
    }

    #[test]
    fn test_if_empty_then_keeps_braces() {
        let stmt = Node::new(NodeKind::If, 0)
            .with_child(ident("x"))
            .with_child(list(vec![]))
            .with_absent_child();
        assert_eq!(compact(&list(vec![stmt])), "if(x){}");
    }

    #[test]
    fn test_if_else_compact() {
        let stmt = Node::new(NodeKind::If, 0)
            .with_child(ident("x"))
            .with_child(list(vec![call("a")]))
            .with_child(list(vec![call("b")]));
        // The then-branch needs braces once an else exists; the else body
        // may still shed its own.
        assert_eq!(compact(&list(vec![stmt])), "if(x){a();}else b();");
    }

    #[test]
    fn test_if_else_multi_statement() {
        let stmt = Node::new(NodeKind::If, 0)
            .with_child(ident("x"))
            .with_child(list(vec![call("a")]))
            .with_child(list(vec![call("b"), call("c")]));
        assert_eq!(compact(&list(vec![stmt])), "if(x){a();}else{b();c();}");
    }

    #[test]
    fn test_else_if_is_inlined() {
        let inner = Node::new(NodeKind::If, 0)
            .with_child(ident("y"))
            .with_child(list(vec![call("b")]))
            .with_absent_child();
        let outer = Node::new(NodeKind::If, 0)
            .with_child(ident("x"))
            .with_child(list(vec![call("a")]))
            .with_child(inner);
        assert_eq!(compact(&list(vec![outer])), "if(x){a();}else if(y)b();");
    }

    #[test]
    fn test_if_else_pretty() {
        let stmt = Node::new(NodeKind::If, 0)
            .with_child(ident("a"))
            .with_child(list(vec![call("b")]))
            .with_child(list(vec![call("c")]));
        assert_eq!(
            pretty(&list(vec![stmt])),
            "if (a) {\n  b();\n} else {\n  c();\n}"
        );
    }

    // ── Loops ─────────────────────────────────────────────────────────────

    #[test]
    fn test_while() {
        let stmt = Node::new(NodeKind::While, 0)
            .with_child(ident("x"))
            .with_child(list(vec![call("a")]));
        assert_eq!(compact(&list(vec![stmt.clone()])), "while(x)a();");
        assert_eq!(pretty(&list(vec![stmt])), "while (x) {\n  a();\n}");
    }

    #[test]
    fn test_do_while() {
        let stmt = Node::new(NodeKind::DoWhile, 0)
            .with_child(list(vec![call("a")]))
            .with_child(ident("x"));
        assert_eq!(compact(&list(vec![stmt])), "do{a();}while(x);");
    }

    #[test]
    fn test_for_loop() {
        let init = Node::new(NodeKind::VarDeclaration { iterator: true }, 0).with_child(
            Node::new(NodeKind::Assignment(AssignOp::Assign), 0)
                .with_child(ident("i"))
                .with_child(num(0.0)),
        );
        let cond = binop(BinaryOp::Lt, ident("i"), num(10.0));
        let update = Node::new(NodeKind::Postfix(PostfixOp::Increment), 0).with_child(ident("i"));
        let stmt = Node::new(NodeKind::ForLoop, 0)
            .with_child(init)
            .with_child(cond)
            .with_child(update)
            .with_child(list(vec![call("a")]));
        assert_eq!(compact(&list(vec![stmt.clone()])), "for(var i=0;i<10;i++)a();");
        assert_eq!(
            pretty(&list(vec![stmt])),
            "for (var i = 0; i < 10; i++) {\n  a();\n}"
        );
    }

    #[test]
    fn test_for_loop_all_slots_empty() {
        let empty = || Node::new(NodeKind::EmptyExpression, 0);
        let stmt = Node::new(NodeKind::ForLoop, 0)
            .with_child(empty())
            .with_child(empty())
            .with_child(empty())
            .with_child(empty());
        assert_eq!(compact(&list(vec![stmt])), "for(;;);");
    }

    #[test]
    fn test_for_in() {
        let lhs = Node::new(NodeKind::VarDeclaration { iterator: true }, 0).with_child(ident("k"));
        let stmt = Node::new(NodeKind::ForIn, 0)
            .with_child(lhs)
            .with_child(ident("o"))
            .with_child(list(vec![call("a")]));
        assert_eq!(compact(&list(vec![stmt])), "for(var k in o)a();");
    }

    #[test]
    fn test_with() {
        let stmt = Node::new(NodeKind::With, 0)
            .with_child(ident("o"))
            .with_child(list(vec![call("a")]));
        assert_eq!(compact(&list(vec![stmt])), "with(o)a();");
    }

    // ── Try / switch ──────────────────────────────────────────────────────

    #[test]
    fn test_try_catch_finally() {
        let stmt = Node::new(NodeKind::Try, 0)
            .with_child(list(vec![call("a")]))
            .with_child(ident("e"))
            .with_child(list(vec![call("b")]))
            .with_child(list(vec![call("c")]));
        assert_eq!(
            compact(&list(vec![stmt])),
            "try{a();}catch(e){b();}finally{c();}"
        );
    }

    #[test]
    fn test_try_finally_only() {
        let stmt = Node::new(NodeKind::Try, 0)
            .with_child(list(vec![call("a")]))
            .with_absent_child()
            .with_absent_child()
            .with_child(list(vec![call("c")]));
        assert_eq!(compact(&list(vec![stmt])), "try{a();}finally{c();}");
    }

    #[test]
    fn test_try_catch_pretty() {
        let stmt = Node::new(NodeKind::Try, 0)
            .with_child(list(vec![call("a")]))
            .with_child(ident("e"))
            .with_child(list(vec![call("b")]))
            .with_absent_child();
        assert_eq!(
            pretty(&list(vec![stmt])),
            "try {\n  a();\n} catch (e) {\n  b();\n}"
        );
    }

    #[test]
    fn test_switch_compact() {
        let body = list(vec![
            Node::new(NodeKind::CaseClause, 0).with_child(num(1.0)),
            call("a"),
            Node::new(NodeKind::DefaultClause, 0),
            call("b"),
        ]);
        let stmt = Node::new(NodeKind::Switch, 0)
            .with_child(ident("x"))
            .with_child(body);
        assert_eq!(
            compact(&list(vec![stmt])),
            "switch(x){case 1:a();default:b();}"
        );
    }

    #[test]
    fn test_switch_pretty_indentation() {
        let body = list(vec![
            Node::new(NodeKind::CaseClause, 0).with_child(num(1.0)),
            call("a"),
            Node::new(NodeKind::DefaultClause, 0),
            call("b"),
        ]);
        let stmt = Node::new(NodeKind::Switch, 0)
            .with_child(ident("x"))
            .with_child(body);
        // Case labels sit at body level; their statements one deeper. The
        // closing brace follows the extra body indentation.
        assert_eq!(
            pretty(&list(vec![stmt])),
            "switch(x) {\n  case 1:\n    a();\n  default:\n    b();\n  }"
        );
    }

    // ── Line-number preservation ──────────────────────────────────────────

    #[test]
    fn test_lineno_catchup_between_statements() {
        let program = list(vec![ident_at("a", 1), ident_at("b", 4)]);
        assert_eq!(lineno(&program), "a;\n\n\nb;");
    }

    #[test]
    fn test_lineno_zero_suppresses_catchup() {
        let program = list(vec![ident_at("a", 0), ident_at("b", 0)]);
        assert_eq!(lineno(&program), "a;b;");
    }

    #[test]
    fn test_lineno_never_goes_backwards() {
        // The second statement claims a line the output has already passed.
        let program = list(vec![ident_at("a", 3), ident_at("b", 2)]);
        assert_eq!(lineno(&program), "\n\na;b;");
    }

    #[test]
    fn test_lineno_inside_blocks() {
        let stmt = Node::new(NodeKind::If, 2)
            .with_child(ident_at("x", 2))
            .with_child(list(vec![
                Node::new(NodeKind::FunctionCall, 3)
                    .with_child(ident_at("a", 3))
                    .with_child(args(vec![])),
            ]))
            .with_absent_child();
        let program = list(vec![stmt]);
        assert_eq!(lineno(&program), "\nif(x)\na();");
    }

    #[test]
    fn test_lineno_combined_with_pretty() {
        let opts = RenderOpts::PRETTY | RenderOpts::MAINTAIN_LINENO;
        let program = list(vec![ident_at("a", 1), ident_at("b", 3)]);
        assert_eq!(program.render(opts).unwrap(), "a;\n\nb;");
    }

    // ── Option independence ───────────────────────────────────────────────

    #[test]
    fn test_render_does_not_mutate_tree() {
        let stmt = Node::new(NodeKind::If, 0)
            .with_child(ident("x"))
            .with_child(list(vec![call("a")]))
            .with_child(list(vec![call("b")]));
        let program = list(vec![stmt]);
        let before = program.clone();
        let _ = compact(&program);
        let _ = pretty(&program);
        let _ = lineno(&program);
        assert_eq!(program, before);
    }
}
