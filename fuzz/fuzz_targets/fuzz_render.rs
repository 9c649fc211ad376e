#![no_main]

use burnish_core::ast::node::{Node, NodeKind};
use burnish_core::ast::ops::{AssignOp, BinaryOp, PostfixOp, StatementKeyword, UnaryOp};
use burnish_core::render::RenderOpts;
use libfuzzer_sys::fuzz_target;

const MAX_DEPTH: u32 = 4;

const NAMES: [&str; 6] = ["a", "b", "foo", "bar", "$x", "_y"];

const BINARY_OPS: [BinaryOp; 8] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Comma,
    BinaryOp::In,
    BinaryOp::Instanceof,
    BinaryOp::Or,
    BinaryOp::And,
];

const UNARY_OPS: [UnaryOp; 6] = [
    UnaryOp::Delete,
    UnaryOp::Void,
    UnaryOp::Typeof,
    UnaryOp::LogicalNot,
    UnaryOp::Minus,
    UnaryOp::BitNot,
];

/// Deterministically decodes a byte stream into a bounded syntax tree.
struct TreeBuilder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn byte(&mut self) -> u8 {
        let byte = self.data.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        byte
    }

    fn lineno(&mut self) -> u32 {
        // Small line numbers, with 0 (no catch-up) well represented.
        u32::from(self.byte() % 16)
    }

    fn name(&mut self) -> &'static str {
        NAMES[usize::from(self.byte()) % NAMES.len()]
    }

    fn expr(&mut self, depth: u32) -> Node {
        let lineno = self.lineno();
        let choice = if depth >= MAX_DEPTH { self.byte() % 4 } else { self.byte() % 12 };
        match choice {
            0 => Node::new(NodeKind::Identifier(self.name().into()), lineno),
            1 => Node::new(NodeKind::NumericLiteral(f64::from(self.byte())), lineno),
            2 => Node::new(NodeKind::BooleanLiteral(self.byte() & 1 == 0), lineno),
            3 => Node::new(
                NodeKind::StringLiteral {
                    value: self.name().into(),
                    quoted: false,
                },
                lineno,
            ),
            4 => {
                let op = BINARY_OPS[usize::from(self.byte()) % BINARY_OPS.len()];
                Node::new(NodeKind::Operator(op), lineno)
                    .with_child(self.expr(depth + 1))
                    .with_child(self.expr(depth + 1))
            }
            5 => {
                let op = UNARY_OPS[usize::from(self.byte()) % UNARY_OPS.len()];
                Node::new(NodeKind::Unary(op), lineno).with_child(self.expr(depth + 1))
            }
            6 => Node::new(NodeKind::Parenthetical, lineno).with_child(self.expr(depth + 1)),
            7 => Node::new(NodeKind::ConditionalExpression, lineno)
                .with_child(self.expr(depth + 1))
                .with_child(self.expr(depth + 1))
                .with_child(self.expr(depth + 1)),
            8 => {
                let mut args = Node::new(NodeKind::ArgList, lineno);
                for _ in 0..self.byte() % 3 {
                    let arg = self.expr(depth + 1);
                    args.append_child(Some(arg));
                }
                Node::new(NodeKind::FunctionCall, lineno)
                    .with_child(Node::new(NodeKind::Identifier(self.name().into()), lineno))
                    .with_child(args)
            }
            9 => Node::new(NodeKind::DynamicMemberExpression, lineno)
                .with_child(self.expr(depth + 1))
                .with_child(self.expr(depth + 1)),
            10 => {
                let op = if self.byte() & 1 == 0 {
                    PostfixOp::Increment
                } else {
                    PostfixOp::Decrement
                };
                Node::new(NodeKind::Postfix(op), lineno)
                    .with_child(Node::new(NodeKind::Identifier(self.name().into()), lineno))
            }
            _ => Node::new(NodeKind::Assignment(AssignOp::Assign), lineno)
                .with_child(Node::new(NodeKind::Identifier(self.name().into()), lineno))
                .with_child(self.expr(depth + 1)),
        }
    }

    fn statement(&mut self, depth: u32) -> Node {
        let lineno = self.lineno();
        let choice = if depth >= MAX_DEPTH { 0 } else { self.byte() % 6 };
        match choice {
            1 => {
                let stmt = Node::new(NodeKind::If, lineno)
                    .with_child(self.expr(depth + 1))
                    .with_child(self.statement_list(depth + 1));
                if self.byte() & 1 == 0 {
                    stmt.with_child(self.statement_list(depth + 1))
                } else {
                    stmt.with_absent_child()
                }
            }
            2 => Node::new(NodeKind::While, lineno)
                .with_child(self.expr(depth + 1))
                .with_child(self.statement_list(depth + 1)),
            3 => {
                let operand = if self.byte() & 1 == 0 {
                    Some(self.expr(depth + 1))
                } else {
                    None
                };
                let mut stmt = Node::new(
                    NodeKind::StatementWithExpression(StatementKeyword::Return),
                    lineno,
                );
                stmt.append_child(operand);
                stmt
            }
            4 => Node::new(NodeKind::VarDeclaration { iterator: false }, lineno).with_child(
                Node::new(NodeKind::Assignment(AssignOp::Assign), lineno)
                    .with_child(Node::new(NodeKind::Identifier(self.name().into()), lineno))
                    .with_child(self.expr(depth + 1)),
            ),
            _ => self.expr(depth + 1),
        }
    }

    fn statement_list(&mut self, depth: u32) -> Node {
        let mut stmts = Node::new(NodeKind::StatementList, 0);
        let count = if depth >= MAX_DEPTH { 1 } else { self.byte() % 4 };
        for _ in 0..count {
            let stmt = self.statement(depth + 1);
            stmts.append_child(Some(stmt));
        }
        stmts
    }
}

fuzz_target!(|data: &[u8]| {
    let program = TreeBuilder::new(data).statement_list(0);
    let before = program.clone();

    // Every option combination must render without error: the builder only
    // produces finite literals and well-formed arities.
    let compact = program.render(RenderOpts::empty()).unwrap();
    let pretty = program.render(RenderOpts::PRETTY).unwrap();
    let lineno = program.render(RenderOpts::MAINTAIN_LINENO).unwrap();
    let both = program
        .render(RenderOpts::PRETTY | RenderOpts::MAINTAIN_LINENO)
        .unwrap();

    // Rendering is pure: no mutation, and repeated renders are identical.
    assert_eq!(program, before, "render must not mutate the tree");
    assert_eq!(
        program.render(RenderOpts::empty()).unwrap(),
        compact,
        "compact render must be deterministic"
    );

    // Catch-up only ever adds newlines relative to the compact form.
    assert!(lineno.len() >= compact.len());
    let _ = (pretty, both);
});
