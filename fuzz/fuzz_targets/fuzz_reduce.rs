#![no_main]

use burnish_core::ast::node::{Node, NodeKind};
use burnish_core::ast::ops::{BinaryOp, UnaryOp};
use burnish_core::render::RenderOpts;
use libfuzzer_sys::fuzz_target;

const MAX_DEPTH: u32 = 4;

const NAMES: [&str; 6] = ["a", "b", "foo", "eval", "bagofholding", "class"];

// Weighted toward the foldable operators so reductions actually fire.
const BINARY_OPS: [BinaryOp; 6] = [
    BinaryOp::Or,
    BinaryOp::And,
    BinaryOp::Comma,
    BinaryOp::Or,
    BinaryOp::And,
    BinaryOp::Add,
];

/// Deterministically decodes a byte stream into a reduction-heavy tree:
/// plenty of constants, logical operators, `if` statements, and
/// canonicalizable string keys.
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

    fn name(&mut self) -> &'static str {
        NAMES[usize::from(self.byte()) % NAMES.len()]
    }

    fn expr(&mut self, depth: u32) -> Node {
        let choice = if depth >= MAX_DEPTH { self.byte() % 4 } else { self.byte() % 10 };
        match choice {
            // Constants dominate so the short-circuit rules get exercised.
            0 => Node::new(NodeKind::NumericLiteral(f64::from(self.byte() % 2)), 0),
            1 => Node::new(NodeKind::BooleanLiteral(self.byte() & 1 == 0), 0),
            2 => Node::new(NodeKind::Identifier(self.name().into()), 0),
            3 => Node::new(
                NodeKind::StringLiteral {
                    value: self.name().into(),
                    quoted: false,
                },
                0,
            ),
            4 | 5 => {
                let op = BINARY_OPS[usize::from(self.byte()) % BINARY_OPS.len()];
                Node::new(NodeKind::Operator(op), 0)
                    .with_child(self.expr(depth + 1))
                    .with_child(self.expr(depth + 1))
            }
            6 => Node::new(NodeKind::Unary(UnaryOp::LogicalNot), 0)
                .with_child(self.expr(depth + 1)),
            7 => Node::new(NodeKind::Parenthetical, 0).with_child(self.expr(depth + 1)),
            8 => Node::new(NodeKind::ConditionalExpression, 0)
                .with_child(self.expr(depth + 1))
                .with_child(self.expr(depth + 1))
                .with_child(self.expr(depth + 1)),
            _ => {
                // Calls, including the feature-flag stub; subscripts with
                // string keys that may or may not canonicalize.
                if self.byte() & 1 == 0 {
                    Node::new(NodeKind::FunctionCall, 0)
                        .with_child(Node::new(NodeKind::Identifier(self.name().into()), 0))
                        .with_child(Node::new(NodeKind::ArgList, 0))
                } else {
                    Node::new(NodeKind::DynamicMemberExpression, 0)
                        .with_child(self.expr(depth + 1))
                        .with_child(Node::new(
                            NodeKind::StringLiteral {
                                value: self.name().into(),
                                quoted: false,
                            },
                            0,
                        ))
                }
            }
        }
    }

    fn statement(&mut self, depth: u32) -> Node {
        let choice = if depth >= MAX_DEPTH { 0 } else { self.byte() % 4 };
        match choice {
            1 => {
                let stmt = Node::new(NodeKind::If, 0)
                    .with_child(self.expr(depth + 1))
                    .with_child(self.statement_list(depth + 1));
                if self.byte() & 1 == 0 {
                    stmt.with_child(self.statement_list(depth + 1))
                } else {
                    stmt.with_absent_child()
                }
            }
            2 => {
                let prop = Node::new(NodeKind::ObjectLiteralProperty, 0)
                    .with_child(Node::new(
                        NodeKind::StringLiteral {
                            value: self.name().into(),
                            quoted: false,
                        },
                        0,
                    ))
                    .with_child(self.expr(depth + 1));
                Node::new(NodeKind::ObjectLiteral, 0).with_child(prop)
            }
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

    let Some(once) = program.reduce() else {
        // A statement list never reduces away entirely.
        panic!("statement list vanished under reduction");
    };

    // Reduction is idempotent: a second pass must be a no-op.
    let again = once.clone().reduce().expect("reduced tree vanished");
    assert_eq!(once, again, "reduce(reduce(t)) must equal reduce(t)");

    // Reduced trees must still render in every mode.
    once.render(RenderOpts::empty()).unwrap();
    once.render(RenderOpts::PRETTY).unwrap();
    once.render(RenderOpts::MAINTAIN_LINENO).unwrap();
});
