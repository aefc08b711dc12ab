//! Infix expression sub-parser.
//!
//! A shunting-yard pass converts the token stream to postfix, then a second
//! pass folds the postfix sequence into parse-tree nodes. Scanning stops at
//! the expression terminators (`EOF`, newline, `,`, `)`, `}`) or at the first
//! token that is neither an operand nor an operator; pending operators are
//! drained either way.

use crate::token::{Token, TokenKind};
use crate::tree::{NodeId, ParseNode, ParseNodeKind};

use super::Parser;

/// Operators the shunting yard understands, ordered by the precedence table
/// (higher binds tighter). `|` < `or` < `and` < `+` < unary `-`/`not`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Pipe,
    Or,
    And,
    Plus,
    Negate,
    Not,
}

impl OpKind {
    fn precedence(self) -> u8 {
        match self {
            OpKind::Pipe => 1,
            OpKind::Or => 2,
            OpKind::And => 3,
            OpKind::Plus => 4,
            OpKind::Negate | OpKind::Not => 5,
        }
    }

    /// The unary operators are right-associative; the rest are left.
    fn is_unary(self) -> bool {
        matches!(self, OpKind::Negate | OpKind::Not)
    }

    fn node_kind(self) -> ParseNodeKind {
        match self {
            OpKind::Pipe => ParseNodeKind::PipeExpr,
            OpKind::Or => ParseNodeKind::OrExpr,
            OpKind::And => ParseNodeKind::AndExpr,
            OpKind::Plus => ParseNodeKind::PlusExpr,
            OpKind::Negate => ParseNodeKind::NegateExpr,
            OpKind::Not => ParseNodeKind::NotExpr,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PostfixItem {
    Operand(Token),
    Operator(OpKind, Token),
}

impl<'src, 'st> Parser<'src, 'st> {
    /// Parses one infix expression and attaches its root under `parent`.
    ///
    /// Scanning also stops once the token cannot continue the expression at
    /// its current position: an operand right after an operand marks the
    /// start of the next construct (match arms sit on one line, so `true :
    /// "T" false : "F"` must split between `"T"` and `false`).
    pub(super) fn parse_infix_expression(&mut self, parent: NodeId) {
        let mut output: Vec<PostfixItem> = Vec::new();
        let mut operators: Vec<(OpKind, Token)> = Vec::new();
        let mut expect_operand = true;

        loop {
            let token = self.current();
            let op = match token.kind {
                TokenKind::Eof
                | TokenKind::Newline
                | TokenKind::Comma
                | TokenKind::RParen
                | TokenKind::RBrace => break,
                TokenKind::True | TokenKind::False | TokenKind::String => {
                    if !expect_operand {
                        break;
                    }
                    self.bump();
                    output.push(PostfixItem::Operand(token));
                    expect_operand = false;
                    continue;
                }
                TokenKind::Identifier => {
                    if token.text == Some(self.not_ident) {
                        OpKind::Not
                    } else {
                        if !expect_operand {
                            break;
                        }
                        self.bump();
                        output.push(PostfixItem::Operand(token));
                        expect_operand = false;
                        continue;
                    }
                }
                TokenKind::And => OpKind::And,
                TokenKind::Or => OpKind::Or,
                TokenKind::Plus => OpKind::Plus,
                TokenKind::Pipe => OpKind::Pipe,
                TokenKind::Minus => OpKind::Negate,
                // Anything else ends the expression; the enclosing state
                // decides whether it is an error.
                _ => break,
            };
            // Operators fit only one side of an operand: unary before it,
            // binary after it.
            if op.is_unary() != expect_operand {
                break;
            }
            expect_operand = true;
            self.bump();

            // Left-associative binders pop ties; the right-associative unary
            // operators only pop strictly tighter ones.
            while let Some(&(top, top_token)) = operators.last() {
                let binds = if op.is_unary() {
                    top.precedence() > op.precedence()
                } else {
                    top.precedence() >= op.precedence()
                };
                if !binds {
                    break;
                }
                operators.pop();
                output.push(PostfixItem::Operator(top, top_token));
            }
            operators.push((op, token));
        }

        while let Some((op, token)) = operators.pop() {
            output.push(PostfixItem::Operator(op, token));
        }

        self.fold_postfix(parent, &output);
    }

    /// Folds a postfix sequence into nodes. Exactly one node must remain;
    /// anything else is a malformed expression.
    fn fold_postfix(&mut self, parent: NodeId, postfix: &[PostfixItem]) {
        let mut nodes: Vec<NodeId> = Vec::new();

        for item in postfix {
            match *item {
                PostfixItem::Operand(token) => {
                    let kind = match token.kind {
                        TokenKind::String => ParseNodeKind::StringLiteral,
                        TokenKind::True | TokenKind::False => ParseNodeKind::BooleanLiteral,
                        _ => ParseNodeKind::Identifier,
                    };
                    nodes.push(self.tree.push(ParseNode::terminal(kind, token)));
                }
                PostfixItem::Operator(op, token) => {
                    if op.is_unary() {
                        let Some(operand) = nodes.pop() else {
                            self.error_at(token, "Malformed expression");
                            return;
                        };
                        let node = self.tree.push(ParseNode::nonterminal(op.node_kind()));
                        self.tree.add_child(node, operand);
                        nodes.push(node);
                    } else {
                        let (Some(right), Some(left)) = (nodes.pop(), nodes.pop()) else {
                            self.error_at(token, "Malformed expression");
                            return;
                        };
                        let node = self.tree.push(ParseNode::nonterminal(op.node_kind()));
                        self.tree.add_child(node, left);
                        self.tree.add_child(node, right);
                        nodes.push(node);
                    }
                }
            }
        }

        match nodes.len() {
            1 => self.tree.add_child(parent, nodes[0]),
            0 => self.error_here("Expected expression"),
            _ => self.error_here("Malformed expression"),
        }
    }
}
