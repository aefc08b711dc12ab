//! Abstract syntax tree.
//!
//! Structurally the same first-child/next-sibling layout as the parse tree,
//! but over the semantic node set only: no comments, no newlines. Terminal
//! nodes keep their parse-tree token verbatim so the interpreter can read
//! interned text and literal kinds straight off the node.

mod build;

pub use build::build_ast;

use suru_core::ChunkedVec;

use crate::token::{Token, TokenKind};

/// Kinds of AST nodes. A strict subset of the parse-tree kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstKind {
    Program,
    FunctionDecl,
    ParamList,
    Param,
    Block,
    VarDecl,
    CallExpr,
    ArgList,
    AndExpr,
    OrExpr,
    PlusExpr,
    PipeExpr,
    NotExpr,
    NegateExpr,
    MatchExpr,
    MatchArm,
    Identifier,
    StringLiteral,
    BooleanLiteral,
    MatchWildcard,
}

impl AstKind {
    pub fn name(self) -> &'static str {
        match self {
            AstKind::Program => "PROGRAM",
            AstKind::FunctionDecl => "FUNCTION_DECL",
            AstKind::ParamList => "PARAM_LIST",
            AstKind::Param => "PARAM",
            AstKind::Block => "BLOCK",
            AstKind::VarDecl => "VAR_DECL",
            AstKind::CallExpr => "CALL_EXPR",
            AstKind::ArgList => "ARG_LIST",
            AstKind::AndExpr => "AND_EXPR",
            AstKind::OrExpr => "OR_EXPR",
            AstKind::PlusExpr => "PLUS_EXPR",
            AstKind::PipeExpr => "PIPE_EXPR",
            AstKind::NotExpr => "NOT_EXPR",
            AstKind::NegateExpr => "NEGATE_EXPR",
            AstKind::MatchExpr => "MATCH_EXPR",
            AstKind::MatchArm => "MATCH_ARM",
            AstKind::Identifier => "IDENTIFIER",
            AstKind::StringLiteral => "STRING_LITERAL",
            AstKind::BooleanLiteral => "BOOLEAN_LITERAL",
            AstKind::MatchWildcard => "MATCH_WILDCARD",
        }
    }
}

/// Stable index of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AstId(u32);

impl AstId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AstNode {
    pub kind: AstKind,
    pub token: Token,
    pub first_child: Option<AstId>,
    pub next_sibling: Option<AstId>,
    pub parent: Option<AstId>,
}

impl AstNode {
    pub fn nonterminal(kind: AstKind) -> AstNode {
        AstNode {
            kind,
            token: Token::new(TokenKind::Unknown, 0, 0),
            first_child: None,
            next_sibling: None,
            parent: None,
        }
    }

    pub fn terminal(kind: AstKind, token: Token) -> AstNode {
        AstNode {
            token,
            ..AstNode::nonterminal(kind)
        }
    }
}

pub struct Ast {
    nodes: ChunkedVec<AstNode>,
    root: Option<AstId>,
}

impl Ast {
    pub fn new() -> Ast {
        Ast {
            nodes: ChunkedVec::new(),
            root: None,
        }
    }

    pub fn push(&mut self, node: AstNode) -> AstId {
        AstId(self.nodes.push(node) as u32)
    }

    #[inline]
    pub fn get(&self, id: AstId) -> &AstNode {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("dangling ast node id {}", id.0))
    }

    fn get_mut(&mut self, id: AstId) -> &mut AstNode {
        self.nodes
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("dangling ast node id {}", id.0))
    }

    pub fn root(&self) -> Option<AstId> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<AstId>) {
        self.root = root;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_child(&mut self, parent: AstId, child: AstId) {
        self.get_mut(child).parent = Some(parent);
        match self.get(parent).first_child {
            None => self.get_mut(parent).first_child = Some(child),
            Some(first) => {
                let mut at = first;
                while let Some(next) = self.get(at).next_sibling {
                    at = next;
                }
                self.get_mut(at).next_sibling = Some(child);
            }
        }
    }

    pub fn children(&self, parent: AstId) -> AstChildren<'_> {
        AstChildren {
            ast: self,
            next: self.get(parent).first_child,
        }
    }

    pub fn child_at(&self, parent: AstId, n: usize) -> Option<AstId> {
        self.children(parent).nth(n)
    }

    /// All node ids in creation (pre-)order.
    pub fn iter_ids(&self) -> impl Iterator<Item = AstId> {
        (0..self.nodes.len() as u32).map(AstId)
    }
}

impl Default for Ast {
    fn default() -> Self {
        Ast::new()
    }
}

pub struct AstChildren<'a> {
    ast: &'a Ast,
    next: Option<AstId>,
}

impl Iterator for AstChildren<'_> {
    type Item = AstId;

    fn next(&mut self) -> Option<AstId> {
        let id = self.next?;
        self.next = self.ast.get(id).next_sibling;
        Some(id)
    }
}
