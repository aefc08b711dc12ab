//! Lossless concrete parse tree.
//!
//! Nodes live in a [`ChunkedVec`] and reference each other through stable
//! indices in first-child/next-sibling form. Terminal nodes wrap the token
//! they were built from; nonterminal nodes carry a placeholder token of kind
//! `Unknown` with no text. Trivia (comments, newlines) is kept as ordinary
//! child nodes wherever the grammar records it, which is what makes the tree
//! losslessly printable.

use suru_core::ChunkedVec;

use crate::token::{Token, TokenKind};

/// Kinds of parse-tree nodes, terminal and nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseNodeKind {
    Program,
    FunctionDecl,
    ParamList,
    Param,
    Block,
    VarDecl,
    MatchStmt,
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
    Comment,
    Newline,
}

impl ParseNodeKind {
    /// Name used by the parse-tree dump.
    pub fn name(self) -> &'static str {
        match self {
            ParseNodeKind::Program => "PROGRAM",
            ParseNodeKind::FunctionDecl => "FUNCTION_DECL",
            ParseNodeKind::ParamList => "PARAM_LIST",
            ParseNodeKind::Param => "PARAM",
            ParseNodeKind::Block => "BLOCK",
            ParseNodeKind::VarDecl => "VAR_DECL",
            ParseNodeKind::MatchStmt => "MATCH_STMT",
            ParseNodeKind::CallExpr => "CALL_EXPR",
            ParseNodeKind::ArgList => "ARG_LIST",
            ParseNodeKind::AndExpr => "AND_EXPR",
            ParseNodeKind::OrExpr => "OR_EXPR",
            ParseNodeKind::PlusExpr => "PLUS_EXPR",
            ParseNodeKind::PipeExpr => "PIPE_EXPR",
            ParseNodeKind::NotExpr => "NOT_EXPR",
            ParseNodeKind::NegateExpr => "NEGATE_EXPR",
            ParseNodeKind::MatchExpr => "MATCH_EXPR",
            ParseNodeKind::MatchArm => "MATCH_ARM",
            ParseNodeKind::Identifier => "IDENTIFIER",
            ParseNodeKind::StringLiteral => "STRING_LITERAL",
            ParseNodeKind::BooleanLiteral => "BOOLEAN_LITERAL",
            ParseNodeKind::MatchWildcard => "MATCH_WILDCARD",
            ParseNodeKind::Comment => "COMMENT",
            ParseNodeKind::Newline => "NEWLINE",
        }
    }
}

/// Stable index of a node within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One parse-tree node. Uniform size for chunked-array storage.
#[derive(Debug, Clone, Copy)]
pub struct ParseNode {
    pub kind: ParseNodeKind,
    pub token: Token,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub leading_spaces: u16,
    pub trailing_spaces: u16,
    pub leading_newlines: u16,
}

impl ParseNode {
    /// A nonterminal node: placeholder token, no links yet.
    pub fn nonterminal(kind: ParseNodeKind) -> ParseNode {
        ParseNode {
            kind,
            token: Token::new(TokenKind::Unknown, 0, 0),
            first_child: None,
            next_sibling: None,
            parent: None,
            leading_spaces: 0,
            trailing_spaces: 0,
            leading_newlines: 0,
        }
    }

    /// A terminal node wrapping `token`.
    pub fn terminal(kind: ParseNodeKind, token: Token) -> ParseNode {
        ParseNode {
            token,
            ..ParseNode::nonterminal(kind)
        }
    }
}

/// The parse tree: a node arena plus a root index.
pub struct ParseTree {
    nodes: ChunkedVec<ParseNode>,
    root: Option<NodeId>,
}

impl ParseTree {
    pub fn new() -> ParseTree {
        ParseTree {
            nodes: ChunkedVec::new(),
            root: None,
        }
    }

    /// Adds a node. The first node added becomes the root.
    pub fn push(&mut self, node: ParseNode) -> NodeId {
        let id = NodeId(self.nodes.push(node) as u32);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &ParseNode {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("dangling parse node id {}", id.0))
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut ParseNode {
        self.nodes
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("dangling parse node id {}", id.0))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Links `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
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

    /// Iterates the direct children of `parent` in order.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(parent).first_child,
        }
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).count()
    }

    /// The `n`-th direct child, if any.
    pub fn child_at(&self, parent: NodeId, n: usize) -> Option<NodeId> {
        self.children(parent).nth(n)
    }
}

impl Default for ParseTree {
    fn default() -> Self {
        ParseTree::new()
    }
}

pub struct Children<'t> {
    tree: &'t ParseTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.get(id).next_sibling;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_node_becomes_root() {
        let mut tree = ParseTree::new();
        assert_eq!(tree.root(), None);
        let root = tree.push(ParseNode::nonterminal(ParseNodeKind::Program));
        tree.push(ParseNode::nonterminal(ParseNodeKind::Block));
        assert_eq!(tree.root(), Some(root));
    }

    #[test]
    fn add_child_links_sibling_chain() {
        let mut tree = ParseTree::new();
        let root = tree.push(ParseNode::nonterminal(ParseNodeKind::Program));
        let a = tree.push(ParseNode::nonterminal(ParseNodeKind::FunctionDecl));
        let b = tree.push(ParseNode::nonterminal(ParseNodeKind::Newline));
        let c = tree.push(ParseNode::nonterminal(ParseNodeKind::FunctionDecl));
        tree.add_child(root, a);
        tree.add_child(root, b);
        tree.add_child(root, c);

        let children: Vec<NodeId> = tree.children(root).collect();
        assert_eq!(children, vec![a, b, c]);
        assert_eq!(tree.get(a).parent, Some(root));
        assert_eq!(tree.get(c).parent, Some(root));
        assert_eq!(tree.get(c).next_sibling, None);
        assert_eq!(tree.child_count(root), 3);
        assert_eq!(tree.child_at(root, 1), Some(b));
    }
}
