//! Lowering from the concrete parse tree to the AST.
//!
//! A pre-order walk over the parse tree. Trivia nodes are dropped, every
//! other kind maps one-to-one — except `MATCH_STMT`, which lowers to
//! `MATCH_EXPR` since the AST keeps a single match form. Terminal nodes
//! carry their token across unchanged; child order is preserved.

use crate::tree::{NodeId, ParseNodeKind, ParseTree};

use super::{Ast, AstId, AstKind, AstNode};

/// Builds an AST from `tree`. Total over every tree the parser produces.
pub fn build_ast(tree: &ParseTree) -> Ast {
    let mut ast = Ast::new();
    let root = tree.root().and_then(|root| convert(tree, &mut ast, root));
    ast.set_root(root);
    ast
}

fn map_kind(kind: ParseNodeKind) -> Option<AstKind> {
    let mapped = match kind {
        ParseNodeKind::Program => AstKind::Program,
        ParseNodeKind::FunctionDecl => AstKind::FunctionDecl,
        ParseNodeKind::ParamList => AstKind::ParamList,
        ParseNodeKind::Param => AstKind::Param,
        ParseNodeKind::Block => AstKind::Block,
        ParseNodeKind::VarDecl => AstKind::VarDecl,
        // The AST has no statement form of match.
        ParseNodeKind::MatchStmt => AstKind::MatchExpr,
        ParseNodeKind::CallExpr => AstKind::CallExpr,
        ParseNodeKind::ArgList => AstKind::ArgList,
        ParseNodeKind::AndExpr => AstKind::AndExpr,
        ParseNodeKind::OrExpr => AstKind::OrExpr,
        ParseNodeKind::PlusExpr => AstKind::PlusExpr,
        ParseNodeKind::PipeExpr => AstKind::PipeExpr,
        ParseNodeKind::NotExpr => AstKind::NotExpr,
        ParseNodeKind::NegateExpr => AstKind::NegateExpr,
        ParseNodeKind::MatchExpr => AstKind::MatchExpr,
        ParseNodeKind::MatchArm => AstKind::MatchArm,
        ParseNodeKind::Identifier => AstKind::Identifier,
        ParseNodeKind::StringLiteral => AstKind::StringLiteral,
        ParseNodeKind::BooleanLiteral => AstKind::BooleanLiteral,
        ParseNodeKind::MatchWildcard => AstKind::MatchWildcard,
        ParseNodeKind::Comment | ParseNodeKind::Newline => return None,
    };
    Some(mapped)
}

fn convert(tree: &ParseTree, ast: &mut Ast, node_id: NodeId) -> Option<AstId> {
    let node = tree.get(node_id);
    let kind = map_kind(node.kind)?;

    let ast_node = match kind {
        AstKind::Identifier
        | AstKind::StringLiteral
        | AstKind::BooleanLiteral
        | AstKind::MatchWildcard => AstNode::terminal(kind, node.token),
        _ => AstNode::nonterminal(kind),
    };
    let ast_id = ast.push(ast_node);

    for child in tree.children(node_id) {
        if let Some(ast_child) = convert(tree, ast, child) {
            ast.add_child(ast_id, ast_child);
        }
    }

    Some(ast_id)
}
