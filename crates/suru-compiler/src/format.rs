//! Pretty-printer for the concrete parse tree.
//!
//! The formatter is the parse tree's second consumer: it regenerates source
//! text from nodes and recorded trivia, proving the tree is lossless enough
//! to round-trip. Like the parser it runs an explicit frame stack instead of
//! recursing, so input depth never threatens the call stack.
//!
//! Punctuation that the parser consumed without storing (braces, parens,
//! colons, commas) is re-synthesized from fixed literals, which also
//! normalizes spacing. Output is deterministic: a second format pass over a
//! formatted file reproduces it byte for byte.

use suru_core::StringStore;

use crate::tree::{NodeId, ParseNodeKind, ParseTree};

/// One entry of the format stack, in execution order when popped.
enum Frame {
    /// Dispatch on a node's kind.
    Node(NodeId),
    /// Format all children of a node in order.
    Children(NodeId),
    /// Emit a terminal node's lexeme with its stored trivia counts.
    Terminal(NodeId),
    /// Emit a comment's text verbatim.
    Comment(NodeId),
    /// Emit a fixed literal.
    Literal(&'static str),
    /// Leave one indentation level.
    IndentDec,
}

struct Formatter<'t, 'st> {
    tree: &'t ParseTree,
    strings: &'st StringStore,
    stack: Vec<Frame>,
    out: String,
    indent: usize,
    at_line_start: bool,
    trailing_newlines: usize,
}

/// Formats `tree` back to source text.
pub fn format_tree(tree: &ParseTree, strings: &StringStore) -> String {
    let mut formatter = Formatter {
        tree,
        strings,
        stack: Vec::new(),
        out: String::new(),
        indent: 0,
        at_line_start: true,
        trailing_newlines: 0,
    };
    if let Some(root) = tree.root() {
        formatter.stack.push(Frame::Node(root));
    }
    formatter.run();
    formatter.out
}

impl Formatter<'_, '_> {
    fn run(&mut self) {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Node(id) => self.node(id),
                Frame::Children(id) => {
                    let children: Vec<NodeId> = self.tree.children(id).collect();
                    for child in children.into_iter().rev() {
                        self.stack.push(Frame::Node(child));
                    }
                }
                Frame::Terminal(id) => self.terminal(id),
                Frame::Comment(id) => self.comment(id),
                Frame::Literal(text) => self.write(text),
                Frame::IndentDec => self.indent -= 1,
            }
        }
    }

    fn node(&mut self, id: NodeId) {
        let kind = self.tree.get(id).kind;
        match kind {
            ParseNodeKind::Identifier
            | ParseNodeKind::StringLiteral
            | ParseNodeKind::BooleanLiteral
            | ParseNodeKind::MatchWildcard => self.stack.push(Frame::Terminal(id)),

            ParseNodeKind::Comment => self.stack.push(Frame::Comment(id)),
            ParseNodeKind::Newline => self.write("\n"),

            ParseNodeKind::Program | ParseNodeKind::Param | ParseNodeKind::ParamList => {
                if kind == ParseNodeKind::ParamList {
                    self.stack.push(Frame::Literal(")"));
                    self.stack.push(Frame::Children(id));
                    self.stack.push(Frame::Literal("("));
                } else {
                    self.stack.push(Frame::Children(id));
                }
            }

            ParseNodeKind::FunctionDecl => {
                let mut children = self.tree.children(id);
                let name = children.next();
                let params = children.next();
                let block = children.next();
                self.stack.push(Frame::Literal("\n"));
                if let Some(block) = block {
                    self.stack.push(Frame::Node(block));
                }
                if let Some(params) = params {
                    self.stack.push(Frame::Node(params));
                }
                self.stack.push(Frame::Literal(": "));
                if let Some(name) = name {
                    self.stack.push(Frame::Node(name));
                }
            }

            ParseNodeKind::Block => {
                self.indent += 1;
                let children: Vec<NodeId> = self.tree.children(id).collect();
                let first_is_newline = children
                    .first()
                    .is_some_and(|&c| self.tree.get(c).kind == ParseNodeKind::Newline);
                let last_is_newline = children
                    .last()
                    .is_some_and(|&c| self.tree.get(c).kind == ParseNodeKind::Newline);

                self.stack.push(Frame::Literal("}"));
                if !children.is_empty() && !last_is_newline {
                    self.stack.push(Frame::Literal(" "));
                }
                self.stack.push(Frame::IndentDec);
                for child in children.iter().rev() {
                    self.stack.push(Frame::Node(*child));
                }
                if !children.is_empty() && !first_is_newline {
                    self.stack.push(Frame::Literal(" "));
                }
                self.stack.push(Frame::Literal(" {"));
            }

            ParseNodeKind::VarDecl => {
                let mut children = self.tree.children(id);
                let name = children.next();
                let value = children.next();
                if let Some(value) = value {
                    self.stack.push(Frame::Node(value));
                }
                self.stack.push(Frame::Literal(": "));
                if let Some(name) = name {
                    self.stack.push(Frame::Node(name));
                }
            }

            ParseNodeKind::CallExpr => {
                let mut children = self.tree.children(id);
                let callee = children.next();
                let args = children.next();
                self.stack.push(Frame::Literal(")"));
                if let Some(args) = args {
                    self.stack.push(Frame::Node(args));
                }
                self.stack.push(Frame::Literal("("));
                if let Some(callee) = callee {
                    self.stack.push(Frame::Node(callee));
                }
            }

            ParseNodeKind::ArgList => {
                // Separators were consumed during parsing; re-synthesize a
                // ", " between consecutive non-trivia arguments.
                let children: Vec<NodeId> = self.tree.children(id).collect();
                let mut frames: Vec<Frame> = Vec::new();
                let mut previous_was_arg = false;
                for child in children {
                    let trivia = matches!(
                        self.tree.get(child).kind,
                        ParseNodeKind::Comment | ParseNodeKind::Newline
                    );
                    if !trivia && previous_was_arg {
                        frames.push(Frame::Literal(", "));
                    }
                    frames.push(Frame::Node(child));
                    previous_was_arg = !trivia;
                }
                for frame in frames.into_iter().rev() {
                    self.stack.push(frame);
                }
            }

            ParseNodeKind::MatchExpr | ParseNodeKind::MatchStmt => {
                let children: Vec<NodeId> = self.tree.children(id).collect();
                self.stack.push(Frame::Literal(" }"));
                for arm in children.iter().skip(1).rev() {
                    self.stack.push(Frame::Node(*arm));
                }
                self.stack.push(Frame::Literal(" {"));
                if let Some(&subject) = children.first() {
                    self.stack.push(Frame::Node(subject));
                }
                self.stack.push(Frame::Literal("match "));
            }

            ParseNodeKind::MatchArm => {
                let mut children = self.tree.children(id);
                let pattern = children.next();
                let body = children.next();
                if let Some(body) = body {
                    self.stack.push(Frame::Node(body));
                }
                self.stack.push(Frame::Literal(": "));
                if let Some(pattern) = pattern {
                    self.stack.push(Frame::Node(pattern));
                }
                self.stack.push(Frame::Literal(" "));
            }

            ParseNodeKind::AndExpr
            | ParseNodeKind::OrExpr
            | ParseNodeKind::PlusExpr
            | ParseNodeKind::PipeExpr => {
                let operator = match kind {
                    ParseNodeKind::AndExpr => " and ",
                    ParseNodeKind::OrExpr => " or ",
                    ParseNodeKind::PlusExpr => " + ",
                    _ => " | ",
                };
                let mut children = self.tree.children(id);
                let left = children.next();
                let right = children.next();
                if let Some(right) = right {
                    self.stack.push(Frame::Node(right));
                }
                self.stack.push(Frame::Literal(operator));
                if let Some(left) = left {
                    self.stack.push(Frame::Node(left));
                }
            }

            ParseNodeKind::NotExpr | ParseNodeKind::NegateExpr => {
                let operand = self.tree.children(id).next();
                if let Some(operand) = operand {
                    self.stack.push(Frame::Node(operand));
                }
                self.stack.push(Frame::Literal(if kind == ParseNodeKind::NotExpr {
                    "not "
                } else {
                    "-"
                }));
            }
        }
    }

    fn terminal(&mut self, id: NodeId) {
        let node = *self.tree.get(id);
        for _ in 0..node.leading_newlines {
            self.write("\n");
        }
        for _ in 0..node.leading_spaces {
            self.write(" ");
        }
        match node.token.text {
            Some(text) => {
                let text = self.strings.resolve(text).to_owned();
                self.write(&text);
            }
            None => {
                if let Some(lexeme) = node.token.kind.canonical_lexeme() {
                    self.write(lexeme);
                }
            }
        }
        for _ in 0..node.trailing_spaces {
            self.write(" ");
        }
    }

    fn comment(&mut self, id: NodeId) {
        let node = *self.tree.get(id);
        if let Some(text) = node.token.text {
            let text = self.strings.resolve(text).to_owned();
            self.write(&text);
        }
    }

    /// Appends text, injecting one tab per indent level whenever a
    /// non-newline character lands at the start of a line. Newline runs are
    /// capped at two: recorded newline trivia overlaps with the line breaks
    /// the per-kind rules synthesize, and the cap keeps repeated formatting
    /// passes stable.
    fn write(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                if self.trailing_newlines >= 2 {
                    continue;
                }
                self.out.push('\n');
                self.trailing_newlines += 1;
                self.at_line_start = true;
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent {
                    self.out.push('\t');
                }
                self.at_line_start = false;
            }
            self.trailing_newlines = 0;
            self.out.push(c);
        }
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
