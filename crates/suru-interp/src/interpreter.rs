//! AST execution.

use std::io::Write;

use suru_compiler::ast::{Ast, AstId, AstKind};
use suru_compiler::token::TokenKind;
use suru_core::{StringId, StringStore};

use crate::value::{Value, Variable};
use crate::RuntimeError;

pub struct Interpreter<'a, W> {
    ast: &'a Ast,
    strings: &'a StringStore,
    variables: Vec<Variable>,
    out: W,
    main_name: StringId,
    print_name: StringId,
}

/// Executes `ast`'s `main` function, writing program output to `out`.
pub fn run_program<W: Write>(
    ast: &Ast,
    strings: &mut StringStore,
    out: W,
) -> Result<(), RuntimeError> {
    Interpreter::new(ast, strings, out).run()
}

impl<'a, W: Write> Interpreter<'a, W> {
    /// The store is borrowed mutably just long enough to intern the names
    /// the interpreter compares handles against.
    pub fn new(ast: &'a Ast, strings: &'a mut StringStore, out: W) -> Interpreter<'a, W> {
        let main_name = strings.intern_str("main");
        let print_name = strings.intern_str("print");
        Interpreter {
            ast,
            strings,
            variables: Vec::new(),
            out,
            main_name,
            print_name,
        }
    }

    /// Locates `main` by interned-handle comparison and runs its body.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let ast = self.ast;
        let root = ast.root().ok_or(RuntimeError::NoMainFunction)?;

        let main_fn = ast
            .children(root)
            .find(|&child| {
                ast.get(child).kind == AstKind::FunctionDecl
                    && ast.child_at(child, 0).is_some_and(|name| {
                        let name = ast.get(name);
                        name.kind == AstKind::Identifier
                            && name.token.text == Some(self.main_name)
                    })
            })
            .ok_or(RuntimeError::NoMainFunction)?;

        let block = ast
            .children(main_fn)
            .find(|&child| ast.get(child).kind == AstKind::Block)
            .ok_or(RuntimeError::FunctionHasNoBody)?;

        self.execute_block(block)
    }

    /// Runs a block's statements in order. Kinds other than variable
    /// declarations and calls are ignored (future statement forms).
    fn execute_block(&mut self, block: AstId) -> Result<(), RuntimeError> {
        let ast = self.ast;
        for child in ast.children(block) {
            match ast.get(child).kind {
                AstKind::VarDecl => self.execute_var_decl(child)?,
                AstKind::CallExpr => self.execute_call(child)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn execute_var_decl(&mut self, decl: AstId) -> Result<(), RuntimeError> {
        let ast = self.ast;
        let name = ast
            .child_at(decl, 0)
            .filter(|&n| ast.get(n).kind == AstKind::Identifier)
            .and_then(|n| ast.get(n).token.text)
            .ok_or(RuntimeError::UnsupportedExpression)?;
        let value_node = ast
            .child_at(decl, 1)
            .ok_or(RuntimeError::UnsupportedExpression)?;

        let value = self.evaluate(value_node)?;
        self.store(name, value);
        Ok(())
    }

    /// Only the built-in `print` is callable; it accepts exactly one literal
    /// or identifier argument.
    fn execute_call(&mut self, call: AstId) -> Result<(), RuntimeError> {
        let ast = self.ast;
        let callee = ast
            .child_at(call, 0)
            .filter(|&n| ast.get(n).kind == AstKind::Identifier)
            .and_then(|n| ast.get(n).token.text)
            .ok_or(RuntimeError::UnsupportedExpression)?;
        let args = ast
            .child_at(call, 1)
            .filter(|&n| ast.get(n).kind == AstKind::ArgList)
            .ok_or(RuntimeError::UnsupportedExpression)?;

        if callee != self.print_name {
            let name = self.strings.resolve(callee).to_string();
            return Err(RuntimeError::UnknownFunction(name));
        }

        let arg = ast
            .children(args)
            .next()
            .ok_or(RuntimeError::PrintMissingArgument)?;
        let arg_node = ast.get(arg);
        match arg_node.kind {
            AstKind::StringLiteral => {
                let text = arg_node
                    .token
                    .text
                    .ok_or(RuntimeError::PrintBadArgument)?;
                self.print_string(text)
            }
            AstKind::BooleanLiteral => self.print_bool(arg_node.token.kind == TokenKind::True),
            AstKind::Identifier => {
                let name = arg_node.token.text.ok_or(RuntimeError::PrintBadArgument)?;
                match self.lookup(name) {
                    Some(Value::Str(text)) => self.print_string(text),
                    Some(Value::Bool(b)) => self.print_bool(b),
                    None => Err(RuntimeError::UndefinedVariable(
                        self.strings.resolve(name).to_string(),
                    )),
                }
            }
            _ => Err(RuntimeError::PrintBadArgument),
        }
    }

    /// Writes a string value: the stored lexeme minus its quote bytes, with
    /// `\n` `\t` `\r` `\\` `\"` expanded. Unrecognized escape sequences pass
    /// through unchanged, backslash included.
    fn print_string(&mut self, text: StringId) -> Result<(), RuntimeError> {
        let bytes = self.strings.resolve_bytes(text);
        let inner = if bytes.len() >= 2 {
            &bytes[1..bytes.len() - 1]
        } else {
            &[][..]
        };

        let mut expanded = Vec::with_capacity(inner.len());
        let mut i = 0;
        while i < inner.len() {
            if inner[i] == b'\\' && i + 1 < inner.len() {
                match inner[i + 1] {
                    b'n' => expanded.push(b'\n'),
                    b't' => expanded.push(b'\t'),
                    b'r' => expanded.push(b'\r'),
                    b'\\' => expanded.push(b'\\'),
                    b'"' => expanded.push(b'"'),
                    _ => {
                        expanded.push(b'\\');
                        i += 1;
                        continue;
                    }
                }
                i += 2;
            } else {
                expanded.push(inner[i]);
                i += 1;
            }
        }

        self.out.write_all(&expanded)?;
        Ok(())
    }

    fn print_bool(&mut self, value: bool) -> Result<(), RuntimeError> {
        let text: &[u8] = if value { b"true" } else { b"false" };
        self.out.write_all(text)?;
        Ok(())
    }

    /// Value of an expression node.
    fn evaluate(&mut self, expr: AstId) -> Result<Value, RuntimeError> {
        let ast = self.ast;
        let node = ast.get(expr);
        match node.kind {
            AstKind::BooleanLiteral => Ok(Value::Bool(node.token.kind == TokenKind::True)),

            AstKind::StringLiteral => node
                .token
                .text
                .map(Value::Str)
                .ok_or(RuntimeError::UnsupportedExpression),

            AstKind::Identifier => {
                let name = node
                    .token
                    .text
                    .ok_or(RuntimeError::UnsupportedExpression)?;
                match self.lookup(name) {
                    Some(value) => Ok(value),
                    None => Err(RuntimeError::UndefinedVariable(
                        self.strings.resolve(name).to_string(),
                    )),
                }
            }

            AstKind::NotExpr => {
                let operand = ast
                    .children(expr)
                    .next()
                    .ok_or(RuntimeError::UnsupportedExpression)?;
                match self.evaluate(operand)? {
                    Value::Bool(b) => Ok(Value::Bool(!b)),
                    Value::Str(_) => Err(RuntimeError::NotRequiresBoolean),
                }
            }

            AstKind::AndExpr | AstKind::OrExpr => {
                let mut children = ast.children(expr);
                let left = children
                    .next()
                    .ok_or(RuntimeError::UnsupportedExpression)?;
                let right = children
                    .next()
                    .ok_or(RuntimeError::UnsupportedExpression)?;
                let type_error = if node.kind == AstKind::AndExpr {
                    RuntimeError::AndRequiresBooleans
                } else {
                    RuntimeError::OrRequiresBooleans
                };

                // No short-circuiting: both operands evaluate.
                let Value::Bool(left) = self.evaluate(left)? else {
                    return Err(type_error);
                };
                let Value::Bool(right) = self.evaluate(right)? else {
                    return Err(type_error);
                };
                Ok(Value::Bool(if node.kind == AstKind::AndExpr {
                    left && right
                } else {
                    left || right
                }))
            }

            AstKind::MatchExpr => self.evaluate_match(expr),

            // Composition, pipeline, and negation parse but have no
            // evaluation semantics yet.
            _ => Err(RuntimeError::UnsupportedExpression),
        }
    }

    /// Arms are tried in declaration order; the first matching pattern's
    /// body is the result.
    fn evaluate_match(&mut self, expr: AstId) -> Result<Value, RuntimeError> {
        let ast = self.ast;
        let mut children = ast.children(expr);
        let subject_node = children
            .next()
            .ok_or(RuntimeError::UnsupportedExpression)?;
        let subject = self.evaluate(subject_node)?;

        for arm in children {
            if ast.get(arm).kind != AstKind::MatchArm {
                return Err(RuntimeError::UnsupportedExpression);
            }
            let pattern = ast
                .children(arm)
                .next()
                .ok_or(RuntimeError::UnsupportedExpression)?;
            let pattern_node = ast.get(pattern);

            let matches = match (pattern_node.kind, subject) {
                (AstKind::MatchWildcard, _) => true,
                (AstKind::BooleanLiteral, Value::Bool(b)) => {
                    (pattern_node.token.kind == TokenKind::True) == b
                }
                // Interned handles make string pattern equality an identity
                // check, quotes included.
                (AstKind::StringLiteral, Value::Str(s)) => pattern_node.token.text == Some(s),
                _ => false,
            };

            if matches {
                let body = ast
                    .child_at(arm, 1)
                    .ok_or(RuntimeError::UnsupportedExpression)?;
                return self.evaluate(body);
            }
        }

        Err(RuntimeError::NoMatchingPattern)
    }

    // === Variable environment ===========================================

    /// Update in place when the name is already bound, append otherwise.
    fn store(&mut self, name: StringId, value: Value) {
        for variable in &mut self.variables {
            if variable.name == name {
                variable.value = value;
                return;
            }
        }
        self.variables.push(Variable { name, value });
    }

    fn lookup(&self, name: StringId) -> Option<Value> {
        self.variables
            .iter()
            .find(|variable| variable.name == name)
            .map(|variable| variable.value)
    }
}

#[cfg(test)]
#[path = "interpreter_tests.rs"]
mod tests;
