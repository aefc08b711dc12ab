//! Tree-walking interpreter for Suru.
//!
//! Executes the `main` function of an [`Ast`](suru_compiler::Ast): variable
//! declarations bind string or boolean values in a flat environment, calls
//! reach the built-in `print`, and match expressions select the first arm
//! whose pattern fits. Program output goes through a caller-supplied writer;
//! errors stop evaluation immediately and surface as [`RuntimeError`].

mod interpreter;
mod value;

pub use interpreter::{Interpreter, run_program};
pub use value::{Value, Variable};

/// Errors the interpreter can stop on. The `Display` strings are the
/// diagnostics the driver prints behind an `Error: ` prefix.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("No main function found")]
    NoMainFunction,

    #[error("Function has no body")]
    FunctionHasNoBody,

    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("print() requires an argument")]
    PrintMissingArgument,

    #[error("print() requires a string or boolean argument")]
    PrintBadArgument,

    #[error("NOT operator requires boolean operand")]
    NotRequiresBoolean,

    #[error("AND operator requires boolean operands")]
    AndRequiresBooleans,

    #[error("OR operator requires boolean operands")]
    OrRequiresBooleans,

    #[error("No matching pattern in match expression")]
    NoMatchingPattern,

    #[error("Unsupported expression type in evaluation")]
    UnsupportedExpression,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
