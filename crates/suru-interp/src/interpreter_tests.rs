use indoc::indoc;
use suru_compiler::ast::build_ast;
use suru_compiler::parser::parse_source;
use suru_core::StringStore;

use crate::RuntimeError;

use super::run_program;

/// Parses, lowers, and runs `source`, returning captured stdout.
fn run(source: &str) -> Result<String, RuntimeError> {
    let mut strings = StringStore::new();
    let parse = parse_source(source, &mut strings);
    assert!(
        parse.is_valid(),
        "unexpected syntax errors: {:?}",
        parse.errors
    );
    let ast = build_ast(&parse.tree);
    let mut out = Vec::new();
    run_program(&ast, &mut strings, &mut out)?;
    Ok(String::from_utf8(out).expect("program output is UTF-8"))
}

fn run_err(source: &str) -> RuntimeError {
    run(source).expect_err("expected a runtime error")
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn hello_world() {
    let source = indoc! {r#"
    main : () {
        print("Hello, World!\n")
    }
    "#};
    assert_eq!(run(source).unwrap(), "Hello, World!\n");
}

#[test]
fn variable_binding() {
    let source = indoc! {r#"
    main : () {
        greeting : "hi\n"
        print(greeting)
    }
    "#};
    assert_eq!(run(source).unwrap(), "hi\n");
}

#[test]
fn boolean_match_expression() {
    let source = indoc! {r#"
    main : () {
        x : true
        y : match x { true : "T" false : "F" }
        print(y)
    }
    "#};
    assert_eq!(run(source).unwrap(), "T");
}

#[test]
fn undefined_variable() {
    let err = run_err("main : () { print(nope) }\n");
    assert_eq!(err.to_string(), "Undefined variable 'nope'");
}

// ============================================================================
// main lookup
// ============================================================================

#[test]
fn missing_main_is_an_error() {
    let err = run_err("other : () {\n    print(\"x\")\n}\n");
    assert_eq!(err.to_string(), "No main function found");
}

#[test]
fn non_main_functions_are_ignored() {
    let source = indoc! {r#"
    helper : () {
        print("never runs")
    }
    main : () {
        print("only this")
    }
    "#};
    assert_eq!(run(source).unwrap(), "only this");
}

// ============================================================================
// print
// ============================================================================

#[test]
fn print_boolean_literal_and_variable() {
    let source = indoc! {r#"
    main : () {
        flag : false
        print(true)
        print(flag)
    }
    "#};
    assert_eq!(run(source).unwrap(), "truefalse");
}

#[test]
fn print_expands_escape_sequences() {
    let source = r#"main : () { print("a\tb\r\n\\q\"end") }"#;
    assert_eq!(run(source).unwrap(), "a\tb\r\n\\q\"end");
}

#[test]
fn unknown_escapes_pass_through() {
    let source = r#"main : () { print("a\zb") }"#;
    assert_eq!(run(source).unwrap(), "a\\zb");
}

#[test]
fn print_variable_holding_embedded_newline() {
    let source = indoc! {r#"
    main : () {
        lines : "one\ntwo\n"
        print(lines)
    }
    "#};
    assert_eq!(run(source).unwrap(), "one\ntwo\n");
}

#[test]
fn print_without_argument() {
    let source = "main : () {\n    print()\n}\n";
    let err = run_err(source);
    assert_eq!(err.to_string(), "print() requires an argument");
}

#[test]
fn unknown_function() {
    let err = run_err("main : () {\n    launch(\"x\")\n}\n");
    assert_eq!(err.to_string(), "Unknown function 'launch'");
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn rebinding_updates_in_place() {
    let source = indoc! {r#"
    main : () {
        x : "first"
        x : "second\n"
        print(x)
    }
    "#};
    assert_eq!(run(source).unwrap(), "second\n");
}

#[test]
fn rebinding_can_change_type() {
    let source = indoc! {r#"
    main : () {
        x : "text"
        x : true
        print(x)
    }
    "#};
    assert_eq!(run(source).unwrap(), "true");
}

#[test]
fn variables_chain_through_identifiers() {
    let source = indoc! {r#"
    main : () {
        a : "hop\n"
        b : a
        print(b)
    }
    "#};
    assert_eq!(run(source).unwrap(), "hop\n");
}

// ============================================================================
// Boolean operators
// ============================================================================

#[test]
fn boolean_logic() {
    let source = indoc! {r#"
    main : () {
        a : true and false
        b : true or false
        c : not true
        print(a)
        print(b)
        print(c)
    }
    "#};
    assert_eq!(run(source).unwrap(), "falsetruefalse");
}

#[test]
fn and_requires_booleans() {
    let source = "main : () {\n    x : \"s\" and true\n}\n";
    assert_eq!(
        run_err(source).to_string(),
        "AND operator requires boolean operands"
    );
}

#[test]
fn or_requires_booleans() {
    let source = "main : () {\n    x : true or \"s\"\n}\n";
    assert_eq!(
        run_err(source).to_string(),
        "OR operator requires boolean operands"
    );
}

#[test]
fn not_requires_boolean() {
    let source = "main : () {\n    x : not \"s\"\n}\n";
    assert_eq!(
        run_err(source).to_string(),
        "NOT operator requires boolean operand"
    );
}

#[test]
fn composition_has_no_evaluation() {
    let source = "main : () {\n    x : a + b\n}\n";
    assert_eq!(
        run_err(source).to_string(),
        "Unsupported expression type in evaluation"
    );
}

// ============================================================================
// Match
// ============================================================================

#[test]
fn string_patterns_match_by_content() {
    let source = indoc! {r#"
    main : () {
        word : "b"
        out : match word { "a" : "first" "b" : "second" }
        print(out)
    }
    "#};
    assert_eq!(run(source).unwrap(), "second");
}

#[test]
fn wildcard_matches_anything() {
    let source = indoc! {r#"
    main : () {
        out : match true { false : "no" _ : "caught" }
        print(out)
    }
    "#};
    assert_eq!(run(source).unwrap(), "caught");
}

#[test]
fn arms_are_tried_in_declaration_order() {
    let source = indoc! {r#"
    main : () {
        out : match true { _ : "wildcard wins" true : "too late" }
        print(out)
    }
    "#};
    assert_eq!(run(source).unwrap(), "wildcard wins");
}

#[test]
fn no_matching_pattern_is_an_error() {
    let source = indoc! {r#"
    main : () {
        out : match true { false : "no" }
    }
    "#};
    assert_eq!(
        run_err(source).to_string(),
        "No matching pattern in match expression"
    );
}

#[test]
fn boolean_pattern_does_not_match_string_subject() {
    let source = indoc! {r#"
    main : () {
        out : match "true" { true : "boolean" _ : "string" }
        print(out)
    }
    "#};
    assert_eq!(run(source).unwrap(), "string");
}

#[test]
fn match_statement_form_is_ignored_by_blocks() {
    // A bare match statement parses and lowers, but block execution only
    // runs declarations and calls.
    let source = indoc! {r#"
    main : () {
        match true { _ : print("skipped") }
        print("ran\n")
    }
    "#};
    assert_eq!(run(source).unwrap(), "ran\n");
}
