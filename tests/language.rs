use pretty_assertions::assert_eq;
use vela::{EvalErrorKind, Operand, VeLaError, evaluate};

fn run(src: &str) -> Result<Option<Operand>, VeLaError> {
    evaluate(src)
}

fn assert_success(src: &str) {
    match run(src) {
        Ok(Some(Operand::Boolean(true))) => {},
        Ok(other) => panic!("Script {src:?} evaluated to {other:?}, expected true"),
        Err(e) => panic!("Script {src:?} failed: {e}"),
    }
}

fn assert_value(src: &str, expected: impl Into<Operand>) {
    match run(src) {
        Ok(Some(value)) => assert_eq!(value, expected.into(), "script: {src}"),
        Ok(None) => panic!("Script {src:?} produced no value"),
        Err(e) => panic!("Script {src:?} failed: {e}"),
    }
}

fn assert_failure(src: &str, kind: EvalErrorKind) {
    match run(src) {
        Err(VeLaError::Eval(e)) => assert_eq!(e.kind, kind, "script: {src}\nerror: {e}"),
        Err(VeLaError::Parse(e)) => panic!("Script {src:?} failed to parse: {e}"),
        Ok(value) => panic!("Script {src:?} succeeded with {value:?} but was expected to fail"),
    }
}

fn assert_parse_failure(src: &str) {
    match run(src) {
        Err(VeLaError::Parse(_)) => {},
        other => panic!("Script {src:?} was expected to fail to parse, got {other:?}"),
    }
}

#[test]
fn precedence_and_grouping() {
    assert_value("(1 + 2) * 3", 9);
    assert_value("1 + 2 * 3", 7);
    assert_value("2 * 3 + 4 * 5", 26);
    assert_value("10 - 4 - 3", 3);
    assert_value("--5", 5);
    assert_value("-2 * -3", 6);
}

#[test]
fn integer_arithmetic() {
    assert_value("7 / 2", 3);
    assert_value("-7 / 2", -3);
    assert_value("7 % 3", 1);
    assert_value("-7 % 2", -1);
    assert_failure("1 / 0", EvalErrorKind::DivisionByZero);
    assert_failure("1 % 0", EvalErrorKind::DivisionByZero);
    assert_failure("9223372036854775807 + 1", EvalErrorKind::Overflow);
    assert_failure("-9223372036854775807 - 2", EvalErrorKind::Overflow);
}

#[test]
fn real_arithmetic_widens_integers() {
    assert_value("1 + 2.5", 3.5);
    assert_value("7 / 2.0", 3.5);
    assert_value("2.25e-2 * 100", 2.25);
    assert_value(".5 + .25", 0.75);
    assert_success("1.0 / 0 = 1.0 / 0.0");
    assert_success("let nan = 0.0 / 0.0; !(nan = nan)");
}

#[test]
fn exponentiation_is_right_associative_and_binds_tighter_than_negation() {
    assert_value("2^3", 8);
    assert_value("10^0", 1);
    assert_value("3^4+2", 83);
    assert_value("2*3^2", 18);
    assert_value("3^4^2", 43_046_721);
    assert_value("-3^4^2", -43_046_721);
    assert_value("-(3^4)^2", -6561);
    assert_value("(-3^4)^2", 6561);
    assert_value("2^-1", 0.5);
    assert_value("2.0^3", 8.0);
    assert_value("4^0.5", 2.0);
    assert_value("(-2)^63", i64::MIN);
    assert_failure("2^63", EvalErrorKind::Overflow);
    assert_failure("\"a\"^2", EvalErrorKind::TypeMismatch);
    assert_parse_failure("2^");
}

#[test]
fn pattern_matches_cover_the_whole_string() {
    assert_success("\"Johnson V\" =~ \".+V\"");
    assert_success("!(\"Johnson B\" =~ \".+V\")");
    assert_success("\"12.345\" =~ \".+\\d+\"");
    assert_success("12.345 =~ \".+\\d+\"");
    assert_success("!(\"Johnson V\" =~ \"John\")");
    assert_success("\"AB\" =~ \"A\" + \"B\"");
    assert_success("let obscode = \"ABC\"; obscode =~ \"AB.*\" & !(obscode =~ \"ab.*\")");
    assert_success("let i = 0; let hits = 0; \
                    while i < 3 { let hits = if \"V\" =~ \"[A-Z]\" then hits + 1 else hits; let i = i + 1 }; \
                    hits = 3");
    assert_failure("\"a\" =~ \"(\"", EvalErrorKind::InvalidArgument);
    assert_failure("1 =~ 2", EvalErrorKind::TypeMismatch);
    assert_failure("{1} =~ \"1\"", EvalErrorKind::TypeMismatch);
}

#[test]
fn string_operations() {
    assert_value("\"R \" + \"Car\"", "R Car");
    assert_success("\"abc\" < \"abd\"");
    assert_success("\"Vis\" = \"Vis\"");
    assert_success("\"ell\" in \"hello\"");
    assert_failure("\"a\" - \"b\"", EvalErrorKind::TypeMismatch);
    assert_failure("1 + \"a\"", EvalErrorKind::TypeMismatch);
    assert_failure("\"1\" < 2", EvalErrorKind::TypeMismatch);
}

#[test]
fn comparisons_and_equality() {
    assert_success("2 < 3");
    assert_success("3 > 2");
    assert_success("2 <= 2");
    assert_success("3 >= 3");
    assert_success("2 <> 3");
    assert_success("2 = 2.0");
    assert_success("{1, 2} = {1.0, 2}");
    assert_success("!({1, 2} = {2, 1})");
    assert_success("2 in {1, 2, 3}");
    assert_success("!(\"B\" in {\"V\", \"Vis\"})");
    assert_failure("1 = \"1\"", EvalErrorKind::TypeMismatch);
    assert_failure("true < false", EvalErrorKind::TypeMismatch);
}

#[test]
fn logic_short_circuits() {
    assert_success("!false");
    assert_success("true & !false");
    assert_success("false | true");
    assert_success("!(false & (1 / 0 = 0))");
    assert_success("true | (1 / 0 = 0)");
    assert_success("false => undefined_variable");
    assert_success("!(true => false)");
    assert_success("true => true => true");
    assert_failure("1 & true", EvalErrorKind::TypeMismatch);
    assert_failure("true & 1", EvalErrorKind::TypeMismatch);
    assert_failure("!3", EvalErrorKind::TypeMismatch);
    assert_failure("true => undefined_variable", EvalErrorKind::UnknownVariable);
}

#[test]
fn not_binds_looser_than_comparison() {
    assert_success("!1 > 2");
    assert_success("!1 = 2 & true");
}

#[test]
fn conditionals() {
    assert_value("if 1 < 2 then \"yes\" else \"no\"", "yes");
    assert_value("if 1 > 2 then \"yes\" else \"no\"", "no");
    assert_value("let x = -3; if x > 0 { \"pos\" } else if x < 0 { \"neg\" } else { \"zero\" }",
                 "neg");
    assert_eq!(run("if false then 1").unwrap(), None);
    assert_failure("if 1 then 2 else 3", EvalErrorKind::TypeMismatch);
    assert_failure("1 + if false then 1", EvalErrorKind::MissingValue);
}

#[test]
fn bindings_and_constants() {
    assert_value("let x = 2; let y = x * 21; y", 42);
    assert_value("let x = 1; let x = x + 1; x", 2);
    assert_success("PI > 3.14 & PI < 3.15 & E > 2.71");
    assert_failure("const c = 1; let c = 2", EvalErrorKind::ConstantRebinding);
    assert_failure("const c = 1; const c = 2", EvalErrorKind::ConstantRebinding);
    assert_failure("let abs = 1", EvalErrorKind::ConstantRebinding);
    assert_failure("let PI = 3", EvalErrorKind::ConstantRebinding);
    assert_failure("y + 1", EvalErrorKind::UnknownVariable);
}

#[test]
fn while_loops() {
    assert_value("let i = 0; let total = 0; while i < 5 { let total = total + i; let i = i + 1 }; total",
                 10);
    assert_value("let n = 0; while false { let n = 1 }; n", 0);
    assert_eq!(run("while false { 1 }").unwrap(), None);
    assert_failure("while 1 { 2 }", EvalErrorKind::TypeMismatch);
}

#[test]
fn named_functions() {
    assert_value("fun square(x) { x * x }; square(12)", 144);
    assert_value("fun add(a: integer, b: integer): integer { a + b }; add(2, 5)", 7);
    assert_value("fun fact(n) { if n <= 1 then 1 else n * fact(n - 1) }; fact(10)", 3_628_800);
    assert_value("fun greet(name: string): string { \"Hello, \" + name }; greet(\"AAVSO\")",
                 "Hello, AAVSO");
    assert_failure("fun square(x) { x * x }; square(1, 2)", EvalErrorKind::ArityMismatch);
    assert_failure("undefined(1)", EvalErrorKind::UnknownFunction);
    assert_failure("let x = 1; x(2)", EvalErrorKind::TypeMismatch);
}

#[test]
fn function_types_are_checked() {
    assert_value("fun half(x: real): real { x / 2 }; half(3)", 1.5);
    assert_failure("fun f(s: string) { s }; f(1)", EvalErrorKind::TypeMismatch);
    assert_failure("fun f(x: integer) { x }; f(1.5)", EvalErrorKind::TypeMismatch);
    assert_failure("fun f(): integer { \"one\" }; f()", EvalErrorKind::TypeMismatch);
    assert_failure("fun f(): integer { let x = 1 }; f()", EvalErrorKind::MissingValue);
}

#[test]
fn anonymous_functions_are_values() {
    assert_value("let inc = fun(x) { x + 1 }; inc(1)", 2);
    assert_value("fun twice(f, x) { f(f(x)) }; twice(fun(x) { x * 3 }, 2)", 18);
    assert_success("let f = fun(x) { x }; f = f");
    assert_value("typeof(fun() { 1 })", "function");
}

#[test]
fn function_bodies_see_caller_bindings() {
    assert_value("fun scaled(x) { x * factor }; let factor = 3; scaled(2)", 6);
    assert_value("fun g() { let local = 1; local }; g()", 1);
    assert_failure("fun g() { let local = 1; local }; g(); local", EvalErrorKind::UnknownVariable);
}

#[test]
fn builtins_may_be_shadowed_inside_functions() {
    assert_value("fun f(abs) { abs + 1 }; f(1)", 2);
    assert_value("fun f() { let PI = 3; PI }; f()", 3);
    assert_success("fun f() { let PI = 3; PI }; f(); PI > 3.14");
}

#[test]
fn unbounded_recursion_is_a_stack_overflow() {
    assert_failure("fun f(n) { f(n + 1) }; f(0)", EvalErrorKind::StackOverflow);
    assert_value("fun f(n) { f(n + 1) }; let x = 1; x", 1);
}

#[test]
fn errors_inside_functions_are_wrapped() {
    let Err(VeLaError::Eval(e)) = run("fun inner(x) { x / 0 }; fun outer(x) { inner(x) }; outer(1)")
    else {
        panic!("expected an evaluation error");
    };

    assert_eq!(e.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(e.message, "in call to 'outer'");
    let inner = e.cause.as_deref().expect("outer wraps inner");
    assert_eq!(inner.message, "in call to 'inner'");
    assert_eq!(e.root_cause().kind, EvalErrorKind::DivisionByZero);
    assert!(e.root_cause().cause.is_none());
    assert!(e.to_string().contains("caused by"));
}

#[test]
fn statement_values() {
    assert_eq!(run("").unwrap(), None);
    assert_eq!(run("  # nothing but a comment\n").unwrap(), None);
    assert_eq!(run("let x = 1").unwrap(), None);
    assert_eq!(run("fun f() { 1 }").unwrap(), None);
    assert_value("1; 2; 3", 3);
    assert_value("1;", 1);
}

#[test]
fn comments_and_newlines() {
    assert_value("# leading comment\nlet x = 1;\n/* a\n   block */\nx + 1 # trailing", 2);
    assert_value("1 +\n2", 3);
}

#[test]
fn list_literals() {
    assert_value("{}", Vec::<Operand>::new());
    assert_value("{1, 2.5, \"V\", true}",
                 vec![Operand::from(1), Operand::from(2.5), Operand::from("V"), Operand::from(true)]);
    assert_value("str({1, {2, 3}, \"x\"})", "{1, {2, 3}, x}");
}

#[test]
fn parse_errors() {
    assert_parse_failure("1 +");
    assert_parse_failure("(1 + 2");
    assert_parse_failure("1 2");
    assert_parse_failure("let = 3");
    assert_parse_failure("\"unterminated");
    assert_parse_failure("1 @ 2");
    assert_parse_failure("9223372036854775808");
    assert_parse_failure("if true 1");
    assert_parse_failure("fun f(x: number) { x }");
}

#[test]
fn explicitly_positive_exponent_is_rejected() {
    assert_parse_failure("2.25e+2");
    assert_value("2.25e2", 225.0);
    assert_value("2.25E-2", 0.0225);
}

#[test]
fn smallest_integer_is_not_a_literal() {
    // The literal is parsed before negation and does not fit in an i64.
    assert_parse_failure("-9223372036854775808");
    assert_value("-9223372036854775807 - 1", i64::MIN);
}

#[test]
fn parse_error_positions() {
    let Err(VeLaError::Parse(e)) = run("let x = 1;\nlet y = ;") else {
        panic!("expected a parse error");
    };
    let pos = e.position();

    assert_eq!((pos.line, pos.column), (2, 9));
}

#[test]
fn eval_error_positions() {
    let Err(VeLaError::Eval(e)) = run("let x = 1;\n  x / 0") else {
        panic!("expected an evaluation error");
    };
    let pos = e.pos.expect("division errors carry a position");

    assert_eq!(pos.line, 2);
}
