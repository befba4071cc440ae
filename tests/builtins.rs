use pretty_assertions::assert_eq;
use vela::{EvalErrorKind, Operand, VeLaError, evaluate};

fn assert_value(src: &str, expected: impl Into<Operand>) {
    match evaluate(src) {
        Ok(Some(value)) => assert_eq!(value, expected.into(), "script: {src}"),
        Ok(None) => panic!("Script {src:?} produced no value"),
        Err(e) => panic!("Script {src:?} failed: {e}"),
    }
}

fn assert_renders(src: &str, expected: &str) {
    match evaluate(src) {
        Ok(Some(value)) => assert_eq!(value.to_human_readable_string(), expected, "script: {src}"),
        other => panic!("Script {src:?} gave {other:?}"),
    }
}

fn assert_success(src: &str) {
    assert_value(src, true);
}

fn assert_failure(src: &str, kind: EvalErrorKind) {
    match evaluate(src) {
        Err(VeLaError::Eval(e)) => assert_eq!(e.kind, kind, "script: {src}\nerror: {e}"),
        other => panic!("Script {src:?} gave {other:?}, expected {kind}"),
    }
}

#[test]
fn abs_keeps_the_argument_type() {
    assert_value("abs(-3)", 3);
    assert_value("abs(-2.5)", 2.5);
    assert_failure("abs(-9223372036854775807 - 1)", EvalErrorKind::Overflow);
}

#[test]
fn min_and_max() {
    assert_value("min(3, 2)", 2);
    assert_value("min(3, 1.5)", 1.5);
    assert_value("max(2, 2.5)", 2.5);
    assert_value("max({4, 9, 2})", 9);
    assert_value("min({4, 1.5, 2})", 1.5);
    assert_failure("min({})", EvalErrorKind::InvalidArgument);
    assert_failure("max({1, \"a\"})", EvalErrorKind::TypeMismatch);
    assert_failure("max(1, \"a\")", EvalErrorKind::TypeMismatch);
    assert_failure("max(1, 2, 3)", EvalErrorKind::ArityMismatch);
}

#[test]
fn rounding() {
    assert_value("round(2.5)", 3);
    assert_value("round(-2.5)", -3);
    assert_value("round(2.4)", 2);
    assert_value("round(7)", 7);
    assert_value("floor(2.7)", 2.0);
    assert_value("floor(-2.2)", -3.0);
    assert_value("floor(3)", 3);
    assert_value("ceil(2.1)", 3.0);
    assert_failure("round(1.0 / 0)", EvalErrorKind::InvalidArgument);
    assert_failure("round(0.0 / 0)", EvalErrorKind::InvalidArgument);
}

#[test]
fn real_valued_math() {
    assert_value("sqrt(16)", 4.0);
    assert_value("sin(0)", 0.0);
    assert_value("cos(0)", 1.0);
    assert_value("exp(0)", 1.0);
    assert_value("pow(2, 10)", 1024.0);
    assert_success("abs(ln(E) - 1) < 1e-12");
    assert_success("abs(log10(1000) - 3) < 1e-12");
    assert_success("abs(tan(PI / 4) - 1) < 1e-12");
    assert_success("let nan = sqrt(-1); !(nan = nan)");
}

#[test]
fn signatures_are_checked() {
    assert_failure("sqrt()", EvalErrorKind::ArityMismatch);
    assert_failure("sqrt(1, 2)", EvalErrorKind::ArityMismatch);
    assert_failure("sqrt(\"4\")", EvalErrorKind::TypeMismatch);
    assert_failure("length(1)", EvalErrorKind::TypeMismatch);
    assert_failure("concat()", EvalErrorKind::ArityMismatch);
    assert_failure("concat(\"a\", {1})", EvalErrorKind::TypeMismatch);
}

#[test]
fn arity_errors_name_the_accepted_signatures() {
    let Err(VeLaError::Eval(e)) = evaluate("min(1)") else {
        panic!("expected an evaluation error");
    };

    assert_eq!(e.kind, EvalErrorKind::TypeMismatch);
    assert!(e.message.contains("expected (numeric, numeric) or (list)"),
            "{}",
            e.message);
}

#[test]
fn string_builtins() {
    assert_value("length(\"héllo\")", 5);
    assert_value("length({1, 2})", 2);
    assert_value("substring(\"Johnson V\", 0, 7)", "Johnson");
    assert_value("substring(\"héllo\", 1, 3)", "él");
    assert_value("substring(\"abc\", 3, 3)", "");
    assert_failure("substring(\"abc\", 2, 1)", EvalErrorKind::IndexOutOfBounds);
    assert_failure("substring(\"abc\", 0, 4)", EvalErrorKind::IndexOutOfBounds);
    assert_failure("substring(\"abc\", -1, 2)", EvalErrorKind::IndexOutOfBounds);
    assert_value("concat(\"a\", \"b\", \"c\")", "abc");
    assert_renders("concat({1}, {2, 3}, {})", "{1, 2, 3}");
    assert_success("contains(\"Johnson V\", \"V\")");
    assert_success("startswith(\"Johnson V\", \"John\")");
    assert_success("!endswith(\"Johnson V\", \"B\")");
    assert_value("toupper(\"vis\")", "VIS");
    assert_value("tolower(\"VIS\")", "vis");
    assert_value("trim(\"  x \")", "x");
}

#[test]
fn conversions() {
    assert_value("str(400.0)", "400.0");
    assert_value("str(1e15)", "1000000000000000.0");
    assert_value("str(1e300)", "1e300");
    assert_value("str(-1e300)", "-1e300");
    assert_value("str(1.5)", "1.5");
    assert_value("str(-7)", "-7");
    assert_value("str(true)", "true");
    assert_value("str(\"s\")", "s");
    assert_value("str(abs)", "<builtin abs>");
    assert_value("fun f() { 1 }; str(f)", "<function f>");
    assert_value("integer(\"42\")", 42);
    assert_value("integer(\" -42 \")", -42);
    assert_value("integer(3.9)", 3);
    assert_value("integer(-3.9)", -3);
    assert_value("integer(\"4.7\")", 4);
    assert_failure("integer(\"x\")", EvalErrorKind::InvalidArgument);
    assert_failure("integer(1.0 / 0)", EvalErrorKind::InvalidArgument);
    assert_failure("integer(1e300)", EvalErrorKind::InvalidArgument);
    assert_value("real(2)", 2.0);
    assert_value("real(\"2.5\")", 2.5);
    assert_failure("real(\"abc\")", EvalErrorKind::InvalidArgument);
    assert_failure("real(true)", EvalErrorKind::TypeMismatch);
}

#[test]
fn type_names() {
    assert_value("typeof(1)", "integer");
    assert_value("typeof(1.0)", "real");
    assert_value("typeof(\"\")", "string");
    assert_value("typeof(1 < 2)", "boolean");
    assert_value("typeof({})", "list");
    assert_value("typeof(sqrt)", "function");
}

#[test]
fn list_builtins() {
    assert_renders("list(1, \"a\", 2.0)", "{1, a, 2.0}");
    assert_renders("list()", "{}");
    assert_value("nth({1, 2, 3}, 1)", 2);
    assert_renders("nth({1}, 5)", "{}");
    assert_renders("nth({1}, -1)", "{}");
    assert_value("head({1, 2})", 1);
    assert_renders("head({})", "{}");
    assert_renders("tail({1, 2, 3})", "{2, 3}");
    assert_renders("tail({})", "{}");
    assert_renders("append({1}, {2})", "{1, {2}}");
    assert_success("let xs = {1}; let ys = append(xs, 2); length(xs) = 1 & length(ys) = 2");
}

#[test]
fn sequences() {
    assert_renders("seq(1, 5, 1)", "{1, 2, 3, 4, 5}");
    assert_renders("seq(5, 1, -2)", "{5, 3, 1}");
    assert_renders("seq(0, 1, 0.25)", "{0.0, 0.25, 0.5, 0.75, 1.0}");
    assert_renders("seq(5, 1, 1)", "{}");
    assert_failure("seq(1, 2, 0)", EvalErrorKind::InvalidArgument);
    assert_failure("seq(1, 2, 0.0)", EvalErrorKind::InvalidArgument);
    assert_failure("seq(1, 1000000000, 1)", EvalErrorKind::InvalidArgument);
}

#[test]
fn sequences_with_steps_below_real_precision_terminate() {
    assert_value("length(seq(1e300, 1e300, 1))", 1);
    assert_success("length(seq(1e16, 1e16, 1)) = 1");
    assert_success("seq(1e16, 1e16 + 2, 1) = {1e16, 1e16 + 1, 1e16 + 2}");
    assert_value("length(seq(1e300, 1e300 + 10, 1))", 11);
}

#[test]
fn higher_order_builtins() {
    assert_renders("map(fun(x) { x * 2 }, {1, 2})", "{2, 4}");
    assert_renders("map(abs, {-1, 2.5})", "{1, 2.5}");
    assert_renders("filter(fun(x) { x > 1 }, {1, 2, 3})", "{2, 3}");
    assert_value("reduce(fun(total, x) { total + x }, {1, 2, 3}, 0)", 6);
    assert_value("reduce(fun(total, x) { total + x }, {}, \"empty\")", "empty");
    assert_value("fun longest(a, b) { if length(b) > length(a) then b else a }; \
                  reduce(longest, {\"V\", \"Vis\", \"B\"}, \"\")",
                 "Vis");
    assert_failure("filter(fun(x) { x }, {1})", EvalErrorKind::TypeMismatch);
    assert_failure("map(fun(a, b) { a }, {1})", EvalErrorKind::ArityMismatch);
    assert_failure("map(fun(x) { let y = x }, {1})", EvalErrorKind::MissingValue);
    assert_failure("map(1, {1})", EvalErrorKind::TypeMismatch);
}
